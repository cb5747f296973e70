//! # Typemeld Schema
//!
//! Parser and declaration model for the typemeld type-definition DSL.
//!
//! This crate provides:
//! - A line scanner and a recursive type-expression parser
//! - Declarations for structs, interfaces, functions and type aliases
//! - Document-level validation (duplicates, unresolved parents)
//! - An inheritance-resolved intermediate representation for code generation
//!
//! Parsing never fails. Malformed units are skipped and reported as
//! [`Diagnostic`] values alongside the [`Document`].
//!
//! ```
//! use typemeld_schema::parse;
//!
//! let output = parse("struct Person {\n  id: Int32\n  name: String?\n}");
//! assert_eq!(output.document.len(), 1);
//! assert!(output.diagnostics.is_empty());
//! ```

pub mod declarations;
pub mod diagnostics;
pub mod ir;
pub mod parser;
pub mod scanner;
pub mod type_expr;
pub mod types;
pub mod validation;

pub use declarations::{
    Declaration, Document, FunctionDecl, InterfaceDecl, MethodSignature, StructDecl,
    TypeAliasDecl,
};
pub use diagnostics::{Diagnostic, DiagnosticClass, DiagnosticKind, Diagnostics};
pub use ir::{DocumentIr, ResolvedDeclaration, ResolvedInterface, ResolvedStruct};
pub use parser::{ParseOutput, parse};
pub use type_expr::parse_type_expression;
pub use types::{Field, PrimitiveType, TypeExpression};
