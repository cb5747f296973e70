//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions.
//!
//! ```
//! use typemeld::prelude::*;
//! ```

// Schema types
pub use typemeld_schema::{
    Declaration, Diagnostic, DiagnosticClass, DiagnosticKind, Document, DocumentIr, Field,
    ParseOutput, PrimitiveType, TypeExpression, parse,
};

// Codegen types
pub use typemeld_codegen::{
    CodegenError, Generated, Generator, GeneratorConfig, Target, TargetRenderer, generate_all,
    generate_from_dsl, generate_from_file, generate_rust, generate_swift, generate_typescript,
};
