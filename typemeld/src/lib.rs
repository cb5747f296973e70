//! # Typemeld
//!
//! Define data contracts once in a compact DSL and generate matching
//! TypeScript, Swift and Rust declarations.
//!
//! ## Features
//!
//! - **Line-oriented DSL** - structs, interfaces, function signatures and type aliases
//! - **Recursive types** - arrays, generics, `Record<K, V>` maps and inline records
//! - **Inheritance** - struct fields flattened root first, interfaces linked natively
//! - **Non-fatal diagnostics** - malformed input is skipped and reported by value
//!
//! ## Quick Start
//!
//! ```
//! use typemeld::prelude::*;
//!
//! let output = parse("struct Person {\n  id: Int32\n  tags: String[]\n}");
//! let rust = generate_rust(&output.document);
//! assert_eq!(rust.text, "struct Person {\n  id: i32,\n  tags: Vec<String>,\n}\n");
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - DSL parsing, declarations and inheritance resolution
//! - [`codegen`] - Target renderers and generation entry points

pub mod prelude;

/// DSL parsing, declarations and inheritance resolution.
pub mod schema {
    pub use typemeld_schema::*;
}

/// Code generation for TypeScript, Swift and Rust.
pub mod codegen {
    pub use typemeld_codegen::*;
}

// Re-export commonly used items at the crate root
pub use typemeld_codegen::{
    CodegenError, Generated, GeneratorConfig, Target, generate_all, generate_from_dsl,
    generate_from_file, generate_rust, generate_swift, generate_typescript,
};
pub use typemeld_schema::{Diagnostic, DiagnosticKind, Document, ParseOutput, parse};
