//! # Typemeld Codegen
//!
//! Code generation from typemeld documents.
//!
//! This crate provides:
//! - TypeScript, Swift and Rust renderers behind one [`TargetRenderer`] seam
//! - A shared driver that renders declarations in document order
//! - Generator configuration (indentation, visibility, derives, banner)
//! - File and string entry points
//!
//! Every entry point resolves inheritance once through
//! [`typemeld_schema::DocumentIr`] and never fails on bad input: what cannot
//! be rendered is reported in [`Generated::diagnostics`].

pub mod config;
pub mod error;
pub mod generator;
pub mod targets;

pub use config::GeneratorConfig;
pub use error::CodegenError;
pub use generator::{Generated, Generator, Target, TargetRenderer};
pub use targets::{RustRenderer, SwiftRenderer, TypeScriptRenderer};

use typemeld_schema::{Document, DocumentIr};

fn generate(document: &Document, target: Target) -> Generated {
    let ir = DocumentIr::from_document(document);
    let config = GeneratorConfig::default();
    Generator::new(&ir, &config).generate(target)
}

/// Renders a document as TypeScript with the default configuration.
#[must_use]
pub fn generate_typescript(document: &Document) -> Generated {
    generate(document, Target::TypeScript)
}

/// Renders a document as Swift with the default configuration.
#[must_use]
pub fn generate_swift(document: &Document) -> Generated {
    generate(document, Target::Swift)
}

/// Renders a document as Rust with the default configuration.
#[must_use]
pub fn generate_rust(document: &Document) -> Generated {
    generate(document, Target::Rust)
}

/// Renders a document for every target from a single resolution pass.
///
/// # Returns
/// One [`Generated`] per target, in [`Target::ALL`] order.
#[must_use]
pub fn generate_all(document: &Document, config: &GeneratorConfig) -> Vec<Generated> {
    let ir = DocumentIr::from_document(document);
    let generator = Generator::new(&ir, config);
    Target::ALL
        .iter()
        .map(|target| generator.generate(*target))
        .collect()
}

/// Parses DSL text and renders it for one target.
///
/// # Arguments
/// * `dsl` - DSL source text
/// * `target` - Output language
/// * `config` - Generator options
///
/// # Returns
/// The rendered text, with parse diagnostics ahead of resolution and
/// rendering diagnostics.
#[must_use]
pub fn generate_from_dsl(dsl: &str, target: Target, config: &GeneratorConfig) -> Generated {
    let (document, mut diagnostics) = typemeld_schema::parse(dsl).into_parts();
    let ir = DocumentIr::from_document(&document);
    let mut generated = Generator::new(&ir, config).generate(target);
    diagnostics.append(&mut generated.diagnostics);
    generated.diagnostics = diagnostics;
    generated
}

/// Reads a DSL file and renders it for one target.
///
/// # Arguments
/// * `path` - Path to the DSL file
/// * `target` - Output language
/// * `config` - Generator options
///
/// # Errors
/// Returns `CodegenError::Io` if the file cannot be read.
pub fn generate_from_file(
    path: &std::path::Path,
    target: Target,
    config: &GeneratorConfig,
) -> Result<Generated, CodegenError> {
    let dsl = std::fs::read_to_string(path)?;
    Ok(generate_from_dsl(&dsl, target, config))
}
