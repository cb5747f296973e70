//! Target registry and the shared rendering driver.

use std::fmt;
use std::str::FromStr;

use typemeld_schema::{
    Diagnostic, DiagnosticClass, DiagnosticKind, Diagnostics, DocumentIr, Field, FunctionDecl,
    ResolvedDeclaration, ResolvedInterface, ResolvedStruct, TypeAliasDecl, TypeExpression,
};

use crate::config::GeneratorConfig;
use crate::error::CodegenError;
use crate::targets::{RustRenderer, SwiftRenderer, TypeScriptRenderer};

/// Output language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// TypeScript declarations.
    TypeScript,
    /// Swift declarations.
    Swift,
    /// Rust declarations.
    Rust,
}

impl Target {
    /// Every target, in the order `generate_all` renders them.
    pub const ALL: [Self; 3] = [Self::TypeScript, Self::Swift, Self::Rust];

    /// Human readable name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::TypeScript => "TypeScript",
            Self::Swift => "Swift",
            Self::Rust => "Rust",
        }
    }

    /// File extension for generated output, without the dot.
    #[must_use]
    pub const fn file_extension(&self) -> &'static str {
        match self {
            Self::TypeScript => "ts",
            Self::Swift => "swift",
            Self::Rust => "rs",
        }
    }

    /// Creates the renderer for this target.
    #[must_use]
    pub fn renderer<'a>(&self, config: &'a GeneratorConfig) -> Box<dyn TargetRenderer + 'a> {
        match self {
            Self::TypeScript => Box::new(TypeScriptRenderer::new(config)),
            Self::Swift => Box::new(SwiftRenderer::new(config)),
            Self::Rust => Box::new(RustRenderer::new(config)),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Target {
    type Err = CodegenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "typescript" | "ts" => Ok(Self::TypeScript),
            "swift" => Ok(Self::Swift),
            "rust" | "rs" => Ok(Self::Rust),
            _ => Err(CodegenError::unknown_target(s)),
        }
    }
}

/// Rendered output for one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    /// Target the text was rendered for.
    pub target: Target,
    /// Rendered declarations, one block per declaration, in document order.
    pub text: String,
    /// Resolution diagnostics followed by this target's own.
    pub diagnostics: Vec<Diagnostic>,
}

impl Generated {
    /// Diagnostics for declarations this target skipped or types it
    /// approximated.
    pub fn capability_diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.class() == DiagnosticClass::TargetCapability)
    }
}

/// Per-target rendering rules.
///
/// Implementations turn resolved declarations into target source. Struct
/// fields arrive already flattened; interfaces carry only their own methods
/// and a parent name to link to.
pub trait TargetRenderer {
    /// Target this renderer produces.
    fn target(&self) -> Target;

    /// Spells a type expression.
    fn render_type(&self, ty: &TypeExpression) -> String;

    /// Applies the target's optional marker to an already rendered type.
    fn mark_optional(&self, rendered: String) -> String;

    /// Returns true when `ty` itself (not its nested types) renders with
    /// less structure than it was declared with.
    fn approximates(&self, _ty: &TypeExpression) -> bool {
        false
    }

    /// Spells a field's type, with the optional marker when the field is
    /// optional.
    fn render_field_type(&self, field: &Field) -> String {
        let rendered = self.render_type(&field.ty);
        if field.optional {
            self.mark_optional(rendered)
        } else {
            rendered
        }
    }

    /// Renders a struct.
    fn render_struct(&self, decl: &ResolvedStruct) -> String;

    /// Renders an interface.
    fn render_interface(&self, decl: &ResolvedInterface) -> String;

    /// Renders a standalone function, or `None` when the target cannot
    /// express a body-less prototype.
    fn render_function(&self, decl: &FunctionDecl) -> Option<String>;

    /// Renders a type alias.
    fn render_type_alias(&self, decl: &TypeAliasDecl) -> String;
}

/// Renders a resolved document with any [`TargetRenderer`].
pub struct Generator<'a> {
    ir: &'a DocumentIr,
    config: &'a GeneratorConfig,
}

impl<'a> Generator<'a> {
    /// Creates a new generator.
    #[must_use]
    pub fn new(ir: &'a DocumentIr, config: &'a GeneratorConfig) -> Self {
        Self { ir, config }
    }

    /// Renders the document for a built-in target.
    #[must_use]
    pub fn generate(&self, target: Target) -> Generated {
        let renderer = target.renderer(self.config);
        self.generate_with(renderer.as_ref())
    }

    /// Renders the document with the given renderer.
    ///
    /// Declarations the renderer cannot express are left out and reported
    /// as [`DiagnosticKind::UnsupportedDeclaration`]. Types it only
    /// approximates are reported as [`DiagnosticKind::ApproximatedType`].
    #[must_use]
    pub fn generate_with(&self, renderer: &dyn TargetRenderer) -> Generated {
        let target = renderer.target();
        let mut diagnostics = Diagnostics::new();
        diagnostics.extend(self.ir.diagnostics.iter().cloned());

        let mut blocks = Vec::with_capacity(self.ir.declarations.len() + 1);
        if let Some(header) = &self.config.header {
            blocks.push(line_comments(header));
        }

        for decl in &self.ir.declarations {
            let block = match decl {
                ResolvedDeclaration::Struct(s) => Some(renderer.render_struct(s)),
                ResolvedDeclaration::Interface(i) => Some(renderer.render_interface(i)),
                ResolvedDeclaration::Function(f) => renderer.render_function(f),
                ResolvedDeclaration::TypeAlias(t) => Some(renderer.render_type_alias(t)),
            };
            match block {
                Some(block) => {
                    blocks.push(block);
                    report_approximations(renderer, decl, &mut diagnostics);
                }
                None => diagnostics.push(Diagnostic::new(
                    DiagnosticKind::UnsupportedDeclaration {
                        target: target.name().to_string(),
                    },
                    format!("{} {}", decl.keyword(), decl.name()),
                )),
            }
        }

        let mut text = blocks.join("\n\n");
        if !text.is_empty() {
            text.push('\n');
        }

        tracing::debug!(
            language = target.name(),
            blocks = blocks.len(),
            bytes = text.len(),
            "rendered document"
        );

        Generated {
            target,
            text,
            diagnostics: diagnostics.into_vec(),
        }
    }
}

fn report_approximations(
    renderer: &dyn TargetRenderer,
    decl: &ResolvedDeclaration,
    diagnostics: &mut Diagnostics,
) {
    for ty in decl.type_expressions() {
        ty.visit(&mut |t| {
            if renderer.approximates(t) {
                diagnostics.push(Diagnostic::new(
                    DiagnosticKind::ApproximatedType {
                        target: renderer.target().name().to_string(),
                    },
                    format!("{} {}: {}", decl.keyword(), decl.name(), t),
                ));
            }
        });
    }
}

/// Every target uses `//` line comments.
fn line_comments(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                "//".to_string()
            } else {
                format!("// {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
