//! TypeScript rendering.
//!
//! Structs become interfaces with every inherited field written out.
//! TypeScript has no body-less function declaration outside `declare`
//! contexts, so standalone functions are skipped.

use typemeld_schema::{
    Field, FunctionDecl, PrimitiveType, ResolvedInterface, ResolvedStruct, TypeAliasDecl,
    TypeExpression,
};

use super::block;
use crate::config::GeneratorConfig;
use crate::generator::{Target, TargetRenderer};

/// Renderer for TypeScript declarations.
pub struct TypeScriptRenderer<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> TypeScriptRenderer<'a> {
    /// Creates a new TypeScript renderer.
    #[must_use]
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    fn member(&self, field: &Field) -> String {
        format!("{}: {};", field.name, self.render_field_type(field))
    }

    fn parameters(&self, parameters: &[Field]) -> String {
        parameters
            .iter()
            .map(|p| format!("{}: {}", p.name, self.render_field_type(p)))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// TypeScript spelling of a primitive.
#[must_use]
pub const fn primitive(primitive: PrimitiveType) -> &'static str {
    match primitive {
        PrimitiveType::Int8
        | PrimitiveType::Int16
        | PrimitiveType::Int32
        | PrimitiveType::Int64
        | PrimitiveType::UInt8
        | PrimitiveType::UInt16
        | PrimitiveType::UInt32
        | PrimitiveType::UInt64
        | PrimitiveType::Float32
        | PrimitiveType::Float64 => "number",
        PrimitiveType::String | PrimitiveType::Char => "string",
        PrimitiveType::Boolean => "boolean",
        PrimitiveType::Void => "void",
        PrimitiveType::Any => "any",
    }
}

impl TargetRenderer for TypeScriptRenderer<'_> {
    fn target(&self) -> Target {
        Target::TypeScript
    }

    fn render_type(&self, ty: &TypeExpression) -> String {
        match ty {
            TypeExpression::Primitive(p) => primitive(*p).to_string(),
            TypeExpression::Named(name) => name.clone(),
            TypeExpression::Array(element) => format!("{}[]", self.render_type(element)),
            TypeExpression::Map { key, value } => format!(
                "Record<{}, {}>",
                self.render_type(key),
                self.render_type(value)
            ),
            TypeExpression::Record(fields) if fields.is_empty() => "{}".to_string(),
            TypeExpression::Record(fields) => {
                let members = fields
                    .iter()
                    .map(|f| format!("{}: {}", f.name, self.render_field_type(f)))
                    .collect::<Vec<_>>();
                format!("{{ {} }}", members.join("; "))
            }
            TypeExpression::Generic { base, argument } => {
                format!("{}<{}>", base, self.render_type(argument))
            }
        }
    }

    fn mark_optional(&self, rendered: String) -> String {
        format!("{rendered} | undefined")
    }

    fn render_struct(&self, decl: &ResolvedStruct) -> String {
        let header = format!("{}interface {}", self.config.visibility("export"), decl.name);
        let members = decl.fields.iter().map(|f| self.member(f)).collect::<Vec<_>>();
        block(&header, &members, &self.config.indent)
    }

    fn render_interface(&self, decl: &ResolvedInterface) -> String {
        let mut header = format!("{}interface {}", self.config.visibility("export"), decl.name);
        if let Some(parent) = &decl.extends {
            header.push_str(&format!(" extends {parent}"));
        }
        let members = decl
            .methods
            .iter()
            .map(|m| {
                format!(
                    "{}({}): {};",
                    m.name,
                    self.parameters(&m.parameters),
                    self.render_type(&m.return_type)
                )
            })
            .collect::<Vec<_>>();
        block(&header, &members, &self.config.indent)
    }

    fn render_function(&self, _decl: &FunctionDecl) -> Option<String> {
        None
    }

    fn render_type_alias(&self, decl: &TypeAliasDecl) -> String {
        let header = format!("{}type {} =", self.config.visibility("export"), decl.name);
        match decl.record_fields() {
            Some(fields) => {
                let members = fields.iter().map(|f| self.member(f)).collect::<Vec<_>>();
                format!("{};", block(&header, &members, &self.config.indent))
            }
            None => format!("{} {};", header, self.render_type(&decl.aliased_type)),
        }
    }
}
