//! Swift rendering.

use typemeld_schema::{
    Field, FunctionDecl, PrimitiveType, ResolvedInterface, ResolvedStruct, TypeAliasDecl,
    TypeExpression,
};

use super::block;
use crate::config::GeneratorConfig;
use crate::generator::{Target, TargetRenderer};

/// Words that must be wrapped in backticks when used as identifiers.
const KEYWORDS: &[&str] = &[
    "Any", "Self", "as", "associatedtype", "await", "break", "case", "catch", "class",
    "continue", "default", "defer", "deinit", "do", "else", "enum", "extension", "fallthrough",
    "false", "fileprivate", "for", "func", "guard", "if", "import", "in", "init", "inout",
    "internal", "is", "let", "nil", "open", "operator", "private", "precedencegroup",
    "protocol", "public", "repeat", "rethrows", "return", "self", "static", "struct",
    "subscript", "super", "switch", "throw", "throws", "true", "try", "typealias", "var",
    "where", "while",
];

/// Escapes a Swift identifier.
#[must_use]
pub fn identifier(name: &str) -> String {
    if KEYWORDS.contains(&name) {
        format!("`{name}`")
    } else {
        name.to_string()
    }
}

/// Swift spelling of a primitive.
#[must_use]
pub const fn primitive(primitive: PrimitiveType) -> &'static str {
    match primitive {
        PrimitiveType::Int8 => "Int8",
        PrimitiveType::Int16 => "Int16",
        PrimitiveType::Int32 => "Int32",
        PrimitiveType::Int64 => "Int64",
        PrimitiveType::UInt8 => "UInt8",
        PrimitiveType::UInt16 => "UInt16",
        PrimitiveType::UInt32 => "UInt32",
        PrimitiveType::UInt64 => "UInt64",
        PrimitiveType::Float32 => "Float",
        PrimitiveType::Float64 => "Double",
        PrimitiveType::String => "String",
        PrimitiveType::Char => "Character",
        PrimitiveType::Boolean => "Bool",
        PrimitiveType::Void => "Void",
        PrimitiveType::Any => "Any",
    }
}

/// Renderer for Swift declarations.
pub struct SwiftRenderer<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> SwiftRenderer<'a> {
    /// Creates a new Swift renderer.
    #[must_use]
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    fn stored_property(&self, field: &Field) -> String {
        format!(
            "{}var {}: {}",
            self.config.visibility("public"),
            identifier(&field.name),
            self.render_field_type(field)
        )
    }

    fn signature(
        &self,
        name: &str,
        type_parameters: &[String],
        parameters: &[Field],
        ret: &TypeExpression,
    ) -> String {
        let generics = if type_parameters.is_empty() {
            String::new()
        } else {
            let names = type_parameters
                .iter()
                .map(|t| identifier(t))
                .collect::<Vec<_>>();
            format!("<{}>", names.join(", "))
        };
        let params = parameters
            .iter()
            .map(|p| format!("{}: {}", identifier(&p.name), self.render_field_type(p)))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "func {}{}({}) -> {}",
            identifier(name),
            generics,
            params,
            self.render_type(ret)
        )
    }
}

impl TargetRenderer for SwiftRenderer<'_> {
    fn target(&self) -> Target {
        Target::Swift
    }

    fn render_type(&self, ty: &TypeExpression) -> String {
        match ty {
            TypeExpression::Primitive(p) => primitive(*p).to_string(),
            TypeExpression::Named(name) => identifier(name),
            TypeExpression::Array(element) => format!("[{}]", self.render_type(element)),
            TypeExpression::Map { key, value } => {
                format!("[{}: {}]", self.render_type(key), self.render_type(value))
            }
            // Swift has no labelled single-element tuple, see `approximates`.
            TypeExpression::Record(fields) if fields.len() == 1 => {
                self.render_field_type(&fields[0])
            }
            TypeExpression::Record(fields) => {
                let members = fields
                    .iter()
                    .map(|f| format!("{}: {}", identifier(&f.name), self.render_field_type(f)))
                    .collect::<Vec<_>>();
                format!("({})", members.join(", "))
            }
            TypeExpression::Generic { base, argument } => {
                format!("{}<{}>", identifier(base), self.render_type(argument))
            }
        }
    }

    fn mark_optional(&self, rendered: String) -> String {
        format!("{rendered}?")
    }

    fn approximates(&self, ty: &TypeExpression) -> bool {
        matches!(ty, TypeExpression::Record(fields) if fields.len() == 1)
    }

    fn render_struct(&self, decl: &ResolvedStruct) -> String {
        let header = format!(
            "{}struct {}",
            self.config.visibility("public"),
            identifier(&decl.name)
        );
        let members = decl
            .fields
            .iter()
            .map(|f| self.stored_property(f))
            .collect::<Vec<_>>();
        block(&header, &members, &self.config.indent)
    }

    fn render_interface(&self, decl: &ResolvedInterface) -> String {
        let mut header = format!(
            "{}protocol {}",
            self.config.visibility("public"),
            identifier(&decl.name)
        );
        if let Some(parent) = &decl.extends {
            header.push_str(&format!(": {}", identifier(parent)));
        }
        let members = decl
            .methods
            .iter()
            .map(|m| self.signature(&m.name, &[], &m.parameters, &m.return_type))
            .collect::<Vec<_>>();
        block(&header, &members, &self.config.indent)
    }

    fn render_function(&self, decl: &FunctionDecl) -> Option<String> {
        Some(format!(
            "{}{}",
            self.config.visibility("public"),
            self.signature(
                &decl.name,
                &decl.type_parameters,
                &decl.parameters,
                &decl.return_type
            )
        ))
    }

    fn render_type_alias(&self, decl: &TypeAliasDecl) -> String {
        let visibility = self.config.visibility("public");
        match decl.record_fields() {
            Some(fields) => {
                let header = format!("{}struct {}", visibility, identifier(&decl.name));
                let members = fields
                    .iter()
                    .map(|f| self.stored_property(f))
                    .collect::<Vec<_>>();
                block(&header, &members, &self.config.indent)
            }
            None => format!(
                "{}typealias {} = {}",
                visibility,
                identifier(&decl.name),
                self.render_type(&decl.aliased_type)
            ),
        }
    }
}
