//! Rust rendering.
//!
//! Interfaces become traits whose methods take `&self`. Inline records have
//! no named fields in Rust and render as tuples.

use check_keyword::CheckKeyword;
use typemeld_schema::{
    Field, FunctionDecl, PrimitiveType, ResolvedInterface, ResolvedStruct, TypeAliasDecl,
    TypeExpression,
};

use super::block;
use crate::config::GeneratorConfig;
use crate::generator::{Target, TargetRenderer};

/// Escapes a Rust identifier.
///
/// Keywords become raw identifiers, except the few that cannot be raw.
#[must_use]
pub fn identifier(name: &str) -> String {
    if ["crate", "self", "super", "Self"].contains(&name) {
        format!("{name}_")
    } else if name.is_keyword() {
        format!("r#{name}")
    } else {
        name.to_string()
    }
}

/// Rust spelling of a primitive.
#[must_use]
pub const fn primitive(primitive: PrimitiveType) -> &'static str {
    match primitive {
        PrimitiveType::Int8 => "i8",
        PrimitiveType::Int16 => "i16",
        PrimitiveType::Int32 => "i32",
        PrimitiveType::Int64 => "i64",
        PrimitiveType::UInt8 => "u8",
        PrimitiveType::UInt16 => "u16",
        PrimitiveType::UInt32 => "u32",
        PrimitiveType::UInt64 => "u64",
        PrimitiveType::Float32 => "f32",
        PrimitiveType::Float64 => "f64",
        PrimitiveType::String => "String",
        PrimitiveType::Char => "char",
        PrimitiveType::Boolean => "bool",
        PrimitiveType::Void => "()",
        PrimitiveType::Any => "Box<dyn std::any::Any>",
    }
}

/// Renderer for Rust declarations.
pub struct RustRenderer<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> RustRenderer<'a> {
    /// Creates a new Rust renderer.
    #[must_use]
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    fn struct_block(&self, name: &str, fields: &[Field]) -> String {
        let visibility = self.config.visibility("pub");
        let mut output = String::new();
        if !self.config.rust_derives.is_empty() {
            output.push_str(&format!(
                "#[derive({})]\n",
                self.config.rust_derives.join(", ")
            ));
        }
        let header = format!("{}struct {}", visibility, identifier(name));
        let members = fields
            .iter()
            .map(|f| {
                format!(
                    "{}{}: {},",
                    visibility,
                    identifier(&f.name),
                    self.render_field_type(f)
                )
            })
            .collect::<Vec<_>>();
        output.push_str(&block(&header, &members, &self.config.indent));
        output
    }

    fn parameters(&self, parameters: &[Field]) -> Vec<String> {
        parameters
            .iter()
            .map(|p| format!("{}: {}", identifier(&p.name), self.render_field_type(p)))
            .collect()
    }

    fn return_clause(&self, ty: &TypeExpression) -> String {
        if ty.is_void() {
            String::new()
        } else {
            format!(" -> {}", self.render_type(ty))
        }
    }
}

impl TargetRenderer for RustRenderer<'_> {
    fn target(&self) -> Target {
        Target::Rust
    }

    fn render_type(&self, ty: &TypeExpression) -> String {
        match ty {
            TypeExpression::Primitive(p) => primitive(*p).to_string(),
            TypeExpression::Named(name) => identifier(name),
            TypeExpression::Array(element) => format!("Vec<{}>", self.render_type(element)),
            TypeExpression::Map { key, value } => format!(
                "std::collections::HashMap<{}, {}>",
                self.render_type(key),
                self.render_type(value)
            ),
            TypeExpression::Record(fields) if fields.len() == 1 => {
                format!("({},)", self.render_field_type(&fields[0]))
            }
            TypeExpression::Record(fields) => {
                let members = fields
                    .iter()
                    .map(|f| self.render_field_type(f))
                    .collect::<Vec<_>>();
                format!("({})", members.join(", "))
            }
            TypeExpression::Generic { base, argument } => {
                format!("{}<{}>", identifier(base), self.render_type(argument))
            }
        }
    }

    fn mark_optional(&self, rendered: String) -> String {
        format!("Option<{rendered}>")
    }

    fn render_struct(&self, decl: &ResolvedStruct) -> String {
        self.struct_block(&decl.name, &decl.fields)
    }

    fn render_interface(&self, decl: &ResolvedInterface) -> String {
        let mut header = format!(
            "{}trait {}",
            self.config.visibility("pub"),
            identifier(&decl.name)
        );
        if let Some(parent) = &decl.extends {
            header.push_str(&format!(": {}", identifier(parent)));
        }
        let members = decl
            .methods
            .iter()
            .map(|m| {
                let mut params = vec!["&self".to_string()];
                params.extend(self.parameters(&m.parameters));
                format!(
                    "fn {}({}){};",
                    identifier(&m.name),
                    params.join(", "),
                    self.return_clause(&m.return_type)
                )
            })
            .collect::<Vec<_>>();
        block(&header, &members, &self.config.indent)
    }

    fn render_function(&self, decl: &FunctionDecl) -> Option<String> {
        let generics = if decl.type_parameters.is_empty() {
            String::new()
        } else {
            let names = decl
                .type_parameters
                .iter()
                .map(|t| identifier(t))
                .collect::<Vec<_>>();
            format!("<{}>", names.join(", "))
        };
        Some(format!(
            "{}fn {}{}({}){};",
            self.config.visibility("pub"),
            identifier(&decl.name),
            generics,
            self.parameters(&decl.parameters).join(", "),
            self.return_clause(&decl.return_type)
        ))
    }

    fn render_type_alias(&self, decl: &TypeAliasDecl) -> String {
        match decl.record_fields() {
            Some(fields) => self.struct_block(&decl.name, fields),
            None => format!(
                "{}type {} = {};",
                self.config.visibility("pub"),
                identifier(&decl.name),
                self.render_type(&decl.aliased_type)
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::Generator;
    use typemeld_schema::{DocumentIr, parse};

    fn render(src: &str) -> String {
        render_with(src, &GeneratorConfig::default())
    }

    fn render_with(src: &str, config: &GeneratorConfig) -> String {
        let ir = DocumentIr::from_document(&parse(src).document);
        Generator::new(&ir, config).generate(Target::Rust).text
    }

    #[test]
    fn test_primitive_table() {
        assert_eq!(primitive(PrimitiveType::Int8), "i8");
        assert_eq!(primitive(PrimitiveType::UInt64), "u64");
        assert_eq!(primitive(PrimitiveType::Float32), "f32");
        assert_eq!(primitive(PrimitiveType::Float64), "f64");
        assert_eq!(primitive(PrimitiveType::Char), "char");
        assert_eq!(primitive(PrimitiveType::Void), "()");
    }

    #[test]
    fn test_identifier_escaping() {
        assert_eq!(identifier("name"), "name");
        assert_eq!(identifier("type"), "r#type");
        assert_eq!(identifier("match"), "r#match");
        assert_eq!(identifier("self"), "self_");
        assert_eq!(identifier("Self"), "Self_");
    }

    #[test]
    fn test_struct_flattened() {
        let out = render(
            "struct Engineer extends Person {\n  specialty: String\n  isWorking: Boolean\n}\n\
             struct Person {\n  id: Int32\n  name: String\n}",
        );
        assert_eq!(
            out,
            "struct Engineer {\n  id: i32,\n  name: String,\n  specialty: String,\n  \
             isWorking: bool,\n}\n\n\
             struct Person {\n  id: i32,\n  name: String,\n}\n"
        );
    }

    #[test]
    fn test_optional_marker() {
        let out = render("struct P {\n  nick: String?\n  age: Int32\n}");
        assert!(out.contains("nick: Option<String>,"));
        assert!(out.contains("age: i32,"));
        assert!(!out.contains("Option<i32>"));
    }

    #[test]
    fn test_trait_supertrait() {
        let out = render(
            "interface Worker {\n  work(hours: Int32): Void\n  report(): String\n}\n\
             interface AdvancedWorker extends Worker {\n  lead(teamSize: Int32): Void\n}",
        );
        assert_eq!(
            out,
            "trait Worker {\n  fn work(&self, hours: i32);\n  fn report(&self) -> String;\n}\n\n\
             trait AdvancedWorker: Worker {\n  fn lead(&self, teamSize: i32);\n}\n"
        );
    }

    #[test]
    fn test_functions() {
        let out = render(
            "function hire(person: Person, position: String): Boolean\n\
             function fetchData<T>(url: String): ApiResponse<T>\n\
             function reset(): Void",
        );
        assert_eq!(
            out,
            "fn hire(person: Person, position: String) -> bool;\n\n\
             fn fetchData<T>(url: String) -> ApiResponse<T>;\n\n\
             fn reset();\n"
        );
    }

    #[test]
    fn test_composites() {
        let out = render(
            "struct C {\n  counts: Record<String, Int32[]>\n  at: { s: Int64, ns: Int32? }\n  \
             one: { s: Int64 }\n  anything: Any\n  type: String\n}",
        );
        assert!(out.contains("counts: std::collections::HashMap<String, Vec<i32>>,"));
        assert!(out.contains("at: (i64, Option<i32>),"));
        assert!(out.contains("one: (i64,),"));
        assert!(out.contains("anything: Box<dyn std::any::Any>,"));
        assert!(out.contains("r#type: String,"));
    }

    #[test]
    fn test_aliases() {
        assert_eq!(
            render("type KeyValue = { key: String, value: Int32 }"),
            "struct KeyValue {\n  key: String,\n  value: i32,\n}\n"
        );
        assert_eq!(render("type Ids = Int64[]"), "type Ids = Vec<i64>;\n");
    }

    #[test]
    fn test_pub_and_derives() {
        let config = GeneratorConfig::new()
            .with_public(true)
            .with_rust_derives(["Debug", "Clone"]);
        let out = render_with(
            "struct A {\n  a: Int32\n}\ninterface I {\n  ping(): Void\n}",
            &config,
        );
        assert_eq!(
            out,
            "#[derive(Debug, Clone)]\npub struct A {\n  pub a: i32,\n}\n\n\
             pub trait I {\n  fn ping(&self);\n}\n"
        );
    }

    #[test]
    fn test_keyword_type_references_escaped() {
        let out = render(
            "struct type {\n  t: type\n  m: match<type>\n}\n\
             interface loop extends match {}\n\
             function make<impl>(v: impl): Self",
        );
        assert!(out.contains("struct r#type {\n  t: r#type,\n  m: r#match<r#type>,\n}"));
        assert!(out.contains("trait r#loop: r#match {}"));
        assert!(out.contains("fn make<r#impl>(v: r#impl) -> Self_;"));
    }

    #[test]
    fn test_underscore_field_skipped() {
        let output = parse("struct A {\n  _: Int32\n  ok: Int32\n}");
        assert_eq!(output.diagnostics.len(), 1);
        let ir = DocumentIr::from_document(&output.document);
        let config = GeneratorConfig::default();
        let out = Generator::new(&ir, &config).generate(Target::Rust);
        assert_eq!(out.text, "struct A {\n  ok: i32,\n}\n");
    }

    #[test]
    fn test_optional_array_element_dropped() {
        assert_eq!(render("type Ids = Int32?[]"), "type Ids = Vec<i32>;\n");
    }
}
