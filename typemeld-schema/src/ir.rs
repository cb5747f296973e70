//! Intermediate representation for code generation.
//!
//! This module provides a resolved view of a [`Document`] that every target
//! renderer consumes: struct fields are flattened through their `extends`
//! chain, interface parents are kept as links, and leaf names that spell a
//! DSL primitive are classified as [`TypeExpression::Primitive`].

use std::collections::{HashMap, HashSet};

use crate::declarations::{
    Declaration, Document, FunctionDecl, InterfaceDecl, MethodSignature, StructDecl,
    TypeAliasDecl,
};
use crate::diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
use crate::types::{Field, TypeExpression};
use crate::validation::{find_duplicates, find_unresolved_parents};

/// Resolved document, ready for rendering.
#[derive(Debug, Clone, Default)]
pub struct DocumentIr {
    /// Declarations in source order.
    pub declarations: Vec<ResolvedDeclaration>,
    /// Problems found while resolving.
    pub diagnostics: Vec<Diagnostic>,
}

impl DocumentIr {
    /// Resolves a parsed document.
    ///
    /// Names are indexed before anything is resolved, so `extends` may refer
    /// to a declaration further down. When a name is declared twice the first
    /// declaration is the one that gets indexed.
    #[must_use]
    pub fn from_document(document: &Document) -> Self {
        let mut diagnostics = Diagnostics::new();
        for diagnostic in find_duplicates(document) {
            diagnostics.push(diagnostic);
        }
        for diagnostic in find_unresolved_parents(document) {
            diagnostics.push(diagnostic);
        }

        let mut structs: HashMap<&str, &StructDecl> = HashMap::new();
        for decl in document {
            if let Declaration::Struct(s) = decl {
                structs.entry(s.name.as_str()).or_insert(s);
            }
        }

        let declarations = document
            .iter()
            .map(|decl| match decl {
                Declaration::Struct(s) => {
                    ResolvedDeclaration::Struct(ResolvedStruct::resolve(s, &structs, &mut diagnostics))
                }
                Declaration::Interface(i) => {
                    ResolvedDeclaration::Interface(ResolvedInterface::from_interface(i))
                }
                Declaration::Function(f) => ResolvedDeclaration::Function(classify_function(f)),
                Declaration::TypeAlias(t) => ResolvedDeclaration::TypeAlias(TypeAliasDecl {
                    name: t.name.clone(),
                    aliased_type: t.aliased_type.classify_primitives(),
                }),
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            declarations = declarations.len(),
            diagnostics = diagnostics.len(),
            "resolved document"
        );

        Self {
            declarations,
            diagnostics: diagnostics.into_vec(),
        }
    }

    /// Looks up the first resolved struct with the given name.
    #[must_use]
    pub fn get_struct(&self, name: &str) -> Option<&ResolvedStruct> {
        self.declarations.iter().find_map(|d| match d {
            ResolvedDeclaration::Struct(s) if s.name == name => Some(s),
            _ => None,
        })
    }

    /// Looks up the first resolved interface with the given name.
    #[must_use]
    pub fn get_interface(&self, name: &str) -> Option<&ResolvedInterface> {
        self.declarations.iter().find_map(|d| match d {
            ResolvedDeclaration::Interface(i) if i.name == name => Some(i),
            _ => None,
        })
    }
}

/// Resolved declaration variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedDeclaration {
    /// Struct with inherited fields flattened in.
    Struct(ResolvedStruct),
    /// Interface with its parent kept as a link.
    Interface(ResolvedInterface),
    /// Standalone function signature.
    Function(FunctionDecl),
    /// Type alias.
    TypeAlias(TypeAliasDecl),
}

impl ResolvedDeclaration {
    /// Returns the declared name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Struct(s) => &s.name,
            Self::Interface(i) => &i.name,
            Self::Function(f) => &f.name,
            Self::TypeAlias(t) => &t.name,
        }
    }

    /// DSL keyword of the declaration kind.
    #[must_use]
    pub const fn keyword(&self) -> &'static str {
        match self {
            Self::Struct(_) => "struct",
            Self::Interface(_) => "interface",
            Self::Function(_) => "function",
            Self::TypeAlias(_) => "type",
        }
    }

    /// Type expressions written in the declaration, in source order.
    ///
    /// A record alias contributes its field types rather than the record
    /// itself, since every target declares it as a named type.
    #[must_use]
    pub fn type_expressions(&self) -> Vec<&TypeExpression> {
        match self {
            Self::Struct(s) => s.fields.iter().map(|f| &f.ty).collect(),
            Self::Interface(i) => i
                .methods
                .iter()
                .flat_map(|m| m.parameters.iter().map(|p| &p.ty).chain([&m.return_type]))
                .collect(),
            Self::Function(f) => f
                .parameters
                .iter()
                .map(|p| &p.ty)
                .chain([&f.return_type])
                .collect(),
            Self::TypeAlias(t) => match t.record_fields() {
                Some(record) => record.iter().map(|f| &f.ty).collect(),
                None => vec![&t.aliased_type],
            },
        }
    }
}

/// Struct with its inheritance chain flattened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedStruct {
    /// Struct name.
    pub name: String,
    /// Ancestor fields, root first, followed by the struct's own fields.
    pub fields: Vec<Field>,
    /// How many leading entries of `fields` are inherited.
    pub inherited: usize,
    /// Resolved ancestors, root first.
    pub ancestors: Vec<String>,
}

impl ResolvedStruct {
    fn resolve(
        decl: &StructDecl,
        structs: &HashMap<&str, &StructDecl>,
        diagnostics: &mut Diagnostics,
    ) -> Self {
        let mut chain: Vec<&StructDecl> = Vec::new();
        let mut visited: HashSet<&str> = HashSet::from([decl.name.as_str()]);
        let mut current = decl;

        while let Some(parent) = current.extends.as_deref() {
            // Unresolved parents are reported once by `find_unresolved_parents`.
            let Some(&next) = structs.get(parent) else {
                break;
            };
            if !visited.insert(next.name.as_str()) {
                diagnostics.push(Diagnostic::new(
                    DiagnosticKind::InheritanceCycle,
                    format!("{} via {} extends {}", decl.name, current.name, parent),
                ));
                break;
            }
            chain.push(next);
            current = next;
        }
        chain.reverse();

        let mut fields = Vec::new();
        for ancestor in &chain {
            fields.extend(ancestor.fields.iter().map(Field::classify_primitives));
        }
        let inherited = fields.len();
        fields.extend(decl.fields.iter().map(Field::classify_primitives));

        Self {
            name: decl.name.clone(),
            fields,
            inherited,
            ancestors: chain.iter().map(|s| s.name.clone()).collect(),
        }
    }

    /// The struct's own fields, without inherited ones.
    #[must_use]
    pub fn own_fields(&self) -> &[Field] {
        &self.fields[self.inherited..]
    }
}

/// Interface with its parent kept by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInterface {
    /// Interface name.
    pub name: String,
    /// Own methods only.
    pub methods: Vec<MethodSignature>,
    /// Parent interface, rendered as the target's native inheritance link.
    pub extends: Option<String>,
}

impl ResolvedInterface {
    fn from_interface(decl: &InterfaceDecl) -> Self {
        Self {
            name: decl.name.clone(),
            methods: decl.methods.iter().map(classify_method).collect(),
            extends: decl.extends.clone(),
        }
    }
}

fn classify_fields(fields: &[Field]) -> Vec<Field> {
    fields.iter().map(Field::classify_primitives).collect()
}

fn classify_method(method: &MethodSignature) -> MethodSignature {
    MethodSignature {
        name: method.name.clone(),
        parameters: classify_fields(&method.parameters),
        return_type: method.return_type.classify_primitives(),
    }
}

fn classify_function(function: &FunctionDecl) -> FunctionDecl {
    FunctionDecl {
        name: function.name.clone(),
        type_parameters: function.type_parameters.clone(),
        parameters: classify_fields(&function.parameters),
        return_type: function.return_type.classify_primitives(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::types::PrimitiveType;

    fn resolve(src: &str) -> DocumentIr {
        let output = parse(src);
        assert!(output.diagnostics.is_empty(), "{:?}", output.diagnostics);
        DocumentIr::from_document(&output.document)
    }

    fn field_names(s: &ResolvedStruct) -> Vec<&str> {
        s.fields.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn test_flatten_forward_reference() {
        let ir = resolve(
            "struct Engineer extends Person {\n  specialty: String\n  isWorking: Boolean\n}\n\
             struct Person {\n  id: Int32\n  name: String\n  tags: String[]\n}",
        );
        let engineer = ir.get_struct("Engineer").expect("Engineer");
        assert_eq!(
            field_names(engineer),
            ["id", "name", "tags", "specialty", "isWorking"]
        );
        assert_eq!(engineer.inherited, 3);
        assert_eq!(engineer.ancestors, ["Person"]);
        assert_eq!(engineer.own_fields().len(), 2);
        assert!(ir.diagnostics.is_empty());
    }

    #[test]
    fn test_flatten_multi_level_root_first() {
        let ir = resolve(
            "struct C extends B { c: Int32 }\nstruct B extends A { b: Int32 }\nstruct A { a: Int32 }",
        );
        let c = ir.get_struct("C").expect("C");
        assert_eq!(field_names(c), ["a", "b", "c"]);
        assert_eq!(c.ancestors, ["A", "B"]);
        assert_eq!(c.inherited, 2);
    }

    #[test]
    fn test_flatten_keeps_duplicated_field_names() {
        let ir = resolve("struct A { id: Int32 }\nstruct B extends A { id: String }");
        let b = ir.get_struct("B").expect("B");
        assert_eq!(field_names(b), ["id", "id"]);
    }

    #[test]
    fn test_unresolved_parent_renders_own_fields() {
        let output = parse("struct Engineer extends Person {\n  specialty: String\n}");
        let ir = DocumentIr::from_document(&output.document);
        let engineer = ir.get_struct("Engineer").expect("Engineer");
        assert_eq!(field_names(engineer), ["specialty"]);
        assert_eq!(ir.diagnostics.len(), 1);
        assert_eq!(ir.diagnostics[0].kind, DiagnosticKind::UnresolvedParent);
    }

    #[test]
    fn test_inheritance_cycle() {
        let output = parse("struct A extends B { a: Int32 }\nstruct B extends A { b: Int32 }");
        let ir = DocumentIr::from_document(&output.document);

        assert_eq!(field_names(ir.get_struct("A").expect("A")), ["b", "a"]);
        assert_eq!(field_names(ir.get_struct("B").expect("B")), ["a", "b"]);
        let cycles = ir
            .diagnostics
            .iter()
            .filter(|d| d.kind == DiagnosticKind::InheritanceCycle)
            .count();
        assert_eq!(cycles, 2);
    }

    #[test]
    fn test_self_extension() {
        let output = parse("struct A extends A { a: Int32 }");
        let ir = DocumentIr::from_document(&output.document);
        assert_eq!(field_names(ir.get_struct("A").expect("A")), ["a"]);
        assert_eq!(ir.diagnostics[0].kind, DiagnosticKind::InheritanceCycle);
    }

    #[test]
    fn test_cycle_diagnostics_name_each_struct() {
        let output = parse("struct A extends A { a: Int32 }\nstruct C extends A { c: Int32 }");
        let ir = DocumentIr::from_document(&output.document);
        assert_eq!(field_names(ir.get_struct("C").expect("C")), ["a", "c"]);
        let contexts: Vec<&str> = ir
            .diagnostics
            .iter()
            .filter(|d| d.kind == DiagnosticKind::InheritanceCycle)
            .map(|d| d.context.as_str())
            .collect();
        assert_eq!(contexts, ["A via A extends A", "C via A extends A"]);
    }

    #[test]
    fn test_type_expressions() {
        let ir = resolve(
            "struct P extends Q { a: Int32 }\nstruct Q { q: String }\n\
             function f(x: Person): Void\n\
             type KV = { k: String, v: Int32[] }\n\
             type Ids = Int64[]",
        );
        let spelled = |i: usize| -> Vec<String> {
            ir.declarations[i]
                .type_expressions()
                .into_iter()
                .map(ToString::to_string)
                .collect()
        };
        assert_eq!(spelled(0), ["String", "Int32"]);
        assert_eq!(spelled(2), ["Person", "Void"]);
        assert_eq!(spelled(3), ["String", "Int32[]"]);
        assert_eq!(spelled(4), ["Int64[]"]);
    }

    #[test]
    fn test_duplicate_first_wins() {
        let output = parse("struct Child extends P { c: Int32 }\nstruct P { first: Int32 }\nstruct P { second: Int32 }");
        let ir = DocumentIr::from_document(&output.document);
        assert_eq!(
            field_names(ir.get_struct("Child").expect("Child")),
            ["first", "c"]
        );
        assert_eq!(ir.declarations.len(), 3);
        assert_eq!(ir.diagnostics[0].kind, DiagnosticKind::DuplicateDeclaration);
    }

    #[test]
    fn test_interface_not_flattened() {
        let ir = resolve(
            "interface Worker {\n  work(hours: Int32): Void\n}\n\
             interface AdvancedWorker extends Worker {\n  lead(teamSize: Int32): Void\n}",
        );
        let adv = ir.get_interface("AdvancedWorker").expect("AdvancedWorker");
        assert_eq!(adv.extends.as_deref(), Some("Worker"));
        assert_eq!(adv.methods.len(), 1);
        assert_eq!(adv.methods[0].name, "lead");
        assert_eq!(
            adv.methods[0].parameters[0].ty,
            TypeExpression::Primitive(PrimitiveType::Int32)
        );
    }

    #[test]
    fn test_primitives_classified_custom_names_kept() {
        let ir = resolve("struct Job {\n  owner: Company\n  tags: String[]\n}");
        let job = ir.get_struct("Job").expect("Job");
        assert_eq!(job.fields[0].ty, TypeExpression::named("Company"));
        assert_eq!(
            job.fields[1].ty,
            TypeExpression::array(TypeExpression::Primitive(PrimitiveType::String))
        );
        assert!(ir.diagnostics.is_empty());
    }

    #[test]
    fn test_order_preserved() {
        let ir = resolve("function f(): Void\ntype T = String\nstruct S {}\ninterface I {}");
        let names: Vec<&str> = ir.declarations.iter().map(ResolvedDeclaration::name).collect();
        assert_eq!(names, ["f", "T", "S", "I"]);
    }
}
