//! Top-level declarations.
//!
//! This module contains the data structures produced by one parse pass:
//! structs, interfaces, function signatures and type aliases, held in
//! source order by a [`Document`].

use crate::types::{Field, TypeExpression};

/// Struct declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StructDecl {
    /// Struct name.
    pub name: String,
    /// Own fields in declared order.
    pub fields: Vec<Field>,
    /// Parent struct name.
    pub extends: Option<String>,
}

impl StructDecl {
    /// Creates a struct without fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            extends: None,
        }
    }

    /// Adds a field.
    pub fn add_field(&mut self, field: Field) {
        self.fields.push(field);
    }
}

/// Method signature inside an interface.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MethodSignature {
    /// Method name.
    pub name: String,
    /// Parameters in declared order.
    pub parameters: Vec<Field>,
    /// Return type.
    pub return_type: TypeExpression,
}

/// Interface declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InterfaceDecl {
    /// Interface name.
    pub name: String,
    /// Own methods in declared order.
    pub methods: Vec<MethodSignature>,
    /// Parent interface name.
    pub extends: Option<String>,
}

impl InterfaceDecl {
    /// Creates an interface without methods.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: Vec::new(),
            extends: None,
        }
    }

    /// Adds a method.
    pub fn add_method(&mut self, method: MethodSignature) {
        self.methods.push(method);
    }
}

/// Standalone function signature.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionDecl {
    /// Function name.
    pub name: String,
    /// Generic type parameters (`function f<T>(...)`).
    pub type_parameters: Vec<String>,
    /// Parameters in declared order.
    pub parameters: Vec<Field>,
    /// Return type.
    pub return_type: TypeExpression,
}

/// Type alias declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeAliasDecl {
    /// Alias name.
    pub name: String,
    /// Right-hand side.
    pub aliased_type: TypeExpression,
}

impl TypeAliasDecl {
    /// Fields of an aliased inline record.
    #[must_use]
    pub fn record_fields(&self) -> Option<&[Field]> {
        match &self.aliased_type {
            TypeExpression::Record(fields) => Some(fields),
            _ => None,
        }
    }

    /// Key and value of an aliased map.
    #[must_use]
    pub fn map_entry(&self) -> Option<(&TypeExpression, &TypeExpression)> {
        match &self.aliased_type {
            TypeExpression::Map { key, value } => Some((key, value)),
            _ => None,
        }
    }
}

/// Top-level declaration variants.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Declaration {
    /// `struct Name [extends Parent] { ... }`.
    Struct(StructDecl),
    /// `interface Name [extends Parent] { ... }`.
    Interface(InterfaceDecl),
    /// `function name(params): Return`.
    Function(FunctionDecl),
    /// `type Name = Expr`.
    TypeAlias(TypeAliasDecl),
}

impl Declaration {
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

    /// Human readable kind, as written in the DSL.
    #[must_use]
    pub const fn keyword(&self) -> &'static str {
        match self {
            Self::Struct(_) => "struct",
            Self::Interface(_) => "interface",
            Self::Function(_) => "function",
            Self::TypeAlias(_) => "type",
        }
    }
}

/// Ordered sequence of top-level declarations from one parse pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Document {
    /// Declarations in source order.
    pub declarations: Vec<Declaration>,
}

impl Document {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a declaration.
    pub fn push(&mut self, declaration: Declaration) {
        self.declarations.push(declaration);
    }

    /// Number of declarations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Returns true if the document declares nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Iterates over declarations in source order.
    pub fn iter(&self) -> std::slice::Iter<'_, Declaration> {
        self.declarations.iter()
    }

    /// Finds the first struct with the given name.
    #[must_use]
    pub fn find_struct(&self, name: &str) -> Option<&StructDecl> {
        self.iter().find_map(|d| match d {
            Declaration::Struct(s) if s.name == name => Some(s),
            _ => None,
        })
    }

    /// Finds the first interface with the given name.
    #[must_use]
    pub fn find_interface(&self, name: &str) -> Option<&InterfaceDecl> {
        self.iter().find_map(|d| match d {
            Declaration::Interface(i) if i.name == name => Some(i),
            _ => None,
        })
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Declaration;
    type IntoIter = std::slice::Iter<'a, Declaration>;

    fn into_iter(self) -> Self::IntoIter {
        self.declarations.iter()
    }
}
