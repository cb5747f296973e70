//! Type expressions.
//!
//! This module contains the recursive representation of a parsed type and
//! the set of primitive names the DSL knows about.

use std::fmt;

/// DSL primitive types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PrimitiveType {
    /// Signed 8-bit integer.
    Int8,
    /// Signed 16-bit integer.
    Int16,
    /// Signed 32-bit integer.
    Int32,
    /// Signed 64-bit integer.
    Int64,
    /// Unsigned 8-bit integer.
    UInt8,
    /// Unsigned 16-bit integer.
    UInt16,
    /// Unsigned 32-bit integer.
    UInt32,
    /// Unsigned 64-bit integer.
    UInt64,
    /// 32-bit floating point (`Float32` or the legacy `Float`).
    Float32,
    /// 64-bit floating point (`Float64` or the legacy `Double`).
    Float64,
    /// UTF-8 string.
    String,
    /// Single character.
    Char,
    /// Boolean.
    Boolean,
    /// No value.
    Void,
    /// Any value; only produced by the `Record<...>` arity fallback or
    /// written explicitly.
    Any,
}

impl PrimitiveType {
    /// Every primitive, in declaration order.
    pub const ALL: [Self; 15] = [
        Self::Int8,
        Self::Int16,
        Self::Int32,
        Self::Int64,
        Self::UInt8,
        Self::UInt16,
        Self::UInt32,
        Self::UInt64,
        Self::Float32,
        Self::Float64,
        Self::String,
        Self::Char,
        Self::Boolean,
        Self::Void,
        Self::Any,
    ];

    /// Parses a primitive from its DSL name.
    #[must_use]
    pub fn from_dsl_name(name: &str) -> Option<Self> {
        match name {
            "Int8" => Some(Self::Int8),
            "Int16" => Some(Self::Int16),
            "Int32" => Some(Self::Int32),
            "Int64" => Some(Self::Int64),
            "UInt8" => Some(Self::UInt8),
            "UInt16" => Some(Self::UInt16),
            "UInt32" => Some(Self::UInt32),
            "UInt64" => Some(Self::UInt64),
            "Float32" | "Float" => Some(Self::Float32),
            "Float64" | "Double" => Some(Self::Float64),
            "String" => Some(Self::String),
            "Char" => Some(Self::Char),
            "Boolean" => Some(Self::Boolean),
            "Void" => Some(Self::Void),
            "Any" => Some(Self::Any),
            _ => None,
        }
    }

    /// Returns the canonical DSL name.
    #[must_use]
    pub const fn dsl_name(&self) -> &'static str {
        match self {
            Self::Int8 => "Int8",
            Self::Int16 => "Int16",
            Self::Int32 => "Int32",
            Self::Int64 => "Int64",
            Self::UInt8 => "UInt8",
            Self::UInt16 => "UInt16",
            Self::UInt32 => "UInt32",
            Self::UInt64 => "UInt64",
            Self::Float32 => "Float32",
            Self::Float64 => "Float64",
            Self::String => "String",
            Self::Char => "Char",
            Self::Boolean => "Boolean",
            Self::Void => "Void",
            Self::Any => "Any",
        }
    }
}

/// A parsed type.
///
/// Optionality is not part of a type; it lives on [`Field::optional`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeExpression {
    /// A DSL primitive. The parser never produces this variant; named leaves
    /// are classified during resolution.
    Primitive(PrimitiveType),
    /// Any other identifier, passed through to every target apart from
    /// keyword escaping.
    Named(String),
    /// `T[]`.
    Array(Box<TypeExpression>),
    /// `Record<K, V>`.
    Map {
        /// Key type.
        key: Box<TypeExpression>,
        /// Value type.
        value: Box<TypeExpression>,
    },
    /// Anonymous `{ a: A, b: B }`.
    Record(Vec<Field>),
    /// `Base<Argument>`.
    Generic {
        /// Base name.
        base: String,
        /// Applied argument.
        argument: Box<TypeExpression>,
    },
}

impl TypeExpression {
    /// Creates a named leaf.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Creates an array of `element`.
    #[must_use]
    pub fn array(element: TypeExpression) -> Self {
        Self::Array(Box::new(element))
    }

    /// Creates a map from `key` to `value`.
    #[must_use]
    pub fn map(key: TypeExpression, value: TypeExpression) -> Self {
        Self::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Creates a generic application.
    pub fn generic(base: impl Into<String>, argument: TypeExpression) -> Self {
        Self::Generic {
            base: base.into(),
            argument: Box::new(argument),
        }
    }

    /// Returns the identifier of a named leaf.
    #[must_use]
    pub fn as_named(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name),
            _ => None,
        }
    }

    /// Returns true for `Void`, whether still named or already classified.
    #[must_use]
    pub fn is_void(&self) -> bool {
        match self {
            Self::Primitive(p) => *p == PrimitiveType::Void,
            Self::Named(name) => PrimitiveType::from_dsl_name(name) == Some(PrimitiveType::Void),
            _ => false,
        }
    }

    /// Rewrites every named leaf that spells a DSL primitive into
    /// [`TypeExpression::Primitive`].
    #[must_use]
    pub fn classify_primitives(&self) -> Self {
        match self {
            Self::Primitive(p) => Self::Primitive(*p),
            Self::Named(name) => match PrimitiveType::from_dsl_name(name) {
                Some(p) => Self::Primitive(p),
                None => Self::Named(name.clone()),
            },
            Self::Array(element) => Self::array(element.classify_primitives()),
            Self::Map { key, value } => {
                Self::map(key.classify_primitives(), value.classify_primitives())
            }
            Self::Record(fields) => {
                Self::Record(fields.iter().map(Field::classify_primitives).collect())
            }
            Self::Generic { base, argument } => {
                Self::generic(base.clone(), argument.classify_primitives())
            }
        }
    }

    /// Calls `f` on this expression and then on every nested one, outermost
    /// first.
    pub fn visit<'a>(&'a self, f: &mut impl FnMut(&'a TypeExpression)) {
        f(self);
        match self {
            Self::Primitive(_) | Self::Named(_) => {}
            Self::Array(element) => element.visit(f),
            Self::Map { key, value } => {
                key.visit(f);
                value.visit(f);
            }
            Self::Record(fields) => {
                for field in fields {
                    field.ty.visit(f);
                }
            }
            Self::Generic { argument, .. } => argument.visit(f),
        }
    }
}

/// Writes the type back in DSL syntax.
impl fmt::Display for TypeExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(p) => f.write_str(p.dsl_name()),
            Self::Named(name) => f.write_str(name),
            Self::Array(element) => write!(f, "{element}[]"),
            Self::Map { key, value } => write!(f, "Record<{key}, {value}>"),
            Self::Record(fields) => {
                f.write_str("{ ")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{field}")?;
                }
                f.write_str(" }")
            }
            Self::Generic { base, argument } => write!(f, "{base}<{argument}>"),
        }
    }
}

/// A named, typed slot: a struct field, a record field or a parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Field {
    /// Field name.
    pub name: String,
    /// Field type.
    pub ty: TypeExpression,
    /// Whether the field was declared with a trailing `?`.
    pub optional: bool,
}

impl Field {
    /// Creates a required field.
    pub fn new(name: impl Into<String>, ty: TypeExpression) -> Self {
        Self {
            name: name.into(),
            ty,
            optional: false,
        }
    }

    /// Creates an optional field.
    pub fn optional(name: impl Into<String>, ty: TypeExpression) -> Self {
        Self {
            name: name.into(),
            ty,
            optional: true,
        }
    }

    /// Returns a copy with primitive leaves classified.
    #[must_use]
    pub fn classify_primitives(&self) -> Self {
        Self {
            name: self.name.clone(),
            ty: self.ty.classify_primitives(),
            optional: self.optional,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.ty)?;
        if self.optional {
            f.write_str("?")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_from_dsl_name() {
        assert_eq!(PrimitiveType::from_dsl_name("Int32"), Some(PrimitiveType::Int32));
        assert_eq!(PrimitiveType::from_dsl_name("Float"), Some(PrimitiveType::Float32));
        assert_eq!(PrimitiveType::from_dsl_name("Double"), Some(PrimitiveType::Float64));
        assert_eq!(PrimitiveType::from_dsl_name("int32"), None);
        assert_eq!(PrimitiveType::from_dsl_name("Person"), None);
    }

    #[test]
    fn test_primitive_names_round_trip() {
        for p in PrimitiveType::ALL {
            assert_eq!(PrimitiveType::from_dsl_name(p.dsl_name()), Some(p));
        }
    }

    #[test]
    fn test_visit_outermost_first() {
        let ty = TypeExpression::map(
            TypeExpression::named("String"),
            TypeExpression::Record(vec![Field::new(
                "k",
                TypeExpression::array(TypeExpression::named("Int32")),
            )]),
        );
        let mut seen = Vec::new();
        ty.visit(&mut |t| seen.push(t.to_string()));
        assert_eq!(
            seen,
            [
                "Record<String, { k: Int32[] }>",
                "String",
                "{ k: Int32[] }",
                "Int32[]",
                "Int32"
            ]
        );
    }

    #[test]
    fn test_classify_primitives() {
        let ty = TypeExpression::generic(
            "ApiResponse",
            TypeExpression::array(TypeExpression::named("Int32")),
        );
        let classified = ty.classify_primitives();
        assert_eq!(
            classified,
            TypeExpression::generic(
                "ApiResponse",
                TypeExpression::array(TypeExpression::Primitive(PrimitiveType::Int32)),
            )
        );

        let custom = TypeExpression::named("Company").classify_primitives();
        assert_eq!(custom.as_named(), Some("Company"));
    }

    #[test]
    fn test_classify_record_fields() {
        let ty = TypeExpression::Record(vec![
            Field::new("key", TypeExpression::named("String")),
            Field::optional("value", TypeExpression::named("Double")),
        ]);
        let TypeExpression::Record(fields) = ty.classify_primitives() else {
            panic!("expected record");
        };
        assert_eq!(fields[0].ty, TypeExpression::Primitive(PrimitiveType::String));
        assert_eq!(fields[1].ty, TypeExpression::Primitive(PrimitiveType::Float64));
        assert!(fields[1].optional);
    }

    #[test]
    fn test_is_void() {
        assert!(TypeExpression::named("Void").is_void());
        assert!(TypeExpression::Primitive(PrimitiveType::Void).is_void());
        assert!(!TypeExpression::named("String").is_void());
        assert!(!TypeExpression::array(TypeExpression::named("Void")).is_void());
    }

    #[test]
    fn test_display_dsl_syntax() {
        let ty = TypeExpression::map(
            TypeExpression::named("String"),
            TypeExpression::array(TypeExpression::named("Int32")),
        );
        assert_eq!(ty.to_string(), "Record<String, Int32[]>");

        let record = TypeExpression::Record(vec![
            Field::new("seconds", TypeExpression::named("Int32")),
            Field::optional("nanos", TypeExpression::named("Int32")),
        ]);
        assert_eq!(record.to_string(), "{ seconds: Int32, nanos: Int32? }");
    }
}
