//! Recursive type-expression parser.
//!
//! Forms are tried in order, first match wins:
//!
//! 1. `Base<Inner>` where the `<` opened after `Base` closes at the very end.
//!    `Record<K, V>` becomes a [`TypeExpression::Map`]; anything else a
//!    [`TypeExpression::Generic`].
//! 2. `T[]`.
//! 3. `{ a: A, b: B }`.
//! 4. Any other token, kept as [`TypeExpression::Named`].
//!
//! A trailing `?` is only meaningful on a field or parameter, where
//! [`parse_field`] strips it first. Anywhere else it is reported and dropped.

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::scanner::{find_top_level, matching_close, split_top_level};
use crate::types::{Field, TypeExpression};

/// Base name that turns a generic application into a map.
const MAP_BASE: &str = "Record";

/// Parses one type expression.
///
/// Never fails: problems are reported to `diagnostics` against `line` and the
/// closest sensible expression is returned.
pub fn parse_type_expression(
    text: &str,
    line: usize,
    diagnostics: &mut Diagnostics,
) -> TypeExpression {
    let text = text.trim();
    if text.is_empty() {
        diagnostics.report(DiagnosticKind::EmptyTypeExpression, line, text);
        return TypeExpression::named("Any");
    }

    if let Some(stripped) = text.strip_suffix('?') {
        diagnostics.report(DiagnosticKind::MisplacedOptional, line, text);
        return parse_type_expression(stripped, line, diagnostics);
    }

    if let Some((base, inner)) = split_generic(text) {
        if base == MAP_BASE {
            return parse_map(text, inner, line, diagnostics);
        }
        return TypeExpression::generic(base, parse_type_expression(inner, line, diagnostics));
    }

    if let Some(element) = text.strip_suffix("[]") {
        return TypeExpression::array(parse_type_expression(element, line, diagnostics));
    }

    if text.starts_with('{') && matching_close(text, 0) == Some(text.len() - 1) {
        let interior = &text[1..text.len() - 1];
        let fields = split_top_level(interior, ',')
            .into_iter()
            .filter(|piece| !piece.is_empty())
            .filter_map(|piece| {
                parse_field(piece, line, DiagnosticKind::MalformedRecordField, diagnostics)
            })
            .collect();
        return TypeExpression::Record(fields);
    }

    TypeExpression::named(text)
}

/// Splits `Base<Inner>` into its parts when the whole text is one generic
/// application.
fn split_generic(text: &str) -> Option<(&str, &str)> {
    let open = text.find('<')?;
    let base = text[..open].trim();
    if !is_identifier(base) {
        return None;
    }
    let close = matching_close(text, open)?;
    if close != text.len() - 1 {
        return None;
    }
    Some((base, &text[open + 1..close]))
}

fn parse_map(
    text: &str,
    inner: &str,
    line: usize,
    diagnostics: &mut Diagnostics,
) -> TypeExpression {
    match split_top_level(inner, ',').as_slice() {
        [key, value] if !key.is_empty() && !value.is_empty() => TypeExpression::map(
            parse_type_expression(key, line, diagnostics),
            parse_type_expression(value, line, diagnostics),
        ),
        _ => {
            diagnostics.report(DiagnosticKind::RecordArity, line, text);
            TypeExpression::map(TypeExpression::named("String"), TypeExpression::named("Any"))
        }
    }
}

/// Parses `name: Type` (optionally `name: Type?` or `name?: Type`).
///
/// Returns `None` and reports `kind` when the text does not split into a
/// valid identifier and a non-empty type.
pub(crate) fn parse_field(
    text: &str,
    line: usize,
    kind: DiagnosticKind,
    diagnostics: &mut Diagnostics,
) -> Option<Field> {
    let Some(colon) = find_top_level(text, ':') else {
        diagnostics.report(kind, line, text);
        return None;
    };
    let (name, name_optional) = split_optional(text[..colon].trim());
    let (type_text, type_optional) = split_optional(text[colon + 1..].trim());

    if !is_identifier(name) || type_text.is_empty() {
        diagnostics.report(kind, line, text);
        return None;
    }

    Some(Field {
        name: name.to_string(),
        ty: parse_type_expression(type_text, line, diagnostics),
        optional: name_optional || type_optional,
    })
}

/// Strips one trailing `?`.
pub(crate) fn split_optional(text: &str) -> (&str, bool) {
    match text.strip_suffix('?') {
        Some(rest) => (rest.trim_end(), true),
        None => (text, false),
    }
}

/// Returns true for `[A-Za-z_][A-Za-z0-9_]*`, except a lone `_`.
pub(crate) fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    text != "_" && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> (TypeExpression, Vec<crate::Diagnostic>) {
        let mut diags = Diagnostics::new();
        let ty = parse_type_expression(text, 1, &mut diags);
        (ty, diags.into_vec())
    }

    #[test]
    fn test_parse_named() {
        let (ty, diags) = parse("Company");
        assert_eq!(ty, TypeExpression::named("Company"));
        assert!(diags.is_empty());
    }

    #[test]
    fn test_parse_primitive_stays_named() {
        let (ty, _) = parse("String");
        assert_eq!(ty, TypeExpression::named("String"));
    }

    #[test]
    fn test_parse_array() {
        let (ty, _) = parse("String[]");
        assert_eq!(ty, TypeExpression::array(TypeExpression::named("String")));

        let (ty, _) = parse("Int32[][]");
        assert_eq!(
            ty,
            TypeExpression::array(TypeExpression::array(TypeExpression::named("Int32")))
        );
    }

    #[test]
    fn test_parse_generic() {
        let (ty, diags) = parse("ApiResponse<T>");
        assert_eq!(
            ty,
            TypeExpression::generic("ApiResponse", TypeExpression::named("T"))
        );
        assert!(diags.is_empty());

        let (ty, _) = parse("Page<Person[]>");
        assert_eq!(
            ty,
            TypeExpression::generic(
                "Page",
                TypeExpression::array(TypeExpression::named("Person"))
            )
        );
    }

    #[test]
    fn test_parse_array_of_generic() {
        let (ty, _) = parse("ApiResponse<T>[]");
        assert_eq!(
            ty,
            TypeExpression::array(TypeExpression::generic(
                "ApiResponse",
                TypeExpression::named("T")
            ))
        );
    }

    #[test]
    fn test_parse_map() {
        let (ty, diags) = parse("Record<String, Int32>");
        assert_eq!(
            ty,
            TypeExpression::map(
                TypeExpression::named("String"),
                TypeExpression::named("Int32")
            )
        );
        assert!(diags.is_empty());
    }

    #[test]
    fn test_parse_map_nested_value() {
        let (ty, _) = parse("Record<String, Record<String, Int32[]>>");
        assert_eq!(
            ty,
            TypeExpression::map(
                TypeExpression::named("String"),
                TypeExpression::map(
                    TypeExpression::named("String"),
                    TypeExpression::array(TypeExpression::named("Int32"))
                )
            )
        );
    }

    #[test]
    fn test_parse_map_wrong_arity_falls_back() {
        let (ty, diags) = parse("Record<String, Int32, Boolean>");
        assert_eq!(
            ty,
            TypeExpression::map(TypeExpression::named("String"), TypeExpression::named("Any"))
        );
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].kind, DiagnosticKind::RecordArity);

        let (_, diags) = parse("Record<String>");
        assert_eq!(diags[0].kind, DiagnosticKind::RecordArity);
    }

    #[test]
    fn test_parse_inline_record() {
        let (ty, diags) = parse("{ seconds: Int32, nanos: Int32 }");
        assert!(diags.is_empty());
        let TypeExpression::Record(fields) = ty else {
            panic!("expected record");
        };
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].name, "seconds");
        assert_eq!(fields[0].ty, TypeExpression::named("Int32"));
        assert_eq!(fields[1].name, "nanos");
    }

    #[test]
    fn test_parse_inline_record_nested() {
        let (ty, _) = parse("{ at: { s: Int32, ns: Int32 }, tags: Record<String, String> }");
        let TypeExpression::Record(fields) = ty else {
            panic!("expected record");
        };
        assert_eq!(fields.len(), 2);
        assert!(matches!(&fields[0].ty, TypeExpression::Record(inner) if inner.len() == 2));
        assert!(matches!(fields[1].ty, TypeExpression::Map { .. }));
    }

    #[test]
    fn test_parse_inline_record_drops_malformed_field() {
        let (ty, diags) = parse("{ key: String, broken, value: Int32 }");
        let TypeExpression::Record(fields) = ty else {
            panic!("expected record");
        };
        let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["key", "value"]);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].kind, DiagnosticKind::MalformedRecordField);
        assert_eq!(diags[0].context, "broken");
    }

    #[test]
    fn test_parse_inline_record_optional_field() {
        let (ty, _) = parse("{ note: String? }");
        let TypeExpression::Record(fields) = ty else {
            panic!("expected record");
        };
        assert!(fields[0].optional);
        assert_eq!(fields[0].ty, TypeExpression::named("String"));
    }

    #[test]
    fn test_parse_empty() {
        let (ty, diags) = parse("   ");
        assert_eq!(ty, TypeExpression::named("Any"));
        assert_eq!(diags[0].kind, DiagnosticKind::EmptyTypeExpression);
    }

    #[test]
    fn test_parse_field() {
        let mut diags = Diagnostics::new();
        let field = parse_field("age: Int32?", 4, DiagnosticKind::MalformedField, &mut diags)
            .expect("valid field");
        assert_eq!(field.name, "age");
        assert!(field.optional);

        let field = parse_field("age?: Int32", 4, DiagnosticKind::MalformedField, &mut diags)
            .expect("valid field");
        assert!(field.optional);
        assert_eq!(field.ty, TypeExpression::named("Int32"));

        assert!(parse_field("age Int32", 5, DiagnosticKind::MalformedField, &mut diags).is_none());
        assert!(parse_field("age:", 6, DiagnosticKind::MalformedField, &mut diags).is_none());
        assert!(parse_field("1st: A", 7, DiagnosticKind::MalformedField, &mut diags).is_none());

        let diags = diags.into_vec();
        let lines: Vec<Option<usize>> = diags.iter().map(|d| d.line).collect();
        assert_eq!(lines, [Some(5), Some(6), Some(7)]);
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("isWorking"));
        assert!(is_identifier("_id2"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("2x"));
        assert!(!is_identifier("a-b"));
        assert!(!is_identifier("_"));
        assert!(is_identifier("__"));
    }

    #[test]
    fn test_parse_optional_array_element() {
        let (ty, diags) = parse("Int32?[]");
        assert_eq!(ty, TypeExpression::array(TypeExpression::named("Int32")));
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].kind, DiagnosticKind::MisplacedOptional);
        assert_eq!(diags[0].context, "Int32?");
    }

    #[test]
    fn test_parse_optional_outside_field() {
        let (ty, diags) = parse("Page<Person?>?");
        assert_eq!(
            ty,
            TypeExpression::generic("Page", TypeExpression::named("Person"))
        );
        let kinds: Vec<&DiagnosticKind> = diags.iter().map(|d| &d.kind).collect();
        assert_eq!(
            kinds,
            [
                &DiagnosticKind::MisplacedOptional,
                &DiagnosticKind::MisplacedOptional
            ]
        );

        let (ty, diags) = parse("?");
        assert_eq!(ty, TypeExpression::named("Any"));
        assert_eq!(diags[1].kind, DiagnosticKind::EmptyTypeExpression);
    }

    #[test]
    fn test_parse_field_double_optional() {
        let mut diags = Diagnostics::new();
        let field = parse_field("b: Int32??", 2, DiagnosticKind::MalformedField, &mut diags)
            .expect("valid field");
        assert!(field.optional);
        assert_eq!(field.ty, TypeExpression::named("Int32"));
        let diags = diags.into_vec();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].kind, DiagnosticKind::MisplacedOptional);
    }

    #[test]
    fn test_parse_field_rejects_underscore_name() {
        let mut diags = Diagnostics::new();
        assert!(parse_field("_: Int32", 3, DiagnosticKind::MalformedField, &mut diags).is_none());
        assert_eq!(diags.into_vec()[0].kind, DiagnosticKind::MalformedField);
    }
}
