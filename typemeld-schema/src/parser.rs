//! Declaration parser.
//!
//! This module turns DSL source text into a [`Document`]. Parsing never
//! fails: a malformed line, parameter or declaration is skipped with a
//! [`Diagnostic`] and scanning resumes at the next line.

use crate::declarations::{
    Declaration, Document, FunctionDecl, InterfaceDecl, MethodSignature, StructDecl,
    TypeAliasDecl,
};
use crate::diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
use crate::scanner::{SourceLine, find_top_level, matching_close, scan, split_top_level};
use crate::type_expr::{is_identifier, parse_field, parse_type_expression};
use crate::types::{Field, TypeExpression};

/// Result of parsing one document.
#[derive(Debug, Clone, Default)]
pub struct ParseOutput {
    /// Declarations in source order.
    pub document: Document,
    /// Everything that was skipped, and why.
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseOutput {
    /// Splits into document and diagnostics.
    #[must_use]
    pub fn into_parts(self) -> (Document, Vec<Diagnostic>) {
        (self.document, self.diagnostics)
    }
}

/// Parses DSL source text.
///
/// # Arguments
/// * `source` - DSL text
///
/// # Returns
/// The document holding every well-formed declaration, plus diagnostics for
/// everything that was skipped.
#[must_use]
pub fn parse(source: &str) -> ParseOutput {
    let lines = scan(source);
    let mut diagnostics = Diagnostics::new();
    let mut document = Document::new();

    let mut index = 0;
    while index < lines.len() {
        let rest = &lines[index..];
        let step = match Keyword::of(rest[0].text) {
            Some(Keyword::Struct) => parse_struct(rest, &mut diagnostics),
            Some(Keyword::Interface) => parse_interface(rest, &mut diagnostics),
            Some(Keyword::Function) => parse_function(&rest[0], &mut diagnostics),
            Some(Keyword::Type) => parse_type_alias(&rest[0], &mut diagnostics),
            None => {
                diagnostics.report(DiagnosticKind::UnrecognizedLine, rest[0].number, rest[0].text);
                Step::skip(1)
            }
        };

        if let Some(declaration) = step.declaration {
            document.push(declaration);
        }
        index += step.consumed.max(1);
    }

    tracing::debug!(
        declarations = document.len(),
        diagnostics = diagnostics.len(),
        "parsed document"
    );

    ParseOutput {
        document,
        diagnostics: diagnostics.into_vec(),
    }
}

/// Declaration keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Keyword {
    Struct,
    Interface,
    Function,
    Type,
}

impl Keyword {
    /// Detects the keyword starting a line. A field or method that happens
    /// to be called `type` (`type: String`, `type(): String`) is not one.
    fn of(text: &str) -> Option<Self> {
        let mut tokens = text.splitn(2, char::is_whitespace);
        let keyword = match tokens.next()? {
            "struct" => Self::Struct,
            "interface" => Self::Interface,
            "function" => Self::Function,
            "type" => Self::Type,
            _ => return None,
        };
        let rest = tokens.next().unwrap_or("").trim_start();
        if rest.is_empty() || rest.starts_with(':') || rest.starts_with('(') {
            return None;
        }
        Some(keyword)
    }
}

/// One parse step: the declaration (if any survived) and the number of
/// scanned lines it consumed.
struct Step {
    declaration: Option<Declaration>,
    consumed: usize,
}

impl Step {
    fn new(declaration: Declaration, consumed: usize) -> Self {
        Self {
            declaration: Some(declaration),
            consumed,
        }
    }

    fn skip(consumed: usize) -> Self {
        Self {
            declaration: None,
            consumed,
        }
    }
}

/// Body item: a field or method text with its source line.
type BodyItem<'a> = (usize, &'a str);

/// A `struct`/`interface` block split into header and body items.
struct Block<'a> {
    header: &'a str,
    header_line: usize,
    body: Vec<BodyItem<'a>>,
    consumed: usize,
}

/// Reads a header line and its body up to the closing `}`.
///
/// Accepts `Name {` with one item per following line, `Name {}` and
/// `Name { a: A, b: B }` on one line, and a lone `{` on the line after the
/// header. A body that hits the end of input or the next declaration is
/// closed implicitly and reported.
fn read_block<'a>(lines: &[SourceLine<'a>], diagnostics: &mut Diagnostics) -> Block<'a> {
    let first = &lines[0];
    let mut body = Vec::new();
    let mut consumed = 1;

    let (header, mut opened) = match first.text.find('{') {
        Some(brace) => {
            let header = first.text[..brace].trim();
            if let Some(close) = matching_close(first.text, brace) {
                push_items(&first.text[brace + 1..close], first.number, &mut body);
                return Block {
                    header,
                    header_line: first.number,
                    body,
                    consumed,
                };
            }
            push_items(&first.text[brace + 1..], first.number, &mut body);
            (header, true)
        }
        None => (first.text, false),
    };

    let mut terminated = false;
    for line in &lines[1..] {
        if !opened && line.text == "{" {
            opened = true;
            consumed += 1;
            continue;
        }
        if line.text.starts_with('}') {
            consumed += 1;
            terminated = true;
            break;
        }
        if Keyword::of(line.text).is_some() {
            break;
        }
        push_items(line.text, line.number, &mut body);
        consumed += 1;
    }

    if !terminated {
        diagnostics.report(DiagnosticKind::UnterminatedBody, first.number, header);
    }

    Block {
        header,
        header_line: first.number,
        body,
        consumed,
    }
}

/// Splits body text on top-level commas, which also drops trailing commas.
fn push_items<'a>(text: &'a str, line: usize, body: &mut Vec<BodyItem<'a>>) {
    body.extend(
        split_top_level(text, ',')
            .into_iter()
            .filter(|item| !item.is_empty())
            .map(|item| (line, item)),
    );
}

/// Parsed `keyword Name [extends Parent]`.
struct Header {
    name: String,
    extends: Option<String>,
}

fn parse_header(header: &str, line: usize, diagnostics: &mut Diagnostics) -> Option<Header> {
    let tokens: Vec<&str> = header.split_whitespace().collect();
    let parsed = match tokens.as_slice() {
        [_, name] if is_identifier(name) => Some(Header {
            name: (*name).to_string(),
            extends: None,
        }),
        [_, name, "extends", parent] if is_identifier(name) && is_identifier(parent) => {
            Some(Header {
                name: (*name).to_string(),
                extends: Some((*parent).to_string()),
            })
        }
        _ => None,
    };
    if parsed.is_none() {
        diagnostics.report(DiagnosticKind::MalformedHeader, line, header);
    }
    parsed
}

fn parse_struct(lines: &[SourceLine<'_>], diagnostics: &mut Diagnostics) -> Step {
    let block = read_block(lines, diagnostics);
    let Some(header) = parse_header(block.header, block.header_line, diagnostics) else {
        return Step::skip(block.consumed);
    };

    let mut decl = StructDecl::new(header.name);
    decl.extends = header.extends;
    for (line, item) in block.body {
        if let Some(field) = parse_field(item, line, DiagnosticKind::MalformedField, diagnostics) {
            decl.add_field(field);
        }
    }

    Step::new(Declaration::Struct(decl), block.consumed)
}

fn parse_interface(lines: &[SourceLine<'_>], diagnostics: &mut Diagnostics) -> Step {
    let block = read_block(lines, diagnostics);
    let Some(header) = parse_header(block.header, block.header_line, diagnostics) else {
        return Step::skip(block.consumed);
    };

    let mut decl = InterfaceDecl::new(header.name);
    decl.extends = header.extends;
    for (line, item) in block.body {
        match parse_signature(item, line, DiagnosticKind::MalformedMethod, diagnostics) {
            Some(sig) if sig.type_parameters.is_empty() => decl.add_method(MethodSignature {
                name: sig.name,
                parameters: sig.parameters,
                return_type: sig.return_type,
            }),
            Some(_) => diagnostics.report(DiagnosticKind::MalformedMethod, line, item),
            None => {}
        }
    }

    Step::new(Declaration::Interface(decl), block.consumed)
}

fn parse_function(line: &SourceLine<'_>, diagnostics: &mut Diagnostics) -> Step {
    let text = line.text.trim_end_matches(';');
    let rest = text.strip_prefix("function").unwrap_or(text).trim_start();
    match parse_signature(rest, line.number, DiagnosticKind::MalformedFunction, diagnostics) {
        Some(sig) => Step::new(
            Declaration::Function(FunctionDecl {
                name: sig.name,
                type_parameters: sig.type_parameters,
                parameters: sig.parameters,
                return_type: sig.return_type,
            }),
            1,
        ),
        None => Step::skip(1),
    }
}

fn parse_type_alias(line: &SourceLine<'_>, diagnostics: &mut Diagnostics) -> Step {
    let text = line.text.trim_end_matches(';');
    let rest = text.strip_prefix("type").unwrap_or(text).trim_start();

    let Some(eq) = find_top_level(rest, '=') else {
        diagnostics.report(DiagnosticKind::MalformedTypeAlias, line.number, line.text);
        return Step::skip(1);
    };
    let name = rest[..eq].trim();
    let expr = rest[eq + 1..].trim();
    if !is_identifier(name) || expr.is_empty() {
        diagnostics.report(DiagnosticKind::MalformedTypeAlias, line.number, line.text);
        return Step::skip(1);
    }

    let aliased_type = parse_type_expression(expr, line.number, diagnostics);
    Step::new(
        Declaration::TypeAlias(TypeAliasDecl {
            name: name.to_string(),
            aliased_type,
        }),
        1,
    )
}

/// `name[<T, U>](params): Return`.
struct Signature {
    name: String,
    type_parameters: Vec<String>,
    parameters: Vec<Field>,
    return_type: TypeExpression,
}

fn parse_signature(
    text: &str,
    line: usize,
    kind: DiagnosticKind,
    diagnostics: &mut Diagnostics,
) -> Option<Signature> {
    let text = text.trim().trim_end_matches(';').trim_end();
    let parsed = split_signature(text);
    let Some((head, params, return_text)) = parsed else {
        diagnostics.report(kind, line, text);
        return None;
    };
    let Some((name, type_parameters)) = split_type_parameters(head) else {
        diagnostics.report(kind, line, text);
        return None;
    };

    Some(Signature {
        name: name.to_string(),
        type_parameters,
        parameters: parse_parameters(params, line, diagnostics),
        return_type: parse_type_expression(return_text, line, diagnostics),
    })
}

/// Splits `head(params): Return` into its three texts.
fn split_signature(text: &str) -> Option<(&str, &str, &str)> {
    let open = find_top_level(text, '(')?;
    let close = matching_close(text, open)?;
    let return_text = text[close + 1..].trim().strip_prefix(':')?.trim();
    if return_text.is_empty() {
        return None;
    }
    Some((text[..open].trim(), &text[open + 1..close], return_text))
}

/// Splits `name<T, U>` into the name and its type parameters.
fn split_type_parameters(head: &str) -> Option<(&str, Vec<String>)> {
    let Some(lt) = head.find('<') else {
        return is_identifier(head).then(|| (head, Vec::new()));
    };
    let name = head[..lt].trim();
    let inner = head[lt + 1..].strip_suffix('>')?;
    let params: Vec<&str> = split_top_level(inner, ',');
    if !is_identifier(name) || !params.iter().all(|p| is_identifier(p)) {
        return None;
    }
    Some((name, params.into_iter().map(str::to_string).collect()))
}

fn parse_parameters(text: &str, line: usize, diagnostics: &mut Diagnostics) -> Vec<Field> {
    split_top_level(text, ',')
        .into_iter()
        .filter(|piece| !piece.is_empty())
        .filter_map(|piece| {
            parse_field(piece, line, DiagnosticKind::MalformedParameter, diagnostics)
        })
        .collect()
}
