//! Document-level checks.
//!
//! Field types are never checked against declarations; only names and
//! `extends` links are.

use std::collections::HashSet;

use crate::declarations::{Declaration, Document};
use crate::diagnostics::{Diagnostic, DiagnosticKind};

/// Reports every declaration whose name was already used earlier.
///
/// The first declaration with a name is the one inheritance lookups see;
/// later ones are still rendered.
#[must_use]
pub fn find_duplicates(document: &Document) -> Vec<Diagnostic> {
    let mut seen = HashSet::new();
    document
        .iter()
        .filter(|decl| !seen.insert(decl.name()))
        .map(|decl| {
            Diagnostic::new(
                DiagnosticKind::DuplicateDeclaration,
                format!("{} {}", decl.keyword(), decl.name()),
            )
        })
        .collect()
}

/// Reports `extends` links that do not name a declaration of the same kind.
#[must_use]
pub fn find_unresolved_parents(document: &Document) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    for decl in document {
        let (name, parent, resolved) = match decl {
            Declaration::Struct(s) => match &s.extends {
                Some(parent) => (&s.name, parent, document.find_struct(parent).is_some()),
                None => continue,
            },
            Declaration::Interface(i) => match &i.extends {
                Some(parent) => (&i.name, parent, document.find_interface(parent).is_some()),
                None => continue,
            },
            Declaration::Function(_) | Declaration::TypeAlias(_) => continue,
        };
        if !resolved {
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::UnresolvedParent,
                format!("{name} extends {parent}"),
            ));
        }
    }
    diagnostics
}
