//! Structured, non-fatal diagnostics.
//!
//! Nothing in the parser or the generators aborts on bad input. Every
//! recoverable problem is recorded as a [`Diagnostic`] and the offending unit
//! is skipped, so callers can inspect what went wrong by value.

use std::fmt;

/// Broad class of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticClass {
    /// Malformed source or an unresolvable reference.
    Structural,
    /// A declaration or type a particular target cannot express as written.
    TargetCapability,
}

/// What went wrong.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiagnosticKind {
    /// A top-level line that starts no known declaration.
    UnrecognizedLine,
    /// A `struct`/`interface` header without a usable name.
    MalformedHeader,
    /// A struct body line that is not `name: type`.
    MalformedField,
    /// A parameter that is not `name: type`.
    MalformedParameter,
    /// An interface body line that is not `name(params): Return`.
    MalformedMethod,
    /// A `function` line that is not `function name(params): Return`.
    MalformedFunction,
    /// A `type` line that is not `type Name = Expr`.
    MalformedTypeAlias,
    /// A field inside an inline `{ ... }` record that is not `name: type`.
    MalformedRecordField,
    /// `Record<...>` with other than two comma separated parts.
    RecordArity,
    /// An empty type expression.
    EmptyTypeExpression,
    /// A trailing `?` outside a field or parameter type, where no optional
    /// marker applies. The `?` is dropped.
    MisplacedOptional,
    /// A body that runs to the end of the input without a closing `}`.
    UnterminatedBody,
    /// A declaration name that was already used earlier in the document.
    DuplicateDeclaration,
    /// An `extends` target that does not name a declaration of the same kind.
    UnresolvedParent,
    /// A struct that (transitively) extends itself.
    InheritanceCycle,
    /// A declaration kind the named target has no representation for.
    UnsupportedDeclaration {
        /// Target name.
        target: String,
    },
    /// A type the named target renders with less structure than declared.
    ApproximatedType {
        /// Target name.
        target: String,
    },
}

impl DiagnosticKind {
    /// Returns the class of this kind.
    #[must_use]
    pub const fn class(&self) -> DiagnosticClass {
        match self {
            Self::UnsupportedDeclaration { .. } | Self::ApproximatedType { .. } => {
                DiagnosticClass::TargetCapability
            }
            _ => DiagnosticClass::Structural,
        }
    }

    /// Short, stable identifier used in log output.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::UnrecognizedLine => "unrecognized-line",
            Self::MalformedHeader => "malformed-header",
            Self::MalformedField => "malformed-field",
            Self::MalformedParameter => "malformed-parameter",
            Self::MalformedMethod => "malformed-method",
            Self::MalformedFunction => "malformed-function",
            Self::MalformedTypeAlias => "malformed-type-alias",
            Self::MalformedRecordField => "malformed-record-field",
            Self::RecordArity => "record-arity",
            Self::EmptyTypeExpression => "empty-type-expression",
            Self::MisplacedOptional => "misplaced-optional",
            Self::UnterminatedBody => "unterminated-body",
            Self::DuplicateDeclaration => "duplicate-declaration",
            Self::UnresolvedParent => "unresolved-parent",
            Self::InheritanceCycle => "inheritance-cycle",
            Self::UnsupportedDeclaration { .. } => "unsupported-declaration",
            Self::ApproximatedType { .. } => "approximated-type",
        }
    }
}

/// A recoverable problem found while parsing or generating.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostic {
    /// Kind of problem.
    pub kind: DiagnosticKind,
    /// 1-based source line, when the problem is tied to one.
    pub line: Option<usize>,
    /// Offending text or declaration name.
    pub context: String,
}

impl Diagnostic {
    /// Creates a diagnostic tied to a source line.
    pub fn at(kind: DiagnosticKind, line: usize, context: impl Into<String>) -> Self {
        Self {
            kind,
            line: Some(line),
            context: context.into(),
        }
    }

    /// Creates a diagnostic not tied to a source line.
    pub fn new(kind: DiagnosticKind, context: impl Into<String>) -> Self {
        Self {
            kind,
            line: None,
            context: context.into(),
        }
    }

    /// Returns the class of this diagnostic.
    #[must_use]
    pub const fn class(&self) -> DiagnosticClass {
        self.kind.class()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(line) = self.line {
            write!(f, "line {line}: ")?;
        }
        match &self.kind {
            DiagnosticKind::UnsupportedDeclaration { target } => {
                write!(f, "{} cannot express `{}`, skipped", target, self.context)
            }
            DiagnosticKind::ApproximatedType { target } => {
                write!(f, "{} approximates `{}`", target, self.context)
            }
            kind => write!(f, "{}: `{}`", kind.code(), self.context),
        }
    }
}

/// Collects diagnostics and mirrors each one to the log.
#[derive(Debug, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Creates an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a diagnostic.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        tracing::warn!(
            kind = diagnostic.kind.code(),
            line = diagnostic.line,
            "{}",
            diagnostic
        );
        self.items.push(diagnostic);
    }

    /// Records a diagnostic tied to a source line.
    pub fn report(&mut self, kind: DiagnosticKind, line: usize, context: impl Into<String>) {
        self.push(Diagnostic::at(kind, line, context));
    }

    /// Appends already recorded diagnostics without logging them again.
    pub fn extend(&mut self, other: impl IntoIterator<Item = Diagnostic>) {
        self.items.extend(other);
    }

    /// Number of recorded diagnostics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Consumes the collector.
    #[must_use]
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}
