//! Compile errors for syntax specs.

use thiserror::Error;

use crate::span::Span;

/// A malformed syntax spec, with the position of the offending token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at column {} in syntax `{spec}`", span.column)]
pub struct CompileError {
    /// What went wrong.
    pub kind: CompileErrorKind,
    /// Where in the spec it went wrong.
    pub span: Span,
    /// The full spec text.
    pub spec: String,
}

impl CompileError {
    /// Creates a new compile error.
    #[must_use]
    pub fn new(kind: CompileErrorKind, span: Span, spec: &str) -> Self {
        Self {
            kind,
            span,
            spec: spec.to_string(),
        }
    }

    /// The 1-based column of the error.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.span.column
    }
}

/// Categorized compile error kinds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileErrorKind {
    /// `[` without a matching `]`.
    #[error("unclosed optional segment")]
    UnclosedOptional,

    /// `]`, `}`, or `>` with nothing to close.
    #[error("unexpected '{0}'")]
    UnexpectedClose(char),

    /// `<` without a matching `>`.
    #[error("unterminated capture name")]
    UnterminatedCapture,

    /// `<>` or `<:pattern>`.
    #[error("empty capture name")]
    EmptyCaptureName,

    /// Capture names are letters, digits, `_`, and `-`.
    #[error("invalid capture name '{0}'")]
    InvalidCaptureName(String),

    /// The same capture name appears twice.
    #[error("duplicate capture '{0}'")]
    DuplicateCapture(String),

    /// The explicit sub-pattern is not a valid regular expression.
    #[error("invalid pattern for capture '{name}': {message}")]
    InvalidCapturePattern {
        /// The capture name.
        name: String,
        /// The regex engine's complaint.
        message: String,
    },

    /// `{` without a matching `}`.
    #[error("unterminated choice group")]
    UnterminatedChoice,

    /// `{}`.
    #[error("empty choice group")]
    EmptyChoice,

    /// `{a||b}` or `{a|}`.
    #[error("empty alternative in choice group")]
    EmptyChoiceAlternative,

    /// Only literal text may appear inside a choice group.
    #[error("{0} is not allowed inside a choice group")]
    NestedInChoice(&'static str),

    /// `[]` or `[  ]`.
    #[error("empty optional segment")]
    EmptyOptional,
}
