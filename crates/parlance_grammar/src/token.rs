//! Token types for syntax specs.
//!
//! Tokens are the output of the lexer and input to the parser.

use crate::span::Span;

/// A token from lexical analysis of a syntax spec.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    /// The type and value of this token.
    pub kind: TokenKind,
    /// Source location of this token.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Token types for syntax specs.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    /// `[`
    OpenOptional,
    /// `]`
    CloseOptional,
    /// `{`
    OpenChoice,
    /// `}`
    CloseChoice,
    /// `|` inside a choice group
    Bar,
    /// `<...>`, holding the text between the angle brackets
    Capture(String),
    /// `\w`
    Whitespace,
    /// Run of literal text, whitespace included
    Text(String),
    /// A stray `>`
    StrayClose,
    /// `<` with no closing `>`
    UnterminatedCapture,
    /// End of spec
    Eof,
}

impl TokenKind {
    /// Returns a human-readable name for this token kind.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::OpenOptional => "'['",
            Self::CloseOptional => "']'",
            Self::OpenChoice => "'{'",
            Self::CloseChoice => "'}'",
            Self::Bar => "'|'",
            Self::Capture(_) => "capture",
            Self::Whitespace => "whitespace marker",
            Self::Text(_) => "text",
            Self::StrayClose => "'>'",
            Self::UnterminatedCapture => "unterminated capture",
            Self::Eof => "end of spec",
        }
    }
}
