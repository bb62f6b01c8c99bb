//! Parser for syntax specs.
//!
//! The parser converts the lexer's token stream into a tree of
//! [`Element`]s, rejecting malformed specs with a positioned
//! [`CompileError`].

use std::collections::HashSet;

use crate::ast::Element;
use crate::error::{CompileError, CompileErrorKind};
use crate::lexer::Lexer;
use crate::span::Span;
use crate::token::{Token, TokenKind};

type Result<T> = std::result::Result<T, CompileError>;

/// Parser for syntax spec strings.
pub struct Parser<'src> {
    /// The lexer providing tokens.
    lexer: Lexer<'src>,
    /// Current token (lookahead).
    current: Token,
    /// Source text (for error messages).
    source: &'src str,
    /// Capture names seen so far.
    captures: HashSet<String>,
}

impl<'src> Parser<'src> {
    /// Creates a new parser for the given spec.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token();
        Self {
            lexer,
            current,
            source,
            captures: HashSet::new(),
        }
    }

    /// Parses the whole spec.
    ///
    /// # Errors
    /// Returns an error if the spec is malformed.
    pub fn parse_all(&mut self) -> Result<Vec<Element>> {
        let mut elements = Vec::new();
        loop {
            match &self.current.kind {
                TokenKind::Eof => return Ok(elements),
                TokenKind::CloseOptional => {
                    return Err(self.error(CompileErrorKind::UnexpectedClose(']')));
                }
                TokenKind::CloseChoice => {
                    return Err(self.error(CompileErrorKind::UnexpectedClose('}')));
                }
                _ => {
                    if let Some(element) = self.parse_element()? {
                        elements.push(element);
                    }
                }
            }
        }
    }

    /// Parses one element. Whitespace-only text yields `None`.
    fn parse_element(&mut self) -> Result<Option<Element>> {
        let span = self.current.span;
        match self.current.kind.clone() {
            TokenKind::Text(text) => {
                self.advance();
                let words: Vec<String> = text.split_whitespace().map(str::to_string).collect();
                if words.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(Element::Literal { words, span }))
                }
            }
            TokenKind::Capture(body) => {
                self.advance();
                self.parse_capture(&body, span).map(Some)
            }
            TokenKind::Whitespace => {
                self.advance();
                Ok(Some(Element::Whitespace { span }))
            }
            TokenKind::OpenOptional => self.parse_optional().map(Some),
            TokenKind::OpenChoice => self.parse_choice().map(Some),
            TokenKind::StrayClose => Err(self.error(CompileErrorKind::UnexpectedClose('>'))),
            TokenKind::UnterminatedCapture => {
                Err(self.error(CompileErrorKind::UnterminatedCapture))
            }
            TokenKind::CloseOptional => Err(self.error(CompileErrorKind::UnexpectedClose(']'))),
            TokenKind::CloseChoice => Err(self.error(CompileErrorKind::UnexpectedClose('}'))),
            TokenKind::Bar => Err(self.error(CompileErrorKind::UnexpectedClose('|'))),
            TokenKind::Eof => Err(self.error(CompileErrorKind::UnclosedOptional)),
        }
    }

    /// Parses an optional segment: `[...]`.
    fn parse_optional(&mut self) -> Result<Element> {
        let start_span = self.current.span;
        self.advance();

        let mut elements = Vec::new();
        loop {
            match self.current.kind {
                TokenKind::CloseOptional => break,
                TokenKind::Eof => {
                    return Err(self.error_at(start_span, CompileErrorKind::UnclosedOptional));
                }
                _ => {
                    if let Some(element) = self.parse_element()? {
                        elements.push(element);
                    }
                }
            }
        }

        let end_span = self.current.span;
        self.advance();

        if elements.is_empty() {
            return Err(self.error_at(start_span, CompileErrorKind::EmptyOptional));
        }
        Ok(Element::Optional {
            elements,
            span: start_span.to(end_span),
        })
    }

    /// Parses a choice group: `{a|b|c}`.
    fn parse_choice(&mut self) -> Result<Element> {
        let start_span = self.current.span;
        self.advance();

        let mut alternatives = Vec::new();
        let mut pending: Option<String> = None;
        let mut saw_bar = false;
        loop {
            match self.current.kind.clone() {
                TokenKind::Text(text) => {
                    pending = Some(text);
                    self.advance();
                }
                TokenKind::Bar => {
                    saw_bar = true;
                    alternatives.push(self.finish_alternative(pending.take())?);
                    self.advance();
                }
                TokenKind::CloseChoice => {
                    if pending.is_none() && !saw_bar {
                        return Err(self.error_at(start_span, CompileErrorKind::EmptyChoice));
                    }
                    alternatives.push(self.finish_alternative(pending.take())?);
                    let end_span = self.current.span;
                    self.advance();
                    return Ok(Element::Choice {
                        alternatives,
                        span: start_span.to(end_span),
                    });
                }
                TokenKind::Eof | TokenKind::UnterminatedCapture => {
                    return Err(self.error_at(start_span, CompileErrorKind::UnterminatedChoice));
                }
                other => {
                    return Err(self.error(CompileErrorKind::NestedInChoice(other.name())));
                }
            }
        }
    }

    fn finish_alternative(&self, text: Option<String>) -> Result<String> {
        let normalized = text
            .as_deref()
            .unwrap_or_default()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        if normalized.is_empty() {
            Err(self.error(CompileErrorKind::EmptyChoiceAlternative))
        } else {
            Ok(normalized)
        }
    }

    /// Parses the body of `<name>` or `<name:pattern>`.
    fn parse_capture(&mut self, body: &str, span: Span) -> Result<Element> {
        let (name, pattern) = match body.split_once(':') {
            Some((name, pattern)) => (name.trim(), Some(pattern.to_string())),
            None => (body.trim(), None),
        };

        if name.is_empty() {
            return Err(self.error_at(span, CompileErrorKind::EmptyCaptureName));
        }
        if !name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        {
            return Err(self.error_at(span, CompileErrorKind::InvalidCaptureName(name.to_string())));
        }
        if !self.captures.insert(name.to_string()) {
            return Err(self.error_at(span, CompileErrorKind::DuplicateCapture(name.to_string())));
        }

        Ok(Element::Capture {
            name: name.to_string(),
            pattern,
            span,
        })
    }

    /// Advances to the next token.
    fn advance(&mut self) {
        self.current = self.lexer.next_token();
    }

    /// Creates an error at the current token.
    fn error(&self, kind: CompileErrorKind) -> CompileError {
        self.error_at(self.current.span, kind)
    }

    /// Creates an error at a specific span.
    fn error_at(&self, span: Span, kind: CompileErrorKind) -> CompileError {
        CompileError::new(kind, span, self.source)
    }
}

/// Parses a syntax spec into elements.
///
/// # Errors
/// Returns an error if the spec is malformed.
pub fn parse(source: &str) -> Result<Vec<Element>> {
    Parser::new(source).parse_all()
}
