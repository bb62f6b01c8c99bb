//! Lexer for syntax specs.
//!
//! The lexer converts spec text into a stream of tokens. Everything that is
//! not a bracket, a capture, or the `\w` marker is literal text; `|` only
//! separates alternatives inside a choice group.

use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Lexer for syntax spec strings.
pub struct Lexer<'src> {
    /// Source text being tokenized.
    source: &'src str,
    /// Current byte offset in source.
    position: usize,
    /// Current column number (1-based, in characters).
    column: u32,
    /// Depth of open choice groups.
    choice_depth: usize,
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given spec.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            position: 0,
            column: 1,
            choice_depth: 0,
        }
    }

    /// Returns the next token from the spec.
    pub fn next_token(&mut self) -> Token {
        let start = self.position;
        let start_column = self.column;

        let Some(c) = self.peek_char() else {
            return Token::new(TokenKind::Eof, Span::new(start, start, start_column));
        };

        let kind = match c {
            '[' => {
                self.advance();
                TokenKind::OpenOptional
            }
            ']' => {
                self.advance();
                TokenKind::CloseOptional
            }
            '{' => {
                self.advance();
                self.choice_depth += 1;
                TokenKind::OpenChoice
            }
            '}' => {
                self.advance();
                self.choice_depth = self.choice_depth.saturating_sub(1);
                TokenKind::CloseChoice
            }
            '|' if self.choice_depth > 0 => {
                self.advance();
                TokenKind::Bar
            }
            '<' => self.scan_capture(),
            '>' => {
                self.advance();
                TokenKind::StrayClose
            }
            '\\' if self.rest().starts_with("\\w") => {
                self.advance();
                self.advance();
                TokenKind::Whitespace
            }
            _ => self.scan_text(),
        };

        Token::new(kind, Span::new(start, self.position, start_column))
    }

    /// Tokenizes the whole spec, ending with an `Eof` token.
    #[must_use]
    pub fn tokenize_all(source: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token();
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }

    fn scan_capture(&mut self) -> TokenKind {
        self.advance();
        let body_start = self.position;
        match self.rest().find('>') {
            Some(offset) => {
                let body = &self.source[body_start..body_start + offset];
                for _ in body.chars() {
                    self.advance();
                }
                self.advance();
                TokenKind::Capture(body.to_string())
            }
            None => {
                while self.peek_char().is_some() {
                    self.advance();
                }
                TokenKind::UnterminatedCapture
            }
        }
    }

    fn scan_text(&mut self) -> TokenKind {
        let start = self.position;
        while let Some(c) = self.peek_char() {
            let special = matches!(c, '[' | ']' | '{' | '}' | '<' | '>')
                || (c == '|' && self.choice_depth > 0)
                || (c == '\\' && self.rest().starts_with("\\w"));
            if special {
                break;
            }
            self.advance();
        }
        TokenKind::Text(self.source[start..self.position].to_string())
    }

    fn rest(&self) -> &'src str {
        &self.source[self.position..]
    }

    fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            self.position += c.len_utf8();
            self.column += 1;
        }
    }
}
