//! Compiler from syntax specs to matchers.
//!
//! Compilation folds the parsed elements from the end of the spec backward,
//! so every element is built knowing what follows it. A capture followed
//! directly by another capture may only end at whitespace; any other capture
//! ends wherever the rest of the pattern can take over.

use std::cmp::Reverse;
use std::fmt;

use regex::RegexBuilder;

use crate::ast::Element;
use crate::capture::CaptureMap;
use crate::error::{CompileError, CompileErrorKind};
use crate::matcher::{self, Alternative, Capture, Node};
use crate::parser;
use crate::span::Span;

/// A compiled syntax spec.
///
/// Patterns are immutable and cheap to clone; matching is a pure function
/// of the pattern and the argument string.
#[derive(Clone, Debug)]
pub struct Pattern {
    source: String,
    nodes: Vec<Node>,
    captures: Vec<String>,
}

impl Pattern {
    /// Compiles a syntax spec.
    ///
    /// # Errors
    /// Returns a positioned [`CompileError`] if the spec is malformed.
    pub fn compile(source: &str) -> Result<Self, CompileError> {
        let elements = parser::parse(source)?;

        let mut names = Vec::new();
        for element in &elements {
            element.collect_captures(&mut names);
        }
        let captures: Vec<String> = names.into_iter().map(str::to_string).collect();

        let mut nodes = build_sequence(&elements, false, 0, source)?;
        nodes.push(Node::End);

        tracing::trace!(spec = source, ?captures, "compiled syntax");
        Ok(Self {
            source: source.to_string(),
            nodes,
            captures,
        })
    }

    /// Matches an argument string, returning its captures or `None`.
    #[must_use]
    pub fn matches(&self, argstr: &str) -> Option<CaptureMap> {
        matcher::run(&self.nodes, &self.captures, argstr)
    }

    /// The spec this pattern was compiled from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Every capture name in the spec, in order of appearance.
    #[must_use]
    pub fn capture_names(&self) -> &[String] {
        &self.captures
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Compiles a syntax spec.
///
/// # Errors
/// Returns a positioned [`CompileError`] if the spec is malformed.
pub fn compile(source: &str) -> Result<Pattern, CompileError> {
    Pattern::compile(source)
}

fn build_sequence(
    elements: &[Element],
    follow_is_capture: bool,
    depth: usize,
    source: &str,
) -> Result<Vec<Node>, CompileError> {
    let mut next_is_capture = follow_is_capture;
    let mut nodes = Vec::with_capacity(elements.len());

    for element in elements.iter().rev() {
        let node = match element {
            Element::Literal { words, .. } => {
                Node::Literal(words.iter().map(|w| w.to_lowercase()).collect())
            }
            Element::Whitespace { .. } => Node::Whitespace,
            Element::Choice { alternatives, .. } => {
                let mut alternatives: Vec<Alternative> =
                    alternatives.iter().map(|alt| Alternative::new(alt)).collect();
                alternatives.sort_by_key(|alt| Reverse(alt.text.chars().count()));
                Node::Choice(alternatives)
            }
            Element::Capture {
                name,
                pattern,
                span,
            } => {
                let pattern = pattern
                    .as_deref()
                    .map(|pattern| compile_regex(name, pattern, *span, source))
                    .transpose()?;
                Node::Capture(Capture {
                    name: name.clone(),
                    pattern,
                    required: depth == 0,
                    ends_at_whitespace: next_is_capture,
                })
            }
            Element::Optional {
                elements: inner, ..
            } => Node::Optional(build_sequence(inner, next_is_capture, depth + 1, source)?),
        };

        next_is_capture = element.starts_with_capture();
        nodes.push(node);
    }

    nodes.reverse();
    Ok(nodes)
}

fn compile_regex(
    name: &str,
    pattern: &str,
    span: Span,
    source: &str,
) -> Result<regex::Regex, CompileError> {
    RegexBuilder::new(&format!("^(?:{pattern})$"))
        .case_insensitive(true)
        .build()
        .map_err(|err| {
            CompileError::new(
                CompileErrorKind::InvalidCapturePattern {
                    name: name.to_string(),
                    message: err.to_string(),
                },
                span,
                source,
            )
        })
}
