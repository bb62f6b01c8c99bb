//! Parsed form of a syntax spec.

use crate::span::Span;

/// One element of a parsed syntax spec.
#[derive(Clone, Debug, PartialEq)]
pub enum Element {
    /// Literal words, matched in order with whitespace between them.
    Literal {
        /// The words as written in the spec.
        words: Vec<String>,
        /// Source location.
        span: Span,
    },
    /// A named capture.
    Capture {
        /// Capture name.
        name: String,
        /// Optional regular expression the captured text must fully match.
        pattern: Option<String>,
        /// Source location.
        span: Span,
    },
    /// An optional segment.
    Optional {
        /// The segment's contents.
        elements: Vec<Element>,
        /// Source location.
        span: Span,
    },
    /// A choice of literal alternatives.
    Choice {
        /// Alternatives as written, whitespace-normalized.
        alternatives: Vec<String>,
        /// Source location.
        span: Span,
    },
    /// Required whitespace.
    Whitespace {
        /// Source location.
        span: Span,
    },
}

impl Element {
    /// Returns the source location of this element.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Literal { span, .. }
            | Self::Capture { span, .. }
            | Self::Optional { span, .. }
            | Self::Choice { span, .. }
            | Self::Whitespace { span } => *span,
        }
    }

    /// Returns true if the first thing this element matches is a capture.
    ///
    /// Optional segments look through to their first element.
    #[must_use]
    pub fn starts_with_capture(&self) -> bool {
        match self {
            Self::Capture { .. } => true,
            Self::Optional { elements, .. } => {
                elements.first().is_some_and(Element::starts_with_capture)
            }
            _ => false,
        }
    }

    /// Appends the names of every capture in this element, in spec order.
    pub fn collect_captures<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Capture { name, .. } => out.push(name),
            Self::Optional { elements, .. } => {
                for element in elements {
                    element.collect_captures(out);
                }
            }
            _ => {}
        }
    }
}
