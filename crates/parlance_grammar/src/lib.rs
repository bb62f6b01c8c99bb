//! Syntax-spec compiler and matcher for Parlance commands.
//!
//! A syntax spec is a small declarative string describing how a command's
//! arguments may be phrased:
//!
//! ```text
//! "<exitSpec> to <room>"
//! "look [[at] <something>]"
//! "<thing> {in|into|inside} <container>"
//! ```
//!
//! # Pipeline
//!
//! ```text
//! "<class> {named|called} <names>"
//!          │
//!          ▼
//! ┌─────────────────┐
//! │     LEXER       │  → [Capture(class), OpenChoice, Text(named), Bar, ...]
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │     PARSER      │  → [Capture, Choice[named, called], Capture]
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    COMPILER     │  → matcher nodes, built right to left so every
//! └─────────────────┘    capture knows what terminates it
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    MATCHER      │  "thing called Foo" → {class: thing, choice-1: called, names: Foo}
//! └─────────────────┘
//! ```
//!
//! # Grammar
//!
//! | Token            | Meaning                                                    |
//! |------------------|------------------------------------------------------------|
//! | literal text     | matched case-insensitively, whitespace-normalized          |
//! | `<name>`         | capture, greedy up to the next fixed token or end of input |
//! | `<name:pattern>` | capture whose text must fully match a regular expression   |
//! | `[ ... ]`        | optional segment                                           |
//! | `{a\|b\|c}`      | choice of literal alternatives, recorded as `choice-N`     |
//! | `\w`             | required whitespace at this position                       |
//!
//! Input text for a capture may be wrapped in double quotes to include
//! characters that would otherwise end it.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ast;
pub mod capture;
pub mod compiler;
pub mod error;
pub mod lexer;
mod matcher;
pub mod parser;
pub mod span;
pub mod token;

pub use ast::Element;
pub use capture::CaptureMap;
pub use compiler::{Pattern, compile};
pub use error::{CompileError, CompileErrorKind};
pub use lexer::Lexer;
pub use parser::parse;
pub use span::Span;
