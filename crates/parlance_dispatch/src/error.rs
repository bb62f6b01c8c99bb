//! Error types for argument binding, locks, and dispatch.
//!
//! Binding failures are *deferred*: a bad argument becomes an
//! [`ArgumentError`] stored in the bound argument set and only surfaces
//! when the command body asks for it. Dispatch failures are returned from
//! [`Dispatcher::resolve`](crate::Dispatcher::resolve) directly.

use thiserror::Error;

/// Why one argument could not be bound.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ArgumentError {
    /// The text could not be converted to the bound type.
    #[error("{0}")]
    Conversion(String),

    /// Nothing matched the text.
    #[error("{0}")]
    FailedMatch(String),

    /// More than one thing matched the text.
    #[error("{message}")]
    AmbiguousMatch {
        /// Player-facing explanation.
        message: String,
        /// Display names of everything that matched.
        candidates: Vec<String>,
    },

    /// The text matched something of the wrong category.
    #[error("{0}")]
    WrongCategory(String),
}

/// A switch key that the command does not declare.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("Unknown switch: {key}")]
pub struct SwitchUsageError {
    /// The offending key.
    pub key: String,
}

/// Why an input line could not be resolved to a single command.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    /// The line was blank.
    #[error("empty input")]
    EmptyInput,

    /// No reachable command has this name, and no hook claimed the line.
    #[error("no such command: {input}")]
    NoSuchCommand {
        /// The input line.
        input: String,
    },

    /// Commands with this name exist but none accepted the arguments.
    #[error("{message}")]
    Usage {
        /// Usage help for every command that matched by name.
        message: String,
    },

    /// More than one command accepted the line.
    #[error("{message}")]
    Ambiguous {
        /// The input line.
        input: String,
        /// A description of each command that matched.
        candidates: Vec<String>,
        /// Player-facing explanation.
        message: String,
    },

    /// A switch key was not recognized.
    #[error(transparent)]
    SwitchUsage(#[from] SwitchUsageError),
}

impl DispatchError {
    /// The text to show the player who typed the line.
    #[must_use]
    pub fn player_message(&self) -> String {
        match self {
            Self::EmptyInput => String::new(),
            Self::NoSuchCommand { .. } => "Command Invalid.".to_string(),
            Self::Usage { message } | Self::Ambiguous { message, .. } => message.clone(),
            Self::SwitchUsage(err) => err.to_string(),
        }
    }
}

/// Failure raised while preparing or running a command body.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The command refused the request, with a player-facing reason.
    #[error("{0}")]
    Invalid(String),

    /// The command has no body.
    #[error("The '{0}' command is not yet implemented.")]
    NotImplemented(String),

    /// A bound argument carried a deferred error.
    #[error("{source}")]
    Argument {
        /// The capture or switch name.
        name: String,
        /// What went wrong.
        source: ArgumentError,
    },

    /// A required argument was absent.
    #[error("Missing argument: {0}")]
    Missing(String),

    /// The world refused an operation.
    #[error(transparent)]
    World(#[from] parlance_foundation::Error),
}

/// What went wrong while parsing a lock expression.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LockErrorKind {
    /// The expression ended too early.
    #[error("unexpected end of lock")]
    UnexpectedEnd,

    /// A character that cannot appear here.
    #[error("unexpected '{0}'")]
    UnexpectedChar(char),

    /// A function name with no registered implementation.
    #[error("unknown lock function '{0}'")]
    UnknownFunction(String),

    /// A parenthesis was opened and never closed.
    #[error("unclosed parenthesis")]
    Unclosed,

    /// Input remained after a complete expression.
    #[error("trailing input '{0}'")]
    Trailing(String),
}

/// A lock expression that failed to parse.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{kind} at position {position} in lock `{lock}`")]
pub struct LockError {
    /// What went wrong.
    pub kind: LockErrorKind,
    /// Byte offset of the problem.
    pub position: usize,
    /// The full lock text.
    pub lock: String,
}
