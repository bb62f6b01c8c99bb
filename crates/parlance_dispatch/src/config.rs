//! Dispatcher configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tunables for command dispatch.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DispatchConfig {
    /// Separates the command name from its switches (`look/brief`).
    pub switch_separator: char,
    /// Longest input line, in bytes, that will be considered at all.
    pub max_input_len: usize,
    /// Whether a preemption hook may rewrite the input line (once).
    pub allow_rewrite: bool,
    /// Prefix of the first line of usage text.
    pub usage_prefix: String,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            switch_separator: '/',
            max_input_len: 4096,
            allow_rewrite: true,
            usage_prefix: "Syntax: ".to_string(),
        }
    }
}

impl DispatchConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the switch separator.
    #[must_use]
    pub fn with_switch_separator(mut self, separator: char) -> Self {
        self.switch_separator = separator;
        self
    }

    /// Sets the maximum input length.
    #[must_use]
    pub fn with_max_input_len(mut self, len: usize) -> Self {
        self.max_input_len = len;
        self
    }

    /// Allows or forbids preemption rewrites.
    #[must_use]
    pub fn with_allow_rewrite(mut self, allow: bool) -> Self {
        self.allow_rewrite = allow;
        self
    }

    /// Sets the usage prefix.
    #[must_use]
    pub fn with_usage_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.usage_prefix = prefix.into();
        self
    }
}
