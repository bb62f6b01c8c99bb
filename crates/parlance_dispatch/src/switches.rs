//! Command switches: `look/brief`, `page/quiet/repeat=3 bob=hi`.

use std::collections::BTreeMap;
use std::sync::Arc;

use parlance_foundation::Value;

use crate::binding::{Arg, BoundArguments};
use crate::error::SwitchUsageError;
use crate::parsers::StaticParser;

/// Switch text before conversion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RawSwitch {
    /// `key=text`, or a bare boolean switch spelled as its true word.
    Text(String),
    /// A bare key with no boolean parser.
    Present,
}

/// The switches a command declares, with their parsers and defaults.
#[derive(Clone, Debug, Default)]
pub struct SwitchTable {
    parsers: BTreeMap<String, Arc<dyn StaticParser>>,
    defaults: BTreeMap<String, Value>,
}

impl SwitchTable {
    /// Creates a table with no switches.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares `key`, converted by `parser`.
    #[must_use]
    pub fn with_parser(mut self, key: impl Into<String>, parser: impl StaticParser + 'static) -> Self {
        self.parsers.insert(key.into().to_lowercase(), Arc::new(parser));
        self
    }

    /// Declares `key` with a value used when it is not given.
    #[must_use]
    pub fn with_default(mut self, key: impl Into<String>, value: Value) -> Self {
        self.defaults.insert(key.into().to_lowercase(), value);
        self
    }

    /// Returns true if `key` is declared.
    #[must_use]
    pub fn is_declared(&self, key: &str) -> bool {
        self.parsers.contains_key(key) || self.defaults.contains_key(key)
    }

    /// Declared keys, sorted.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        let mut keys: Vec<&str> = self
            .parsers
            .keys()
            .chain(self.defaults.keys())
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        keys.dedup();
        keys.into_iter()
    }

    /// Splits switch text (everything after the first separator).
    ///
    /// Empty parts are skipped. Keys are lowercased.
    ///
    /// # Errors
    ///
    /// Returns [`SwitchUsageError`] for the first undeclared key.
    pub fn parse(
        &self,
        text: &str,
        separator: char,
    ) -> Result<BTreeMap<String, RawSwitch>, SwitchUsageError> {
        let mut raw = BTreeMap::new();
        for part in text.split(separator).filter(|part| !part.is_empty()) {
            let (key, value) = match part.split_once('=') {
                Some((key, value)) => (key.to_lowercase(), Some(value)),
                None => (part.to_lowercase(), None),
            };
            if !self.is_declared(&key) {
                return Err(SwitchUsageError { key });
            }
            let switch = match value {
                Some(value) => RawSwitch::Text(value.to_string()),
                None => match self.parsers.get(&key).and_then(|p| p.canonical_true()) {
                    Some(word) => RawSwitch::Text(word.to_string()),
                    None => RawSwitch::Present,
                },
            };
            raw.insert(key, switch);
        }
        Ok(raw)
    }

    /// Converts parsed switches and fills in defaults.
    #[must_use]
    pub fn bind(&self, raw: &BTreeMap<String, RawSwitch>) -> BoundArguments {
        let mut args = BoundArguments::new();
        for (key, value) in &self.defaults {
            args.insert(key.clone(), Arg::Value(value.clone()));
        }
        for (key, switch) in raw {
            let arg = match (switch, self.parsers.get(key)) {
                (RawSwitch::Present, _) => Arg::Value(Value::Present),
                (RawSwitch::Text(text), Some(parser)) => match parser.parse(text) {
                    Ok(value) => Arg::Value(value),
                    Err(err) => Arg::Error(err),
                },
                (RawSwitch::Text(text), None) => Arg::Value(Value::string(text)),
            };
            args.insert(key.clone(), arg);
        }
        args
    }
}
