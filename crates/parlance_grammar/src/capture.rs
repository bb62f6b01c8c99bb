//! The result of a successful match.

use std::collections::BTreeMap;

/// Named captures produced by matching an argument string against a
/// [`Pattern`](crate::Pattern).
///
/// Every capture named anywhere in the spec is present as a key, even when
/// it sat inside an optional segment that did not match. Such captures are
/// *absent*: the key exists, the value does not. Choice groups that took
/// part in the match are recorded as `choice-1`, `choice-2`, and so on.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CaptureMap {
    argstr: String,
    values: BTreeMap<String, Option<String>>,
}

impl CaptureMap {
    /// Creates an empty capture map for the given argument string.
    #[must_use]
    pub fn new(argstr: impl Into<String>) -> Self {
        Self {
            argstr: argstr.into(),
            values: BTreeMap::new(),
        }
    }

    /// Records a capture value, replacing any previous one.
    pub fn insert(&mut self, name: impl Into<String>, value: Option<String>) {
        self.values.insert(name.into(), value);
    }

    /// The full argument string that was matched.
    #[must_use]
    pub fn argstr(&self) -> &str {
        &self.argstr
    }

    /// Returns the text captured under `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(Option::as_deref)
    }

    /// Returns true if `name` is a key of this map, absent or not.
    #[must_use]
    pub fn contains_key(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Returns true if `name` is a key whose capture did not match.
    #[must_use]
    pub fn is_absent(&self, name: &str) -> bool {
        matches!(self.values.get(name), Some(None))
    }

    /// Returns the alternative matched by the `n`th participating choice
    /// group (1-based).
    #[must_use]
    pub fn choice(&self, n: usize) -> Option<&str> {
        self.get(&format!("choice-{n}"))
    }

    /// Iterates over every key and its value, in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.values
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_deref()))
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if there are no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
