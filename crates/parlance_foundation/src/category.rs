//! Entity categories.
//!
//! A category is the Parlance stand-in for "is an instance of this kind of
//! object". Object matching can be restricted to a category, and the
//! persistence layer answers whether an entity belongs to one.

use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A named entity category such as `thing`, `room`, or `exit`.
///
/// Names are compared case-insensitively; they are stored lowercased.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Category(Arc<str>);

impl Category {
    /// Creates a category from a name.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name.trim().to_lowercase()))
    }

    /// Returns the category name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Category({})", self.0)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Category {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}
