//! Ordered command registries.

use std::collections::HashMap;
use std::sync::Arc;

use crate::context::CommandContext;
use crate::descriptor::CommandDescriptor;

/// Commands keyed by [`CommandDescriptor::key`], in discovery order.
///
/// Inserting a key that already exists replaces the earlier descriptor
/// but keeps its position.
#[derive(Clone, Debug, Default)]
pub struct CommandRegistry {
    entries: Vec<Arc<CommandDescriptor>>,
    index: HashMap<String, usize>,
}

impl CommandRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a command, replacing any with the same key.
    pub fn insert(&mut self, descriptor: Arc<CommandDescriptor>) {
        match self.index.get(descriptor.key()) {
            Some(&slot) => self.entries[slot] = descriptor,
            None => {
                self.index
                    .insert(descriptor.key().to_string(), self.entries.len());
                self.entries.push(descriptor);
            }
        }
    }

    /// Looks up a command by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Arc<CommandDescriptor>> {
        self.index.get(key).map(|&slot| &self.entries[slot])
    }

    /// Commands in order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<CommandDescriptor>> {
        self.entries.iter()
    }

    /// Number of commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no commands.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Commands whose name matches `word` and whose lock admits the
    /// requester. Disabled commands never match.
    #[must_use]
    pub fn match_name(
        &self,
        word: &str,
        separator: char,
        ctx: &CommandContext<'_>,
    ) -> Vec<Arc<CommandDescriptor>> {
        self.entries
            .iter()
            .filter(|cmd| cmd.matches_name(word, separator) && cmd.allows(ctx) && !cmd.is_disabled())
            .cloned()
            .collect()
    }
}

impl FromIterator<Arc<CommandDescriptor>> for CommandRegistry {
    fn from_iter<I: IntoIterator<Item = Arc<CommandDescriptor>>>(iter: I) -> Self {
        let mut registry = Self::new();
        for descriptor in iter {
            registry.insert(descriptor);
        }
        registry
    }
}
