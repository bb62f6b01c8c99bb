//! Who is asking, who is answering, and the world they share.

use parlance_foundation::{EntityId, Environment};

/// The pair of entities involved in using a command, plus the world.
///
/// Locks, guards, and converters all see the command from this point of
/// view: `provider` hosts the command, `requester` typed it.
#[derive(Clone, Copy)]
pub struct CommandContext<'a> {
    /// The entity hosting the command.
    pub provider: EntityId,
    /// The entity whose input is being dispatched.
    pub requester: EntityId,
    /// The world both of them live in.
    pub env: &'a dyn Environment,
}

impl<'a> CommandContext<'a> {
    /// Creates a new context.
    #[must_use]
    pub fn new(provider: EntityId, requester: EntityId, env: &'a dyn Environment) -> Self {
        Self {
            provider,
            requester,
            env,
        }
    }

    /// Returns true if the requester is using its own command.
    #[must_use]
    pub fn is_self(&self) -> bool {
        self.provider == self.requester
    }
}

impl std::fmt::Debug for CommandContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandContext")
            .field("provider", &self.provider)
            .field("requester", &self.requester)
            .finish_non_exhaustive()
    }
}
