//! Extension points consulted around ordinary command matching.

use parlance_foundation::{EntityId, Environment};

use crate::config::DispatchConfig;
use crate::dispatcher::Dispatcher;
use crate::invocation::{Effect, ResolvedInvocation};

/// What a preemption hook decided to do with a line.
#[derive(Debug)]
pub enum Preemption {
    /// The hook dealt with the line itself.
    Handled(Vec<Effect>),
    /// The hook chose a command to run.
    Invoke(ResolvedInvocation),
    /// Dispatch this text instead. Honored once per line.
    Rewrite(String),
}

/// Inspects every line before commands are matched.
///
/// Installed on the requester's provider class. Typical uses are
/// shorthand like `"hello` for `say hello`.
pub trait PreemptHook: Send + Sync {
    /// Returns `None` to let ordinary matching proceed.
    fn preempt(&self, input: &str, ctx: &HookContext<'_>) -> Option<Preemption>;
}

/// Offered lines that no command name matched.
///
/// Consulted on the class of each entity in the requester's context, in
/// context order (the requester, its location, then nearby things); the
/// first invocation returned wins.
pub trait UnmatchedHook: Send + Sync {
    /// Returns an invocation to run, or `None` to decline.
    fn unmatched(&self, input: &str, ctx: &HookContext<'_>) -> Option<ResolvedInvocation>;
}

/// What a hook can see and do.
#[derive(Clone, Copy)]
pub struct HookContext<'a> {
    host: EntityId,
    requester: EntityId,
    dispatcher: &'a Dispatcher<'a>,
}

impl<'a> HookContext<'a> {
    pub(crate) fn new(host: EntityId, requester: EntityId, dispatcher: &'a Dispatcher<'a>) -> Self {
        Self {
            host,
            requester,
            dispatcher,
        }
    }

    /// The entity whose class installed the hook.
    #[must_use]
    pub fn host(&self) -> EntityId {
        self.host
    }

    /// The entity that typed the line.
    #[must_use]
    pub fn requester(&self) -> EntityId {
        self.requester
    }

    /// The world.
    #[must_use]
    pub fn env(&self) -> &'a dyn Environment {
        self.dispatcher.env()
    }

    /// The dispatcher's configuration.
    #[must_use]
    pub fn config(&self) -> &DispatchConfig {
        self.dispatcher.config()
    }

    /// Resolves `line` against the commands of `provider` alone.
    ///
    /// Returns the first command that matches by name, lock, and syntax.
    #[must_use]
    pub fn invoke(&self, provider: EntityId, line: &str) -> Option<ResolvedInvocation> {
        self.dispatcher.resolve_on(provider, self.requester, line)
    }
}

impl std::fmt::Debug for HookContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookContext")
            .field("host", &self.host)
            .field("requester", &self.requester)
            .finish_non_exhaustive()
    }
}
