//! A command resolved against a line of input, ready to run.

use std::sync::Arc;

use parlance_foundation::{EntityId, Environment};
use parlance_grammar::CaptureMap;

use crate::binding::BoundArguments;
use crate::descriptor::CommandDescriptor;
use crate::error::CommandError;

/// A consequence of running a command, applied by the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Tell one entity something.
    Message {
        /// Who hears it.
        to: EntityId,
        /// What they hear.
        text: String,
    },
    /// Tell everyone inside `location` something.
    Announce {
        /// Where it is heard.
        location: EntityId,
        /// What is heard.
        text: String,
        /// Who does not hear it, usually the actor.
        exclude: Option<EntityId>,
    },
    /// Move an entity into a container.
    Move {
        /// What moves.
        entity: EntityId,
        /// Where it goes.
        destination: EntityId,
    },
}

/// A descriptor matched on a provider, with its arguments bound.
#[derive(Clone, Debug)]
pub struct ResolvedInvocation {
    provider: EntityId,
    requester: EntityId,
    descriptor: Arc<CommandDescriptor>,
    input: String,
    command: String,
    argstr: String,
    captures: CaptureMap,
    arguments: BoundArguments,
    switches: BoundArguments,
}

impl ResolvedInvocation {
    /// Assembles an invocation. `command` is the command word as typed,
    /// switches included.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        provider: EntityId,
        requester: EntityId,
        descriptor: Arc<CommandDescriptor>,
        input: &str,
        command: &str,
        captures: CaptureMap,
        arguments: BoundArguments,
        switches: BoundArguments,
    ) -> Self {
        Self {
            provider,
            requester,
            descriptor,
            input: input.to_string(),
            command: command.to_string(),
            argstr: captures.argstr().to_string(),
            captures,
            arguments,
            switches,
        }
    }

    /// The entity hosting the command.
    #[must_use]
    pub fn provider(&self) -> EntityId {
        self.provider
    }

    /// The entity that typed the line.
    #[must_use]
    pub fn requester(&self) -> EntityId {
        self.requester
    }

    /// The matched command.
    #[must_use]
    pub fn descriptor(&self) -> &CommandDescriptor {
        &self.descriptor
    }

    /// The matched command, shared.
    #[must_use]
    pub fn descriptor_arc(&self) -> &Arc<CommandDescriptor> {
        &self.descriptor
    }

    /// The full input line.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The command word as typed, switches included.
    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Everything after the command word.
    #[must_use]
    pub fn argstr(&self) -> &str {
        &self.argstr
    }

    /// Raw captured text.
    #[must_use]
    pub fn captures(&self) -> &CaptureMap {
        &self.captures
    }

    /// Converted arguments.
    #[must_use]
    pub fn args(&self) -> &BoundArguments {
        &self.arguments
    }

    /// Converted switches, defaults included.
    #[must_use]
    pub fn switches(&self) -> &BoundArguments {
        &self.switches
    }

    /// Prepares and runs the command body.
    ///
    /// # Errors
    ///
    /// Returns whatever the body reports.
    pub fn execute(&self, env: &dyn Environment) -> Result<Vec<Effect>, CommandError> {
        let body = self.descriptor.body();
        let _span = tracing::debug_span!("execute", command = self.descriptor.name()).entered();
        if !body.prepare(self, env)? {
            tracing::debug!("command declined in prepare");
            return Ok(Vec::new());
        }
        body.run(self, env)
    }
}
