//! Resolving a line of input to one command.
//!
//! # Resolution order
//!
//! 1. The requester's preemption hook may handle, redirect, or rewrite
//!    the line.
//! 2. The line splits at the first whitespace into a command word and an
//!    argument string. The command word may carry switches: `look/brief`.
//! 3. Every entity in the requester's context offers the commands of its
//!    provider class: private ones to itself, public ones to others.
//!    Commands whose name matches and whose lock admits the requester
//!    are candidates.
//! 4. With no candidates, unmatched-input hooks get the line.
//! 5. Each candidate's syntax is tried. Exactly one full match resolves;
//!    more is ambiguous; none produces the candidates' usage help.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use parlance_foundation::{EntityId, Environment};
use parlance_grammar::CaptureMap;

use crate::config::DispatchConfig;
use crate::context::CommandContext;
use crate::descriptor::CommandDescriptor;
use crate::error::{CommandError, DispatchError, SwitchUsageError};
use crate::hooks::{HookContext, Preemption};
use crate::invocation::{Effect, ResolvedInvocation};
use crate::message::match_failed;
use crate::provider::{Audience, ProviderCatalog};
use crate::registry::CommandRegistry;
use crate::switches::RawSwitch;

/// The outcome of resolving a line.
#[derive(Debug)]
pub enum Dispatch {
    /// A preemption hook handled the line.
    Preempted(Vec<Effect>),
    /// A command is ready to run.
    Resolved(ResolvedInvocation),
}

impl Dispatch {
    /// Runs the resolved command, or returns the hook's effects.
    ///
    /// # Errors
    ///
    /// Returns whatever the command body reports.
    pub fn execute(&self, env: &dyn Environment) -> Result<Vec<Effect>, CommandError> {
        match self {
            Self::Preempted(effects) => Ok(effects.clone()),
            Self::Resolved(invocation) => invocation.execute(env),
        }
    }
}

struct Candidate {
    provider: EntityId,
    descriptor: Arc<CommandDescriptor>,
    captures: CaptureMap,
    switches: BTreeMap<String, RawSwitch>,
}

/// Resolves input lines against a world and a provider catalog.
///
/// A dispatcher borrows everything it uses and holds no other state, so
/// any number may run at once over the same catalog.
pub struct Dispatcher<'a> {
    catalog: &'a ProviderCatalog,
    env: &'a dyn Environment,
    config: DispatchConfig,
}

impl<'a> Dispatcher<'a> {
    /// Creates a dispatcher with the default configuration.
    #[must_use]
    pub fn new(catalog: &'a ProviderCatalog, env: &'a dyn Environment) -> Self {
        Self {
            catalog,
            env,
            config: DispatchConfig::default(),
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: DispatchConfig) -> Self {
        self.config = config;
        self
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// The world.
    #[must_use]
    pub fn env(&self) -> &'a dyn Environment {
        self.env
    }

    /// The provider catalog.
    #[must_use]
    pub fn catalog(&self) -> &'a ProviderCatalog {
        self.catalog
    }

    /// Resolves `input` typed by `requester`.
    ///
    /// # Errors
    ///
    /// Returns a [`DispatchError`] when no single command can be chosen.
    pub fn resolve(&self, requester: EntityId, input: &str) -> Result<Dispatch, DispatchError> {
        let _span = tracing::debug_span!("dispatch", %requester, input).entered();
        let result = self.resolve_line(requester, input, self.config.allow_rewrite);
        match &result {
            Ok(Dispatch::Resolved(invocation)) => tracing::debug!(
                command = invocation.descriptor().name(),
                provider = %invocation.provider(),
                "resolved"
            ),
            Ok(Dispatch::Preempted(effects)) => {
                tracing::debug!(effects = effects.len(), "preempted");
            }
            Err(error) => tracing::debug!(%error, "unresolved"),
        }
        result
    }

    /// The entities whose commands `requester` can reach: itself, its
    /// location, its contents, and its location's contents.
    #[must_use]
    pub fn context(&self, requester: EntityId) -> Vec<EntityId> {
        let location = self.env.location(requester);
        let mut context = vec![requester];
        context.extend(location);
        context.extend(self.env.contents(requester));
        if let Some(location) = location {
            context.extend(self.env.contents(location));
        }
        let mut seen = HashSet::new();
        context.retain(|entity| seen.insert(*entity));
        context
    }

    /// Every command `requester` could use right now, with its provider.
    ///
    /// A descriptor offered by several providers is listed once.
    #[must_use]
    pub fn available_commands(&self, requester: EntityId) -> Vec<(EntityId, Arc<CommandDescriptor>)> {
        let mut found: Vec<(EntityId, Arc<CommandDescriptor>)> = Vec::new();
        for provider in self.context(requester) {
            let Some(registry) = self.registry_for(provider, requester) else {
                continue;
            };
            let ctx = CommandContext::new(provider, requester, self.env);
            for descriptor in registry.iter() {
                let listed = found.iter().any(|(_, d)| Arc::ptr_eq(d, descriptor));
                if !listed && descriptor.allows(&ctx) && !descriptor.is_disabled() {
                    found.push((provider, Arc::clone(descriptor)));
                }
            }
        }
        found
    }

    fn resolve_line(
        &self,
        requester: EntityId,
        input: &str,
        may_rewrite: bool,
    ) -> Result<Dispatch, DispatchError> {
        let line = input.trim();
        if line.is_empty() {
            return Err(DispatchError::EmptyInput);
        }
        if line.len() > self.config.max_input_len {
            tracing::warn!(len = line.len(), max = self.config.max_input_len, "input too long");
            return Err(DispatchError::NoSuchCommand {
                input: line.to_string(),
            });
        }

        match self.preempt(requester, line) {
            Some(Preemption::Handled(effects)) => return Ok(Dispatch::Preempted(effects)),
            Some(Preemption::Invoke(invocation)) => return Ok(Dispatch::Resolved(invocation)),
            Some(Preemption::Rewrite(rewritten)) if may_rewrite => {
                tracing::debug!(%rewritten, "input rewritten");
                return self.resolve_line(requester, &rewritten, false);
            }
            Some(Preemption::Rewrite(rewritten)) => {
                tracing::debug!(%rewritten, "ignoring repeated rewrite");
            }
            None => {}
        }

        let (command, argstr) = split_command(line);
        let candidates = self.name_matches(requester, command);
        tracing::trace!(command, candidates = candidates.len(), "name matches");
        if candidates.is_empty() {
            return self
                .unmatched(requester, line)
                .map(Dispatch::Resolved)
                .ok_or_else(|| DispatchError::NoSuchCommand {
                    input: line.to_string(),
                });
        }

        let separator = self.config.switch_separator;
        let mut full: Vec<Candidate> = Vec::new();
        let mut partial: Vec<Arc<CommandDescriptor>> = Vec::new();
        let mut switch_error: Option<SwitchUsageError> = None;
        for (provider, descriptor) in candidates {
            let switches = match descriptor.switches().parse(switch_text(command, separator), separator) {
                Ok(switches) => switches,
                Err(err) => {
                    switch_error.get_or_insert(err);
                    continue;
                }
            };
            let ctx = CommandContext::new(provider, requester, self.env);
            match descriptor.match_syntax(argstr, &ctx) {
                Some(captures) => full.push(Candidate {
                    provider,
                    descriptor,
                    captures,
                    switches,
                }),
                None if !partial.iter().any(|d| Arc::ptr_eq(d, &descriptor)) => {
                    partial.push(descriptor);
                }
                None => {}
            }
        }

        match full.len() {
            0 => {
                if let Some(err) = switch_error {
                    return Err(err.into());
                }
                let help: Vec<String> = partial
                    .iter()
                    .filter_map(|d| d.body().failed_match_help(d, &self.config.usage_prefix))
                    .collect();
                if help.is_empty() {
                    Err(DispatchError::NoSuchCommand {
                        input: line.to_string(),
                    })
                } else {
                    Err(DispatchError::Usage {
                        message: help.join("\n"),
                    })
                }
            }
            1 => {
                let candidate = full.remove(0);
                Ok(Dispatch::Resolved(self.bind(requester, line, command, candidate)))
            }
            _ => {
                let candidates: Vec<String> = full
                    .iter()
                    .map(|c| format!("{} ({})", c.descriptor.name(), self.env.display_name(c.provider)))
                    .collect();
                let message = match_failed(&candidates, Some(line), Some("command"), true)
                    .unwrap_or_default();
                Err(DispatchError::Ambiguous {
                    input: line.to_string(),
                    candidates,
                    message,
                })
            }
        }
    }

    /// Resolves `line` against one provider's commands only.
    pub(crate) fn resolve_on(
        &self,
        provider: EntityId,
        requester: EntityId,
        line: &str,
    ) -> Option<ResolvedInvocation> {
        let line = line.trim();
        let (command, argstr) = split_command(line);
        let registry = self.registry_for(provider, requester)?;
        let ctx = CommandContext::new(provider, requester, self.env);
        let separator = self.config.switch_separator;
        registry
            .match_name(command, separator, &ctx)
            .into_iter()
            .find_map(|descriptor| {
                let switches = descriptor
                    .switches()
                    .parse(switch_text(command, separator), separator)
                    .ok()?;
                let captures = descriptor.match_syntax(argstr, &ctx)?;
                Some(Candidate {
                    provider,
                    descriptor,
                    captures,
                    switches,
                })
            })
            .map(|candidate| self.bind(requester, line, command, candidate))
    }

    fn bind(
        &self,
        requester: EntityId,
        line: &str,
        command: &str,
        candidate: Candidate,
    ) -> ResolvedInvocation {
        let ctx = CommandContext::new(candidate.provider, requester, self.env);
        let arguments = candidate.descriptor.arguments().bind(&candidate.captures, &ctx);
        let switches = candidate.descriptor.switches().bind(&candidate.switches);
        ResolvedInvocation::new(
            candidate.provider,
            requester,
            candidate.descriptor,
            line,
            command,
            candidate.captures,
            arguments,
            switches,
        )
    }

    fn name_matches(&self, requester: EntityId, word: &str) -> Vec<(EntityId, Arc<CommandDescriptor>)> {
        let mut found = Vec::new();
        for provider in self.context(requester) {
            let Some(registry) = self.registry_for(provider, requester) else {
                continue;
            };
            let ctx = CommandContext::new(provider, requester, self.env);
            found.extend(
                registry
                    .match_name(word, self.config.switch_separator, &ctx)
                    .into_iter()
                    .map(|descriptor| (provider, descriptor)),
            );
        }
        found
    }

    fn registry_for(&self, provider: EntityId, requester: EntityId) -> Option<Arc<CommandRegistry>> {
        let class = self.env.provider_class(provider)?;
        let audience = if provider == requester {
            Audience::Private
        } else {
            Audience::Public
        };
        self.catalog.registry(&class, audience)
    }

    fn preempt(&self, requester: EntityId, line: &str) -> Option<Preemption> {
        let class = self.catalog.class(&self.env.provider_class(requester)?)?;
        let hook = class.preempt_hook()?;
        hook.preempt(line, &HookContext::new(requester, requester, self))
    }

    fn unmatched(&self, requester: EntityId, line: &str) -> Option<ResolvedInvocation> {
        for host in self.context(requester) {
            let Some(class) = self
                .env
                .provider_class(host)
                .and_then(|name| self.catalog.class(&name))
            else {
                continue;
            };
            if let Some(hook) = class.unmatched_hook() {
                if let Some(invocation) = hook.unmatched(line, &HookContext::new(host, requester, self)) {
                    tracing::debug!(%host, "unmatched input claimed by hook");
                    return Some(invocation);
                }
            }
        }
        None
    }
}

impl std::fmt::Debug for Dispatcher<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Splits a line at its first whitespace: command word and argument text.
#[must_use]
pub fn split_command(line: &str) -> (&str, &str) {
    match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    }
}

fn switch_text(command: &str, separator: char) -> &str {
    command.split_once(separator).map_or("", |(_, switches)| switches)
}
