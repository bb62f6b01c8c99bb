//! Command descriptors: names, syntax, argument bindings, and access.

use std::fmt;
use std::sync::{Arc, OnceLock};

use parlance_foundation::Environment;
use parlance_grammar::{CaptureMap, Pattern};

use crate::binding::{BindingTable, Converter};
use crate::context::CommandContext;
use crate::error::CommandError;
use crate::invocation::{Effect, ResolvedInvocation};
use crate::lock::Lock;
use crate::parsers::StaticParser;
use crate::switches::SwitchTable;

/// What a command does once it has been resolved.
pub trait CommandBody: Send + Sync {
    /// Runs before [`run`](Self::run); returning `false` cancels quietly.
    ///
    /// # Errors
    ///
    /// Returns a [`CommandError`] to refuse with a message.
    fn prepare(
        &self,
        invocation: &ResolvedInvocation,
        env: &dyn Environment,
    ) -> Result<bool, CommandError> {
        let _ = (invocation, env);
        Ok(true)
    }

    /// Performs the command, describing its consequences as effects.
    ///
    /// # Errors
    ///
    /// Returns a [`CommandError`] if the command cannot be carried out.
    fn run(
        &self,
        invocation: &ResolvedInvocation,
        env: &dyn Environment,
    ) -> Result<Vec<Effect>, CommandError>;

    /// Help shown when the name matched but the arguments did not.
    ///
    /// `None` contributes nothing to the combined usage message.
    fn failed_match_help(&self, descriptor: &CommandDescriptor, prefix: &str) -> Option<String> {
        Some(descriptor.describe_usage(prefix))
    }
}

impl<F> CommandBody for F
where
    F: Fn(&ResolvedInvocation, &dyn Environment) -> Result<Vec<Effect>, CommandError> + Send + Sync,
{
    fn run(
        &self,
        invocation: &ResolvedInvocation,
        env: &dyn Environment,
    ) -> Result<Vec<Effect>, CommandError> {
        self(invocation, env)
    }
}

#[derive(Debug)]
struct Unimplemented;

impl CommandBody for Unimplemented {
    fn run(
        &self,
        invocation: &ResolvedInvocation,
        _env: &dyn Environment,
    ) -> Result<Vec<Effect>, CommandError> {
        Err(CommandError::NotImplemented(
            invocation.descriptor().name().to_string(),
        ))
    }
}

/// A command: its names, its accepted phrasings, and how to run it.
///
/// Syntax specs are compiled on first use. If any spec fails to compile
/// the command is disabled: it keeps its place in registries but never
/// matches.
#[derive(Clone)]
pub struct CommandDescriptor {
    aliases: Vec<String>,
    key: Option<String>,
    syntaxes: Vec<String>,
    patterns: OnceLock<Option<Vec<Pattern>>>,
    arguments: BindingTable,
    switches: SwitchTable,
    lock: Lock,
    usage: Option<String>,
    body: Arc<dyn CommandBody>,
}

impl CommandDescriptor {
    /// Creates a command named `name` that accepts no arguments.
    ///
    /// Commands are locked by default: until [`with_lock`](Self::with_lock)
    /// says otherwise, no one may use it.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            aliases: vec![name.to_string()],
            key: None,
            syntaxes: Vec::new(),
            patterns: OnceLock::new(),
            arguments: BindingTable::new(),
            switches: SwitchTable::new(),
            lock: Lock::NonePass,
            usage: None,
            body: Arc::new(Unimplemented),
        }
    }

    /// Adds another name. Names are matched exactly, case included.
    #[must_use]
    pub fn with_alias(mut self, alias: &str) -> Self {
        self.aliases.push(alias.to_string());
        self
    }

    /// Sets the registry key; defaults to the primary name.
    #[must_use]
    pub fn with_key(mut self, key: &str) -> Self {
        self.key = Some(key.to_string());
        self
    }

    /// Adds an accepted phrasing. Phrasings are tried in order.
    #[must_use]
    pub fn with_syntax(mut self, spec: &str) -> Self {
        self.syntaxes.push(spec.to_string());
        self.patterns = OnceLock::new();
        self
    }

    /// Binds a capture to a converter.
    #[must_use]
    pub fn with_argument(mut self, name: &str, converter: Converter) -> Self {
        self.arguments.insert(name, converter);
        self
    }

    /// Requires a capture to name the command's own provider.
    #[must_use]
    pub fn with_self_reference(mut self, name: &str) -> Self {
        self.arguments = self.arguments.with_self_reference(name);
        self
    }

    /// Declares a switch converted by `parser`.
    #[must_use]
    pub fn with_switch(mut self, key: &str, parser: impl StaticParser + 'static) -> Self {
        self.switches = self.switches.with_parser(key, parser);
        self
    }

    /// Declares a switch default.
    #[must_use]
    pub fn with_switch_default(mut self, key: &str, value: parlance_foundation::Value) -> Self {
        self.switches = self.switches.with_default(key, value);
        self
    }

    /// Sets the access lock.
    #[must_use]
    pub fn with_lock(mut self, lock: Lock) -> Self {
        self.lock = lock;
        self
    }

    /// Overrides the generated usage text.
    #[must_use]
    pub fn with_usage(mut self, usage: &str) -> Self {
        self.usage = Some(usage.to_string());
        self
    }

    /// Sets what the command does.
    #[must_use]
    pub fn with_body(mut self, body: impl CommandBody + 'static) -> Self {
        self.body = Arc::new(body);
        self
    }

    /// Sets what the command does, as a function.
    #[must_use]
    pub fn with_run<F>(self, run: F) -> Self
    where
        F: Fn(&ResolvedInvocation, &dyn Environment) -> Result<Vec<Effect>, CommandError>
            + Send
            + Sync
            + 'static,
    {
        self.with_body(run)
    }

    /// The primary name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.aliases[0]
    }

    /// Every name, primary first.
    #[must_use]
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// The registry key.
    #[must_use]
    pub fn key(&self) -> &str {
        self.key.as_deref().unwrap_or_else(|| self.name())
    }

    /// The syntax specs; an empty list means "no arguments".
    #[must_use]
    pub fn syntaxes(&self) -> Vec<&str> {
        if self.syntaxes.is_empty() {
            vec![""]
        } else {
            self.syntaxes.iter().map(String::as_str).collect()
        }
    }

    /// The argument bindings.
    #[must_use]
    pub fn arguments(&self) -> &BindingTable {
        &self.arguments
    }

    /// The declared switches.
    #[must_use]
    pub fn switches(&self) -> &SwitchTable {
        &self.switches
    }

    /// The access lock.
    #[must_use]
    pub fn lock(&self) -> &Lock {
        &self.lock
    }

    /// The body.
    #[must_use]
    pub fn body(&self) -> &dyn CommandBody {
        self.body.as_ref()
    }

    /// Compiled patterns, or `None` if the command is disabled.
    pub fn patterns(&self) -> Option<&[Pattern]> {
        self.patterns
            .get_or_init(|| {
                let mut compiled = Vec::new();
                for spec in self.syntaxes() {
                    match Pattern::compile(spec) {
                        Ok(pattern) => compiled.push(pattern),
                        Err(error) => {
                            tracing::error!(
                                command = self.name(),
                                spec,
                                %error,
                                "syntax failed to compile; command disabled"
                            );
                            return None;
                        }
                    }
                }
                Some(compiled)
            })
            .as_deref()
    }

    /// Returns true if a syntax spec failed to compile.
    pub fn is_disabled(&self) -> bool {
        self.patterns().is_none()
    }

    /// Returns true if the command word names this command.
    ///
    /// Only the part before the first switch separator is compared, and it
    /// must equal an alias exactly.
    #[must_use]
    pub fn matches_name(&self, word: &str, separator: char) -> bool {
        let bare = word.split(separator).next().unwrap_or_default();
        self.aliases.iter().any(|alias| alias == bare)
    }

    /// Returns true if the lock admits `ctx.requester`.
    #[must_use]
    pub fn allows(&self, ctx: &CommandContext<'_>) -> bool {
        self.lock.allows(ctx)
    }

    /// Tries each phrasing in order; the first full match wins.
    ///
    /// A phrasing whose self-references name something other than the
    /// provider is skipped.
    pub fn match_syntax(&self, argstr: &str, ctx: &CommandContext<'_>) -> Option<CaptureMap> {
        self.patterns()?
            .iter()
            .filter_map(|pattern| pattern.matches(argstr))
            .find(|captures| self.arguments.self_references_hold(captures, ctx))
    }

    /// Usage text: the prefix and the primary name before the first
    /// phrasing, later phrasings aligned beneath it.
    #[must_use]
    pub fn describe_usage(&self, prefix: &str) -> String {
        if let Some(usage) = &self.usage {
            return format!("{prefix}{usage}");
        }
        let indent = " ".repeat(prefix.chars().count());
        self.syntaxes()
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                let line = if spec.is_empty() {
                    self.name().to_string()
                } else {
                    format!("{} {spec}", self.name())
                };
                if i == 0 {
                    format!("{prefix}{line}")
                } else {
                    format!("{indent}{line}")
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Debug for CommandDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("aliases", &self.aliases)
            .field("key", &self.key())
            .field("syntaxes", &self.syntaxes)
            .field("lock", &self.lock)
            .finish_non_exhaustive()
    }
}
