//! Provider classes and the cache of their merged command registries.
//!
//! A provider class lists its commands in levels, least specific first,
//! the way a subclass refines its parents. Each level splits its commands
//! into a public set, offered to anyone nearby, and a private set,
//! offered only to the provider itself. Merging the levels in order
//! yields one [`CommandRegistry`] per class and audience; later levels
//! override earlier ones by key.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::descriptor::CommandDescriptor;
use crate::hooks::{PreemptHook, UnmatchedHook};
use crate::registry::CommandRegistry;

/// Who a set of commands is offered to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Audience {
    /// Anyone in reach of the provider.
    Public,
    /// Only the provider itself.
    Private,
}

/// One level of a provider class.
#[derive(Clone, Debug, Default)]
pub struct ProviderLevel {
    public: Vec<Arc<CommandDescriptor>>,
    private: Vec<Arc<CommandDescriptor>>,
}

impl ProviderLevel {
    /// Creates an empty level.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a public command.
    #[must_use]
    pub fn with_public(mut self, descriptor: CommandDescriptor) -> Self {
        self.public.push(Arc::new(descriptor));
        self
    }

    /// Adds a private command.
    #[must_use]
    pub fn with_private(mut self, descriptor: CommandDescriptor) -> Self {
        self.private.push(Arc::new(descriptor));
        self
    }

    /// Adds a command for `audience` in place.
    pub fn push(&mut self, audience: Audience, descriptor: CommandDescriptor) {
        match audience {
            Audience::Public => self.public.push(Arc::new(descriptor)),
            Audience::Private => self.private.push(Arc::new(descriptor)),
        }
    }

    /// The commands offered to `audience`.
    #[must_use]
    pub fn commands(&self, audience: Audience) -> &[Arc<CommandDescriptor>] {
        match audience {
            Audience::Public => &self.public,
            Audience::Private => &self.private,
        }
    }
}

/// A named kind of provider, with its command levels and hooks.
#[derive(Clone, Default)]
pub struct ProviderClass {
    name: String,
    levels: Vec<ProviderLevel>,
    preempt: Option<Arc<dyn PreemptHook>>,
    unmatched: Option<Arc<dyn UnmatchedHook>>,
}

impl ProviderClass {
    /// Creates a class with no commands.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// Appends a level, more specific than those before it.
    #[must_use]
    pub fn with_level(mut self, level: ProviderLevel) -> Self {
        self.levels.push(level);
        self
    }

    /// Extends this class: the parent's levels come first.
    #[must_use]
    pub fn extending(mut self, parent: &ProviderClass) -> Self {
        let mut levels = parent.levels.clone();
        levels.append(&mut self.levels);
        self.levels = levels;
        if self.preempt.is_none() {
            self.preempt.clone_from(&parent.preempt);
        }
        if self.unmatched.is_none() {
            self.unmatched.clone_from(&parent.unmatched);
        }
        self
    }

    /// Installs the hook consulted before ordinary matching.
    #[must_use]
    pub fn with_preempt_hook(mut self, hook: impl PreemptHook + 'static) -> Self {
        self.preempt = Some(Arc::new(hook));
        self
    }

    /// Installs the hook consulted when no command name matches.
    #[must_use]
    pub fn with_unmatched_hook(mut self, hook: impl UnmatchedHook + 'static) -> Self {
        self.unmatched = Some(Arc::new(hook));
        self
    }

    /// The class name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The levels, least specific first.
    #[must_use]
    pub fn levels(&self) -> &[ProviderLevel] {
        &self.levels
    }

    /// The levels, for adding commands. Call
    /// [`ProviderCatalog::rebuild`] afterwards.
    pub fn levels_mut(&mut self) -> &mut Vec<ProviderLevel> {
        &mut self.levels
    }

    /// The preemption hook.
    #[must_use]
    pub fn preempt_hook(&self) -> Option<&dyn PreemptHook> {
        self.preempt.as_deref()
    }

    /// The unmatched-input hook.
    #[must_use]
    pub fn unmatched_hook(&self) -> Option<&dyn UnmatchedHook> {
        self.unmatched.as_deref()
    }

    /// Merges the levels into one registry.
    #[must_use]
    pub fn build_registry(&self, audience: Audience) -> CommandRegistry {
        self.levels
            .iter()
            .flat_map(|level| level.commands(audience).iter().cloned())
            .collect()
    }
}

impl std::fmt::Debug for ProviderClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderClass")
            .field("name", &self.name)
            .field("levels", &self.levels.len())
            .field("preempt", &self.preempt.is_some())
            .field("unmatched", &self.unmatched.is_some())
            .finish()
    }
}

/// Built registries, shared between dispatches.
///
/// Each class and audience is built at most once; concurrent first uses
/// wait for the single build.
#[derive(Debug, Default)]
pub struct RegistryCache {
    built: RwLock<HashMap<(String, Audience), Arc<CommandRegistry>>>,
}

impl RegistryCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the registry for `class` and `audience`, building it if needed.
    pub fn get_or_build(&self, class: &ProviderClass, audience: Audience) -> Arc<CommandRegistry> {
        let key = (class.name().to_string(), audience);
        if let Some(registry) = self
            .built
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return Arc::clone(registry);
        }
        let mut built = self.built.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(built.entry(key).or_insert_with(|| {
            let registry = class.build_registry(audience);
            tracing::debug!(
                class = class.name(),
                ?audience,
                commands = registry.len(),
                "built command registry"
            );
            Arc::new(registry)
        }))
    }

    /// Rebuilds both registries of `class` from its current levels.
    pub fn rebuild(&self, class: &ProviderClass) {
        let mut built = self.built.write().unwrap_or_else(PoisonError::into_inner);
        for audience in [Audience::Public, Audience::Private] {
            let registry = class.build_registry(audience);
            tracing::debug!(
                class = class.name(),
                ?audience,
                commands = registry.len(),
                "rebuilt command registry"
            );
            built.insert((class.name().to_string(), audience), Arc::new(registry));
        }
    }

    /// Forgets everything built for `class`.
    pub fn invalidate(&self, class: &str) {
        self.built
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|(name, _), _| name != class);
    }
}

/// All provider classes, by name, with their registry cache.
#[derive(Debug, Default)]
pub struct ProviderCatalog {
    classes: HashMap<String, ProviderClass>,
    cache: RegistryCache,
}

impl ProviderCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a class, replacing any with the same name.
    #[must_use]
    pub fn with_class(mut self, class: ProviderClass) -> Self {
        self.register(class);
        self
    }

    /// Adds a class in place, discarding anything built for its name.
    pub fn register(&mut self, class: ProviderClass) {
        self.cache.invalidate(class.name());
        self.classes.insert(class.name().to_string(), class);
    }

    /// Looks up a class.
    #[must_use]
    pub fn class(&self, name: &str) -> Option<&ProviderClass> {
        self.classes.get(name)
    }

    /// Looks up a class for changing. Built registries keep serving the
    /// old commands until [`rebuild`](Self::rebuild) is called.
    pub fn class_mut(&mut self, name: &str) -> Option<&mut ProviderClass> {
        self.classes.get_mut(name)
    }

    /// Rebuilds the registries of `name` from its current levels.
    ///
    /// Returns false if there is no such class.
    pub fn rebuild(&self, name: &str) -> bool {
        match self.classes.get(name) {
            Some(class) => {
                self.cache.rebuild(class);
                true
            }
            None => false,
        }
    }

    /// The merged registry of `name` for `audience`.
    pub fn registry(&self, name: &str, audience: Audience) -> Option<Arc<CommandRegistry>> {
        let class = self.classes.get(name)?;
        Some(self.cache.get_or_build(class, audience))
    }

    /// Class names, sorted.
    #[must_use]
    pub fn class_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.classes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
