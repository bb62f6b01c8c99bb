//! Session state for the REPL.
//!
//! A session owns the world, the provider catalog, and the entity typing
//! commands. Each line is dispatched against the current world, and the
//! resulting effects produce the next one.

use parlance_dispatch::{DispatchConfig, DispatchError, Dispatcher, Effect, ProviderCatalog};
use parlance_foundation::{EntityId, EntityLookup, Result, Surroundings};
use parlance_storage::World;
use tracing::{debug, warn};

use crate::demo;

/// Interactive session for one player.
pub struct Session {
    world: World,
    catalog: ProviderCatalog,
    player: EntityId,
    config: DispatchConfig,
}

impl Session {
    /// Creates a session for `player` in `world`.
    #[must_use]
    pub fn new(world: World, catalog: ProviderCatalog, player: EntityId) -> Self {
        Self {
            world,
            catalog,
            player,
            config: DispatchConfig::default(),
        }
    }

    /// Creates a session in the demo world.
    ///
    /// # Errors
    ///
    /// Returns an error if the demo world cannot be built.
    pub fn demo() -> Result<Self> {
        let (world, player) = demo::world()?;
        Ok(Self::new(world, demo::catalog(), player))
    }

    /// Sets the dispatch configuration.
    #[must_use]
    pub fn with_config(mut self, config: DispatchConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the current world.
    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// Replaces the world, for example after loading a snapshot.
    pub fn set_world(&mut self, world: World) {
        self.world = world;
    }

    /// Returns the entity this session types for.
    #[must_use]
    pub const fn player(&self) -> EntityId {
        self.player
    }

    /// Returns the provider catalog.
    #[must_use]
    pub const fn catalog(&self) -> &ProviderCatalog {
        &self.catalog
    }

    /// Dispatches one line and applies its effects.
    ///
    /// Returns the text the player sees, one entry per message.
    pub fn handle(&mut self, line: &str) -> Vec<String> {
        let outcome = {
            let dispatcher =
                Dispatcher::new(&self.catalog, &self.world).with_config(self.config.clone());
            dispatcher
                .resolve(self.player, line)
                .map(|dispatch| dispatch.execute(&self.world))
        };
        match outcome {
            Ok(Ok(effects)) => self.apply(effects),
            Ok(Err(error)) => {
                debug!(%error, "command refused");
                vec![error.to_string()]
            }
            Err(DispatchError::EmptyInput) => Vec::new(),
            Err(error) => {
                debug!(%error, "dispatch failed");
                vec![error.player_message()]
            }
        }
    }

    /// Usage lines for every command currently in reach.
    #[must_use]
    pub fn available_commands(&self) -> Vec<String> {
        let dispatcher = Dispatcher::new(&self.catalog, &self.world);
        let prefix = self.config.usage_prefix.as_str();
        dispatcher
            .available_commands(self.player)
            .iter()
            .map(|(_, descriptor)| descriptor.describe_usage(prefix))
            .collect()
    }

    /// Every command name and alias currently in reach, sorted.
    #[must_use]
    pub fn command_words(&self) -> Vec<String> {
        let dispatcher = Dispatcher::new(&self.catalog, &self.world);
        let mut words: Vec<String> = dispatcher
            .available_commands(self.player)
            .iter()
            .flat_map(|(_, descriptor)| descriptor.aliases().to_vec())
            .collect();
        words.sort();
        words.dedup();
        words
    }

    fn apply(&mut self, effects: Vec<Effect>) -> Vec<String> {
        let mut output = Vec::new();
        for effect in effects {
            match effect {
                Effect::Message { to, text } => {
                    if to == self.player {
                        output.push(text);
                    }
                }
                Effect::Announce {
                    location,
                    text,
                    exclude,
                } => {
                    let here = self.world.location(self.player) == Some(location);
                    if here && exclude != Some(self.player) {
                        output.push(text);
                    }
                }
                Effect::Move {
                    entity,
                    destination,
                } => match self.world.move_to(entity, Some(destination)) {
                    Ok(world) => self.world = world,
                    Err(error) => {
                        warn!(
                            entity = %self.world.display_name(entity),
                            %error,
                            "move rejected"
                        );
                        output.push(error.to_string());
                    }
                },
            }
        }
        output
    }
}
