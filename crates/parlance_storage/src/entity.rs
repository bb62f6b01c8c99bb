//! Entity allocation and per-object records.
//!
//! The [`EntityStore`] hands out generational ids and detects stale
//! references to destroyed objects. An [`ObjectRecord`] holds what the
//! command core needs to know about one object: what it is called, what
//! kind of thing it is, and where it sits.

// Allow u64 to usize casts - we target 64-bit systems
#![allow(clippy::cast_possible_truncation)]

use im::{OrdMap, OrdSet, Vector};
use parlance_foundation::{Category, EntityId, Error, Result, Value};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Manages entity lifecycle and generation tracking.
///
/// Odd generations are alive, even generations are free. Destroying an
/// entity bumps its generation so outstanding ids become stale, and the
/// index is reused by a later spawn.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EntityStore {
    generations: Vec<u32>,
    free_list: Vec<u64>,
    live_count: usize,
}

impl EntityStore {
    /// Creates a new empty entity store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a new entity id, reusing a freed index when one exists.
    pub fn spawn(&mut self) -> EntityId {
        self.live_count += 1;

        if let Some(index) = self.free_list.pop() {
            let slot = &mut self.generations[index as usize];
            *slot += 1;
            EntityId::new(index, *slot)
        } else {
            let index = self.generations.len() as u64;
            self.generations.push(1);
            EntityId::new(index, 1)
        }
    }

    /// Frees an entity id.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is stale or was never allocated.
    pub fn destroy(&mut self, id: EntityId) -> Result<()> {
        self.validate(id)?;
        self.generations[id.index as usize] += 1;
        self.free_list.push(id.index);
        self.live_count -= 1;
        Ok(())
    }

    /// Checks if an entity exists and is not stale.
    #[must_use]
    pub fn exists(&self, id: EntityId) -> bool {
        self.validate(id).is_ok()
    }

    /// Validates that an entity is live.
    ///
    /// # Errors
    ///
    /// Returns `StaleEntity` for an id whose slot has been reused and
    /// `EntityNotFound` for one that was never allocated or is free.
    pub fn validate(&self, id: EntityId) -> Result<()> {
        let Some(&current) = self.generations.get(id.index as usize) else {
            return Err(Error::entity_not_found(id));
        };
        if current != id.generation {
            return Err(Error::stale_entity(id));
        }
        if current % 2 == 0 {
            return Err(Error::entity_not_found(id));
        }
        Ok(())
    }

    /// Returns the live id at `index`, if that slot is in use.
    #[must_use]
    pub fn live_at(&self, index: u64) -> Option<EntityId> {
        let generation = *self.generations.get(index as usize)?;
        (generation % 2 == 1).then(|| EntityId::new(index, generation))
    }

    /// Returns the number of live entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live_count
    }

    /// Returns true if there are no live entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live_count == 0
    }

    /// Iterates over all live entity ids in index order.
    pub fn iter(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.generations
            .iter()
            .enumerate()
            .filter(|(_, generation)| *generation % 2 == 1)
            .map(|(index, generation)| EntityId::new(index as u64, *generation))
    }
}

/// Everything the world knows about one object.
///
/// Built with `with_*` methods and handed to
/// [`World::spawn`](crate::World::spawn).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ObjectRecord {
    names: Vector<String>,
    class: Option<String>,
    categories: OrdSet<Category>,
    description: Option<String>,
    attributes: OrdMap<String, Value>,
    pub(crate) location: Option<EntityId>,
    pub(crate) contents: Vector<EntityId>,
}

impl ObjectRecord {
    /// Creates a record whose primary name is `name`.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            names: Vector::unit(name.trim().to_string()),
            class: None,
            categories: OrdSet::new(),
            description: None,
            attributes: OrdMap::new(),
            location: None,
            contents: Vector::new(),
        }
    }

    /// Adds an alternative name.
    #[must_use]
    pub fn with_alias(mut self, alias: &str) -> Self {
        self.names.push_back(alias.trim().to_string());
        self
    }

    /// Sets the provider class whose commands this object offers.
    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        self.class = Some(class.to_string());
        self
    }

    /// Adds a category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<Category>) -> Self {
        self.categories.insert(category.into());
        self
    }

    /// Sets the text shown when the object is looked at.
    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Sets an attribute.
    #[must_use]
    pub fn with_attribute(mut self, key: &str, value: Value) -> Self {
        self.attributes.insert(key.to_string(), value);
        self
    }

    /// The primary name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.names.front().map_or("", String::as_str)
    }

    /// Every name, primary first.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// The provider class, if any.
    #[must_use]
    pub fn class(&self) -> Option<&str> {
        self.class.as_deref()
    }

    /// Returns true if the object is in `category`.
    #[must_use]
    pub fn is_a(&self, category: &Category) -> bool {
        self.categories.contains(category)
    }

    /// The categories this object belongs to.
    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    /// The description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Looks up an attribute.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    pub(crate) fn set_attribute(&mut self, key: &str, value: Value) {
        self.attributes.insert(key.to_string(), value);
    }

    /// The containing object.
    #[must_use]
    pub fn location(&self) -> Option<EntityId> {
        self.location
    }

    /// The objects directly inside this one, in arrival order.
    pub fn contents(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.contents.iter().copied()
    }
}
