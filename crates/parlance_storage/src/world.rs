//! World state with immutable snapshots.
//!
//! The `World` owns every object record and the containment tree between
//! them. It uses persistent data structures, so cloning is cheap and every
//! mutation returns a new `World`, leaving the old snapshot untouched.

use std::sync::Arc;

use im::OrdMap;
use parlance_foundation::{
    Category, EntityId, EntityLookup, Error, ErrorKind, Result, Surroundings, Value,
};

use crate::entity::{EntityStore, ObjectRecord};
use crate::matching::match_names;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Immutable snapshot of the object world.
///
/// Clone is O(1) due to structural sharing.
/// All mutation methods return a new `World` instance.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct World {
    /// Entity lifecycle management.
    entities: Arc<EntityStore>,
    /// One record per live entity.
    objects: OrdMap<EntityId, ObjectRecord>,
}

impl World {
    /// Creates a new empty world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of live objects.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Checks if an entity exists.
    #[must_use]
    pub fn exists(&self, entity: EntityId) -> bool {
        self.entities.exists(entity)
    }

    /// Iterates all live entity ids.
    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.iter()
    }

    /// Returns the live entity at `index`, as written `#index`.
    #[must_use]
    pub fn find_by_index(&self, index: u64) -> Option<EntityId> {
        self.entities.live_at(index)
    }

    /// Gets an object's record.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is stale or does not exist.
    pub fn get(&self, entity: EntityId) -> Result<&ObjectRecord> {
        self.entities.validate(entity)?;
        self.objects
            .get(&entity)
            .ok_or_else(|| Error::entity_not_found(entity))
    }

    /// Gets an object's record, or `None` if the entity is not live.
    #[must_use]
    pub fn record(&self, entity: EntityId) -> Option<&ObjectRecord> {
        self.get(entity).ok()
    }

    /// Spawns a new object, optionally inside another one.
    ///
    /// Returns a new World and the spawned entity id.
    ///
    /// # Errors
    ///
    /// Returns an error if `location` is not a live entity.
    pub fn spawn(
        &self,
        record: ObjectRecord,
        location: Option<EntityId>,
    ) -> Result<(World, EntityId)> {
        if let Some(location) = location {
            self.entities.validate(location)?;
        }

        let mut entities = (*self.entities).clone();
        let id = entities.spawn();

        let mut objects = self.objects.clone();
        let mut record = record;
        record.location = None;
        record.contents.clear();
        objects.insert(id, record);

        let world = World {
            entities: Arc::new(entities),
            objects,
        };
        match location {
            Some(location) => Ok((world.move_to(id, Some(location))?, id)),
            None => Ok((world, id)),
        }
    }

    /// Moves an object into `destination`, or out of everything for `None`.
    ///
    /// Returns a new World with the move applied.
    ///
    /// # Errors
    ///
    /// Returns an error if either entity is not live, or if the move would
    /// put an object inside itself.
    pub fn move_to(&self, entity: EntityId, destination: Option<EntityId>) -> Result<World> {
        self.get(entity)?;
        if let Some(destination) = destination {
            self.get(destination)?;
            let mut cursor = Some(destination);
            while let Some(container) = cursor {
                if container == entity {
                    return Err(Error::invalid_move(
                        entity,
                        destination,
                        "an object cannot contain itself",
                    ));
                }
                cursor = self.location(container);
            }
        }

        let mut objects = self.objects.clone();
        if let Some(old) = self.location(entity) {
            if let Some(container) = objects.get_mut(&old) {
                container.contents.retain(|item| *item != entity);
            }
        }
        if let Some(destination) = destination {
            if let Some(container) = objects.get_mut(&destination) {
                container.contents.push_back(entity);
            }
        }
        if let Some(record) = objects.get_mut(&entity) {
            record.location = destination;
        }

        Ok(World {
            objects,
            ..self.clone()
        })
    }

    /// Destroys an object.
    ///
    /// Its contents move to its location, so nothing is orphaned.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not live.
    pub fn destroy(&self, entity: EntityId) -> Result<World> {
        let record = self.get(entity)?;
        let location = record.location;
        let contents: Vec<EntityId> = record.contents().collect();

        let mut world = self.clone();
        for item in contents {
            world = world.move_to(item, location)?;
        }
        world = world.move_to(entity, None)?;

        let mut entities = (*world.entities).clone();
        entities.destroy(entity)?;
        let mut objects = world.objects.clone();
        objects.remove(&entity);

        Ok(World {
            entities: Arc::new(entities),
            objects,
        })
    }

    /// Sets an attribute on an object.
    ///
    /// Returns a new World with the attribute set.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not live.
    pub fn set_attribute(&self, entity: EntityId, key: &str, value: Value) -> Result<World> {
        self.get(entity)?;
        let mut objects = self.objects.clone();
        let record = objects
            .get_mut(&entity)
            .ok_or_else(|| Error::new(ErrorKind::Internal(format!("no record for {entity}"))))?;
        record.set_attribute(key, value);
        Ok(World {
            objects,
            ..self.clone()
        })
    }

    /// Looks up an attribute on an object.
    #[must_use]
    pub fn attribute(&self, entity: EntityId, key: &str) -> Option<&Value> {
        self.record(entity)?.attribute(key)
    }

    fn in_category(&self, entity: EntityId, category: Option<&Category>) -> bool {
        match (self.record(entity), category) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(record), Some(category)) => record.is_a(category),
        }
    }

    fn names_of(&self, candidates: &[EntityId]) -> Vec<(EntityId, Vec<&str>)> {
        candidates
            .iter()
            .filter_map(|id| Some((*id, self.record(*id)?.names().collect())))
            .collect()
    }

    /// Resolves `#N` to a live entity.
    fn literal_ref(&self, text: &str) -> Option<EntityId> {
        let index = text.strip_prefix('#')?.parse::<u64>().ok()?;
        self.find_by_index(index)
    }
}

impl EntityLookup for World {
    /// Matches `me`/`self`, `here`, `#N`, the requester's own names, and
    /// then the names of everything the requester holds or stands near.
    fn match_object(
        &self,
        requester: EntityId,
        text: &str,
        category: Option<&Category>,
    ) -> Vec<EntityId> {
        let text = text.trim();
        if text.is_empty() {
            return Vec::new();
        }

        let lowered = text.to_lowercase();
        let special = match lowered.as_str() {
            "me" | "self" => Some(requester),
            "here" => self.location(requester),
            _ => self.literal_ref(text),
        };
        if let Some(entity) = special.filter(|e| self.in_category(*e, category)) {
            return vec![entity];
        }

        if self.in_category(requester, category) {
            let own = match_names(text, &self.names_of(&[requester]));
            if !own.is_empty() {
                return own;
            }
        }

        let mut nearby = self.contents(requester);
        if let Some(location) = self.location(requester) {
            nearby.extend(
                self.contents(location)
                    .into_iter()
                    .filter(|item| *item != requester),
            );
        }
        nearby.retain(|item| self.in_category(*item, category));
        match_names(text, &self.names_of(&nearby))
    }

    fn match_among(
        &self,
        text: &str,
        candidates: &[EntityId],
        category: Option<&Category>,
    ) -> Vec<EntityId> {
        let candidates: Vec<EntityId> = candidates
            .iter()
            .copied()
            .filter(|item| self.in_category(*item, category))
            .collect();

        if let Some(entity) = self.literal_ref(text.trim()) {
            if candidates.contains(&entity) {
                return vec![entity];
            }
        }
        match_names(text, &self.names_of(&candidates))
    }

    fn is_valid(&self, entity: EntityId, category: Option<&Category>) -> bool {
        self.in_category(entity, category)
    }

    fn display_name(&self, entity: EntityId) -> String {
        self.record(entity)
            .map_or_else(|| entity.to_string(), |record| record.name().to_string())
    }
}

impl Surroundings for World {
    fn location(&self, entity: EntityId) -> Option<EntityId> {
        self.record(entity)?.location()
    }

    fn contents(&self, entity: EntityId) -> Vec<EntityId> {
        self.record(entity)
            .map(|record| record.contents().collect())
            .unwrap_or_default()
    }

    fn provider_class(&self, entity: EntityId) -> Option<String> {
        self.record(entity)?.class().map(str::to_string)
    }

    fn describe(&self, entity: EntityId) -> Option<String> {
        self.record(entity)?.description().map(str::to_string)
    }

    fn property(&self, entity: EntityId, key: &str) -> Option<Value> {
        self.record(entity)?.attribute(key).cloned()
    }
}
