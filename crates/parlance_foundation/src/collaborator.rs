//! Contracts the command core consumes from the persistence layer.
//!
//! The dispatcher never touches storage directly. Everything it needs to
//! know about the world arrives through these traits, so any object store
//! can host commands.

use crate::category::Category;
use crate::entity::EntityId;
use crate::value::Value;

/// Object lookup from a requester's point of view.
pub trait EntityLookup {
    /// Finds the entities `text` could refer to, as seen by `requester`.
    ///
    /// When `category` is given, only entities in that category are
    /// returned. An empty result means nothing matched; more than one
    /// result means the text is ambiguous.
    fn match_object(
        &self,
        requester: EntityId,
        text: &str,
        category: Option<&Category>,
    ) -> Vec<EntityId>;

    /// Matches `text` against the names of an explicit candidate list.
    fn match_among(
        &self,
        text: &str,
        candidates: &[EntityId],
        category: Option<&Category>,
    ) -> Vec<EntityId>;

    /// Returns true if `entity` exists and, when given, is in `category`.
    fn is_valid(&self, entity: EntityId, category: Option<&Category>) -> bool;

    /// A short display name for messages.
    fn display_name(&self, entity: EntityId) -> String;
}

/// Containment and provider-class information.
pub trait Surroundings {
    /// The entity containing `entity`, if any.
    fn location(&self, entity: EntityId) -> Option<EntityId>;

    /// The entities directly inside `entity`, in a stable order.
    fn contents(&self, entity: EntityId) -> Vec<EntityId>;

    /// The name of the provider class whose commands `entity` offers.
    fn provider_class(&self, entity: EntityId) -> Option<String>;

    /// Long-form description, for command bodies that show one.
    fn describe(&self, entity: EntityId) -> Option<String> {
        let _ = entity;
        None
    }

    /// A named property of `entity`, for command bodies.
    fn property(&self, entity: EntityId, key: &str) -> Option<Value> {
        let _ = (entity, key);
        None
    }
}

/// Everything the dispatcher needs from the world, as one object-safe trait.
pub trait Environment: EntityLookup + Surroundings {}

impl<T: EntityLookup + Surroundings + ?Sized> Environment for T {}
