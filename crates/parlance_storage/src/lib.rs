//! In-memory persistent object world for hosting Parlance commands.
//!
//! This crate provides:
//! - [`EntityStore`] - Generational entity allocation
//! - [`ObjectRecord`] - Names, class, categories, and containment for one object
//! - [`World`] - Immutable world state with structural sharing
//! - [`matching`] - Name matching with exact/prefix precedence and ordinals
//!
//! [`World`] implements the [`EntityLookup`](parlance_foundation::EntityLookup)
//! and [`Surroundings`](parlance_foundation::Surroundings) collaborator traits,
//! so it can back a dispatcher directly.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod entity;
pub mod matching;
pub mod world;

pub use entity::{EntityStore, ObjectRecord};
pub use world::World;
