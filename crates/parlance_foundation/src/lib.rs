//! Core identifiers, values, collaborator traits, and errors for Parlance.
//!
//! This crate provides:
//! - [`EntityId`] - Generational entity identifiers
//! - [`Value`] - Values produced by argument conversion
//! - [`Category`] - Named entity categories used to restrict object matching
//! - [`EntityLookup`] / [`Surroundings`] - The persistence-layer collaborator contracts
//! - [`Error`] - Rich error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod category;
pub mod collaborator;
pub mod entity;
pub mod error;
pub mod value;

pub use category::Category;
pub use collaborator::{EntityLookup, Environment, Surroundings};
pub use entity::EntityId;
pub use error::{Error, ErrorContext, ErrorKind};
pub use value::Value;

/// Result type alias using the Parlance error type.
pub type Result<T> = std::result::Result<T, Error>;
