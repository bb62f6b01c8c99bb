//! Parlance - Command grammar compiler and dispatch engine
//!
//! This crate re-exports all layers of the Parlance system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: parlance_runtime    - REPL, CLI, demo world, snapshots
//! Layer 2: parlance_dispatch   - Binding, switches, locks, registries, dispatch
//! Layer 1: parlance_grammar    - Syntax spec compiler and matcher
//!          parlance_storage    - Persistent object world
//! Layer 0: parlance_foundation - Core types (EntityId, Value, Category, Error)
//! ```

pub use parlance_dispatch as dispatch;
pub use parlance_foundation as foundation;
pub use parlance_grammar as grammar;
pub use parlance_runtime as runtime;
pub use parlance_storage as storage;
