//! REPL, CLI, demo world, and snapshots for Parlance.
//!
//! This crate provides:
//! - [`Session`] - A world, a catalog of commands, and the player typing them
//! - [`Repl`] - Interactive read-eval-print loop over a session
//! - [`demo`] - A small two-room world to try commands in
//! - World snapshot save and load

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod demo;
pub mod editor;
pub mod logging;
pub mod repl;
pub mod serialize;
pub mod session;

pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use repl::Repl;
pub use session::Session;
