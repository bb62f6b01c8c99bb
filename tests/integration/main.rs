//! Cross-layer integration tests for Parlance
//!
//! Tests that drive whole sessions through storage, dispatch, and the
//! runtime together.

mod custom_world;
mod snapshots;
