//! Integration tests for Layer 1: Storage
//!
//! Tests for entity allocation, the persistent world, and name matching.

mod entities;
mod matching;
mod world;
