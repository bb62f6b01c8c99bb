//! Integration tests for Layer 2: Dispatch
//!
//! Tests resolving whole input lines against a world: name and lock
//! filtering, audiences, switches, syntax, hooks, and ambiguity.

mod arguments;
mod catalog;
mod hooks;
mod resolution;
