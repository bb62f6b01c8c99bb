//! Integration tests for Layer 1: Grammar
//!
//! Tests compiling syntax specs and matching argument strings against them.

mod compile_errors;
mod properties;
mod specs;
