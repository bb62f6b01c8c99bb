//! Integration tests for Error types
//!
//! Tests error construction, display, context, and error kinds.

use parlance_foundation::{EntityId, Error, ErrorContext, ErrorKind};

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn error_entity_not_found() {
    let err = Error::entity_not_found(EntityId::new(42, 1));
    assert!(matches!(err.kind, ErrorKind::EntityNotFound(_)));
    assert!(err.to_string().contains("42"));
}

#[test]
fn error_stale_entity() {
    let err = Error::stale_entity(EntityId::new(5, 2));
    assert!(matches!(err.kind, ErrorKind::StaleEntity(id) if id.generation == 2));
    assert!(err.to_string().starts_with("stale entity reference"));
}

#[test]
fn error_invalid_move() {
    let err = Error::invalid_move(EntityId::new(3, 1), EntityId::new(4, 1), "no room");
    assert_eq!(err.to_string(), "cannot move #3 into #4: no room");
}

#[test]
fn io_and_serialization_kinds() {
    let io = Error::new(ErrorKind::Io("world.snap: not found".into()));
    assert_eq!(io.to_string(), "i/o error: world.snap: not found");

    let ser = Error::new(ErrorKind::Serialization("truncated".into()));
    assert_eq!(ser.to_string(), "serialization error: truncated");
}

// =============================================================================
// Error Context
// =============================================================================

#[test]
fn context_is_optional() {
    let err = Error::new(ErrorKind::Internal("oops".into()));
    assert!(err.context.is_none());
}

#[test]
fn context_frames_render_in_order() {
    let ctx = ErrorContext::new()
        .with_source("go")
        .with_frame("unmatched hook")
        .with_frame("dispatch");
    assert_eq!(ctx.to_string(), "in go\n  in unmatched hook\n  in dispatch");

    let err = Error::entity_not_found(EntityId::new(1, 1)).with_context(ctx);
    assert_eq!(err.context.map(|c| c.stack.len()), Some(2));
}
