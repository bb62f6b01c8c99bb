//! Integration tests for Value types
//!
//! Tests Value variants, truthiness, accessors, and display.

use parlance_foundation::{EntityId, Value};

// =============================================================================
// Truthiness
// =============================================================================

#[test]
fn nil_and_false_are_falsy() {
    assert!(!Value::Nil.is_truthy());
    assert!(!Value::Bool(false).is_truthy());
}

#[test]
fn everything_else_is_truthy() {
    assert!(Value::Bool(true).is_truthy());
    assert!(Value::Int(0).is_truthy());
    assert!(Value::string("").is_truthy());
    assert!(Value::Present.is_truthy());
    assert!(Value::Duration(0).is_truthy());
}

// =============================================================================
// Accessors
// =============================================================================

#[test]
fn accessors_match_their_variant() {
    assert_eq!(Value::Int(42).as_int(), Some(42));
    assert_eq!(Value::Int(42).as_float(), None);
    assert_eq!(Value::Float(1.5).as_float(), Some(1.5));
    assert_eq!(Value::Bool(true).as_bool(), Some(true));
    assert_eq!(Value::Duration(90).as_duration(), Some(90));
    assert_eq!(Value::Int(90).as_duration(), None);
}

#[test]
fn strings_and_keywords_both_read_as_str() {
    assert_eq!(Value::string("lamp").as_str(), Some("lamp"));
    assert_eq!(Value::keyword("north").as_str(), Some("north"));
    assert_ne!(Value::string("north"), Value::keyword("north"));
}

#[test]
fn entity_refs() {
    let id = EntityId::new(7, 1);
    assert_eq!(Value::EntityRef(id).as_entity(), Some(id));
    assert_eq!(Value::string("#7").as_entity(), None);
}

#[test]
fn lists() {
    let list = Value::List(vec![Value::string("a"), Value::string("b")]);
    assert_eq!(list.as_list().map(<[Value]>::len), Some(2));
    assert_eq!(Value::Nil.as_list(), None);
}

// =============================================================================
// Display
// =============================================================================

#[test]
fn display_is_player_facing() {
    assert_eq!(Value::string("brass lamp").to_string(), "brass lamp");
    assert_eq!(Value::Int(-3).to_string(), "-3");
    assert_eq!(Value::EntityRef(EntityId::new(12, 1)).to_string(), "#12");
    assert_eq!(Value::Present.to_string(), "yes");
    assert_eq!(
        Value::List(vec![Value::string("a"), Value::Int(2)]).to_string(),
        "a, 2"
    );
}

#[test]
fn null_entity_display() {
    assert_eq!(EntityId::null().to_string(), "#null");
    assert!(EntityId::null().is_null());
    assert!(!EntityId::new(0, 1).is_null());
}
