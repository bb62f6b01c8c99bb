//! Tests for argument binding and switches through dispatch.

use parlance_dispatch::{ArgumentError, CommandError, DispatchConfig, DispatchError};
use parlance_foundation::Value;

use crate::fixtures::fixture;

// =============================================================================
// Arguments
// =============================================================================

#[test]
fn entity_arguments_are_resolved_from_the_requester() {
    let f = fixture();
    let inv = f.invocation(f.alice, "give long sword to bob");
    assert_eq!(inv.args().entity("thing"), Some(f.long_sword));
    assert_eq!(inv.args().entity("who"), Some(f.bob));
}

#[test]
fn conversion_errors_are_deferred() {
    let f = fixture();
    // The line resolves; the bad argument only fails when used.
    let inv = f.invocation(f.alice, "give pebble to long sword");
    assert_eq!(inv.args().entity("thing"), Some(f.pebble));
    assert_eq!(
        inv.args().get("who").and_then(|arg| arg.error()),
        Some(&ArgumentError::WrongCategory("long sword is not a player.".into()))
    );
    let err = inv.args().require("who").unwrap_err();
    assert!(matches!(err, CommandError::Argument { ref name, .. } if name == "who"));
}

#[test]
fn ambiguous_entities_list_candidates() {
    let f = fixture();
    let inv = f.invocation(f.alice, "give coin to bob");
    let Some(ArgumentError::AmbiguousMatch { candidates, .. }) =
        inv.args().get("thing").and_then(|arg| arg.error())
    else {
        panic!("coin should be ambiguous");
    };
    assert_eq!(candidates, &["copper coin", "silver coin"]);
}

#[test]
fn missing_entities_fail_to_match() {
    let f = fixture();
    let inv = f.invocation(f.alice, "give unicorn to bob");
    assert!(matches!(
        inv.args().get("thing").and_then(|arg| arg.error()),
        Some(ArgumentError::FailedMatch(_))
    ));
    assert_eq!(inv.args().errors().count(), 1);
}

#[test]
fn ordinals_pick_among_matches() {
    let f = fixture();
    let inv = f.invocation(f.alice, "give 2nd coin to bob");
    assert_eq!(inv.args().entity("thing"), Some(f.silver));
}

#[test]
fn unbound_captures_pass_text_through() {
    let f = fixture();
    let inv = f.invocation(f.alice, "page bob=are you there?");
    assert_eq!(inv.args().str("who"), Some("bob"));
    assert_eq!(inv.args().str("message"), Some("are you there?"));
}

#[test]
fn self_references_bind_to_the_provider() {
    let f = fixture();
    let inv = f.invocation(f.alice, "wield short sword");
    assert_eq!(inv.args().entity("this"), Some(f.short_sword));
}

// =============================================================================
// Switches
// =============================================================================

#[test]
fn bare_switch_is_true() {
    let f = fixture();
    let inv = f.invocation(f.alice, "page/quiet bob = hi");
    assert!(inv.switches().flag("quiet"));
    assert_eq!(inv.command(), "page/quiet");
}

#[test]
fn switch_values_are_parsed() {
    let f = fixture();
    let inv = f.invocation(f.alice, "page/QUIET=off bob = hi");
    assert_eq!(inv.switches().value("quiet"), Some(&Value::Bool(false)));

    let inv = f.invocation(f.alice, "page/quiet=maybe bob = hi");
    assert!(matches!(
        inv.switches().get("quiet").and_then(|arg| arg.error()),
        Some(ArgumentError::Conversion(_))
    ));
}

#[test]
fn absent_switches_are_unbound() {
    let f = fixture();
    let inv = f.invocation(f.alice, "page bob = hi");
    assert!(inv.switches().is_empty());
    assert!(!inv.switches().flag("quiet"));
}

#[test]
fn unknown_switch_is_a_usage_error() {
    let f = fixture();
    let err = f.failure(f.alice, "page/loud bob = hi");
    assert_eq!(err.player_message(), "Unknown switch: loud");
    assert!(matches!(err, DispatchError::SwitchUsage(ref e) if e.key == "loud"));
}

#[test]
fn switch_separator_is_configurable() {
    let f = fixture();
    let config = DispatchConfig::new().with_switch_separator('+');
    let Ok(parlance_dispatch::Dispatch::Resolved(inv)) =
        f.resolve_with(config.clone(), f.alice, "page+quiet bob = hi")
    else {
        panic!("page+quiet should resolve");
    };
    assert!(inv.switches().flag("quiet"));
    // The default separator is now just part of the word.
    assert!(matches!(
        f.resolve_with(config, f.alice, "page/quiet bob = hi"),
        Err(DispatchError::NoSuchCommand { .. })
    ));
}
