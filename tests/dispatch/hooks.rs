//! Tests for preemption and unmatched-input hooks.

use parlance_dispatch::{Dispatch, DispatchConfig, DispatchError, Effect};

use crate::fixtures::fixture;

#[test]
fn preemption_can_handle_the_line_outright() {
    let f = fixture();
    let Dispatch::Preempted(effects) = f.resolve(f.alice, ";whatever").unwrap() else {
        panic!("line should be preempted");
    };
    assert_eq!(
        effects,
        vec![Effect::Message {
            to: f.alice,
            text: "handled: whatever".into()
        }]
    );
}

#[test]
fn preempted_dispatch_executes_to_its_effects() {
    let f = fixture();
    assert_eq!(f.run(f.alice, ";x"), vec!["handled: x"]);
}

#[test]
fn preemption_can_invoke_a_command() {
    let f = fixture();
    let inv = f.invocation(f.alice, "!hello");
    assert_eq!(inv.descriptor().name(), "say");
    assert_eq!(inv.args().str("message"), Some("hello"));
}

#[test]
fn preemption_can_rewrite_the_line() {
    let f = fixture();
    let inv = f.invocation(f.alice, "'good morning");
    assert_eq!(inv.input(), "say good morning");
    assert_eq!(inv.args().str("message"), Some("good morning"));
}

#[test]
fn rewrites_are_honored_once() {
    let f = fixture();
    // @b alone rewrites to a command...
    assert_eq!(f.invocation(f.alice, "@b").args().str("message"), Some("from b"));
    // ...but reached through @a the second rewrite is ignored.
    assert_eq!(
        f.failure(f.alice, "@a"),
        DispatchError::NoSuchCommand { input: "@b".into() }
    );
}

#[test]
fn rewrites_can_be_disabled() {
    let f = fixture();
    let config = DispatchConfig::new().with_allow_rewrite(false);
    assert!(matches!(
        f.resolve_with(config, f.alice, "'hi"),
        Err(DispatchError::NoSuchCommand { .. })
    ));
}

#[test]
fn preemption_comes_from_the_requester_only() {
    let f = fixture();
    // The pebble has no class and so no hook.
    assert!(matches!(
        f.resolve(f.pebble, ";x"),
        Err(DispatchError::NoSuchCommand { .. })
    ));
}

#[test]
fn unmatched_hook_claims_unknown_words() {
    let f = fixture();
    let inv = f.invocation(f.alice, "xyzzy");
    assert_eq!(inv.provider(), f.alice);
    assert_eq!(inv.args().str("message"), Some("Nothing happens."));
}

#[test]
fn requester_hook_is_asked_before_location_hook() {
    let f = fixture();
    let inv = f.invocation(f.alice, "plugh");
    assert_eq!(inv.args().str("message"), Some("Nothing happens."));
}

#[test]
fn location_hook_sees_itself_as_host() {
    let f = fixture();
    let inv = f.invocation(f.bob, "echo hello");
    assert_eq!(inv.requester(), f.bob);
    assert_eq!(inv.args().str("message"), Some("hello (Hall)"));
}

#[test]
fn nearby_things_offer_hooks_in_context_order() {
    let f = fixture();
    // Alice's own sword comes before the one on the floor.
    let inv = f.invocation(f.alice, "brandish");
    assert_eq!(inv.provider(), f.long_sword);
    assert_eq!(inv.descriptor().name(), "wield");
    // Bob holds nothing, so the sword in the hall answers.
    assert_eq!(f.invocation(f.bob, "brandish").provider(), f.short_sword);
}

#[test]
fn unmatched_hooks_are_skipped_when_a_name_matches() {
    let f = fixture();
    // "say" matches by name, so its usage error stands.
    assert!(matches!(
        f.failure(f.alice, "say"),
        DispatchError::Usage { .. }
    ));
}
