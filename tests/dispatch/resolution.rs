//! Tests for name matching, audiences, syntax, and ambiguity.

use parlance_dispatch::{Dispatch, DispatchConfig, DispatchError, Dispatcher};

use crate::fixtures::fixture;

// =============================================================================
// Context
// =============================================================================

#[test]
fn context_covers_self_location_and_contents_once() {
    let f = fixture();
    let dispatcher = Dispatcher::new(&f.catalog, &f.world);
    assert_eq!(
        dispatcher.context(f.alice),
        vec![
            f.alice,
            f.hall,
            f.long_sword,
            f.bob,
            f.short_sword,
            f.copper,
            f.silver,
            f.pebble
        ]
    );
}

// =============================================================================
// Name matching
// =============================================================================

#[test]
fn blank_input_is_empty() {
    let f = fixture();
    assert_eq!(f.failure(f.alice, "   "), DispatchError::EmptyInput);
}

#[test]
fn unknown_word_is_no_such_command() {
    let f = fixture();
    assert_eq!(
        f.failure(f.alice, "dance wildly"),
        DispatchError::NoSuchCommand {
            input: "dance wildly".into()
        }
    );
    assert_eq!(f.failure(f.alice, "dance").player_message(), "Command Invalid.");
}

#[test]
fn command_word_must_match_an_alias_exactly() {
    let f = fixture();
    assert_eq!(
        f.failure(f.alice, "SAY Hello there"),
        DispatchError::NoSuchCommand {
            input: "SAY Hello there".into()
        }
    );
    assert_eq!(
        f.failure(f.alice, "Say Hello there").player_message(),
        "Command Invalid."
    );

    let inv = f.invocation(f.alice, "say Hello there");
    assert_eq!(inv.descriptor().name(), "say");
    assert_eq!(inv.command(), "say");
    assert_eq!(inv.args().str("message"), Some("Hello there"));
}

#[test]
fn input_is_trimmed_and_split_at_first_whitespace() {
    let f = fixture();
    let inv = f.invocation(f.alice, "  say   spaced   out  ");
    assert_eq!(inv.input(), "say   spaced   out");
    assert_eq!(inv.argstr(), "spaced   out");
}

#[test]
fn private_commands_belong_to_their_owner() {
    let f = fixture();
    // Bob reaches Alice's public commands only, and she has none.
    let inv = f.invocation(f.bob, "give pebble to alice");
    assert_eq!(inv.provider(), f.bob);
    let inv = f.invocation(f.alice, "give pebble to bob");
    assert_eq!(inv.provider(), f.alice);
}

#[test]
fn private_commands_of_other_things_are_out_of_reach() {
    let f = fixture();
    assert!(matches!(
        f.failure(f.alice, "polish"),
        DispatchError::NoSuchCommand { .. }
    ));
}

#[test]
fn disabled_command_never_matches() {
    let f = fixture();
    assert!(matches!(
        f.failure(f.alice, "broken something"),
        DispatchError::NoSuchCommand { .. }
    ));
}

#[test]
fn overlong_input_is_rejected() {
    let f = fixture();
    let config = DispatchConfig::new().with_max_input_len(10);
    assert!(matches!(
        f.resolve_with(config, f.alice, "say this is far too long"),
        Err(DispatchError::NoSuchCommand { .. })
    ));
}

// =============================================================================
// Syntax and self-references
// =============================================================================

#[test]
fn failed_syntax_reports_usage() {
    let f = fixture();
    assert_eq!(
        f.failure(f.alice, "give pebble"),
        DispatchError::Usage {
            message: "Syntax: give <thing> to <who>".into()
        }
    );
}

#[test]
fn usage_prefix_is_configurable() {
    let f = fixture();
    let config = DispatchConfig::new().with_usage_prefix("Usage: ");
    assert_eq!(
        f.resolve_with(config, f.alice, "say").unwrap_err().player_message(),
        "Usage: say <message>"
    );
}

#[test]
fn usage_lists_every_partial_match() {
    let f = fixture();
    // "sword" names two weapons, so neither accepts it as itself.
    assert_eq!(
        f.failure(f.alice, "inspect sword"),
        DispatchError::Usage {
            message: "Syntax: inspect <this>\nSyntax: inspect <this> {heads|tails}".into()
        }
    );
}

#[test]
fn self_reference_picks_the_named_provider() {
    let f = fixture();
    let inv = f.invocation(f.alice, "wield long sword");
    assert_eq!(inv.provider(), f.long_sword);
    let inv = f.invocation(f.alice, "wield short sword");
    assert_eq!(inv.provider(), f.short_sword);
}

#[test]
fn same_name_different_syntax_is_not_ambiguous() {
    let f = fixture();
    let inv = f.invocation(f.alice, "inspect silver coin tails");
    assert_eq!(inv.provider(), f.silver);
    assert_eq!(inv.captures().get("choice-1"), Some("tails"));
}

#[test]
fn several_full_matches_are_ambiguous() {
    let f = fixture();
    let err = f.failure(f.alice, "flip");
    let DispatchError::Ambiguous {
        input, candidates, ..
    } = &err
    else {
        panic!("expected ambiguity, got {err:?}");
    };
    assert_eq!(input, "flip");
    assert_eq!(candidates, &["flip (copper coin)", "flip (silver coin)"]);
    assert_eq!(
        err.player_message(),
        "Multiple commands match 'flip': flip (copper coin) and flip (silver coin)"
    );
}

#[test]
fn single_provider_is_not_ambiguous() {
    let mut f = fixture();
    f.world = f.world.move_to(f.silver, Some(f.bob)).unwrap();
    let inv = f.invocation(f.alice, "flip");
    assert_eq!(inv.provider(), f.copper);
}

// =============================================================================
// Execution
// =============================================================================

#[test]
fn resolved_commands_run_their_bodies() {
    let f = fixture();
    assert_eq!(f.run(f.alice, "say hi"), vec!["You say, hi"]);
    assert_eq!(f.run(f.alice, "wield long sword"), vec!["You wield the long sword."]);
}

#[test]
fn commands_without_bodies_are_unimplemented() {
    let f = fixture();
    let Dispatch::Resolved(inv) = f.resolve(f.alice, "todo").unwrap() else {
        panic!("todo should resolve");
    };
    let err = inv.execute(&f.world).unwrap_err();
    assert_eq!(err.to_string(), "The 'todo' command is not yet implemented.");
}

#[test]
fn available_commands_list_each_descriptor_once() {
    let f = fixture();
    let dispatcher = Dispatcher::new(&f.catalog, &f.world);
    let names: Vec<String> = dispatcher
        .available_commands(f.alice)
        .iter()
        .map(|(_, d)| d.name().to_string())
        .collect();
    assert_eq!(
        names,
        vec!["say", "give", "page", "shutdown", "todo", "wield", "inspect", "flip", "inspect"]
    );

    let bob: Vec<String> = dispatcher
        .available_commands(f.bob)
        .iter()
        .map(|(_, d)| d.name().to_string())
        .collect();
    assert!(!bob.contains(&"shutdown".to_string()));
}
