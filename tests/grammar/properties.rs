//! Property tests for the matcher

use parlance_grammar::compile;
use proptest::prelude::*;

/// One to five lowercase words separated by single spaces.
fn phrase() -> impl Strategy<Value = String> {
    "[a-z]{1,8}( [a-z]{1,8}){0,4}"
}

proptest! {
    #[test]
    fn lone_capture_takes_the_whole_phrase(input in phrase()) {
        let map = compile("<thing>").unwrap().matches(&input).unwrap();
        prop_assert_eq!(map.get("thing"), Some(input.as_str()));
    }

    #[test]
    fn every_capture_is_a_key(input in phrase()) {
        let pattern = compile("<a> [<b> [with <c>]]").unwrap();
        if let Some(map) = pattern.matches(&input) {
            prop_assert!(map.contains_key("a"));
            prop_assert!(map.contains_key("b"));
            prop_assert!(map.contains_key("c"));
            prop_assert!(map.get("a").is_some());
        }
    }

    #[test]
    fn matching_is_deterministic(input in "[a-z \"]{0,24}") {
        let pattern = compile("<a> [to <b>]").unwrap();
        prop_assert_eq!(pattern.matches(&input), pattern.matches(&input));
    }

    #[test]
    fn choices_are_numbered_in_order(
        first in prop::sample::select(vec!["north", "south"]),
        second in prop::sample::select(vec!["east", "west"]),
    ) {
        let pattern = compile("{north|south} {east|west}").unwrap();
        let map = pattern.matches(&format!("{first} {second}")).unwrap();
        prop_assert_eq!(map.choice(1), Some(first));
        prop_assert_eq!(map.choice(2), Some(second));
    }

    #[test]
    fn quoted_capture_keeps_terminators(words in phrase(), rest in "[a-z]{1,8}") {
        let pattern = compile("<a> to <b>").unwrap();
        let input = format!("\"{words} to {words}\" to {rest}");
        let map = pattern.matches(&input).unwrap();
        let expected = format!("{words} to {words}");
        prop_assert_eq!(map.get("a"), Some(expected.as_str()));
        prop_assert_eq!(map.get("b"), Some(rest.as_str()));
    }
}
