//! Integration tests for name matching

use parlance_storage::matching::{match_names, parse_ordinal};

fn swords() -> Vec<(char, Vec<&'static str>)> {
    vec![
        ('a', vec!["long sword", "sword"]),
        ('b', vec!["short sword", "sword"]),
        ('c', vec!["sword of ages"]),
    ]
}

#[test]
fn exact_names_win() {
    assert_eq!(match_names("sword", &swords()), vec!['a', 'b']);
    assert_eq!(match_names("Long Sword", &swords()), vec!['a']);
}

#[test]
fn prefixes_when_nothing_is_exact() {
    assert_eq!(match_names("s", &swords()), vec!['a', 'b', 'c']);
    assert_eq!(match_names("sword of", &swords()), vec!['c']);
}

#[test]
fn ordinals_pick_one() {
    assert_eq!(match_names("second sword", &swords()), vec!['b']);
    assert_eq!(match_names("1st sword", &swords()), vec!['a']);
    // Out of range falls back to the plain text, which matches nothing.
    assert!(match_names("fifth sword", &swords()).is_empty());
}

#[test]
fn ordinal_parsing() {
    assert_eq!(parse_ordinal("third lamp"), (Some(3), "lamp"));
    assert_eq!(parse_ordinal("22nd lamp"), (Some(22), "lamp"));
    assert_eq!(parse_ordinal("lamp"), (None, "lamp"));
    assert_eq!(parse_ordinal("0th lamp"), (None, "0th lamp"));
    assert_eq!(parse_ordinal("second"), (None, "second"));
}
