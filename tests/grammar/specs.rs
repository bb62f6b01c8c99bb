//! Integration tests for matching realistic command syntaxes
//!
//! Each spec here is the argument part of a command: the command word has
//! already been split off.

use parlance_grammar::{CaptureMap, Pattern, compile};

fn pattern(spec: &str) -> Pattern {
    compile(spec).unwrap()
}

fn matched(spec: &str, input: &str) -> CaptureMap {
    pattern(spec)
        .matches(input)
        .unwrap_or_else(|| panic!("`{spec}` should match `{input}`"))
}

// =============================================================================
// Captures
// =============================================================================

#[test]
fn single_capture_takes_everything() {
    let map = matched("<message>", "  Hello there, everyone!  ");
    assert_eq!(map.get("message"), Some("Hello there, everyone!"));
    assert_eq!(map.argstr(), "  Hello there, everyone!  ");
}

#[test]
fn captures_stop_at_the_first_terminator() {
    let map = matched("<a> to <b>", "north to south to east");
    assert_eq!(map.get("a"), Some("north"));
    assert_eq!(map.get("b"), Some("south to east"));
}

#[test]
fn punctuation_literals_need_no_spaces() {
    let map = matched("<what> = <value>", "color=blue");
    assert_eq!(map.get("what"), Some("color"));
    assert_eq!(map.get("value"), Some("blue"));

    let map = matched("<what> = <value>", "color = dark blue");
    assert_eq!(map.get("value"), Some("dark blue"));
}

#[test]
fn quoted_values_are_trimmed() {
    let map = matched("<thing> {in|into} <container>", "\"  coin  \" into jar");
    assert_eq!(map.get("thing"), Some("coin"));
    assert_eq!(map.get("container"), Some("jar"));
}

#[test]
fn empty_quotes_leave_a_required_capture_unfilled() {
    assert!(pattern("<thing>").matches("\"\"").is_none());
}

#[test]
fn sub_patterns_are_caseless_and_anchored() {
    let spec = "<dir:north|south> <rest>";
    let map = matched(spec, "NORTH quickly");
    assert_eq!(map.get("dir"), Some("NORTH"));
    assert_eq!(map.get("rest"), Some("quickly"));
    assert!(pattern(spec).matches("northeast quickly").is_none());
}

// =============================================================================
// Optional segments and choices
// =============================================================================

#[test]
fn put_thing_in_container() {
    let spec = "<thing> {in|into|inside} <container>";
    let map = matched(spec, "the old coin inside the jar");
    assert_eq!(map.get("thing"), Some("the old coin"));
    assert_eq!(map.choice(1), Some("inside"));
    assert_eq!(map.get("container"), Some("the jar"));

    // `in` is not the start of `inside`.
    let map = matched(spec, "pin into box");
    assert_eq!(map.get("thing"), Some("pin"));
    assert_eq!(map.choice(1), Some("into"));
}

#[test]
fn optional_tail_absent_and_present() {
    let spec = "<room> [= <exits> [, <back>]]";
    let map = matched(spec, "Kitchen");
    assert_eq!(map.get("room"), Some("Kitchen"));
    assert!(map.is_absent("exits"));
    assert!(map.is_absent("back"));

    let map = matched(spec, "Kitchen = north,n");
    assert_eq!(map.get("exits"), Some("north"));
    assert_eq!(map.get("back"), Some("n"));
}

#[test]
fn optional_literal_only() {
    let spec = "[to] <exit>";
    assert_eq!(matched(spec, "to north").get("exit"), Some("north"));
    assert_eq!(matched(spec, "north").get("exit"), Some("north"));
    // `tomorrow` does not start with the word `to`.
    assert_eq!(matched(spec, "tomorrow").get("exit"), Some("tomorrow"));
}

#[test]
fn unmatched_choice_groups_leave_no_key() {
    let map = matched("[{gently|roughly}] <thing>", "lamp");
    assert!(!map.contains_key("choice-1"));
    assert_eq!(map.len(), 1);
}

#[test]
fn empty_spec() {
    assert!(matched("", "").is_empty());
    assert!(pattern("").matches("lamp").is_none());
}

// =============================================================================
// Pattern metadata
// =============================================================================

#[test]
fn pattern_keeps_source_and_capture_names() {
    let pattern = pattern("<thing> {in|into} <container>");
    assert_eq!(pattern.source(), "<thing> {in|into} <container>");
    assert_eq!(pattern.capture_names(), ["thing", "container"]);
}

#[test]
fn patterns_are_reusable() {
    let pattern = pattern("<a> to <b>");
    let first = pattern.matches("x to y");
    let second = pattern.matches("x to y");
    assert_eq!(first, second);
    assert!(pattern.matches("x").is_none());
}
