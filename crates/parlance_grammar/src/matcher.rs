//! Runtime matching of compiled patterns.
//!
//! A compiled pattern is a sequence of [`Node`]s. Every node skips leading
//! whitespace before matching, except the whitespace assertion. Captures
//! are lazy: each tries its shortest non-empty value first and only grows
//! when the rest of the pattern fails to match after it. Optional segments
//! are tried before they are skipped.

use regex::Regex;

use crate::capture::CaptureMap;

/// One compiled matcher node.
#[derive(Clone, Debug)]
pub(crate) enum Node {
    /// End of input, after optional trailing whitespace.
    End,
    /// Caseless literal words.
    Literal(Vec<String>),
    /// One or more whitespace characters at the current position.
    Whitespace,
    /// Caseless literal alternatives, longest first.
    Choice(Vec<Alternative>),
    /// A named capture.
    Capture(Capture),
    /// An optional segment.
    Optional(Vec<Node>),
}

/// One alternative of a choice group.
#[derive(Clone, Debug)]
pub(crate) struct Alternative {
    /// The alternative as written in the spec.
    pub text: String,
    /// Lowercased words.
    pub words: Vec<String>,
}

impl Alternative {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            words: text.split_whitespace().map(str::to_lowercase).collect(),
        }
    }
}

/// A compiled capture.
#[derive(Clone, Debug)]
pub(crate) struct Capture {
    pub name: String,
    /// Anchored, case-insensitive sub-pattern.
    pub pattern: Option<Regex>,
    /// Outside any optional segment.
    pub required: bool,
    /// Followed directly by another capture, so an unquoted value must end
    /// at whitespace or end of input.
    pub ends_at_whitespace: bool,
}

impl Capture {
    fn accepts(&self, value: Option<&str>) -> bool {
        match (&self.pattern, value) {
            (None, _) => true,
            (Some(pattern), Some(value)) => pattern.is_match(value),
            (Some(_), None) => false,
        }
    }
}

struct Recorded {
    name: String,
    value: Option<String>,
}

/// Captures and choices recorded so far. Only ever appended to, so a
/// checkpoint is just the two lengths.
#[derive(Default)]
struct MatchState {
    captures: Vec<Recorded>,
    choices: Vec<String>,
}

impl MatchState {
    fn checkpoint(&self) -> (usize, usize) {
        (self.captures.len(), self.choices.len())
    }

    fn rollback(&mut self, (captures, choices): (usize, usize)) {
        self.captures.truncate(captures);
        self.choices.truncate(choices);
    }
}

/// The nodes left to match once the current slice is done: the tail of
/// each enclosing sequence, innermost first.
#[derive(Clone, Copy)]
enum Rest<'a> {
    Done,
    Then(&'a [Node], &'a Rest<'a>),
}

/// Matches `argstr` against a compiled node sequence.
///
/// `names` lists every capture in the spec so absent ones still get a key.
pub(crate) fn run(nodes: &[Node], names: &[String], argstr: &str) -> Option<CaptureMap> {
    let matcher = Matcher { input: argstr };
    let mut state = MatchState::default();
    if !matcher.sequence(nodes, Rest::Done, 0, &mut state) {
        return None;
    }

    let mut map = CaptureMap::new(argstr);
    for name in names {
        map.insert(name.clone(), None);
    }
    for capture in state.captures {
        map.insert(capture.name, capture.value);
    }
    for (index, choice) in state.choices.into_iter().enumerate() {
        map.insert(format!("choice-{}", index + 1), Some(choice));
    }
    Some(map)
}

struct Matcher<'a> {
    input: &'a str,
}

impl Matcher<'_> {
    /// Matches `nodes` and then everything in `rest` from `pos`. On failure
    /// `state` is left as it was.
    fn sequence(
        &self,
        nodes: &[Node],
        rest: Rest<'_>,
        pos: usize,
        state: &mut MatchState,
    ) -> bool {
        let Some((node, tail)) = nodes.split_first() else {
            return match rest {
                Rest::Done => true,
                Rest::Then(nodes, outer) => self.sequence(nodes, *outer, pos, state),
            };
        };

        match node {
            Node::End => {
                let end = self.skip_ws(pos);
                end == self.input.len() && self.sequence(tail, rest, end, state)
            }
            Node::Literal(words) => self
                .words(words, pos)
                .is_some_and(|end| self.sequence(tail, rest, end, state)),
            Node::Whitespace => {
                let end = self.skip_ws(pos);
                end > pos && self.sequence(tail, rest, end, state)
            }
            Node::Choice(alternatives) => alternatives.iter().any(|alternative| {
                let Some(end) = self.words(&alternative.words, pos) else {
                    return false;
                };
                state.choices.push(alternative.text.clone());
                if self.sequence(tail, rest, end, state) {
                    return true;
                }
                state.choices.pop();
                false
            }),
            Node::Capture(capture) => self.capture(capture, tail, rest, pos, state),
            Node::Optional(inner) => {
                let checkpoint = state.checkpoint();
                if self.sequence(inner, Rest::Then(tail, &rest), pos, state) {
                    return true;
                }
                state.rollback(checkpoint);
                self.sequence(tail, rest, pos, state)
            }
        }
    }

    fn capture(
        &self,
        capture: &Capture,
        tail: &[Node],
        rest: Rest<'_>,
        pos: usize,
        state: &mut MatchState,
    ) -> bool {
        let start = self.skip_ws(pos);

        // A quoted value is committed: the capture never falls back to
        // scanning through the quotes.
        if let Some((text, end)) = self.quoted(start) {
            let value = normalize(text);
            if (value.is_none() && capture.required) || !capture.accepts(value.as_deref()) {
                return false;
            }
            return self.record(capture, value, tail, rest, end, state);
        }

        let ends = self.input[start..]
            .char_indices()
            .skip(1)
            .map(|(offset, _)| start + offset)
            .chain((start < self.input.len()).then_some(self.input.len()));

        for end in ends {
            if capture.ends_at_whitespace && !self.at_whitespace(end) {
                continue;
            }
            let Some(value) = normalize(&self.input[start..end]) else {
                continue;
            };
            if !capture.accepts(Some(&value)) {
                continue;
            }
            if self.record(capture, Some(value), tail, rest, end, state) {
                return true;
            }
        }
        false
    }

    /// Records a capture value and matches the rest after it, undoing the
    /// record if the rest fails.
    fn record(
        &self,
        capture: &Capture,
        value: Option<String>,
        tail: &[Node],
        rest: Rest<'_>,
        end: usize,
        state: &mut MatchState,
    ) -> bool {
        state.captures.push(Recorded {
            name: capture.name.clone(),
            value,
        });
        if self.sequence(tail, rest, end, state) {
            return true;
        }
        state.captures.pop();
        false
    }

    /// A double-quoted value starting at `start`, and the offset past its
    /// closing quote.
    fn quoted(&self, start: usize) -> Option<(&str, usize)> {
        let rest = self.input[start..].strip_prefix('"')?;
        let close = rest.find('"')?;
        Some((&rest[..close], start + close + 2))
    }

    /// Matches lowercased words in order, with whitespace between them.
    fn words(&self, words: &[String], pos: usize) -> Option<usize> {
        let mut pos = pos;
        for (index, word) in words.iter().enumerate() {
            let start = self.skip_ws(pos);
            if index > 0 && start == pos {
                return None;
            }
            pos = self.word(word, start)?;
        }
        Some(pos)
    }

    /// Matches one caseless word at `start`. Words that begin or end with an
    /// identifier character must not run into neighbouring identifier
    /// characters, so `for` does not match the start of `forever`.
    fn word(&self, word: &str, start: usize) -> Option<usize> {
        let mut end = start;
        let mut actual = self.input[start..].chars();
        for expected in word.chars() {
            let c = actual.next()?;
            if !c.to_lowercase().eq(expected.to_lowercase()) {
                return None;
            }
            end += c.len_utf8();
        }

        let starts_ident = word.chars().next().is_some_and(is_ident);
        let ends_ident = word.chars().next_back().is_some_and(is_ident);
        if starts_ident && self.input[..start].chars().next_back().is_some_and(is_ident) {
            return None;
        }
        if ends_ident && self.input[end..].chars().next().is_some_and(is_ident) {
            return None;
        }
        Some(end)
    }

    fn skip_ws(&self, pos: usize) -> usize {
        self.input[pos..]
            .char_indices()
            .find(|(_, c)| !c.is_whitespace())
            .map_or(self.input.len(), |(offset, _)| pos + offset)
    }

    fn at_whitespace(&self, pos: usize) -> bool {
        self.input[pos..].chars().next().is_none_or(char::is_whitespace)
    }
}

fn is_ident(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Trims captured text; empty text is no value at all.
fn normalize(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
