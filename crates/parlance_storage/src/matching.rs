//! Object name matching.
//!
//! A search matches an object when it equals one of the object's names or
//! is a prefix of one, ignoring case. Exact matches always beat prefix
//! matches: if anything matches exactly, prefix matches are discarded.
//! A leading ordinal (`second sword`, `2nd sword`) picks one match out of
//! several, in candidate order.

const ORDINAL_WORDS: [&str; 10] = [
    "first", "second", "third", "fourth", "fifth", "sixth", "seventh", "eighth", "ninth", "tenth",
];

/// Splits a leading ordinal off a search string.
///
/// Returns the 1-based ordinal and the rest of the search, or `None` and
/// the whole search when there is no ordinal.
#[must_use]
pub fn parse_ordinal(text: &str) -> (Option<usize>, &str) {
    let Some((first, rest)) = text.trim().split_once(char::is_whitespace) else {
        return (None, text);
    };
    let subject = rest.trim_start();
    if subject.is_empty() {
        return (None, text);
    }

    let first = first.to_lowercase();
    if let Some(position) = ORDINAL_WORDS.iter().position(|word| *word == first) {
        return (Some(position + 1), subject);
    }

    let digits = first.trim_end_matches(|c: char| c.is_ascii_alphabetic());
    let suffix = &first[digits.len()..];
    if matches!(suffix, "st" | "nd" | "rd" | "th") {
        if let Ok(n) = digits.parse::<usize>() {
            if n > 0 {
                return (Some(n), subject);
            }
        }
    }
    (None, text)
}

/// Matches `search` against candidates' name lists, returning the keys of
/// the matching candidates in candidate order.
///
/// An ordinal that selects nothing falls back to matching the whole search
/// text, so an object really called "second wind" can still be found.
pub fn match_names<K, S>(search: &str, candidates: &[(K, Vec<S>)]) -> Vec<K>
where
    K: Copy,
    S: AsRef<str>,
{
    let search = search.trim().to_lowercase();
    if search.is_empty() {
        return Vec::new();
    }

    if let (Some(ordinal), subject) = parse_ordinal(&search) {
        if let Some(&hit) = rank(subject, candidates).get(ordinal - 1) {
            return vec![hit];
        }
    }
    rank(&search, candidates)
}

fn rank<K, S>(search: &str, candidates: &[(K, Vec<S>)]) -> Vec<K>
where
    K: Copy,
    S: AsRef<str>,
{
    let mut exact = Vec::new();
    let mut partial = Vec::new();

    for (key, names) in candidates {
        let lowered: Vec<String> = names.iter().map(|name| name.as_ref().to_lowercase()).collect();
        if lowered.iter().any(|name| *name == search) {
            exact.push(*key);
        } else if exact.is_empty() && lowered.iter().any(|name| name.starts_with(search)) {
            partial.push(*key);
        }
    }

    if exact.is_empty() { partial } else { exact }
}
