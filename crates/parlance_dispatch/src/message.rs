//! Player-facing phrasing shared by binding and dispatch diagnostics.

/// Describes a failed or ambiguous match, or returns `None` for exactly one.
///
/// `matches` holds the display names of what matched. `search` is the text
/// the player typed; `search_for` names the kind of thing being looked for
/// (`"exit"`, `"command"`). When `show` is set, ambiguous results list the
/// candidates.
///
/// ```
/// use parlance_dispatch::match_failed;
///
/// let msg = match_failed::<&str>(&[], Some("lamp"), Some("thing"), false);
/// assert_eq!(msg.as_deref(), Some("No thing called 'lamp' was found."));
/// ```
#[must_use]
pub fn match_failed<S: AsRef<str>>(
    matches: &[S],
    search: Option<&str>,
    search_for: Option<&str>,
    show: bool,
) -> Option<String> {
    match matches.len() {
        1 => None,
        0 => Some(match (search, search_for) {
            (Some(search), Some(kind)) => format!("No {kind} called '{search}' was found."),
            (Some(search), None) => format!("No '{search}' was found."),
            (None, Some(kind)) => format!("No matching {} found.", plural(kind)),
            (None, None) => "No match found.".to_string(),
        }),
        _ => {
            let mut msg = match (search, search_for) {
                (Some(search), Some(kind)) => format!("Multiple {} match '{search}'", plural(kind)),
                (Some(search), None) => format!("Multiple matches for '{search}'"),
                (None, Some(kind)) => format!("Multiple {} found", plural(kind)),
                (None, None) => "Multiple matches".to_string(),
            };
            if show {
                msg.push_str(": ");
                msg.push_str(&english_list(matches, "and"));
            } else {
                msg.push('.');
            }
            Some(msg)
        }
    }
}

/// A naive English plural.
#[must_use]
pub fn plural(noun: &str) -> String {
    let lower = noun.to_lowercase();
    if ["s", "x", "z", "ch", "sh"].iter().any(|end| lower.ends_with(end)) {
        format!("{noun}es")
    } else if lower.ends_with('y')
        && !lower
            .chars()
            .rev()
            .nth(1)
            .is_some_and(|c| "aeiou".contains(c))
    {
        format!("{}ies", &noun[..noun.len() - 1])
    } else {
        format!("{noun}s")
    }
}

/// Joins items the way a sentence would: `a, b, and c`.
#[must_use]
pub fn english_list<S: AsRef<str>>(items: &[S], conjunction: &str) -> String {
    match items {
        [] => "nothing".to_string(),
        [one] => one.as_ref().to_string(),
        [a, b] => format!("{} {conjunction} {}", a.as_ref(), b.as_ref()),
        [init @ .., last] => {
            let head: Vec<&str> = init.iter().map(AsRef::as_ref).collect();
            format!("{}, {conjunction} {}", head.join(", "), last.as_ref())
        }
    }
}
