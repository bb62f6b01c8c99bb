//! Conversion strategies for argument and switch text.
//!
//! A [`StaticParser`] turns text into a [`Value`] with no outside
//! knowledge. A [`ContextParser`] also sees who is asking, which lets it
//! resolve object names against the world.

use std::fmt;

use parlance_foundation::{Category, EntityId, Value};

use crate::context::CommandContext;
use crate::error::ArgumentError;
use crate::message::{english_list, match_failed};

/// Converts argument text without consulting the world.
pub trait StaticParser: Send + Sync + fmt::Debug {
    /// Converts `input` into a value.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::Conversion`] when the text is malformed.
    fn parse(&self, input: &str) -> Result<Value, ArgumentError>;

    /// Renders a value the way a player would type it.
    fn unparse(&self, value: &Value) -> String {
        value.to_string()
    }

    /// The token a bare switch stands for, if this parser is boolean.
    fn canonical_true(&self) -> Option<&str> {
        None
    }
}

/// Whole numbers.
#[derive(Clone, Copy, Debug, Default)]
pub struct IntParser;

impl StaticParser for IntParser {
    fn parse(&self, input: &str) -> Result<Value, ArgumentError> {
        input
            .trim()
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| ArgumentError::Conversion(format!("'{input}' is not a whole number.")))
    }
}

/// Decimal numbers.
#[derive(Clone, Copy, Debug, Default)]
pub struct FloatParser;

impl StaticParser for FloatParser {
    fn parse(&self, input: &str) -> Result<Value, ArgumentError> {
        input
            .trim()
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| ArgumentError::Conversion(format!("'{input}' is not a number.")))
    }
}

/// Booleans spelled with a configurable vocabulary.
///
/// The first word of each list is the canonical spelling used by
/// [`StaticParser::unparse`] and for bare switches.
#[derive(Clone, Copy, Debug)]
pub struct BoolParser {
    true_words: &'static [&'static str],
    false_words: &'static [&'static str],
    noun: &'static str,
}

impl BoolParser {
    /// Accepts `yes`/`true`/`1`/`on` and their opposites.
    pub const ANY: Self = Self {
        true_words: &["yes", "true", "1", "on"],
        false_words: &["no", "false", "0", "off"],
        noun: "true/false",
    };

    /// Accepts only `yes` or `no`.
    pub const YES_NO: Self = Self {
        true_words: &["yes"],
        false_words: &["no"],
        noun: "yes/no",
    };

    /// Accepts only `true` or `false`.
    pub const TRUE_FALSE: Self = Self {
        true_words: &["true"],
        false_words: &["false"],
        noun: "true/false",
    };

    /// Accepts only `on` or `off`.
    pub const ON_OFF: Self = Self {
        true_words: &["on"],
        false_words: &["off"],
        noun: "on/off",
    };
}

impl Default for BoolParser {
    fn default() -> Self {
        Self::ANY
    }
}

impl StaticParser for BoolParser {
    fn parse(&self, input: &str) -> Result<Value, ArgumentError> {
        let word = input.trim().to_lowercase();
        if self.true_words.contains(&word.as_str()) {
            Ok(Value::Bool(true))
        } else if self.false_words.contains(&word.as_str()) {
            Ok(Value::Bool(false))
        } else {
            Err(ArgumentError::Conversion(format!(
                "Invalid {} value: '{input}'",
                self.noun
            )))
        }
    }

    fn unparse(&self, value: &Value) -> String {
        let words = if value.is_truthy() {
            self.true_words
        } else {
            self.false_words
        };
        words.first().copied().unwrap_or_default().to_string()
    }

    fn canonical_true(&self) -> Option<&str> {
        self.true_words.first().copied()
    }
}

/// Delimited lists of words.
#[derive(Clone, Copy, Debug)]
pub struct StringListParser {
    delimiter: char,
}

impl StringListParser {
    /// Creates a parser splitting on `delimiter`.
    #[must_use]
    pub const fn new(delimiter: char) -> Self {
        Self { delimiter }
    }
}

impl Default for StringListParser {
    fn default() -> Self {
        Self::new(',')
    }
}

impl StaticParser for StringListParser {
    fn parse(&self, input: &str) -> Result<Value, ArgumentError> {
        Ok(Value::List(
            input
                .split(self.delimiter)
                .map(|item| Value::string(item.trim()))
                .collect(),
        ))
    }

    fn unparse(&self, value: &Value) -> String {
        match value.as_list() {
            Some(items) => items
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(&self.delimiter.to_string()),
            None => value.to_string(),
        }
    }
}

/// Durations written as days, hours, minutes, and seconds: `1d5h30m`.
#[derive(Clone, Copy, Debug, Default)]
pub struct DhmsParser;

const DHMS_UNITS: [(char, u64); 4] = [('d', 86_400), ('h', 3_600), ('m', 60), ('s', 1)];

impl StaticParser for DhmsParser {
    fn parse(&self, input: &str) -> Result<Value, ArgumentError> {
        parse_dhms(input.trim())
            .map(Value::Duration)
            .ok_or_else(|| {
                ArgumentError::Conversion("Invalid DHMS value. Example: 1d5h30m".to_string())
            })
    }

    fn unparse(&self, value: &Value) -> String {
        match value {
            Value::Duration(secs) => format_dhms(*secs),
            Value::Int(n) => format_dhms(n.unsigned_abs()),
            other => other.to_string(),
        }
    }
}

/// Parses `[Nd][Nh][Nm][Ns]`, units in that order, each at most once.
fn parse_dhms(text: &str) -> Option<u64> {
    let mut total: u64 = 0;
    let mut digits = String::new();
    let mut next_unit = 0;
    for c in text.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }
        if digits.is_empty() {
            return None;
        }
        let offset = DHMS_UNITS[next_unit..].iter().position(|(unit, _)| *unit == c)?;
        let (_, scale) = DHMS_UNITS[next_unit + offset];
        let amount: u64 = digits.parse().ok()?;
        total = total.checked_add(amount.checked_mul(scale)?)?;
        next_unit += offset + 1;
        digits.clear();
    }
    digits.is_empty().then_some(total)
}

/// Formats seconds as `1d2h3m4s`, omitting zero units; zero is `0s`.
#[must_use]
pub fn format_dhms(seconds: u64) -> String {
    if seconds == 0 {
        return "0s".to_string();
    }
    let mut out = String::new();
    let mut rest = seconds;
    for (unit, scale) in DHMS_UNITS {
        let amount = rest / scale;
        rest %= scale;
        if amount > 0 {
            out.push_str(&amount.to_string());
            out.push(unit);
        }
    }
    out
}

/// One word from a fixed vocabulary, matched case-insensitively.
#[derive(Clone, Debug)]
pub struct KeywordParser {
    choices: Vec<String>,
}

impl KeywordParser {
    /// Creates a parser accepting any of `choices`.
    #[must_use]
    pub fn new<I, S>(choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            choices: choices.into_iter().map(Into::into).collect(),
        }
    }
}

impl StaticParser for KeywordParser {
    fn parse(&self, input: &str) -> Result<Value, ArgumentError> {
        let word = input.trim();
        self.choices
            .iter()
            .find(|choice| choice.eq_ignore_ascii_case(word))
            .map(|choice| Value::keyword(choice))
            .ok_or_else(|| {
                ArgumentError::Conversion(format!(
                    "'{word}' is not one of {}.",
                    english_list(&self.choices, "or")
                ))
            })
    }
}

/// Converts argument text with the requester's view of the world.
pub trait ContextParser: Send + Sync + fmt::Debug {
    /// Converts `input` on behalf of `ctx.requester`.
    ///
    /// # Errors
    ///
    /// Returns a match or conversion error describing what went wrong.
    fn parse(&self, input: &str, ctx: &CommandContext<'_>) -> Result<Value, ArgumentError>;
}

/// Where a [`MatchParser`] looks for objects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchScope {
    /// Everything the requester can see.
    Near,
    /// Only what the requester carries.
    OwnContents,
    /// Only what a particular container holds.
    ContentsOf(EntityId),
}

/// Resolves object names to a single entity.
#[derive(Clone, Debug)]
pub struct MatchParser {
    scope: MatchScope,
    category: Option<Category>,
    search_for: Option<String>,
    show: bool,
}

impl MatchParser {
    /// Matches against everything near the requester.
    #[must_use]
    pub fn near() -> Self {
        Self::in_scope(MatchScope::Near)
    }

    /// Matches against the requester's own contents.
    #[must_use]
    pub fn own_contents() -> Self {
        Self::in_scope(MatchScope::OwnContents)
    }

    /// Matches against the contents of `container`.
    #[must_use]
    pub fn contents_of(container: EntityId) -> Self {
        Self::in_scope(MatchScope::ContentsOf(container))
    }

    fn in_scope(scope: MatchScope) -> Self {
        Self {
            scope,
            category: None,
            search_for: None,
            show: false,
        }
    }

    /// Restricts matches to `category`.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<Category>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Names the kind of thing sought, for messages.
    #[must_use]
    pub fn with_search_for(mut self, noun: impl Into<String>) -> Self {
        self.search_for = Some(noun.into());
        self
    }

    /// Lists the candidates when the match is ambiguous.
    #[must_use]
    pub fn with_show(mut self, show: bool) -> Self {
        self.show = show;
        self
    }

    /// The scope searched.
    #[must_use]
    pub fn scope(&self) -> MatchScope {
        self.scope
    }
}

impl ContextParser for MatchParser {
    fn parse(&self, input: &str, ctx: &CommandContext<'_>) -> Result<Value, ArgumentError> {
        let category = self.category.as_ref();
        let found = match self.scope {
            MatchScope::Near => ctx.env.match_object(ctx.requester, input, category),
            MatchScope::OwnContents => {
                ctx.env
                    .match_among(input, &ctx.env.contents(ctx.requester), category)
            }
            MatchScope::ContentsOf(container) => {
                ctx.env
                    .match_among(input, &ctx.env.contents(container), category)
            }
        };
        single_match(&found, input, self.search_for.as_deref(), self.show, ctx)
    }
}

/// Reduces a match result to one entity, or the matching error.
pub(crate) fn single_match(
    found: &[EntityId],
    search: &str,
    search_for: Option<&str>,
    show: bool,
    ctx: &CommandContext<'_>,
) -> Result<Value, ArgumentError> {
    let names: Vec<String> = found.iter().map(|id| ctx.env.display_name(*id)).collect();
    match (found, match_failed(&names, Some(search), search_for, show)) {
        ([one], _) => Ok(Value::EntityRef(*one)),
        ([], message) => Err(ArgumentError::FailedMatch(message.unwrap_or_default())),
        (_, message) => Err(ArgumentError::AmbiguousMatch {
            message: message.unwrap_or_default(),
            candidates: names,
        }),
    }
}
