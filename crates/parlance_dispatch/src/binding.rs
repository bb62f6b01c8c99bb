//! Turning captured text into typed arguments.
//!
//! Each capture name may be bound to a [`Converter`]. Binding never fails
//! as a whole: a capture that cannot be converted becomes
//! [`Arg::Error`] and the command body decides whether that matters.
//!
//! Self-reference is not a conversion. A capture marked with
//! [`BindingTable::with_self_reference`] is checked while matching, and a
//! line naming any other object simply does not match that command.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use parlance_foundation::{Category, EntityId, Value};
use parlance_grammar::CaptureMap;

use crate::context::CommandContext;
use crate::error::{ArgumentError, CommandError};
use crate::parsers::{ContextParser, StaticParser, single_match};

/// Signature of a free conversion function.
pub type ConvertFn = dyn Fn(&str, &[Value]) -> Result<Value, String> + Send + Sync;

/// How to convert one capture.
#[derive(Clone)]
pub enum Converter {
    /// A parser that needs only the text.
    Static(Arc<dyn StaticParser>),
    /// A parser that needs to know who is asking.
    Contextual(Arc<dyn ContextParser>),
    /// An object near the requester, restricted to a category.
    Entity(Category),
    /// Any function, with fixed extra arguments.
    Free {
        /// The function.
        func: Arc<ConvertFn>,
        /// Arguments passed after the text.
        extra: Vec<Value>,
    },
}

impl Converter {
    /// Wraps a static parser.
    #[must_use]
    pub fn parser(parser: impl StaticParser + 'static) -> Self {
        Self::Static(Arc::new(parser))
    }

    /// Wraps a context parser.
    #[must_use]
    pub fn contextual(parser: impl ContextParser + 'static) -> Self {
        Self::Contextual(Arc::new(parser))
    }

    /// Matches an object in `category`.
    #[must_use]
    pub fn entity(category: impl Into<Category>) -> Self {
        Self::Entity(category.into())
    }

    /// Wraps a free function.
    #[must_use]
    pub fn free<F>(func: F) -> Self
    where
        F: Fn(&str, &[Value]) -> Result<Value, String> + Send + Sync + 'static,
    {
        Self::free_with(func, Vec::new())
    }

    /// Wraps a free function that also receives `extra`.
    #[must_use]
    pub fn free_with<F>(func: F, extra: Vec<Value>) -> Self
    where
        F: Fn(&str, &[Value]) -> Result<Value, String> + Send + Sync + 'static,
    {
        Self::Free {
            func: Arc::new(func),
            extra,
        }
    }

    /// Converts `text` for the given context.
    ///
    /// # Errors
    ///
    /// Returns whatever the strategy reports; free-function failures
    /// become [`ArgumentError::Conversion`], and so does a free function
    /// that panics.
    pub fn convert(&self, text: &str, ctx: &CommandContext<'_>) -> Result<Value, ArgumentError> {
        match self {
            Self::Static(parser) => parser.parse(text),
            Self::Contextual(parser) => parser.parse(text, ctx),
            Self::Entity(category) => convert_entity(text, category, ctx),
            Self::Free { func, extra } => {
                match panic::catch_unwind(AssertUnwindSafe(|| func(text, extra))) {
                    Ok(result) => result.map_err(ArgumentError::Conversion),
                    Err(payload) => {
                        let reason = payload
                            .downcast_ref::<&str>()
                            .map(|s| (*s).to_string())
                            .or_else(|| payload.downcast_ref::<String>().cloned())
                            .unwrap_or_default();
                        tracing::error!(input = text, reason = %reason, "free converter panicked");
                        Err(ArgumentError::Conversion(format!(
                            "Could not understand '{text}'."
                        )))
                    }
                }
            }
        }
    }
}

fn convert_entity(
    text: &str,
    category: &Category,
    ctx: &CommandContext<'_>,
) -> Result<Value, ArgumentError> {
    let found = ctx.env.match_object(ctx.requester, text, Some(category));
    if found.is_empty() {
        // Something by that name may exist but be the wrong kind of thing.
        if let [other] = ctx.env.match_object(ctx.requester, text, None).as_slice() {
            return Err(ArgumentError::WrongCategory(format!(
                "{} is not a {category}.",
                ctx.env.display_name(*other)
            )));
        }
    }
    single_match(&found, text, Some(category.name()), false, ctx)
}

impl fmt::Debug for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(parser) => f.debug_tuple("Static").field(parser).finish(),
            Self::Contextual(parser) => f.debug_tuple("Contextual").field(parser).finish(),
            Self::Entity(category) => f.debug_tuple("Entity").field(category).finish(),
            Self::Free { extra, .. } => f.debug_struct("Free").field("extra", extra).finish(),
        }
    }
}

/// Capture names mapped to conversion strategies.
#[derive(Clone, Debug, Default)]
pub struct BindingTable {
    converters: BTreeMap<String, Converter>,
    self_refs: BTreeSet<String>,
}

impl BindingTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name` to `converter`.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, converter: Converter) -> Self {
        self.insert(name, converter);
        self
    }

    /// Marks `name` as having to name the command's own provider.
    #[must_use]
    pub fn with_self_reference(mut self, name: impl Into<String>) -> Self {
        self.self_refs.insert(name.into());
        self
    }

    /// Binds `name` to `converter` in place.
    pub fn insert(&mut self, name: impl Into<String>, converter: Converter) {
        self.converters.insert(name.into(), converter);
    }

    /// Returns the converter bound to `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Converter> {
        self.converters.get(name)
    }

    /// Returns true if `name` must refer to the provider.
    #[must_use]
    pub fn is_self_reference(&self, name: &str) -> bool {
        self.self_refs.contains(name)
    }

    /// Returns true if every present self-reference names the provider.
    ///
    /// A self-reference passes only when the requester's lookup yields
    /// exactly the provider and nothing else.
    #[must_use]
    pub fn self_references_hold(&self, captures: &CaptureMap, ctx: &CommandContext<'_>) -> bool {
        self.self_refs.iter().all(|name| match captures.get(name) {
            Some(text) => ctx.env.match_object(ctx.requester, text, None) == [ctx.provider],
            None => true,
        })
    }

    /// Converts every present capture.
    ///
    /// Absent captures become [`Arg::Absent`]; unbound captures pass their
    /// text through; self-references become the provider.
    #[must_use]
    pub fn bind(&self, captures: &CaptureMap, ctx: &CommandContext<'_>) -> BoundArguments {
        let mut args = BoundArguments::new();
        for (name, text) in captures.iter() {
            let arg = match text {
                None => Arg::Absent,
                Some(_) if self.is_self_reference(name) => Arg::Value(Value::EntityRef(ctx.provider)),
                Some(text) => match self.converters.get(name) {
                    Some(converter) => match converter.convert(text, ctx) {
                        Ok(value) => Arg::Value(value),
                        Err(err) => {
                            tracing::trace!(capture = name, error = %err, "deferred argument error");
                            Arg::Error(err)
                        }
                    },
                    None => Arg::Value(Value::string(text)),
                },
            };
            args.insert(name, arg);
        }
        args
    }
}

/// The outcome of binding one capture or switch.
#[derive(Clone, Debug, PartialEq)]
pub enum Arg {
    /// A converted value.
    Value(Value),
    /// The capture was optional and not supplied.
    Absent,
    /// Conversion failed; the error is reported when the value is used.
    Error(ArgumentError),
}

impl Arg {
    /// Returns the value, if conversion succeeded.
    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the deferred error, if any.
    #[must_use]
    pub fn error(&self) -> Option<&ArgumentError> {
        match self {
            Self::Error(err) => Some(err),
            _ => None,
        }
    }

    /// Returns true if the capture was not supplied.
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

/// Bound arguments by name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BoundArguments {
    args: BTreeMap<String, Arg>,
}

impl BoundArguments {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets one argument.
    pub fn insert(&mut self, name: impl Into<String>, arg: Arg) {
        self.args.insert(name.into(), arg);
    }

    /// Returns the raw binding for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arg> {
        self.args.get(name)
    }

    /// Returns the converted value for `name`, ignoring errors.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.get(name).and_then(Arg::value)
    }

    /// Returns the converted text for `name`.
    #[must_use]
    pub fn str(&self, name: &str) -> Option<&str> {
        self.value(name).and_then(Value::as_str)
    }

    /// Returns the entity bound to `name`.
    #[must_use]
    pub fn entity(&self, name: &str) -> Option<EntityId> {
        self.value(name).and_then(Value::as_entity)
    }

    /// Returns true if `name` is bound to a truthy value.
    #[must_use]
    pub fn flag(&self, name: &str) -> bool {
        self.value(name).is_some_and(Value::is_truthy)
    }

    /// Returns the value for `name`, surfacing any deferred error.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::Argument`] for a failed conversion and
    /// [`CommandError::Missing`] for an absent or unknown argument.
    pub fn require(&self, name: &str) -> Result<&Value, CommandError> {
        match self.get(name) {
            Some(Arg::Value(value)) => Ok(value),
            Some(Arg::Error(err)) => Err(CommandError::Argument {
                name: name.to_string(),
                source: err.clone(),
            }),
            Some(Arg::Absent) | None => Err(CommandError::Missing(name.to_string())),
        }
    }

    /// Like [`require`](Self::require), but absent arguments are `None`.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::Argument`] for a failed conversion.
    pub fn optional(&self, name: &str) -> Result<Option<&Value>, CommandError> {
        match self.get(name) {
            Some(Arg::Value(value)) => Ok(Some(value)),
            Some(Arg::Error(err)) => Err(CommandError::Argument {
                name: name.to_string(),
                source: err.clone(),
            }),
            Some(Arg::Absent) | None => Ok(None),
        }
    }

    /// Names and errors of every failed conversion.
    pub fn errors(&self) -> impl Iterator<Item = (&str, &ArgumentError)> {
        self.args
            .iter()
            .filter_map(|(name, arg)| arg.error().map(|err| (name.as_str(), err)))
    }

    /// Iterates over all bindings in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arg)> {
        self.args.iter().map(|(name, arg)| (name.as_str(), arg))
    }

    /// Number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.args.len()
    }

    /// Returns true if nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }
}
