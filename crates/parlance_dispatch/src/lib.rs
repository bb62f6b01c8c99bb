//! Argument binding, access locks, command registries, and dispatch for
//! Parlance.
//!
//! This crate takes a line of player input and finds the one command it
//! means:
//!
//! ```text
//! "take/quiet lamp"
//!        │
//!        ▼
//! ┌──────────────────┐
//! │ PREEMPTION HOOK  │  shorthand such as `"hello` may be claimed here
//! └──────────────────┘
//!        │
//!        ▼
//! ┌──────────────────┐
//! │  NAME + LOCK     │  every reachable provider's registry, by alias
//! └──────────────────┘
//!        │
//!        ▼
//! ┌──────────────────┐
//! │ SWITCHES+SYNTAX  │  `quiet` switch, `<thing>` capture
//! └──────────────────┘
//!        │
//!        ▼
//! ┌──────────────────┐
//! │     BINDING      │  `thing` → EntityRef(#7), errors deferred
//! └──────────────────┘
//!        │
//!        ▼
//!   ResolvedInvocation
//! ```
//!
//! The world is reached only through [`parlance_foundation::Environment`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod binding;
pub mod config;
pub mod context;
pub mod descriptor;
pub mod dispatcher;
pub mod error;
pub mod hooks;
pub mod invocation;
pub mod lock;
pub mod message;
pub mod parsers;
pub mod provider;
pub mod registry;
pub mod switches;

pub use binding::{Arg, BindingTable, BoundArguments, Converter};
pub use config::DispatchConfig;
pub use context::CommandContext;
pub use descriptor::{CommandBody, CommandDescriptor};
pub use dispatcher::{Dispatch, Dispatcher, split_command};
pub use error::{ArgumentError, CommandError, DispatchError, LockError, LockErrorKind, SwitchUsageError};
pub use hooks::{HookContext, PreemptHook, Preemption, UnmatchedHook};
pub use invocation::{Effect, ResolvedInvocation};
pub use lock::{AccessPredicate, Lock, LockFunction, LockFunctions};
pub use message::{english_list, match_failed, plural};
pub use parsers::{
    BoolParser, ContextParser, DhmsParser, FloatParser, IntParser, KeywordParser, MatchParser,
    MatchScope, StaticParser, StringListParser, format_dhms,
};
pub use provider::{Audience, ProviderCatalog, ProviderClass, ProviderLevel, RegistryCache};
pub use registry::CommandRegistry;
pub use switches::{RawSwitch, SwitchTable};
