//! Access locks guarding who may use a command.
//!
//! A lock is either a constant, an arbitrary predicate, or an expression
//! in a small boolean language over named functions:
//!
//! ```text
//! self() or has()
//! not is(guest) and (here() | id(#1))
//! ```
//!
//! `not`/`!` binds tightest, then `or`/`|`, then `and`/`&`. Function
//! arguments are comma-separated words. Function names are resolved when
//! the lock is parsed, against a [`LockFunctions`] table.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parlance_foundation::Category;

use crate::context::CommandContext;
use crate::error::{LockError, LockErrorKind};

/// A named function usable in lock expressions.
pub trait LockFunction: Send + Sync {
    /// Evaluates the function for `ctx` with the given arguments.
    fn call(&self, ctx: &CommandContext<'_>, args: &[String]) -> bool;
}

impl<F> LockFunction for F
where
    F: Fn(&CommandContext<'_>, &[String]) -> bool + Send + Sync,
{
    fn call(&self, ctx: &CommandContext<'_>, args: &[String]) -> bool {
        self(ctx, args)
    }
}

/// An arbitrary access check.
pub trait AccessPredicate: Send + Sync {
    /// Returns true if `ctx.requester` may use `ctx.provider`'s command.
    fn allows(&self, ctx: &CommandContext<'_>) -> bool;
}

impl<F> AccessPredicate for F
where
    F: Fn(&CommandContext<'_>) -> bool + Send + Sync,
{
    fn allows(&self, ctx: &CommandContext<'_>) -> bool {
        self(ctx)
    }
}

/// The functions a lock expression may call.
#[derive(Clone)]
pub struct LockFunctions {
    functions: HashMap<String, Arc<dyn LockFunction>>,
}

impl LockFunctions {
    /// An empty table.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            functions: HashMap::new(),
        }
    }

    /// The built-in functions.
    ///
    /// | Name                  | True when                                  |
    /// |-----------------------|--------------------------------------------|
    /// | `true`, `all`         | always                                     |
    /// | `false`, `none`       | never                                      |
    /// | `id(#N)`, `dbref(#N)` | the requester is entity `N`                |
    /// | `self()`              | the requester is the provider              |
    /// | `here()`              | the requester is inside the provider       |
    /// | `has()`               | the requester holds the provider           |
    /// | `is(cat, ...)`        | the requester is in any listed category    |
    #[must_use]
    pub fn builtin() -> Self {
        let mut table = Self::empty();
        for name in ["true", "all"] {
            table.insert(name, always);
        }
        for name in ["false", "none"] {
            table.insert(name, never);
        }
        for name in ["id", "dbref"] {
            table.insert(name, is_entity);
        }
        table.insert("self", is_self);
        table.insert("here", is_inside);
        table.insert("has", is_holding);
        for name in ["is", "isa", "class"] {
            table.insert(name, in_category);
        }
        table
    }

    /// Adds or replaces a function.
    #[must_use]
    pub fn with<F>(mut self, name: &str, function: F) -> Self
    where
        F: Fn(&CommandContext<'_>, &[String]) -> bool + Send + Sync + 'static,
    {
        self.insert(name, function);
        self
    }

    /// Adds or replaces a function in place.
    pub fn insert<F>(&mut self, name: &str, function: F)
    where
        F: Fn(&CommandContext<'_>, &[String]) -> bool + Send + Sync + 'static,
    {
        self.register(name, Arc::new(function));
    }

    /// Adds or replaces a function implemented as a trait object.
    pub fn register(&mut self, name: &str, function: Arc<dyn LockFunction>) {
        self.functions.insert(name.to_lowercase(), function);
    }

    /// Looks up a function by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn LockFunction>> {
        self.functions.get(&name.to_lowercase()).cloned()
    }
}

impl Default for LockFunctions {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Debug for LockFunctions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.functions.keys().collect();
        names.sort();
        f.debug_struct("LockFunctions")
            .field("functions", &names)
            .finish()
    }
}

fn always(_: &CommandContext<'_>, _: &[String]) -> bool {
    true
}

fn never(_: &CommandContext<'_>, _: &[String]) -> bool {
    false
}

fn is_entity(ctx: &CommandContext<'_>, args: &[String]) -> bool {
    args.iter().any(|arg| {
        arg.trim_start_matches('#')
            .parse::<u64>()
            .is_ok_and(|index| ctx.requester.index == index)
    })
}

fn is_self(ctx: &CommandContext<'_>, _: &[String]) -> bool {
    ctx.is_self()
}

fn is_inside(ctx: &CommandContext<'_>, _: &[String]) -> bool {
    ctx.env.location(ctx.requester) == Some(ctx.provider)
}

fn is_holding(ctx: &CommandContext<'_>, _: &[String]) -> bool {
    ctx.env.location(ctx.provider) == Some(ctx.requester)
}

fn in_category(ctx: &CommandContext<'_>, args: &[String]) -> bool {
    args.iter()
        .any(|arg| ctx.env.is_valid(ctx.requester, Some(&Category::new(arg))))
}

/// Who may use a command.
#[derive(Clone, Default)]
pub enum Lock {
    /// Anyone.
    AllPass,
    /// No one.
    #[default]
    NonePass,
    /// A parsed lock expression.
    Expr(LockExpr),
    /// An arbitrary predicate.
    Custom(Arc<dyn AccessPredicate>),
}

impl Lock {
    /// Parses a lock using the built-in functions.
    ///
    /// # Errors
    ///
    /// Returns a [`LockError`] describing the first problem found.
    pub fn parse(text: &str) -> Result<Self, LockError> {
        Self::parse_with(text, &LockFunctions::builtin())
    }

    /// Parses a lock using `functions`.
    ///
    /// The bare words `true` and `false` produce the constant locks.
    ///
    /// # Errors
    ///
    /// Returns a [`LockError`] describing the first problem found.
    pub fn parse_with(text: &str, functions: &LockFunctions) -> Result<Self, LockError> {
        match text.trim().to_lowercase().as_str() {
            "true" => return Ok(Self::AllPass),
            "false" => return Ok(Self::NonePass),
            _ => {}
        }
        let mut parser = LockParser {
            source: text,
            pos: 0,
            functions,
        };
        let root = parser.parse_and()?;
        parser.skip_ws();
        if parser.pos < text.len() {
            return Err(parser.error(LockErrorKind::Trailing(text[parser.pos..].to_string())));
        }
        Ok(Self::Expr(LockExpr {
            source: text.trim().to_string(),
            root,
        }))
    }

    /// Wraps an arbitrary predicate.
    #[must_use]
    pub fn custom<F>(predicate: F) -> Self
    where
        F: Fn(&CommandContext<'_>) -> bool + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(predicate))
    }

    /// Returns true if `ctx.requester` passes this lock.
    #[must_use]
    pub fn allows(&self, ctx: &CommandContext<'_>) -> bool {
        match self {
            Self::AllPass => true,
            Self::NonePass => false,
            Self::Expr(expr) => expr.root.eval(ctx),
            Self::Custom(predicate) => predicate.allows(ctx),
        }
    }
}

impl fmt::Debug for Lock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllPass => write!(f, "Lock(true)"),
            Self::NonePass => write!(f, "Lock(false)"),
            Self::Expr(expr) => write!(f, "Lock({})", expr.source),
            Self::Custom(_) => write!(f, "Lock(<custom>)"),
        }
    }
}

impl fmt::Display for Lock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllPass => f.write_str("true"),
            Self::NonePass => f.write_str("false"),
            Self::Expr(expr) => f.write_str(&expr.source),
            Self::Custom(_) => f.write_str("<custom>"),
        }
    }
}

/// A parsed lock expression.
#[derive(Clone)]
pub struct LockExpr {
    source: String,
    root: Node,
}

impl LockExpr {
    /// The expression text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }
}

#[derive(Clone)]
enum Node {
    Call {
        function: Arc<dyn LockFunction>,
        args: Vec<String>,
    },
    Not(Box<Node>),
    And(Vec<Node>),
    Or(Vec<Node>),
}

impl Node {
    fn eval(&self, ctx: &CommandContext<'_>) -> bool {
        match self {
            Self::Call { function, args } => function.call(ctx, args),
            Self::Not(inner) => !inner.eval(ctx),
            Self::And(nodes) => nodes.iter().all(|node| node.eval(ctx)),
            Self::Or(nodes) => nodes.iter().any(|node| node.eval(ctx)),
        }
    }
}

struct LockParser<'a> {
    source: &'a str,
    pos: usize,
    functions: &'a LockFunctions,
}

impl<'a> LockParser<'a> {
    fn parse_and(&mut self) -> Result<Node, LockError> {
        let mut nodes = vec![self.parse_or()?];
        while self.eat_operator('&', "and") {
            nodes.push(self.parse_or()?);
        }
        Ok(collapse(nodes, Node::And))
    }

    fn parse_or(&mut self) -> Result<Node, LockError> {
        let mut nodes = vec![self.parse_unary()?];
        while self.eat_operator('|', "or") {
            nodes.push(self.parse_unary()?);
        }
        Ok(collapse(nodes, Node::Or))
    }

    fn parse_unary(&mut self) -> Result<Node, LockError> {
        if self.eat_operator('!', "not") {
            return Ok(Node::Not(Box::new(self.parse_unary()?)));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Node, LockError> {
        self.skip_ws();
        let start = self.pos;
        match self.peek() {
            None => Err(self.error(LockErrorKind::UnexpectedEnd)),
            Some('(') => {
                self.pos += 1;
                let inner = self.parse_and()?;
                self.skip_ws();
                if self.peek() == Some(')') {
                    self.pos += 1;
                    Ok(inner)
                } else {
                    Err(self.error_at(LockErrorKind::Unclosed, start))
                }
            }
            Some(c) if is_word_char(c) => self.parse_call(),
            Some(c) => Err(self.error(LockErrorKind::UnexpectedChar(c))),
        }
    }

    fn parse_call(&mut self) -> Result<Node, LockError> {
        let start = self.pos;
        let name = self.word();
        let function = self
            .functions
            .get(name)
            .ok_or_else(|| self.error_at(LockErrorKind::UnknownFunction(name.to_string()), start))?;
        self.skip_ws();
        match self.peek() {
            Some('(') => {}
            Some(c) => return Err(self.error(LockErrorKind::UnexpectedChar(c))),
            None => return Err(self.error(LockErrorKind::UnexpectedEnd)),
        }
        let open = self.pos;
        let rest = &self.source[open + 1..];
        let Some(close) = rest.find(')') else {
            return Err(self.error_at(LockErrorKind::Unclosed, open));
        };
        let args = rest[..close]
            .split(',')
            .map(str::trim)
            .filter(|arg| !arg.is_empty())
            .map(str::to_string)
            .collect();
        self.pos = open + 1 + close + 1;
        Ok(Node::Call { function, args })
    }

    fn eat_operator(&mut self, symbol: char, word: &str) -> bool {
        self.skip_ws();
        if self.peek() == Some(symbol) {
            self.pos += symbol.len_utf8();
            return true;
        }
        let rest = &self.source[self.pos..];
        let matches_word = rest.len() >= word.len()
            && rest.is_char_boundary(word.len())
            && rest[..word.len()].eq_ignore_ascii_case(word)
            && !rest[word.len()..].chars().next().is_some_and(is_word_char);
        if matches_word {
            self.pos += word.len();
        }
        matches_word
    }

    fn word(&mut self) -> &'a str {
        let source = self.source;
        let start = self.pos;
        let len = source[start..]
            .find(|c: char| !is_word_char(c))
            .unwrap_or(source.len() - start);
        self.pos += len;
        &source[start..start + len]
    }

    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn skip_ws(&mut self) {
        let rest = &self.source[self.pos..];
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn error(&self, kind: LockErrorKind) -> LockError {
        self.error_at(kind, self.pos)
    }

    fn error_at(&self, kind: LockErrorKind, position: usize) -> LockError {
        LockError {
            kind,
            position,
            lock: self.source.to_string(),
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn collapse(mut nodes: Vec<Node>, combine: fn(Vec<Node>) -> Node) -> Node {
    if nodes.len() == 1 {
        nodes.remove(0)
    } else {
        combine(nodes)
    }
}
