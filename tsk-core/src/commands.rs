//! Inline command registry.
//!
//! Commands are invoked from document bodies with lines such as
//! `$$ include intro.md` and replaced by whatever their handler returns.
//! Handlers are stored in an explicit table keyed by prefixed name.

use crate::storage::Storage;
use std::collections::HashMap;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Prefix every registered command name carries
pub const COMMAND_PREFIX: &str = "cmd_";

/// Directory under the markdown path holding `include` partials
pub const PARTIALS_DIR: &str = "partials";

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Unresolved command: {0}")]
    UnresolvedCommand(String),

    #[error("Command name already registered: {0}")]
    NameCollision(String),

    #[error("Command {command} expects {expected}")]
    MissingArgument {
        command: String,
        expected: &'static str,
    },

    #[error("Command {0} requires a processing context")]
    MissingContext(String),

    #[error("Command {command} was given an invalid path: {path}")]
    InvalidPath { command: String, path: String },

    #[error("{0} is not valid UTF-8")]
    Encoding(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CommandResult = Result<String, CommandError>;

/// Context handed to bound handlers
#[derive(Clone, Copy)]
pub struct CommandContext<'a> {
    pub markdown_path: &'a Path,
    pub web_pages_path: &'a Path,
    pub storage: &'a dyn Storage,
}

type HandlerFn = dyn Fn(Option<&CommandContext<'_>>, &[String]) -> CommandResult + Send + Sync;

/// A command implementation plus its binding capability
pub struct Handler {
    func: Box<HandlerFn>,
    force_bound: bool,
}

impl Handler {
    /// Handler that only receives a context when registered as bound
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(Option<&CommandContext<'_>>, &[String]) -> CommandResult + Send + Sync + 'static,
    {
        Self {
            func: Box::new(func),
            force_bound: false,
        }
    }

    /// Handler that always receives the context, whatever the registration says
    pub fn force_bound<F>(func: F) -> Self
    where
        F: Fn(Option<&CommandContext<'_>>, &[String]) -> CommandResult + Send + Sync + 'static,
    {
        Self {
            func: Box::new(func),
            force_bound: true,
        }
    }

    pub fn is_force_bound(&self) -> bool {
        self.force_bound
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("force_bound", &self.force_bound)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
struct Registered {
    handler: Handler,
    bound: bool,
}

/// Table of named command handlers
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Registered>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-loaded with the `include` and `asset` commands
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        // Fresh registry, names can't collide
        let _ = registry.register("include", Handler::force_bound(include), false);
        let _ = registry.register("asset", Handler::force_bound(asset), false);
        registry
    }

    /// Register `handler` under `name` (prefixed with [`COMMAND_PREFIX`] if needed)
    pub fn register(&mut self, name: &str, handler: Handler, bound: bool) -> Result<(), CommandError> {
        let name = qualified_name(name);
        if self.commands.contains_key(&name) {
            return Err(CommandError::NameCollision(name));
        }

        let bound = bound || handler.force_bound;
        tracing::debug!("Registered command {} (bound: {})", name, bound);
        self.commands.insert(name, Registered { handler, bound });
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(&qualified_name(name))
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Resolve and run a command
    ///
    /// Bound handlers receive `context`; unbound ones receive `None`.
    pub fn dispatch(
        &self,
        name: &str,
        args: &[String],
        context: Option<&CommandContext<'_>>,
    ) -> CommandResult {
        let qualified = qualified_name(name);
        let entry = self
            .commands
            .get(&qualified)
            .ok_or(CommandError::UnresolvedCommand(qualified.clone()))?;

        if entry.bound {
            let context = context.ok_or(CommandError::MissingContext(qualified.clone()))?;
            (entry.handler.func)(Some(context), args)
        } else {
            (entry.handler.func)(None, args)
        }
    }
}

fn qualified_name(name: &str) -> String {
    if name.starts_with(COMMAND_PREFIX) {
        name.to_string()
    } else {
        format!("{}{}", COMMAND_PREFIX, name)
    }
}

fn require_context<'c, 'a>(
    context: Option<&'c CommandContext<'a>>,
    command: &str,
) -> Result<&'c CommandContext<'a>, CommandError> {
    context.ok_or_else(|| CommandError::MissingContext(qualified_name(command)))
}

/// Only plain relative paths are accepted as command arguments
fn relative_arg<'p>(command: &str, arg: &'p str) -> Result<&'p Path, CommandError> {
    let path = Path::new(arg);
    if path.components().all(|c| matches!(c, Component::Normal(_))) {
        Ok(path)
    } else {
        Err(CommandError::InvalidPath {
            command: qualified_name(command),
            path: arg.to_string(),
        })
    }
}

/// `$$ include <partial>`: inline a file from the partials directory
fn include(context: Option<&CommandContext<'_>>, args: &[String]) -> CommandResult {
    let ctx = require_context(context, "include")?;
    let name = args.first().ok_or(CommandError::MissingArgument {
        command: qualified_name("include"),
        expected: "a partial file name",
    })?;
    let partial = relative_arg("include", name)?;

    let partials_dir = ctx.markdown_path.join(PARTIALS_DIR);
    ctx.storage.ensure_dir(&partials_dir)?;

    let path = partials_dir.join(partial);
    let bytes = ctx.storage.read(&path)?;
    String::from_utf8(bytes).map_err(|_| CommandError::Encoding(path))
}

/// `$$ asset <path> [alt text]`: publish a file next to the web pages and link it
fn asset(context: Option<&CommandContext<'_>>, args: &[String]) -> CommandResult {
    let ctx = require_context(context, "asset")?;
    let (name, alt) = args.split_first().ok_or(CommandError::MissingArgument {
        command: qualified_name("asset"),
        expected: "an asset path",
    })?;
    let relative = relative_arg("asset", name)?;

    let source = ctx.markdown_path.join(relative);
    let target = ctx.web_pages_path.join(relative);
    let bytes = ctx.storage.read(&source)?;
    ctx.storage.write(&target, &bytes)?;
    tracing::debug!("Copied asset {:?} -> {:?}", source, target);

    Ok(format!("![{}]({})", alt.join(" "), name))
}
