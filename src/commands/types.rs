//! Command types: arguments, execution context and the known-errors table.

use crate::error::HandlerError;

/// Message templates for the two failures the dispatcher raises itself.
///
/// Index 0 is the missing-initializer message, index 1 the unknown-command
/// message. The order is part of the handler contract.
pub const KNOWN_ERRORS: [&str; 2] = [
    "Expected '${initializer}' to be before command at 1:1.",
    "Expected command at ${location}, got nonexistent command.",
];

/// Names an entry of [`KNOWN_ERRORS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnownError {
    MissingInitializer,
    UnknownCommand,
}

impl KnownError {
    /// Position of this entry in the table.
    pub fn index(self) -> usize {
        match self {
            KnownError::MissingInitializer => 0,
            KnownError::UnknownCommand => 1,
        }
    }

    /// The raw template text.
    pub fn template(self) -> &'static str {
        KNOWN_ERRORS[self.index()]
    }

    /// Placeholder substituted by [`KnownError::render`].
    pub fn placeholder(self) -> &'static str {
        match self {
            KnownError::MissingInitializer => "${initializer}",
            KnownError::UnknownCommand => "${location}",
        }
    }

    /// Substitute `value` for the first occurrence of the placeholder.
    pub fn render(self, value: &str) -> String {
        self.template().replacen(self.placeholder(), value, 1)
    }
}

/// Positional arguments passed to a command, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandArgs {
    inner: Vec<String>,
}

impl CommandArgs {
    /// Create arguments from already split tokens.
    pub fn new(args: Vec<String>) -> Self {
        Self { inner: args }
    }

    /// Number of arguments.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Get the argument at `index`, if present.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.inner.get(index).map(String::as_str)
    }

    /// Get a required argument.
    pub fn require(&self, index: usize) -> Result<&str, HandlerError> {
        self.get(index).ok_or_else(|| HandlerError::Failed {
            message: format!("Missing required argument at position {}", index + 1),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.inner.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.inner
    }

    /// Join the arguments back with single spaces.
    pub fn join(&self) -> String {
        self.inner.join(" ")
    }

    pub fn into_inner(self) -> Vec<String> {
        self.inner
    }
}

impl From<Vec<String>> for CommandArgs {
    fn from(args: Vec<String>) -> Self {
        Self::new(args)
    }
}

impl From<Vec<&str>> for CommandArgs {
    fn from(args: Vec<&str>) -> Self {
        Self::new(args.into_iter().map(str::to_string).collect())
    }
}

/// Execution context handed to a command handler.
///
/// Carries the `fail` callback and the known-errors table alongside
/// metadata about the line being dispatched.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    /// Registry key the line resolved to ("name" or "parent child").
    pub command: String,
    /// The full input line, initializer included.
    pub line: String,
}

impl ExecutionContext {
    /// Create a new execution context.
    pub fn new(command: impl Into<String>, line: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            line: line.into(),
        }
    }

    /// Build the error a handler returns to abort with `message`.
    ///
    /// ```ignore
    /// return Err(ctx.fail("expected a number"));
    /// ```
    pub fn fail(&self, message: impl Into<String>) -> HandlerError {
        HandlerError::Failed {
            message: message.into(),
        }
    }

    /// The fixed known-errors table.
    pub fn known_errors(&self) -> &'static [&'static str] {
        &KNOWN_ERRORS
    }
}
