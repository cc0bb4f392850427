//! Command trait definition.

use std::fmt;

use crate::error::HandlerResult;

use super::types::{CommandArgs, ExecutionContext};

/// Core trait for all dispatchable commands.
///
/// # Example
///
/// ```ignore
/// pub struct GreetCommand;
///
/// impl Command for GreetCommand {
///     fn name(&self) -> &str {
///         "greet"
///     }
///
///     fn execute(&self, ctx: &ExecutionContext, args: CommandArgs) -> HandlerResult {
///         let who = args.get(0).ok_or_else(|| ctx.fail("greet whom?"))?;
///         println!("hello {}", who);
///         Ok(())
///     }
/// }
/// ```
pub trait Command: Send + Sync {
    /// Name the command is registered under.
    ///
    /// Nested registration prefixes it with the parent's name and a space.
    fn name(&self) -> &str;

    /// One-line description for listings.
    fn description(&self) -> &str {
        ""
    }

    /// Check the arguments before `execute()` runs.
    ///
    /// Errors are propagated to the caller exactly like `execute` errors.
    fn validate(&self, _args: &CommandArgs) -> HandlerResult {
        Ok(())
    }

    /// Run the command.
    fn execute(&self, ctx: &ExecutionContext, args: CommandArgs) -> HandlerResult;
}

type Handler = dyn Fn(&ExecutionContext, CommandArgs) -> HandlerResult + Send + Sync;

/// A command backed by a closure.
pub struct FnCommand {
    name: String,
    description: String,
    handler: Box<Handler>,
}

impl FnCommand {
    pub fn new<F>(name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&ExecutionContext, CommandArgs) -> HandlerResult + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            description: String::new(),
            handler: Box::new(handler),
        }
    }

    /// Attach a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// A command with a no-op handler, useful as a deregistration key.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, |_, _| Ok(()))
    }
}

impl Command for FnCommand {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn execute(&self, ctx: &ExecutionContext, args: CommandArgs) -> HandlerResult {
        (self.handler)(ctx, args)
    }
}

impl fmt::Debug for FnCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnCommand")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}
