//! Command registry for dispatching input lines to handlers.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info};

use crate::error::{DispatchError, DispatchResult};

use super::system::{EchoCommand, PingCommand};
use super::traits::Command;
use super::types::{CommandArgs, ExecutionContext, KnownError};

/// Prefix every dispatchable line must start with unless reconfigured.
pub const DEFAULT_INITIALIZER: &str = "/";

/// Registry of commands plus the initializer used to recognise input.
///
/// Owns all dispatcher state. Callers needing shared access from several
/// threads wrap it in their own lock.
#[derive(Clone)]
pub struct CommandRegistry {
    commands: HashMap<String, Arc<dyn Command>>,
    initializer: String,
    /// Token count of the deepest registered key.
    depth: usize,
}

impl CommandRegistry {
    /// Create an empty registry using the default initializer.
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
            initializer: DEFAULT_INITIALIZER.to_string(),
            depth: 0,
        }
    }

    /// Create a registry with the built-in system commands.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();

        registry.register(Arc::new(PingCommand));
        registry.register(Arc::new(EchoCommand));

        info!(
            count = registry.commands.len(),
            "Command registry initialized"
        );

        registry
    }

    /// Builder-style variant of [`CommandRegistry::set_initializer`].
    pub fn with_initializer(mut self, initializer: impl Into<String>) -> Self {
        self.set_initializer(initializer);
        self
    }

    /// Register a command under its own name, replacing any previous entry.
    pub fn register(&mut self, command: Arc<dyn Command>) {
        let name = command.name().to_string();
        self.insert(name, command);
    }

    /// Register `child` under the key `"<parent> <child>"`.
    pub fn register_nested(&mut self, parent: &dyn Command, child: Arc<dyn Command>) {
        let key = nested_key(parent, child.as_ref());
        self.insert(key, child);
    }

    /// Remove the entry registered under the command's name.
    ///
    /// Does nothing if no such entry exists.
    pub fn deregister(&mut self, command: &dyn Command) {
        self.remove(command.name());
    }

    /// Remove the entry registered by [`CommandRegistry::register_nested`].
    pub fn deregister_nested(&mut self, parent: &dyn Command, child: &dyn Command) {
        self.remove(&nested_key(parent, child));
    }

    /// Replace the initializer for all subsequent `execute` calls.
    pub fn set_initializer(&mut self, initializer: impl Into<String>) {
        self.initializer = initializer.into();
        debug!(initializer = %self.initializer, "Initializer changed");
    }

    /// The current initializer.
    pub fn initializer(&self) -> &str {
        &self.initializer
    }

    /// Get a command by registry key.
    pub fn get(&self, key: &str) -> Option<Arc<dyn Command>> {
        self.commands.get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.commands.contains_key(key)
    }

    /// List all registry keys, sorted.
    pub fn list_commands(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Parse `line` and run the matching command.
    ///
    /// The line must start with the initializer. The remainder is split on
    /// single spaces; the longest run of leading tokens forming a registered
    /// key selects the command and the rest become its arguments. Handler
    /// errors are returned unchanged.
    pub fn execute(&self, line: &str) -> DispatchResult<()> {
        let rest = line.strip_prefix(self.initializer.as_str()).ok_or_else(|| {
            DispatchError::MissingInitializer {
                initializer: self.initializer.clone(),
                message: KnownError::MissingInitializer.render(&self.initializer),
            }
        })?;

        let tokens: Vec<&str> = rest.split(' ').collect();

        let (key, command, consumed) = self.resolve(&tokens).ok_or_else(|| {
            let name = tokens[0];
            let location = format!("1:{}", name.chars().count());
            DispatchError::UnknownCommand {
                name: name.to_string(),
                message: KnownError::UnknownCommand.render(&location),
                location,
            }
        })?;

        let args = CommandArgs::new(tokens[consumed..].iter().map(|t| t.to_string()).collect());
        let ctx = ExecutionContext::new(key, line);

        debug!(command = %ctx.command, args = args.len(), "Dispatching command");

        command.validate(&args)?;
        command.execute(&ctx, args)?;

        Ok(())
    }

    /// Find the longest registered key made of leading tokens.
    fn resolve(&self, tokens: &[&str]) -> Option<(String, Arc<dyn Command>, usize)> {
        let max = self.depth.min(tokens.len());
        (1..=max).rev().find_map(|n| {
            let key = tokens[..n].join(" ");
            self.commands
                .get(&key)
                .map(|command| (key, Arc::clone(command), n))
        })
    }

    fn insert(&mut self, key: String, command: Arc<dyn Command>) {
        debug!(command = %key, "Registering command");
        self.depth = self.depth.max(key_depth(&key));
        self.commands.insert(key, command);
    }

    fn remove(&mut self, key: &str) {
        if self.commands.remove(key).is_some() {
            debug!(command = key, "Deregistered command");
            self.depth = self.commands.keys().map(|k| key_depth(k)).max().unwrap_or(0);
        }
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn nested_key(parent: &dyn Command, child: &dyn Command) -> String {
    format!("{} {}", parent.name(), child.name())
}

fn key_depth(key: &str) -> usize {
    key.split(' ').count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::FnCommand;
    use crate::error::HandlerError;
    use std::sync::Mutex;

    /// Command that records the arguments of every call.
    fn recording(name: &str) -> (Arc<FnCommand>, Arc<Mutex<Vec<Vec<String>>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&calls);
        let command = FnCommand::new(name, move |_, args| {
            sink.lock().unwrap().push(args.into_inner());
            Ok(())
        });
        (Arc::new(command), calls)
    }

    #[test]
    fn test_builtins_registered() {
        let registry = CommandRegistry::with_builtins();
        assert!(registry.get("ping").is_some());
        assert!(registry.get("echo").is_some());
        assert!(registry.get("nonexistent").is_none());
        assert_eq!(registry.list_commands(), vec!["echo", "ping"]);
    }

    #[test]
    fn test_default_initializer() {
        let registry = CommandRegistry::default();
        assert_eq!(registry.initializer(), "/");
        assert!(registry.is_empty());
    }

    #[test]
    fn test_execute_passes_exact_args() {
        let mut registry = CommandRegistry::new();
        let (command, calls) = recording("test");
        registry.register(command);

        registry.execute("/test foo bar").unwrap();
        registry.execute("/test").unwrap();
        registry.execute("/test  foo ").unwrap();

        let calls = calls.lock().unwrap();
        assert_eq!(calls[0], vec!["foo", "bar"]);
        assert!(calls[1].is_empty());
        assert_eq!(calls[2], vec!["", "foo", ""]);
    }

    #[test]
    fn test_missing_initializer() {
        let registry = CommandRegistry::with_builtins();
        let err = registry.execute("ping").unwrap_err();
        match err {
            DispatchError::MissingInitializer {
                initializer,
                message,
            } => {
                assert_eq!(initializer, "/");
                assert_eq!(message, "Expected '/' to be before command at 1:1.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_command_location() {
        let registry = CommandRegistry::new();
        let err = registry.execute("/nothing here").unwrap_err();
        match err {
            DispatchError::UnknownCommand {
                name,
                location,
                message,
            } => {
                assert_eq!(name, "nothing");
                assert_eq!(location, "1:7");
                assert_eq!(message, "Expected command at 1:7, got nonexistent command.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_initializer_only_is_unknown_empty_command() {
        let registry = CommandRegistry::with_builtins();
        let err = registry.execute("/").unwrap_err();
        assert!(matches!(
            err,
            DispatchError::UnknownCommand { ref location, .. } if location == "1:0"
        ));
    }

    #[test]
    fn test_handler_failure_propagates() {
        let mut registry = CommandRegistry::new();
        registry.register(Arc::new(FnCommand::new("fail", |ctx, _| {
            Err(ctx.fail("handler said no"))
        })));

        let err = registry.execute("/fail").unwrap_err();
        assert_eq!(err.to_string(), "handler said no");
        assert!(matches!(
            err,
            DispatchError::Handler(HandlerError::Failed { .. })
        ));
    }

    #[test]
    fn test_register_overwrites() {
        let mut registry = CommandRegistry::new();
        let (first, first_calls) = recording("dup");
        let (second, second_calls) = recording("dup");
        registry.register(first);
        registry.register(second);

        assert_eq!(registry.len(), 1);
        registry.execute("/dup x").unwrap();
        assert!(first_calls.lock().unwrap().is_empty());
        assert_eq!(second_calls.lock().unwrap().len(), 1);

        registry.deregister(&FnCommand::named("dup"));
        assert!(registry.is_empty());
        assert!(matches!(
            registry.execute("/dup x"),
            Err(DispatchError::UnknownCommand { .. })
        ));
    }

    #[test]
    fn test_deregister_absent_is_noop() {
        let mut registry = CommandRegistry::with_builtins();
        registry.deregister(&FnCommand::named("missing"));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_nested_command_dispatch() {
        let mut registry = CommandRegistry::new();
        let (parent, parent_calls) = recording("config");
        let (child, child_calls) = recording("set");
        registry.register(Arc::clone(&parent) as Arc<dyn Command>);
        registry.register_nested(parent.as_ref(), child);

        assert!(registry.contains("config set"));

        registry.execute("/config set volume 11").unwrap();
        registry.execute("/config get volume").unwrap();
        registry.execute("/config").unwrap();

        assert_eq!(child_calls.lock().unwrap()[0], vec!["volume", "11"]);
        let parent_calls = parent_calls.lock().unwrap();
        assert_eq!(parent_calls[0], vec!["get", "volume"]);
        assert!(parent_calls[1].is_empty());
    }

    #[test]
    fn test_nested_context_carries_composite_key() {
        let mut registry = CommandRegistry::new();
        let parent = FnCommand::named("user");
        registry.register_nested(
            &parent,
            Arc::new(FnCommand::new("add", |ctx, _| {
                if ctx.command == "user add" && ctx.line == "/user add bob" {
                    Ok(())
                } else {
                    Err(ctx.fail("wrong context"))
                }
            })),
        );

        registry.execute("/user add bob").unwrap();
        // Only the composite key exists, so the bare parent is unknown.
        assert!(matches!(
            registry.execute("/user"),
            Err(DispatchError::UnknownCommand { .. })
        ));
    }

    #[test]
    fn test_deregister_nested() {
        let mut registry = CommandRegistry::new();
        let parent = FnCommand::named("user");
        let child = Arc::new(FnCommand::named("add"));
        registry.register_nested(&parent, Arc::clone(&child) as Arc<dyn Command>);

        registry.deregister_nested(&parent, child.as_ref());
        assert!(registry.is_empty());
        assert!(registry.execute("/user add").is_err());
    }

    #[test]
    fn test_validate_runs_before_execute() {
        struct Strict;

        impl Command for Strict {
            fn name(&self) -> &str {
                "strict"
            }

            fn validate(&self, args: &CommandArgs) -> crate::error::HandlerResult {
                args.require(0).map(|_| ())
            }

            fn execute(
                &self,
                ctx: &ExecutionContext,
                _args: CommandArgs,
            ) -> crate::error::HandlerResult {
                Err(ctx.fail("execute should not run"))
            }
        }

        let mut registry = CommandRegistry::new();
        registry.register(Arc::new(Strict));

        let err = registry.execute("/strict").unwrap_err();
        assert_eq!(err.to_string(), "Missing required argument at position 1");
    }

    #[test]
    fn test_failed_dispatch_leaves_state_untouched() {
        let mut registry = CommandRegistry::with_builtins().with_initializer("!");
        registry.register(Arc::new(FnCommand::new("boom", |ctx, _| {
            Err(ctx.fail("boom"))
        })));

        assert!(registry.execute("/ping").is_err());
        assert!(registry.execute("!boom").is_err());
        assert!(registry.execute("!missing").is_err());

        assert_eq!(registry.initializer(), "!");
        assert_eq!(registry.list_commands(), vec!["boom", "echo", "ping"]);
    }

    #[test]
    fn test_multichar_and_empty_initializer() {
        let mut registry = CommandRegistry::new();
        let (command, calls) = recording("go");
        registry.register(command);

        registry.set_initializer("::");
        registry.execute("::go a").unwrap();
        assert!(registry.execute(":go a").is_err());

        registry.set_initializer("");
        registry.execute("go b").unwrap();

        let calls = calls.lock().unwrap();
        assert_eq!(calls[0], vec!["a"]);
        assert_eq!(calls[1], vec!["b"]);
    }
}
