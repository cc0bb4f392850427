//! Command handlers module.
//!
//! Contains the command registry, the `Command` trait and the built-in
//! commands.
//!
//! ## Adding a New Command
//!
//! 1. Implement the `Command` trait (or wrap a closure in `FnCommand`)
//! 2. Register it with `CommandRegistry::register`, or under a parent with
//!    `CommandRegistry::register_nested`

mod registry;
mod traits;
mod types;

pub mod system;

pub use registry::{CommandRegistry, DEFAULT_INITIALIZER};
pub use traits::{Command, FnCommand};
pub use types::{CommandArgs, ExecutionContext, KnownError, KNOWN_ERRORS};
