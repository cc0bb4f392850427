//! Slash Dispatch Library
//!
//! A small in-process dispatcher mapping prefixed lines such as
//! `/greet alice` to registered command handlers with positional arguments.

pub mod commands;
pub mod config;
pub mod error;

pub use commands::{Command, CommandArgs, CommandRegistry, ExecutionContext, FnCommand};
pub use error::{DispatchError, HandlerError};
