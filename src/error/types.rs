//! Error types for the command dispatcher.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by `CommandRegistry::execute`.
///
/// The dispatcher originates only the first two kinds. Everything a handler
/// raises arrives as `Handler`, untouched.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The input line did not start with the configured initializer.
    #[error("{message}")]
    MissingInitializer { initializer: String, message: String },

    /// The leading token has no registered handler.
    #[error("{message}")]
    UnknownCommand {
        name: String,
        location: String,
        message: String,
    },

    /// Raised by the matched handler.
    #[error(transparent)]
    Handler(#[from] HandlerError),
}

/// Errors raised from inside a command handler.
#[derive(Error, Debug)]
pub enum HandlerError {
    /// Produced by the `fail` callback handed to every handler.
    #[error("{message}")]
    Failed { message: String },

    /// Any other error a handler chose to return.
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl HandlerError {
    /// Wrap an arbitrary error raised by a handler.
    pub fn other<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Other(Box::new(err))
    }

    /// Message of a `Failed` error, if this is one.
    pub fn failure_message(&self) -> Option<&str> {
        match self {
            Self::Failed { message } => Some(message),
            Self::Other(_) => None,
        }
    }
}

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {message}", .path.display())]
    Read { path: PathBuf, message: String },

    #[error("Failed to parse config file '{}': {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Configuration error: {message}")]
    Invalid { message: String },
}

/// Result type alias for dispatch operations.
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Result type returned by command handlers.
pub type HandlerResult = Result<(), HandlerError>;
