//! Error types for the dispatcher.
//!
//! Provides distinguishable error kinds using thiserror, so callers can
//! pattern-match instead of inspecting messages.

mod types;

pub use types::*;
