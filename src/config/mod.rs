//! Configuration module for the dispatcher.
//!
//! Handles loading and validating configuration from TOML files.

mod settings;

pub use settings::*;
