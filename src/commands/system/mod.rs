//! System commands module.
//!
//! Built-in commands available from `CommandRegistry::with_builtins()`.

mod echo;
mod ping;

pub use echo::EchoCommand;
pub use ping::PingCommand;
