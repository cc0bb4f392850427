//! Ping command for checking the dispatcher is responsive.

use crate::error::HandlerResult;

use super::super::traits::Command;
use super::super::types::{CommandArgs, ExecutionContext};

/// Simple ping command that prints `pong`.
pub struct PingCommand;

impl PingCommand {
    pub const REPLY: &'static str = "pong";
}

impl Command for PingCommand {
    fn name(&self) -> &str {
        "ping"
    }

    fn description(&self) -> &str {
        "Reply with pong"
    }

    fn execute(&self, _ctx: &ExecutionContext, _args: CommandArgs) -> HandlerResult {
        println!("{}", Self::REPLY);
        Ok(())
    }
}
