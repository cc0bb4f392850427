//! Echo command printing its arguments back.

use crate::error::HandlerResult;

use super::super::traits::Command;
use super::super::types::{CommandArgs, ExecutionContext};

/// Prints the arguments joined by single spaces.
///
/// Empty tokens are preserved, so `/echo a  b` prints `a  b`.
pub struct EchoCommand;

impl EchoCommand {
    /// Text printed for the given arguments.
    pub fn render(args: &CommandArgs) -> String {
        args.join()
    }
}

impl Command for EchoCommand {
    fn name(&self) -> &str {
        "echo"
    }

    fn description(&self) -> &str {
        "Print the arguments"
    }

    fn execute(&self, _ctx: &ExecutionContext, args: CommandArgs) -> HandlerResult {
        println!("{}", Self::render(&args));
        Ok(())
    }
}
