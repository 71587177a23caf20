//! Pwd command implementation.

use crate::error::Result;
use crate::shell::cwd;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// Prints the working directory recept is operating in.
#[derive(Debug, Default)]
pub struct PwdCommand;

impl PwdCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for PwdCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        ui.result(&cwd()?.display().to_string());
        Ok(CommandResult::success())
    }
}
