//! Run command implementation.
//!
//! The `recept run` command runs a tool with the arguments given after its
//! name. Tools stream to the terminal unless configured otherwise; output a
//! tool captures is printed once it finishes.

use crate::cli::args::RunArgs;
use crate::error::{ReceptError, Result};
use crate::shell::{Apps, CommandOptions};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The run command implementation.
pub struct RunCommand<'a> {
    apps: &'a Apps,
    args: RunArgs,
}

impl<'a> RunCommand<'a> {
    /// Create a new run command.
    pub fn new(apps: &'a Apps, args: RunArgs) -> Self {
        Self { apps, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &RunArgs {
        &self.args
    }
}

impl Command for RunCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let handle = self.apps.handle(self.args.tool());

        if ui.output_mode().shows_command_lines() {
            let line = handle.bake(self.args.args().iter().cloned(), &CommandOptions::default());
            ui.message(&format!("$ {}", line.command_line()));
        }

        // Streamed output was already shown; only report what was held back.
        let held_back = !handle.default_options().stdout_target().is_live();

        let result = match handle.call(self.args.args().iter().cloned()) {
            Ok(result) => result,
            Err(err) => {
                if let ReceptError::CommandExecution { stdout, .. } = &err {
                    if held_back {
                        report_captured(ui, stdout);
                    }
                }
                return Err(err);
            }
        };
        tracing::debug!(
            "{} exited with {:?} after {:?}",
            self.args.tool(),
            result.exit_code,
            result.duration
        );

        if held_back {
            report_captured(ui, &result.stdout);
        }

        if result.success {
            Ok(CommandResult::success())
        } else {
            // Accepted but non-zero: report the tool's own code.
            Ok(CommandResult::failure(result.exit_code.unwrap_or(1)))
        }
    }
}

fn report_captured(ui: &mut dyn UserInterface, stdout: &str) {
    let captured = stdout.trim_end();
    if !captured.is_empty() {
        ui.result(captured);
    }
}
