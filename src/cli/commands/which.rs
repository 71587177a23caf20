//! Which command implementation.
//!
//! The `recept which` command shows the executable a tool resolves to.

use crate::cli::args::WhichArgs;
use crate::error::Result;
use crate::shell::Apps;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The which command implementation.
pub struct WhichCommand<'a> {
    apps: &'a Apps,
    args: WhichArgs,
}

impl<'a> WhichCommand<'a> {
    /// Create a new which command.
    pub fn new(apps: &'a Apps, args: WhichArgs) -> Self {
        Self { apps, args }
    }
}

impl Command for WhichCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let handle = self.apps.handle(&self.args.tool);

        match handle.program() {
            Some(program) => {
                ui.result(&program.display().to_string());
                Ok(CommandResult::success())
            }
            None => {
                ui.error(&format!("Command `{}` not found", handle.name()));
                Ok(CommandResult::failure(1))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::ToolSpec;
    use crate::ui::MockUI;

    fn which(apps: &Apps, tool: &str, ui: &mut MockUI) -> CommandResult {
        let args = WhichArgs {
            tool: tool.to_string(),
        };
        WhichCommand::new(apps, args).execute(ui).unwrap()
    }

    #[test]
    fn missing_tool_fails_with_message() {
        let apps = Apps::from_specs([ToolSpec::new("ghost", "definitely-not-a-real-binary-xyz")]);
        let mut ui = MockUI::new();

        let result = which(&apps, "ghost", &mut ui);

        assert_eq!(result.exit_code, 1);
        assert_eq!(
            ui.errors(),
            ["Command `definitely-not-a-real-binary-xyz` not found"]
        );
    }

    #[cfg(unix)]
    #[test]
    fn found_tool_prints_path() {
        let mut ui = MockUI::new();
        let result = which(&Apps::default(), "sh", &mut ui);

        assert!(result.success);
        assert!(ui.results()[0].ends_with("/sh"));
    }
}
