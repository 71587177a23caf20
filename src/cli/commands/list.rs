//! List command implementation.
//!
//! The `recept list` command lists registered tools and what they resolve to.

use serde::Serialize;

use crate::cli::args::ListArgs;
use crate::error::{ReceptError, Result};
use crate::shell::{Apps, CommandHandle};
use crate::ui::theme::ReceptTheme;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The list command implementation.
pub struct ListCommand<'a> {
    apps: &'a Apps,
    args: ListArgs,
}

/// One row of `recept list --json`.
#[derive(Debug, Serialize)]
pub struct ToolEntry {
    pub name: String,
    pub program: Option<String>,
    pub args: Vec<String>,
    pub ok_codes: Vec<i32>,
    pub available: bool,
}

impl ToolEntry {
    fn from_handle(name: &str, handle: &CommandHandle) -> Self {
        Self {
            name: name.to_string(),
            program: handle.program().map(|p| p.display().to_string()),
            args: handle.default_args().to_vec(),
            ok_codes: handle
                .default_options()
                .accepted_codes()
                .into_iter()
                .collect(),
            available: handle.is_available(),
        }
    }
}

impl<'a> ListCommand<'a> {
    /// Create a new list command.
    pub fn new(apps: &'a Apps, args: ListArgs) -> Self {
        Self { apps, args }
    }

    /// Entries for every registered tool, sorted by name.
    pub fn entries(&self) -> Vec<ToolEntry> {
        self.apps
            .iter()
            .map(|(name, handle)| ToolEntry::from_handle(name, handle))
            .collect()
    }
}

impl Command for ListCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let entries = self.entries();

        if self.args.json {
            let output = serde_json::to_string_pretty(&entries)
                .map_err(|e| ReceptError::Other(e.into()))?;
            ui.result(&output);
            return Ok(CommandResult::success());
        }

        let theme = ReceptTheme::detect();
        ui.show_header("Tools");

        let width = entries.iter().map(|e| e.name.len()).max().unwrap_or(0);
        for entry in &entries {
            let name = format!("{:width$}", entry.name, width = width);
            let line = match &entry.program {
                Some(program) => {
                    let mut command = program.clone();
                    for arg in &entry.args {
                        command.push(' ');
                        command.push_str(arg);
                    }
                    let codes = if entry.ok_codes == [0] {
                        String::new()
                    } else {
                        let codes: Vec<_> = entry.ok_codes.iter().map(i32::to_string).collect();
                        format!(" {}", theme.dim.apply_to(format!("(ok: {})", codes.join(","))))
                    };
                    format!(
                        "  {}  {}{}",
                        theme.highlight.apply_to(name),
                        theme.command.apply_to(command),
                        codes
                    )
                }
                None => format!(
                    "  {}  {}",
                    theme.dim.apply_to(name),
                    theme.warning.apply_to("not found")
                ),
            };
            ui.result(&line);
        }

        Ok(CommandResult::success())
    }
}
