//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands};
use crate::config::{find_project_root, load_config, validate, ReceptConfig};
use crate::error::Result;
use crate::shell::{cwd, pushd, Apps};
use crate::ui::{disable_colors, UserInterface};

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
///
/// With `-C`, everything from config discovery onwards happens inside a
/// [`pushd`] session on that directory.
#[derive(Debug, Default)]
pub struct CommandDispatcher {
    config_override: Option<PathBuf>,
}

impl CommandDispatcher {
    /// Create a dispatcher, optionally pinned to an explicit config file.
    pub fn new(config_override: Option<PathBuf>) -> Self {
        Self { config_override }
    }

    /// Explicit config file, if any.
    pub fn config_override(&self) -> Option<&Path> {
        self.config_override.as_deref()
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        // Relative paths given on the command line refer to the starting directory.
        let config_override = self
            .config_override
            .as_deref()
            .map(std::path::absolute)
            .transpose()?;

        match &cli.directory {
            Some(dir) => pushd(dir, cli.create, || {
                self.dispatch_here(cli, config_override.as_deref(), ui)
            }),
            None => self.dispatch_here(cli, config_override.as_deref(), ui),
        }
    }

    fn dispatch_here(
        &self,
        cli: &Cli,
        config_override: Option<&Path>,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        match &cli.command {
            Commands::Run(args) => {
                let apps = self.apps(config_override)?;
                super::run::RunCommand::new(&apps, args.clone()).execute(ui)
            }
            Commands::Which(args) => {
                let apps = self.apps(config_override)?;
                super::which::WhichCommand::new(&apps, args.clone()).execute(ui)
            }
            Commands::List(args) => {
                let apps = self.apps(config_override)?;
                super::list::ListCommand::new(&apps, args.clone()).execute(ui)
            }
            Commands::Pwd => super::pwd::PwdCommand::new().execute(ui),
            Commands::Completions(args) => {
                super::completions::CompletionsCommand::new(args.clone()).execute(ui)
            }
        }
    }

    /// Built-in tools layered with the project's configured ones.
    fn apps(&self, config_override: Option<&Path>) -> Result<Apps> {
        let config = self.load(config_override)?;
        if config.settings.color == Some(false) {
            disable_colors();
        }
        Ok(Apps::with_config(&config))
    }

    fn load(&self, config_override: Option<&Path>) -> Result<ReceptConfig> {
        let here = cwd()?;
        let project_root = find_project_root(&here).unwrap_or(here);
        tracing::debug!("project root {}", project_root.display());

        let config = load_config(&project_root, config_override)?;
        validate(&config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(1);
        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
    }

    #[test]
    fn dispatcher_creation() {
        let dispatcher = CommandDispatcher::new(Some(PathBuf::from("/test/config.yml")));
        assert_eq!(
            dispatcher.config_override(),
            Some(Path::new("/test/config.yml"))
        );
        assert_eq!(CommandDispatcher::default().config_override(), None);
    }
}
