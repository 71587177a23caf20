//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. This allows:
//! - Single binary with subcommands (`recept run`, `recept list`)
//! - Shared config loading and tool resolution
//! - Consistent global flag handling

pub mod completions;
pub mod dispatcher;
pub mod list;
pub mod pwd;
pub mod run;
pub mod which;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
