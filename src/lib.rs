//! Recept - helpers for writing command-line tools that drive other programs.
//!
//! Recept wraps external programs as reusable handles and gives scripts a
//! disciplined way to move around the filesystem while they run them.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, parsing, and validation
//! - [`error`] - Error types and result aliases
//! - [`shell`] - Working-directory stack, command resolution and built-in tools
//! - [`ui`] - Colored terminal output
//!
//! # Example
//!
//! ```no_run
//! use recept::shell::{pushd, resolve, CommandOptions, OutputTarget};
//!
//! let git = resolve("git", ["--no-pager"], CommandOptions::default());
//! let log = pushd("vendor/lib", false, || {
//!     git.run(
//!         ["log", "-1", "--oneline"],
//!         &CommandOptions::new().with_stdout(OutputTarget::Capture),
//!     )
//! })?;
//! println!("{}", log.stdout.trim());
//! # Ok::<(), recept::ReceptError>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod shell;
pub mod ui;

pub use error::{ReceptError, Result};
