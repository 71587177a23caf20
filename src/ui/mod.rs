//! Terminal output.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for real terminals and [`MockUI`] for tests
//! - [`ReceptTheme`] styles
//! - [`echo`], [`echo_err`] and [`exit`] for colored one-off output
//!
//! # Example
//!
//! ```
//! use recept::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.show_header("Tools");
//! ui.success("All tools found");
//! ```

pub mod mock;
pub mod output;
pub mod terminal;
pub mod termui;
pub mod theme;

pub use mock::MockUI;
pub use output::OutputMode;
pub use terminal::{create_ui, TerminalUI};
pub use termui::{echo, echo_err, exit, Color};
pub use theme::{disable_colors, should_use_colors, ReceptTheme};

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Change the output mode.
    fn set_output_mode(&mut self, mode: OutputMode);

    /// Display a status message.
    fn message(&mut self, msg: &str);

    /// Display a result line (shown in every mode except silent).
    fn result(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);

    /// Check if running in interactive mode.
    fn is_interactive(&self) -> bool;
}
