//! Error types for recept operations.
//!
//! This module defines [`ReceptError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `ReceptError` for failures callers are expected to handle
//! - Use `anyhow::Error` (via `ReceptError::Other`) for unexpected errors
//! - A missing external command is not an error value: invoking its
//!   fallback handle terminates the process (see [`crate::shell::CommandHandle`])

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for recept operations.
#[derive(Debug, Error)]
pub enum ReceptError {
    /// A working-directory operation failed (create, enter, or query).
    #[error("Failed to {op} '{}': {source}", path.display())]
    Filesystem {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// External process exited with a code outside its accepted set.
    #[error("Command exited with code {}: {command}", display_code(*code))]
    CommandExecution {
        command: String,
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    /// External process could not be started.
    #[error("Failed to start command '{command}': {source}")]
    CommandSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Tool name is not registered.
    #[error("Unknown tool: {name}")]
    UnknownTool { name: String },

    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReceptError {
    /// Exit code the CLI should report for this error.
    ///
    /// Command failures forward the child's exit code; everything else is 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::CommandExecution {
                code: Some(code), ..
            } if *code != 0 => *code,
            _ => 1,
        }
    }
}

fn display_code(code: Option<i32>) -> String {
    code.map_or_else(|| "<signal>".to_string(), |c| c.to_string())
}

/// Result type alias for recept operations.
pub type Result<T> = std::result::Result<T, ReceptError>;
