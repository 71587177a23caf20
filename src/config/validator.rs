//! Configuration validation rules.
//!
//! - Tool names must be non-empty and free of whitespace
//! - A tool's `command`, when given, must not be empty
//! - A tool's `ok_codes`, when given, must list at least one code

use crate::config::schema::ReceptConfig;
use crate::error::{ReceptError, Result};

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
    /// Tool the error belongs to
    pub tool: String,
}

/// Validate a configuration and return all errors.
///
/// All errors are collected so they can be fixed in one pass.
pub fn validate_config(config: &ReceptConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (name, tool) in &config.tools {
        if name.trim().is_empty() || name.chars().any(char::is_whitespace) {
            errors.push(ValidationError {
                rule: "invalid-tool-name".to_string(),
                message: format!("Tool name '{}' must be non-empty and contain no whitespace", name),
                tool: name.clone(),
            });
        }

        if tool.command.as_deref().is_some_and(|c| c.trim().is_empty()) {
            errors.push(ValidationError {
                rule: "empty-command".to_string(),
                message: format!("Tool '{}' has an empty 'command'", name),
                tool: name.clone(),
            });
        }

        if tool.ok_codes.as_ref().is_some_and(Vec::is_empty) {
            errors.push(ValidationError {
                rule: "empty-ok-codes".to_string(),
                message: format!("Tool '{}' has an empty 'ok_codes' list", name),
                tool: name.clone(),
            });
        }
    }

    errors
}

/// Validate a configuration, joining every problem into a single error.
pub fn validate(config: &ReceptConfig) -> Result<()> {
    let errors = validate_config(config);

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(ReceptError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}
