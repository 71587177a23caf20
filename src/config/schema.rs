//! Configuration schema.
//!
//! ```yaml
//! settings:
//!   color: false
//! tools:
//!   lint:
//!     command: flake8
//!     args: ["--max-line-length", "100"]
//!     ok_codes: [0, 1]
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::shell::{CommandOptions, OutputTarget, ToolSpec};

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReceptConfig {
    /// Global settings.
    #[serde(default)]
    pub settings: Settings,

    /// Tool registrations, layered over the built-in tools by name.
    #[serde(default)]
    pub tools: BTreeMap<String, ToolConfig>,
}

impl ReceptConfig {
    /// Specs for every configured tool.
    pub fn tool_specs(&self) -> Vec<ToolSpec> {
        self.tools
            .iter()
            .map(|(name, tool)| tool.to_spec(name))
            .collect()
    }

    /// Resolve relative tool `cwd`s against `root`.
    pub fn anchor_paths(&mut self, root: &Path) {
        for tool in self.tools.values_mut() {
            if let Some(cwd) = tool.cwd.as_mut() {
                if cwd.is_relative() {
                    *cwd = root.join(&*cwd);
                }
            }
        }
    }
}

/// Global settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Set to false to disable colored output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,
}

/// A configured tool.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolConfig {
    /// Program to run (defaults to the tool name).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    /// Arguments baked in front of call-time arguments.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,

    /// Exit codes treated as success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ok_codes: Option<Vec<i32>>,

    /// Capture output that is streamed live.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tee: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stdout: Option<StreamTarget>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stderr: Option<StreamTarget>,

    /// Working directory for the tool.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<PathBuf>,

    /// Extra environment variables.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
}

impl ToolConfig {
    /// Build the spec registered under `name`.
    pub fn to_spec(&self, name: &str) -> ToolSpec {
        let program = self.command.as_deref().unwrap_or(name);

        let mut options = CommandOptions {
            stdout: self.stdout.map(Into::into),
            stderr: self.stderr.map(Into::into),
            tee: self.tee,
            ok_codes: self.ok_codes.as_ref().map(|c| c.iter().copied().collect()),
            cwd: self.cwd.clone(),
            ..Default::default()
        };
        options.env.extend(self.env.clone());

        ToolSpec::new(name, program)
            .with_args(self.args.clone())
            .with_options(options)
    }
}

/// Output destination as written in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamTarget {
    Stdout,
    Stderr,
    Null,
    Capture,
}

impl From<StreamTarget> for OutputTarget {
    fn from(target: StreamTarget) -> Self {
        match target {
            StreamTarget::Stdout => Self::Stdout,
            StreamTarget::Stderr => Self::Stderr,
            StreamTarget::Null => Self::Null,
            StreamTarget::Capture => Self::Capture,
        }
    }
}
