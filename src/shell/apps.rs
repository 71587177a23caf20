//! Registry of wrapped external tools.
//!
//! Each tool is described by a [`ToolSpec`]: the program to look up, the
//! arguments baked in front of every call, and tool-specific options such as
//! which exit codes count as success. [`Apps`] resolves a set of specs into
//! [`CommandHandle`]s keyed by tool name.

use std::collections::BTreeMap;

use crate::config::ReceptConfig;
use crate::error::{ReceptError, Result};

use super::command::{find_executable, resolve, CommandHandle, CommandOptions, OutputTarget};

/// Description of a tool before resolution.
#[derive(Debug, Clone)]
pub struct ToolSpec {
    /// Name the tool is registered under.
    pub name: String,
    /// Program to look up on `PATH`.
    pub program: String,
    /// Programs tried in order when `program` is not found.
    pub alternatives: Vec<String>,
    /// Arguments baked in front of call-time arguments.
    pub args: Vec<String>,
    /// Baked options.
    pub options: CommandOptions,
}

impl ToolSpec {
    /// Spec running `program` under `name` with no baked args or options.
    pub fn new(name: &str, program: &str) -> Self {
        Self {
            name: name.to_string(),
            program: program.to_string(),
            alternatives: Vec::new(),
            args: Vec::new(),
            options: CommandOptions::default(),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_alternatives<I, S>(mut self, programs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.alternatives = programs.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_options(mut self, options: CommandOptions) -> Self {
        self.options = options;
        self
    }

    /// Resolve into a handle for the first of `program` and `alternatives`
    /// found on `PATH`.
    ///
    /// If none is found the handle is a fallback reporting `program` as missing.
    pub fn resolve(&self) -> CommandHandle {
        let found = std::iter::once(&self.program)
            .chain(&self.alternatives)
            .find(|program| find_executable(program).is_some());

        match found {
            Some(program) => resolve(program, self.args.clone(), self.options.clone()),
            None => CommandHandle::missing(&self.program),
        }
    }
}

/// Tools available without any configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Ls,
    Rm,
    Cp,
    Find,
    Mount,
    Umount,
    Python,
    Pip,
    Pytest,
    Black,
    Flake8,
    Pydocstyle,
    Docker,
}

impl Builtin {
    /// Every built-in tool, in listing order.
    pub const ALL: [Self; 13] = [
        Self::Ls,
        Self::Rm,
        Self::Cp,
        Self::Find,
        Self::Mount,
        Self::Umount,
        Self::Python,
        Self::Pip,
        Self::Pytest,
        Self::Black,
        Self::Flake8,
        Self::Pydocstyle,
        Self::Docker,
    ];

    /// Registered tool name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Ls => "ls",
            Self::Rm => "rm",
            Self::Cp => "cp",
            Self::Find => "find",
            Self::Mount => "mount",
            Self::Umount => "umount",
            Self::Python => "python",
            Self::Pip => "pip",
            Self::Pytest => "pytest",
            Self::Black => "black",
            Self::Flake8 => "flake8",
            Self::Pydocstyle => "pydocstyle",
            Self::Docker => "docker",
        }
    }

    /// Look a built-in up by its registered name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.name() == name)
    }

    pub fn spec(self) -> ToolSpec {
        let name = self.name();
        match self {
            Self::Ls | Self::Mount | Self::Pip | Self::Black | Self::Docker => {
                ToolSpec::new(name, name)
            }
            Self::Rm => ToolSpec::new(name, "rm").with_args(["-rf"]),
            Self::Cp => ToolSpec::new(name, "cp").with_args(["-rf"]),
            Self::Find => ToolSpec::new(name, "find")
                .with_options(CommandOptions::new().with_stdout(OutputTarget::Capture)),
            Self::Umount => ToolSpec::new(name, "umount").with_args(["-f"]),
            Self::Python => ToolSpec::new(name, "python3").with_alternatives(["python"]),
            // pytest uses 1-5 for test failures, interruptions, usage errors
            // and empty collections; callers inspect the code themselves.
            Self::Pytest => ToolSpec::new(name, "py.test")
                .with_alternatives(["pytest"])
                .with_args(["-s"])
                .with_options(CommandOptions::new().with_tee(false).with_ok_codes(0..=5)),
            Self::Flake8 | Self::Pydocstyle => ToolSpec::new(name, name)
                .with_options(CommandOptions::new().with_ok_codes([0, 1])),
        }
    }

    /// Resolve this tool on `PATH`.
    pub fn resolve(self) -> CommandHandle {
        self.spec().resolve()
    }
}

/// Resolved tools keyed by name.
#[derive(Debug, Clone, Default)]
pub struct Apps {
    tools: BTreeMap<String, CommandHandle>,
}

impl Apps {
    /// Resolve a set of specs. Later specs replace earlier ones with the same name.
    pub fn from_specs(specs: impl IntoIterator<Item = ToolSpec>) -> Self {
        let tools = specs
            .into_iter()
            .map(|spec| (spec.name.clone(), spec.resolve()))
            .collect();
        Self { tools }
    }

    /// All built-in tools.
    pub fn builtin() -> Self {
        Self::from_specs(Builtin::ALL.into_iter().map(Builtin::spec))
    }

    /// Built-in tools with configured tools layered on top by name.
    pub fn with_config(config: &ReceptConfig) -> Self {
        let specs = Builtin::ALL
            .into_iter()
            .map(Builtin::spec)
            .chain(config.tool_specs());
        Self::from_specs(specs)
    }

    /// Handle registered under `name`.
    pub fn get(&self, name: &str) -> Option<&CommandHandle> {
        self.tools.get(name)
    }

    /// Like [`Apps::get`] but an unknown name is an error.
    pub fn require(&self, name: &str) -> Result<&CommandHandle> {
        self.get(name).ok_or_else(|| ReceptError::UnknownTool {
            name: name.to_string(),
        })
    }

    /// Handle registered under `name`, or `name` resolved directly on `PATH`.
    ///
    /// An unregistered name that is not on `PATH` yields a fallback handle.
    pub fn handle(&self, name: &str) -> CommandHandle {
        self.get(name)
            .cloned()
            .unwrap_or_else(|| resolve(name, Vec::<String>::new(), CommandOptions::default()))
    }

    /// Registered tool names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CommandHandle)> {
        self.tools.iter().map(|(name, handle)| (name.as_str(), handle))
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
