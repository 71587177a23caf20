//! External command resolution and execution.
//!
//! [`resolve`] looks a program up on `PATH` once and bakes default arguments
//! and options into a reusable [`CommandHandle`]. When the program cannot be
//! found, resolution still succeeds: the handle is a fallback that stops the
//! process with a red error message the first time it is invoked.
//!
//! # Example
//!
//! ```no_run
//! use recept::shell::{resolve, CommandOptions};
//!
//! let flake8 = resolve("flake8", ["--max-line-length", "100"],
//!     CommandOptions::new().with_ok_codes([0, 1]));
//! let result = flake8.call(["src"])?;
//! println!("flake8 exited with {:?}", result.exit_code);
//! # Ok::<(), recept::ReceptError>(())
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::error::{ReceptError, Result};

/// Exit codes accepted when a handle does not configure its own.
pub const DEFAULT_OK_CODES: [i32; 1] = [0];

/// Callback receiving streamed output one line at a time (without the newline).
pub type OutputCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// Where a child's output stream goes.
#[derive(Clone, Default)]
pub enum OutputTarget {
    /// Stream to this process's stdout.
    #[default]
    Stdout,
    /// Stream to this process's stderr.
    Stderr,
    /// Discard.
    Null,
    /// Keep in memory only, without streaming.
    Capture,
    /// Stream lines into a callback.
    Callback(OutputCallback),
}

impl OutputTarget {
    /// Whether output is shown as it arrives.
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Stdout | Self::Stderr | Self::Callback(_))
    }

    fn stdio(&self) -> Stdio {
        match self {
            Self::Null => Stdio::null(),
            _ => Stdio::piped(),
        }
    }

    fn emit(&self, chunk: &str) {
        match self {
            Self::Stdout => {
                let mut out = std::io::stdout().lock();
                let _ = out.write_all(chunk.as_bytes());
                let _ = out.flush();
            }
            Self::Stderr => {
                let mut err = std::io::stderr().lock();
                let _ = err.write_all(chunk.as_bytes());
                let _ = err.flush();
            }
            Self::Callback(callback) => callback(chunk.trim_end_matches(['\n', '\r'])),
            Self::Null | Self::Capture => {}
        }
    }
}

impl fmt::Debug for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => f.write_str("Stdout"),
            Self::Stderr => f.write_str("Stderr"),
            Self::Null => f.write_str("Null"),
            Self::Capture => f.write_str("Capture"),
            Self::Callback(_) => f.write_str("Callback(..)"),
        }
    }
}

/// Options baked into a handle or passed at call time.
///
/// Every field is optional so two sets can be layered with
/// [`CommandOptions::layered`]: values set on the overriding side win, `env`
/// is merged key by key.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Destination for the child's stdout (default: [`OutputTarget::Stdout`]).
    pub stdout: Option<OutputTarget>,

    /// Destination for the child's stderr (default: [`OutputTarget::Stderr`]).
    pub stderr: Option<OutputTarget>,

    /// Also capture output that is streamed live (default: true).
    pub tee: Option<bool>,

    /// Exit codes treated as success (default: [`DEFAULT_OK_CODES`]).
    pub ok_codes: Option<BTreeSet<i32>>,

    /// Working directory for the child.
    pub cwd: Option<PathBuf>,

    /// Extra environment variables (merged with the inherited environment).
    pub env: BTreeMap<String, String>,
}

impl CommandOptions {
    /// Empty option set: every value falls through to the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stdout(mut self, target: OutputTarget) -> Self {
        self.stdout = Some(target);
        self
    }

    pub fn with_stderr(mut self, target: OutputTarget) -> Self {
        self.stderr = Some(target);
        self
    }

    pub fn with_tee(mut self, tee: bool) -> Self {
        self.tee = Some(tee);
        self
    }

    pub fn with_ok_codes(mut self, codes: impl IntoIterator<Item = i32>) -> Self {
        self.ok_codes = Some(codes.into_iter().collect());
        self
    }

    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Layer `overrides` on top of `self`.
    pub fn layered(&self, overrides: &Self) -> Self {
        let mut env = self.env.clone();
        env.extend(
            overrides
                .env
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );

        Self {
            stdout: overrides.stdout.clone().or_else(|| self.stdout.clone()),
            stderr: overrides.stderr.clone().or_else(|| self.stderr.clone()),
            tee: overrides.tee.or(self.tee),
            ok_codes: overrides.ok_codes.clone().or_else(|| self.ok_codes.clone()),
            cwd: overrides.cwd.clone().or_else(|| self.cwd.clone()),
            env,
        }
    }

    /// Effective stdout destination.
    pub fn stdout_target(&self) -> OutputTarget {
        self.stdout.clone().unwrap_or(OutputTarget::Stdout)
    }

    /// Effective stderr destination.
    pub fn stderr_target(&self) -> OutputTarget {
        self.stderr.clone().unwrap_or(OutputTarget::Stderr)
    }

    /// Effective tee setting.
    pub fn tees(&self) -> bool {
        self.tee.unwrap_or(true)
    }

    /// Effective accepted exit codes.
    pub fn accepted_codes(&self) -> BTreeSet<i32> {
        self.ok_codes
            .clone()
            .unwrap_or_else(|| DEFAULT_OK_CODES.into_iter().collect())
    }

    /// Whether `code` counts as success. A signal death (`None`) never does.
    pub fn accepts(&self, code: Option<i32>) -> bool {
        match (code, &self.ok_codes) {
            (None, _) => false,
            (Some(code), Some(codes)) => codes.contains(&code),
            (Some(code), None) => DEFAULT_OK_CODES.contains(&code),
        }
    }
}

/// Result of a command whose exit code was accepted.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Captured standard output (empty when not captured).
    pub stdout: String,

    /// Captured standard error (empty when not captured).
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether the exit code was 0.
    pub success: bool,
}

/// Reusable handle on an external program.
///
/// Cloning is cheap relative to process spawning; handles are never mutated,
/// [`CommandHandle::bake`] returns a new one.
#[derive(Debug, Clone)]
pub struct CommandHandle {
    name: String,
    resolution: Resolution,
}

#[derive(Debug, Clone)]
enum Resolution {
    Resolved {
        program: PathBuf,
        args: Vec<String>,
        options: CommandOptions,
    },
    Missing,
}

/// Resolve `name` on `PATH` and bake `args` and `options` into a handle.
///
/// Never fails. If the executable is not found the returned handle is a
/// fallback: invoking it prints ``Command `name` not found`` and exits the
/// process with status 1.
pub fn resolve<I, S>(name: &str, args: I, options: CommandOptions) -> CommandHandle
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    match find_executable(name) {
        Some(program) => {
            tracing::debug!("resolved {} -> {}", name, program.display());
            CommandHandle {
                name: name.to_string(),
                resolution: Resolution::Resolved {
                    program,
                    args: args.into_iter().map(Into::into).collect(),
                    options,
                },
            }
        }
        None => {
            tracing::warn!("command `{}` not found on PATH", name);
            CommandHandle::missing(name)
        }
    }
}

impl CommandHandle {
    /// Fallback handle for a program that could not be found.
    pub fn missing(name: &str) -> Self {
        Self {
            name: name.to_string(),
            resolution: Resolution::Missing,
        }
    }

    /// The name the handle was resolved from.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolved executable path, `None` for a fallback handle.
    pub fn program(&self) -> Option<&Path> {
        match &self.resolution {
            Resolution::Resolved { program, .. } => Some(program),
            Resolution::Missing => None,
        }
    }

    /// Whether the executable was found.
    pub fn is_available(&self) -> bool {
        matches!(self.resolution, Resolution::Resolved { .. })
    }

    /// Baked default arguments.
    pub fn default_args(&self) -> &[String] {
        match &self.resolution {
            Resolution::Resolved { args, .. } => args,
            Resolution::Missing => &[],
        }
    }

    /// Baked default options.
    pub fn default_options(&self) -> CommandOptions {
        match &self.resolution {
            Resolution::Resolved { options, .. } => options.clone(),
            Resolution::Missing => CommandOptions::default(),
        }
    }

    /// New handle with extra arguments appended and `options` layered on top.
    pub fn bake<I, S>(&self, args: I, options: &CommandOptions) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match &self.resolution {
            Resolution::Resolved {
                program,
                args: baked,
                options: baked_options,
            } => {
                let mut all_args = baked.clone();
                all_args.extend(args.into_iter().map(Into::into));
                Self {
                    name: self.name.clone(),
                    resolution: Resolution::Resolved {
                        program: program.clone(),
                        args: all_args,
                        options: baked_options.layered(options),
                    },
                }
            }
            Resolution::Missing => self.clone(),
        }
    }

    /// Render `program arg...` for display.
    pub fn command_line(&self) -> String {
        match &self.resolution {
            Resolution::Resolved { program, args, .. } => render(program, args),
            Resolution::Missing => self.name.clone(),
        }
    }

    /// Run with extra arguments and no call-time options.
    pub fn call<I, S>(&self, args: I) -> Result<CommandResult>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.run(args, &CommandOptions::default())
    }

    /// Run the program with baked args followed by `args`.
    ///
    /// # Errors
    ///
    /// - `CommandSpawn` if the process cannot be started
    /// - `CommandExecution` if its exit code is not accepted
    ///
    /// A fallback handle does not return: it reports the missing program and
    /// exits the process with status 1.
    pub fn run<I, S>(&self, args: I, options: &CommandOptions) -> Result<CommandResult>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let Resolution::Resolved {
            program,
            args: baked,
            options: baked_options,
        } = &self.resolution
        else {
            missing_command(&self.name)
        };

        let mut argv = baked.clone();
        argv.extend(args.into_iter().map(Into::into));

        execute(program, &argv, &baked_options.layered(options))
    }
}

fn missing_command(name: &str) -> ! {
    crate::ui::exit(&format!("Command `{}` not found", name), 1)
}

fn execute(program: &Path, args: &[String], options: &CommandOptions) -> Result<CommandResult> {
    let start = Instant::now();
    let command_line = render(program, args);

    let mut cmd = Command::new(program);
    cmd.args(args);

    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }

    for (key, value) in &options.env {
        cmd.env(key, value);
    }

    let stdout_target = options.stdout_target();
    let stderr_target = options.stderr_target();
    let tee = options.tees();

    cmd.stdin(Stdio::inherit());
    cmd.stdout(stdout_target.stdio());
    cmd.stderr(stderr_target.stdio());

    tracing::debug!("running {}", command_line);

    let mut child = cmd.spawn().map_err(|source| ReceptError::CommandSpawn {
        command: command_line.clone(),
        source,
    })?;

    let stdout_pump = child
        .stdout
        .take()
        .map(|pipe| pump(pipe, stdout_target, tee));
    let stderr_pump = child
        .stderr
        .take()
        .map(|pipe| pump(pipe, stderr_target, tee));

    let stdout = stdout_pump
        .map(|h| h.join().unwrap_or_default())
        .unwrap_or_default();
    let stderr = stderr_pump
        .map(|h| h.join().unwrap_or_default())
        .unwrap_or_default();

    let status = child.wait().map_err(|source| ReceptError::CommandSpawn {
        command: command_line.clone(),
        source,
    })?;

    let duration = start.elapsed();
    let exit_code = status.code();

    tracing::debug!(
        "{} exited with {:?} after {:?}",
        command_line,
        exit_code,
        duration
    );

    if !options.accepts(exit_code) {
        return Err(ReceptError::CommandExecution {
            command: command_line,
            code: exit_code,
            stdout,
            stderr,
        });
    }

    Ok(CommandResult {
        exit_code,
        stdout,
        stderr,
        duration,
        success: exit_code == Some(0),
    })
}

/// Forward a child pipe to its target on a reader thread, returning what was captured.
fn pump<R>(pipe: R, target: OutputTarget, tee: bool) -> JoinHandle<String>
where
    R: Read + Send + 'static,
{
    let capture = matches!(target, OutputTarget::Capture) || (tee && target.is_live());

    thread::spawn(move || {
        let mut reader = BufReader::new(pipe);
        let mut captured = String::new();
        let mut buf = Vec::new();

        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) | Err(_) => break,
                Ok(_) => {
                    let chunk = String::from_utf8_lossy(&buf);
                    target.emit(&chunk);
                    if capture {
                        captured.push_str(&chunk);
                    }
                }
            }
        }

        captured
    })
}

fn render(program: &Path, args: &[String]) -> String {
    let mut line = program.display().to_string();
    for arg in args {
        line.push(' ');
        line.push_str(arg);
    }
    line
}

/// Locate an executable the way a shell would.
///
/// Names containing a path separator are checked directly; bare names are
/// searched for in each `PATH` entry in order.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    if name.is_empty() {
        return None;
    }

    let path = Path::new(name);
    if path.is_absolute() || path.components().count() > 1 {
        return candidates(path)
            .into_iter()
            .find(|candidate| is_executable_file(candidate))
            .and_then(|found| std::path::absolute(found).ok());
    }

    search_path(name, &parse_system_path())
}

/// Search `entries` in order for an executable called `name`.
pub fn search_path(name: &str, entries: &[PathBuf]) -> Option<PathBuf> {
    entries
        .iter()
        .filter(|dir| !dir.as_os_str().is_empty())
        .flat_map(|dir| candidates(&dir.join(name)))
        .find(|candidate| is_executable_file(candidate))
}

/// Parse the system PATH environment variable into a list of directories.
pub fn parse_system_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}

#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    true
}

fn is_executable_file(path: &Path) -> bool {
    path.is_file() && is_executable(path)
}

#[cfg(windows)]
fn candidates(path: &Path) -> Vec<PathBuf> {
    let mut out = vec![path.to_path_buf()];
    let exts = std::env::var("PATHEXT").unwrap_or_else(|_| ".COM;.EXE;.BAT;.CMD".to_string());
    for ext in exts.split(';').filter(|e| !e.is_empty()) {
        let mut with_ext = path.as_os_str().to_os_string();
        with_ext.push(ext);
        out.push(PathBuf::from(with_ext));
    }
    out
}

#[cfg(not(windows))]
fn candidates(path: &Path) -> Vec<PathBuf> {
    vec![path.to_path_buf()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tempfile::TempDir;

    #[cfg(unix)]
    fn write_executable(path: &Path, mode: u32) {
        use std::os::unix::fs::PermissionsExt;
        std::fs::write(path, "#!/bin/sh\nexit 0\n").unwrap();
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode)).unwrap();
    }

    #[cfg(unix)]
    fn sh() -> CommandHandle {
        resolve("sh", ["-c"], CommandOptions::new())
    }

    #[test]
    fn missing_program_resolves_to_fallback() {
        let handle = resolve(
            "definitely-not-a-real-binary-xyz",
            ["--flag"],
            CommandOptions::new(),
        );

        assert!(!handle.is_available());
        assert!(handle.program().is_none());
        assert!(handle.default_args().is_empty());
        assert_eq!(handle.name(), "definitely-not-a-real-binary-xyz");
        assert_eq!(handle.command_line(), "definitely-not-a-real-binary-xyz");
    }

    #[test]
    fn find_executable_rejects_empty_name() {
        assert!(find_executable("").is_none());
    }

    #[cfg(unix)]
    #[test]
    fn find_executable_locates_sh() {
        let found = find_executable("sh").unwrap();
        assert!(found.is_absolute());
        assert!(found.ends_with("sh"));
    }

    #[cfg(unix)]
    #[test]
    fn find_executable_accepts_explicit_path() {
        let temp = TempDir::new().unwrap();
        let tool = temp.path().join("tool");
        write_executable(&tool, 0o755);

        assert_eq!(find_executable(tool.to_str().unwrap()), Some(tool));
    }

    #[cfg(unix)]
    #[test]
    fn search_path_finds_first_executable_entry() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        write_executable(&first.path().join("tool"), 0o644);
        write_executable(&second.path().join("tool"), 0o755);

        let entries = vec![
            PathBuf::new(),
            first.path().to_path_buf(),
            second.path().to_path_buf(),
        ];

        assert_eq!(
            search_path("tool", &entries),
            Some(second.path().join("tool"))
        );
    }

    #[cfg(unix)]
    #[test]
    fn search_path_ignores_directories() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("tool")).unwrap();

        assert!(search_path("tool", &[temp.path().to_path_buf()]).is_none());
    }

    #[test]
    fn is_executable_returns_false_for_nonexistent_file() {
        assert!(!is_executable_file(Path::new("/nonexistent/path/to/file")));
    }

    #[test]
    fn layered_options_prefer_overrides() {
        let base = CommandOptions::new()
            .with_ok_codes([0, 1])
            .with_tee(false)
            .with_env("A", "1")
            .with_env("B", "2");
        let overrides = CommandOptions::new()
            .with_ok_codes([0, 5])
            .with_env("B", "3");

        let merged = base.layered(&overrides);

        assert_eq!(merged.accepted_codes(), BTreeSet::from([0, 5]));
        assert!(!merged.tees());
        assert_eq!(merged.env["A"], "1");
        assert_eq!(merged.env["B"], "3");
    }

    #[test]
    fn default_options() {
        let options = CommandOptions::new();
        assert!(options.tees());
        assert!(matches!(options.stdout_target(), OutputTarget::Stdout));
        assert!(matches!(options.stderr_target(), OutputTarget::Stderr));
        assert!(options.accepts(Some(0)));
        assert!(!options.accepts(Some(1)));
        assert!(!options.accepts(None));
    }

    #[test]
    fn output_target_liveness() {
        assert!(OutputTarget::Stdout.is_live());
        assert!(OutputTarget::Stderr.is_live());
        assert!(OutputTarget::Callback(Arc::new(|_: &str| {})).is_live());
        assert!(!OutputTarget::Capture.is_live());
        assert!(!OutputTarget::Null.is_live());
    }

    #[cfg(unix)]
    #[test]
    fn exit_code_outside_accepted_set_fails() {
        let handle = sh().bake(
            Vec::<String>::new(),
            &CommandOptions::new().with_ok_codes([0, 1, 2]),
        );

        let err = handle.call(["exit 3"]).unwrap_err();
        match err {
            ReceptError::CommandExecution { code, .. } => assert_eq!(code, Some(3)),
            other => panic!("unexpected error: {other}"),
        }

        let result = handle.call(["exit 1"]).unwrap();
        assert_eq!(result.exit_code, Some(1));
        assert!(!result.success);
    }

    #[cfg(unix)]
    #[test]
    fn call_time_ok_codes_override_baked() {
        let handle = resolve("sh", ["-c"], CommandOptions::new().with_ok_codes([0, 4]));

        assert!(handle.call(["exit 4"]).is_ok());

        let strict = CommandOptions::new().with_ok_codes([0]);
        assert!(handle.run(["exit 4"], &strict).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn execution_error_carries_captured_output() {
        let options = CommandOptions::new().with_stdout(OutputTarget::Capture);
        let err = sh().run(["echo partial; exit 4"], &options).unwrap_err();

        match err {
            ReceptError::CommandExecution { stdout, code, .. } => {
                assert_eq!(code, Some(4));
                assert!(stdout.contains("partial"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn tee_captures_streamed_output() {
        let result = sh().call(["echo hello"]).unwrap();
        assert!(result.success);
        assert_eq!(result.stdout, "hello\n");
    }

    #[cfg(unix)]
    #[test]
    fn tee_disabled_streams_without_capturing() {
        let options = CommandOptions::new().with_tee(false);
        let result = sh().run(["echo hello"], &options).unwrap();
        assert!(result.stdout.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn capture_target_collects_stderr() {
        let options = CommandOptions::new().with_stderr(OutputTarget::Capture);
        let result = sh().run(["echo oops >&2"], &options).unwrap();
        assert!(result.stderr.contains("oops"));
        assert!(result.stdout.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn null_target_discards_output() {
        let options = CommandOptions::new().with_stdout(OutputTarget::Null);
        let result = sh().run(["echo hidden"], &options).unwrap();
        assert!(result.stdout.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn callback_target_receives_lines() {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&lines);
        let callback: OutputCallback = Arc::new(move |line: &str| {
            sink.lock().unwrap().push(line.to_string());
        });

        let options = CommandOptions::new().with_stdout(OutputTarget::Callback(callback));
        let result = sh().run(["echo line1; echo line2"], &options).unwrap();

        assert_eq!(*lines.lock().unwrap(), vec!["line1", "line2"]);
        assert_eq!(result.stdout, "line1\nline2\n");
    }

    #[cfg(unix)]
    #[test]
    fn env_is_merged_with_baked_values() {
        let handle = resolve(
            "sh",
            ["-c"],
            CommandOptions::new()
                .with_stdout(OutputTarget::Capture)
                .with_env("RECEPT_A", "1")
                .with_env("RECEPT_B", "2"),
        );

        let call = CommandOptions::new().with_env("RECEPT_B", "3");
        let result = handle.run(["echo $RECEPT_A$RECEPT_B"], &call).unwrap();
        assert_eq!(result.stdout.trim(), "13");
    }

    #[cfg(unix)]
    #[test]
    fn cwd_option_sets_child_directory() {
        let temp = TempDir::new().unwrap();
        let expected = temp.path().canonicalize().unwrap();

        let options = CommandOptions::new()
            .with_stdout(OutputTarget::Capture)
            .with_cwd(temp.path());
        let result = sh().run(["pwd -P"], &options).unwrap();

        assert_eq!(PathBuf::from(result.stdout.trim()), expected);
    }

    #[cfg(unix)]
    #[test]
    fn bake_appends_without_mutating_original() {
        let base = sh();
        let baked = base.bake(["echo baked"], &CommandOptions::new().with_tee(false));

        assert_eq!(base.default_args(), ["-c"]);
        assert_eq!(baked.default_args(), ["-c", "echo baked"]);
        assert_eq!(base.default_options().tee, None);
        assert_eq!(baked.default_options().tee, Some(false));
        assert!(baked.command_line().ends_with("sh -c echo baked"));
    }

    #[test]
    fn bake_on_fallback_stays_fallback() {
        let handle = CommandHandle::missing("ghost").bake(["x"], &CommandOptions::new());
        assert!(!handle.is_available());
        assert_eq!(handle.name(), "ghost");
    }

    #[cfg(unix)]
    #[test]
    fn spawn_failure_is_reported() {
        let temp = TempDir::new().unwrap();
        let tool = temp.path().join("vanishing");
        write_executable(&tool, 0o755);

        let handle = resolve(tool.to_str().unwrap(), Vec::<String>::new(), CommandOptions::new());
        std::fs::remove_file(&tool).unwrap();

        assert!(matches!(
            handle.call(Vec::<String>::new()),
            Err(ReceptError::CommandSpawn { .. })
        ));
    }
}
