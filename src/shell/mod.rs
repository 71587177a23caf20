//! Working-directory management and external command execution.
//!
//! - [`dirs`](self::dirs) - `cwd`, `cd` and the reentrant, thread-safe `pushd`
//! - [`command`] - executable lookup and reusable [`CommandHandle`]s
//! - [`apps`] - the registry of wrapped tools

pub mod apps;
pub mod command;
pub mod dirs;

pub use apps::{Apps, Builtin, ToolSpec};
pub use command::{
    find_executable, resolve, search_path, CommandHandle, CommandOptions, CommandResult,
    OutputCallback, OutputTarget, DEFAULT_OK_CODES,
};
pub use self::dirs::{cd, cwd, pushd, pushd_lock, DirLock, DirLockGuard};
