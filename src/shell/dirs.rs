//! Process working-directory management.
//!
//! The current working directory is a single piece of process-wide state, so
//! every change to it goes through this module:
//!
//! - [`cwd`] reports it
//! - [`cd`] changes it permanently
//! - [`pushd`] changes it for the duration of a closure and restores it after
//!
//! # Thread safety
//!
//! `pushd` is thread-safe in a very coarse way: only one thread can be inside a
//! `pushd` session at a time. A thread may nest `pushd` calls freely (the lock
//! is reentrant), but every other thread entering `pushd` blocks until the
//! owning thread leaves its outermost scope. `cd` does not take the lock and
//! races with sessions running on other threads.
//!
//! # Example
//!
//! ```no_run
//! use recept::shell::{cwd, pushd};
//!
//! let before = cwd()?;
//! pushd("build", true, || {
//!     pushd("out", true, || {
//!         println!("{}", cwd()?.display()); // .../build/out
//!         Ok(())
//!     })
//! })?;
//! assert_eq!(cwd()?, before);
//! # Ok::<(), recept::ReceptError>(())
//! ```

use std::fmt;
use std::marker::PhantomData;
use std::path::{Component, Path, PathBuf};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, ThreadId};

use crate::error::{ReceptError, Result};

/// Lock serializing `pushd` sessions across threads.
static PUSHD_LOCK: DirLock = DirLock::new();

/// The process-wide lock taken by [`pushd`].
pub fn pushd_lock() -> &'static DirLock {
    &PUSHD_LOCK
}

/// Reentrant mutual exclusion keyed by thread identity.
///
/// The owning thread may call [`DirLock::acquire`] any number of times; the
/// lock is free again once every guard it handed out has been dropped.
pub struct DirLock {
    state: Mutex<LockState>,
    released: Condvar,
}

struct LockState {
    owner: Option<ThreadId>,
    depth: usize,
}

impl DirLock {
    /// Create an unheld lock.
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(LockState {
                owner: None,
                depth: 0,
            }),
            released: Condvar::new(),
        }
    }

    /// Acquire the lock, blocking while another thread holds it.
    pub fn acquire(&self) -> DirLockGuard<'_> {
        let me = thread::current().id();
        let mut state = self.state();

        loop {
            match state.owner {
                None => {
                    state.owner = Some(me);
                    break;
                }
                Some(owner) if owner == me => break,
                Some(_) => {
                    state = self
                        .released
                        .wait(state)
                        .unwrap_or_else(PoisonError::into_inner);
                }
            }
        }

        state.depth += 1;
        DirLockGuard {
            lock: self,
            _not_send: PhantomData,
        }
    }

    /// Whether the calling thread currently holds the lock.
    pub fn is_held_by_current_thread(&self) -> bool {
        self.state().owner == Some(thread::current().id())
    }

    /// Number of outstanding guards held by the owning thread (0 when free).
    pub fn depth(&self) -> usize {
        self.state().depth
    }

    fn release(&self) {
        let mut state = self.state();
        state.depth = state.depth.saturating_sub(1);
        if state.depth == 0 {
            state.owner = None;
            drop(state);
            self.released.notify_one();
        }
    }

    fn state(&self) -> MutexGuard<'_, LockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for DirLock {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DirLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state();
        f.debug_struct("DirLock")
            .field("owner", &state.owner)
            .field("depth", &state.depth)
            .finish()
    }
}

/// RAII hold on a [`DirLock`]. Released on drop, on the acquiring thread.
pub struct DirLockGuard<'a> {
    lock: &'a DirLock,
    // Raw pointer marker keeps the guard !Send.
    _not_send: PhantomData<*const ()>,
}

impl Drop for DirLockGuard<'_> {
    fn drop(&mut self) {
        self.lock.release();
    }
}

impl fmt::Debug for DirLockGuard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirLockGuard").finish_non_exhaustive()
    }
}

/// Return the absolute path of the current working directory.
pub fn cwd() -> Result<PathBuf> {
    std::env::current_dir().map_err(|source| ReceptError::Filesystem {
        op: "read current directory",
        path: PathBuf::from("."),
        source,
    })
}

/// Change the working directory until the next `cd` or `pushd`.
///
/// With `create`, the directory and any missing ancestors are created first.
/// On failure the working directory is left unchanged.
pub fn cd(path: impl AsRef<Path>, create: bool) -> Result<()> {
    let path = path.as_ref();

    if create {
        create_dirs(path)?;
    }

    tracing::debug!("cd -> {}", path.display());
    change_dir(path)
}

/// Run `body` with `path` as the working directory, then restore the previous one.
///
/// The restore runs on every exit path, including a panic unwinding out of
/// `body`. Nested calls on the same thread restore in reverse order of entry.
///
/// # Errors
///
/// - creating or entering `path` fails: nothing was changed, the error is returned
/// - `body` fails: its error is returned; a failed restore is logged alongside it
/// - `body` succeeds but the restore fails: the restore error is returned
pub fn pushd<T, F>(path: impl AsRef<Path>, create: bool, body: F) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    let _session = PUSHD_LOCK.acquire();

    let restore_point = cwd()?;
    let target = absolute_path(path.as_ref())?;

    if create {
        create_dirs(&target)?;
    }

    tracing::debug!("pushd -> {}", target.display());
    change_dir(&target)?;

    let mut restore = Restore {
        restore_point,
        entered: target,
        done: false,
    };

    let outcome = body();

    match (outcome, restore.run()) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(restore_err)) => Err(restore_err),
        (Err(err), Ok(())) => Err(err),
        (Err(err), Err(restore_err)) => {
            tracing::error!("pushd restore failed: {}", restore_err);
            Err(err)
        }
    }
}

/// Pending return to the directory a `pushd` scope started from.
struct Restore {
    restore_point: PathBuf,
    entered: PathBuf,
    done: bool,
}

impl Restore {
    fn run(&mut self) -> Result<()> {
        self.done = true;
        tracing::debug!("pushd <- {}", self.entered.display());
        change_dir(&self.restore_point)
    }
}

impl Drop for Restore {
    fn drop(&mut self) {
        if !self.done {
            if let Err(e) = self.run() {
                tracing::error!("pushd restore failed: {}", e);
            }
        }
    }
}

/// Resolve `path` against the working directory and drop `.`/`..` segments.
fn absolute_path(path: &Path) -> Result<PathBuf> {
    let joined = std::path::absolute(path).map_err(|source| ReceptError::Filesystem {
        op: "resolve",
        path: path.to_path_buf(),
        source,
    })?;

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }

    Ok(normalized)
}

fn create_dirs(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|source| ReceptError::Filesystem {
        op: "create directory",
        path: path.to_path_buf(),
        source,
    })
}

fn change_dir(path: &Path) -> Result<()> {
    std::env::set_current_dir(path).map_err(|source| ReceptError::Filesystem {
        op: "enter directory",
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::Duration;

    #[test]
    fn lock_is_reentrant_on_same_thread() {
        let lock = DirLock::new();

        let outer = lock.acquire();
        let inner = lock.acquire();
        assert!(lock.is_held_by_current_thread());
        assert_eq!(lock.depth(), 2);

        drop(inner);
        assert!(lock.is_held_by_current_thread());
        assert_eq!(lock.depth(), 1);

        drop(outer);
        assert!(!lock.is_held_by_current_thread());
        assert_eq!(lock.depth(), 0);
    }

    #[test]
    fn lock_blocks_other_threads_until_outermost_release() {
        let lock = DirLock::new();
        let events = Mutex::new(Vec::new());
        let (started_tx, started_rx) = mpsc::channel();

        thread::scope(|s| {
            let outer = lock.acquire();
            let inner = lock.acquire();

            s.spawn(|| {
                started_tx.send(()).unwrap();
                let _guard = lock.acquire();
                events.lock().unwrap().push("other thread acquired");
            });

            started_rx.recv().unwrap();
            thread::sleep(Duration::from_millis(50));
            drop(inner);
            thread::sleep(Duration::from_millis(50));
            events.lock().unwrap().push("owner released");
            drop(outer);
        });

        assert_eq!(
            *events.lock().unwrap(),
            vec!["owner released", "other thread acquired"]
        );
    }

    #[test]
    fn lock_is_not_held_from_another_thread() {
        let lock = DirLock::new();
        let _guard = lock.acquire();

        thread::scope(|s| {
            let held = s.spawn(|| lock.is_held_by_current_thread()).join().unwrap();
            assert!(!held);
        });
    }

    #[test]
    fn lock_debug_shows_depth() {
        let lock = DirLock::default();
        let _guard = lock.acquire();
        assert!(format!("{:?}", lock).contains("depth: 1"));
    }

    #[cfg(unix)]
    #[test]
    fn absolute_path_collapses_dot_segments() {
        let resolved = absolute_path(Path::new("/srv/app/../data/./logs")).unwrap();
        assert_eq!(resolved, PathBuf::from("/srv/data/logs"));
    }

    #[cfg(unix)]
    #[test]
    fn absolute_path_does_not_climb_above_root() {
        let resolved = absolute_path(Path::new("/../../etc")).unwrap();
        assert_eq!(resolved, PathBuf::from("/etc"));
    }

    #[test]
    fn create_dirs_reports_filesystem_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let file = temp.path().join("plain-file");
        std::fs::write(&file, "x").unwrap();

        let err = create_dirs(&file.join("child")).unwrap_err();
        assert!(matches!(
            err,
            ReceptError::Filesystem {
                op: "create directory",
                ..
            }
        ));
    }
}
