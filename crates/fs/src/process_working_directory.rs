use std::path::PathBuf;

use scriptos_base::{
    const_reentrant_mutex, host_message_error, HostError, ReentrantMutex, ReentrantMutexGuard,
    Result,
};
use tracing::debug;

use crate::WorkingDirectory;

static WORKING_DIRECTORY_LOCK: ReentrantMutex<()> = const_reentrant_mutex(());

/// Acquires the process-wide working-directory lock.
///
/// Hold the guard across any sequence that changes the directory and then
/// depends on it. The lock is reentrant, so [`change_directory`] may be
/// called while the guard is held on the same thread.
pub fn lock_working_directory() -> ReentrantMutexGuard<'static, ()> {
    WORKING_DIRECTORY_LOCK.lock()
}

/// Changes the process working directory to `path`.
///
/// One attempt is made. Any OS failure yields
/// `unable to switch to directory '<path>'` with the OS error attached as
/// the source.
pub fn change_directory(path: &str) -> Result<()> {
    let _guard = lock_working_directory();
    debug!(path, "changing working directory");
    std::env::set_current_dir(path).map_err(|error| {
        debug!(path, %error, "working directory change failed");
        HostError::directory_change_failed(path).with_source(error)
    })
}

/// Returns the process working directory.
pub fn current_directory() -> Result<PathBuf> {
    std::env::current_dir().map_err(|error| {
        host_message_error!("unable to determine current directory").with_source(error)
    })
}

/// [`WorkingDirectory`] backed by the real process state.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessWorkingDirectory;

impl WorkingDirectory for ProcessWorkingDirectory {
    fn current_dir(&self) -> Result<PathBuf> {
        current_directory()
    }

    fn change_dir(&self, path: &str) -> Result<()> {
        change_directory(path)
    }
}
