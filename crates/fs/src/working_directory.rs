use std::path::PathBuf;

use scriptos_base::Result;

/// Current-directory operations used by scriptos host functions.
pub trait WorkingDirectory {
    /// Returns the current working directory.
    fn current_dir(&self) -> Result<PathBuf>;

    /// Changes the current working directory to `path`.
    ///
    /// Relative paths resolve against the current working directory. On
    /// failure the error kind is `DirectoryChangeFailed` carrying `path`
    /// exactly as given.
    fn change_dir(&self, path: &str) -> Result<()>;
}
