use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use scriptos_base::{HostError, Mutex, Result};

use crate::WorkingDirectory;

#[derive(Debug)]
struct State {
    dirs: HashSet<PathBuf>,
    files: HashSet<PathBuf>,
    current: PathBuf,
}

impl Default for State {
    fn default() -> Self {
        let root = PathBuf::from("/");
        Self {
            dirs: HashSet::from([root.clone()]),
            files: HashSet::new(),
            current: root,
        }
    }
}

/// In-memory working directory over a virtual tree, for tests and
/// deterministic behavior.
///
/// Starts at `/` with an otherwise empty tree.
#[derive(Debug, Default)]
pub struct InMemoryWorkingDirectory {
    state: Mutex<State>,
}

impl InMemoryWorkingDirectory {
    fn lock_state(&self) -> impl std::ops::DerefMut<Target = State> + '_ {
        self.state.lock()
    }

    /// Adds a directory and all of its ancestors to the virtual tree.
    pub fn create_dir_all(&self, path: &str) {
        let mut state = self.lock_state();
        let resolved = resolve(&state.current, path);
        for ancestor in resolved.ancestors() {
            state.dirs.insert(ancestor.to_path_buf());
        }
    }

    /// Adds a regular file, creating its parent directories.
    pub fn create_file(&self, path: &str) {
        let mut state = self.lock_state();
        let resolved = resolve(&state.current, path);
        if let Some(parent) = resolved.parent() {
            for ancestor in parent.ancestors() {
                state.dirs.insert(ancestor.to_path_buf());
            }
        }
        state.files.insert(resolved);
    }
}

/// Resolves `path` lexically against `current`, folding `.` and `..`.
fn resolve(current: &Path, path: &str) -> PathBuf {
    let mut resolved = current.to_path_buf();
    for component in Path::new(path).components() {
        match component {
            Component::RootDir | Component::Prefix(_) => resolved = PathBuf::from("/"),
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            Component::Normal(name) => resolved.push(name),
        }
    }
    resolved
}

impl WorkingDirectory for InMemoryWorkingDirectory {
    fn current_dir(&self) -> Result<PathBuf> {
        Ok(self.lock_state().current.clone())
    }

    fn change_dir(&self, path: &str) -> Result<()> {
        let mut state = self.lock_state();
        if path.is_empty() {
            let io = std::io::Error::new(std::io::ErrorKind::NotFound, "empty path");
            return Err(HostError::directory_change_failed(path).with_source(io));
        }
        let resolved = resolve(&state.current, path);
        if state.dirs.contains(&resolved) {
            state.current = resolved;
            return Ok(());
        }
        let io = if state.files.contains(&resolved) {
            std::io::Error::new(std::io::ErrorKind::NotADirectory, "not a directory")
        } else {
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such directory")
        };
        Err(HostError::directory_change_failed(path).with_source(io))
    }
}
