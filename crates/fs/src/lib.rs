//! Working-directory access for scriptos components.
//!
//! The process working directory is global mutable state. Every change to
//! it made by scriptos goes through [`change_directory`], which holds the
//! lock returned by [`lock_working_directory`] while it runs.

pub mod in_memory_working_directory;
pub mod process_working_directory;
pub mod working_directory;

pub use in_memory_working_directory::InMemoryWorkingDirectory;
pub use process_working_directory::{
    change_directory, current_directory, lock_working_directory, ProcessWorkingDirectory,
};
pub use working_directory::WorkingDirectory;
