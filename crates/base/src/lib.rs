//! Common infrastructure shared by scriptos components.

pub mod error;
pub mod logging;
pub mod shared_string;

pub use error::{ErrorKind, HostError, Result};
pub use parking_lot::{const_reentrant_mutex, Mutex, ReentrantMutex, ReentrantMutexGuard};
pub use shared_string::SharedString;
