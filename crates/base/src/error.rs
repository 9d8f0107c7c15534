use std::error::Error as StdError;
use std::fmt::{self, Display, Formatter};

use crate::SharedString;

type BoxedSource = Box<dyn StdError + Send + Sync + 'static>;

/// Classification of a [`HostError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Free-form error message.
    Message(String),
    /// Wrapper kind for I/O failures.
    Io,
    /// The working directory could not be changed to `path`.
    DirectoryChangeFailed { path: SharedString },
}

/// Error type used by shared scriptos infrastructure.
#[derive(Debug)]
pub struct HostError {
    kind: ErrorKind,
    source: Option<BoxedSource>,
}

impl HostError {
    /// Creates an error of the given kind without a source.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Creates a directory-change failure for `path`.
    pub fn directory_change_failed(path: impl Into<SharedString>) -> Self {
        Self::new(ErrorKind::DirectoryChangeFailed { path: path.into() })
    }

    /// Returns the error classification.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Attaches an underlying cause.
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Returns the underlying cause, if one was attached.
    pub fn source(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.source.as_deref()
    }
}

impl Display for HostError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::Message(message) => f.write_str(message),
            ErrorKind::Io => match &self.source {
                Some(source) => write!(f, "I/O error: {source}"),
                None => f.write_str("I/O error"),
            },
            ErrorKind::DirectoryChangeFailed { path } => {
                write!(f, "unable to switch to directory '{path}'")
            }
        }
    }
}

impl StdError for HostError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|source| source as &(dyn StdError + 'static))
    }
}

impl From<std::io::Error> for HostError {
    fn from(value: std::io::Error) -> Self {
        Self::new(ErrorKind::Io).with_source(value)
    }
}

impl From<String> for HostError {
    fn from(value: String) -> Self {
        Self::new(ErrorKind::Message(value))
    }
}

impl From<&str> for HostError {
    fn from(value: &str) -> Self {
        Self::new(ErrorKind::Message(value.to_owned()))
    }
}

/// Builds a [`HostError`] with a formatted [`ErrorKind::Message`].
#[macro_export]
macro_rules! host_message_error {
    ($($arg:tt)*) => {
        $crate::HostError::new($crate::ErrorKind::Message(format!($($arg)*)))
    };
}

/// Result alias that uses [`HostError`] as its error type.
pub type Result<T> = std::result::Result<T, HostError>;
