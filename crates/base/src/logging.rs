use std::sync::Once;

use tracing_subscriber::EnvFilter;

use crate::error::Result;
use crate::{ErrorKind, HostError};

static LOGGING_INIT: Once = Once::new();

/// Initializes global logging for scriptos processes.
///
/// Repeated calls are treated as no-ops once initialization has run.
pub fn init_logging() -> Result<()> {
    let mut init_result = Ok(());

    LOGGING_INIT.call_once(|| {
        init_result = tracing_subscriber::fmt()
            .with_env_filter(default_env_filter())
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|error| {
                HostError::new(ErrorKind::Message(
                    "failed to initialize logging".to_owned(),
                ))
                .with_source(StringError(error.to_string()))
            });
    });

    init_result
}

fn default_env_filter() -> EnvFilter {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new("info"),
    }
}

// Boxed subscriber init errors do not implement `Error` themselves.
#[derive(Debug)]
struct StringError(String);

impl std::fmt::Display for StringError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for StringError {}

#[cfg(test)]
mod tests {
    use super::init_logging;

    #[test]
    fn init_logging_is_idempotent() {
        assert!(init_logging().is_ok());
        assert!(init_logging().is_ok());
    }
}
