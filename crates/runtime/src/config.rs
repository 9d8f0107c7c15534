use serde::Deserialize;

/// Settings for the `os` native function library.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OsLibraryConfig {
    /// Append the OS error reason to `os.chdir` failure messages.
    ///
    /// Off by default so the message is exactly
    /// `unable to switch to directory '<path>'`.
    pub detailed_errors: bool,
}
