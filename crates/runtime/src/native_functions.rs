//! Native functions of the `os` library.

use std::sync::Arc;

use scriptos_base::{HostError, SharedString};
use scriptos_fs::{ProcessWorkingDirectory, WorkingDirectory};
use tracing::debug;

use crate::{NativeFunction, NativeFunctionRegistry, OsLibraryConfig, RuntimeError, Type, Value};

/// Reads argument `position` (1-based) as a string.
///
/// Integers are accepted and converted to their decimal form.
fn check_string(
    function: &SharedString,
    args: &[Value],
    position: usize,
) -> Result<SharedString, RuntimeError> {
    match args.get(position - 1) {
        Some(Value::String(value)) => Ok(value.clone()),
        Some(Value::Integer(value)) => Ok(value.to_string().into()),
        other => Err(RuntimeError::BadArgument {
            position,
            function: function.clone(),
            expected: Type::String,
            got: other.map(Value::value_type),
        }),
    }
}

/// Name used in argument errors: the part after the library prefix.
fn short_name(name: &str) -> SharedString {
    name.rsplit('.').next().unwrap_or(name).into()
}

/// `os.chdir(path)`: changes the working directory.
///
/// Returns `true` on success, or `nil` and
/// `unable to switch to directory '<path>'` on failure.
pub struct ChdirFunction<W> {
    name: SharedString,
    short_name: SharedString,
    directory: Arc<W>,
    config: OsLibraryConfig,
}

impl<W: WorkingDirectory> ChdirFunction<W> {
    pub fn new(directory: Arc<W>, config: OsLibraryConfig) -> Self {
        let name = SharedString::from("os.chdir");
        Self {
            short_name: short_name(&name),
            name,
            directory,
            config,
        }
    }

    fn failure_message(&self, error: &HostError) -> SharedString {
        match error.source() {
            Some(source) if self.config.detailed_errors => format!("{error}: {source}").into(),
            _ => error.to_string().into(),
        }
    }
}

impl<W: WorkingDirectory + Send + Sync> NativeFunction for ChdirFunction<W> {
    fn name(&self) -> &SharedString {
        &self.name
    }

    fn param_types(&self) -> &[Type] {
        &[Type::String]
    }

    fn call(&self, args: Vec<Value>) -> Result<Vec<Value>, RuntimeError> {
        let path = check_string(&self.short_name, &args, 1)?;
        match self.directory.change_dir(&path) {
            Ok(()) => Ok(vec![Value::Bool(true)]),
            Err(error) => {
                debug!(path = %path, %error, "os.chdir reporting failure to script");
                Ok(vec![Value::Nil, Value::String(self.failure_message(&error))])
            }
        }
    }
}

/// `os.getcwd()`: returns the working directory as a string.
pub struct GetcwdFunction<W> {
    name: SharedString,
    directory: Arc<W>,
}

impl<W: WorkingDirectory> GetcwdFunction<W> {
    pub fn new(directory: Arc<W>) -> Self {
        Self {
            name: "os.getcwd".into(),
            directory,
        }
    }
}

impl<W: WorkingDirectory + Send + Sync> NativeFunction for GetcwdFunction<W> {
    fn name(&self) -> &SharedString {
        &self.name
    }

    fn param_types(&self) -> &[Type] {
        &[]
    }

    fn call(&self, _args: Vec<Value>) -> Result<Vec<Value>, RuntimeError> {
        let current = self.directory.current_dir()?;
        Ok(vec![Value::String(current.display().to_string().into())])
    }
}

/// Creates a registry with the `os` functions bound to the process.
pub fn create_os_registry(config: OsLibraryConfig) -> Arc<NativeFunctionRegistry> {
    create_os_registry_with(Arc::new(ProcessWorkingDirectory), config)
}

/// Creates a registry with the `os` functions bound to `directory`.
pub fn create_os_registry_with<W>(
    directory: Arc<W>,
    config: OsLibraryConfig,
) -> Arc<NativeFunctionRegistry>
where
    W: WorkingDirectory + Send + Sync + 'static,
{
    let mut registry = NativeFunctionRegistry::default();
    registry.register(ChdirFunction::new(Arc::clone(&directory), config));
    registry.register(GetcwdFunction::new(directory));
    Arc::new(registry)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use scriptos_fs::{lock_working_directory, InMemoryWorkingDirectory, WorkingDirectory};

    use super::*;

    fn sandbox() -> Arc<InMemoryWorkingDirectory> {
        let directory = InMemoryWorkingDirectory::default();
        directory.create_dir_all("/sandbox/work");
        directory.create_file("/sandbox/readme.txt");
        directory
            .change_dir("/sandbox")
            .expect("sandbox should exist");
        Arc::new(directory)
    }

    fn chdir(directory: &Arc<InMemoryWorkingDirectory>) -> ChdirFunction<InMemoryWorkingDirectory> {
        ChdirFunction::new(Arc::clone(directory), OsLibraryConfig::default())
    }

    #[test]
    fn chdir_function_has_correct_signature() {
        let function = chdir(&sandbox());
        assert_eq!(function.name().as_str(), "os.chdir");
        assert_eq!(function.param_types(), &[Type::String]);
    }

    #[test]
    fn chdir_returns_single_true_on_success() {
        let directory = sandbox();
        let values = chdir(&directory)
            .call(vec!["work".into()])
            .expect("call should not raise");

        assert_eq!(values, vec![Value::Bool(true)]);
        assert_eq!(
            directory.current_dir().expect("virtual cwd"),
            PathBuf::from("/sandbox/work")
        );
    }

    #[test]
    fn chdir_returns_nil_and_message_on_failure() {
        let directory = sandbox();
        let values = chdir(&directory)
            .call(vec!["missing".into()])
            .expect("call should not raise");

        assert_eq!(
            values,
            vec![
                Value::Nil,
                Value::from("unable to switch to directory 'missing'")
            ]
        );
        assert_eq!(
            directory.current_dir().expect("virtual cwd"),
            PathBuf::from("/sandbox")
        );
    }

    #[test]
    fn chdir_into_file_uses_same_message() {
        let values = chdir(&sandbox())
            .call(vec!["readme.txt".into()])
            .expect("call should not raise");
        assert_eq!(
            values,
            vec![
                Value::Nil,
                Value::from("unable to switch to directory 'readme.txt'")
            ]
        );
    }

    #[test]
    fn chdir_is_idempotent() {
        let directory = sandbox();
        let function = chdir(&directory);
        for _ in 0..2 {
            let values = function
                .call(vec!["/sandbox/work".into()])
                .expect("call should not raise");
            assert_eq!(values, vec![Value::Bool(true)]);
        }
        assert_eq!(
            directory.current_dir().expect("virtual cwd"),
            PathBuf::from("/sandbox/work")
        );
    }

    #[test]
    fn chdir_detailed_errors_append_os_reason() {
        let directory = sandbox();
        let function = ChdirFunction::new(
            Arc::clone(&directory),
            OsLibraryConfig {
                detailed_errors: true,
            },
        );

        let values = function
            .call(vec!["readme.txt".into()])
            .expect("call should not raise");
        assert_eq!(
            values,
            vec![
                Value::Nil,
                Value::from("unable to switch to directory 'readme.txt': not a directory")
            ]
        );
    }

    #[test]
    fn chdir_coerces_integer_argument() {
        let directory = Arc::new(InMemoryWorkingDirectory::default());
        directory.create_dir_all("/2024");

        let values = chdir(&directory)
            .call(vec![Value::Integer(2024)])
            .expect("call should not raise");
        assert_eq!(values, vec![Value::Bool(true)]);
    }

    #[test]
    fn chdir_raises_on_missing_argument() {
        let error = chdir(&sandbox())
            .call(Vec::new())
            .expect_err("missing argument should raise");
        assert_eq!(
            error.to_string(),
            "bad argument #1 to 'chdir' (string expected, got no value)"
        );
    }

    #[test]
    fn chdir_raises_on_non_string_argument() {
        let error = chdir(&sandbox())
            .call(vec![Value::Nil])
            .expect_err("nil argument should raise");
        assert_eq!(
            error.to_string(),
            "bad argument #1 to 'chdir' (string expected, got nil)"
        );

        let error = chdir(&sandbox())
            .call(vec![Value::Bool(false)])
            .expect_err("boolean argument should raise");
        assert!(matches!(
            error,
            RuntimeError::BadArgument {
                got: Some(Type::Boolean),
                ..
            }
        ));
    }

    #[test]
    fn getcwd_reports_virtual_directory() {
        let directory = sandbox();
        let function = GetcwdFunction::new(Arc::clone(&directory));
        assert_eq!(function.name().as_str(), "os.getcwd");

        let values = function.call(Vec::new()).expect("getcwd should succeed");
        assert_eq!(values, vec![Value::from("/sandbox")]);
    }

    #[test]
    fn os_registry_contains_functions() {
        let registry = create_os_registry_with(sandbox(), OsLibraryConfig::default());
        assert!(registry.contains("os.chdir"));
        assert!(registry.contains("os.getcwd"));
        assert_eq!(
            registry.names().map(|name| name.as_str()).collect::<Vec<_>>(),
            vec!["os.chdir", "os.getcwd"]
        );
    }

    #[test]
    fn registry_chdir_then_getcwd_observes_change() {
        let registry = create_os_registry_with(sandbox(), OsLibraryConfig::default());

        registry
            .call("os.chdir", vec!["work".into()])
            .expect("chdir should not raise");
        let values = registry
            .call("os.getcwd", Vec::new())
            .expect("getcwd should succeed");
        assert_eq!(values, vec![Value::from("/sandbox/work")]);
    }

    #[test]
    fn process_registry_switches_real_directory() {
        let _lock = lock_working_directory();
        let original = std::env::current_dir().expect("should read current dir");
        let sandbox = tempfile::tempdir().expect("should create sandbox");
        std::fs::create_dir(sandbox.path().join("work")).expect("should create work dir");
        std::env::set_current_dir(sandbox.path()).expect("should enter sandbox");

        let registry = create_os_registry(OsLibraryConfig::default());
        let work = registry
            .call("os.chdir", vec!["work".into()])
            .expect("chdir should not raise");
        let missing = registry
            .call("os.chdir", vec!["missing".into()])
            .expect("chdir should not raise");
        let cwd = std::env::current_dir().expect("should read current dir");
        std::env::set_current_dir(&original).expect("should restore current dir");

        assert_eq!(work, vec![Value::Bool(true)]);
        assert_eq!(
            missing,
            vec![
                Value::Nil,
                Value::from("unable to switch to directory 'missing'")
            ]
        );
        assert_eq!(
            cwd.canonicalize().expect("cwd should canonicalize"),
            sandbox
                .path()
                .join("work")
                .canonicalize()
                .expect("work should canonicalize")
        );
    }
}
