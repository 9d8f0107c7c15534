//! Native host functions exposed to embedded scripts.
//!
//! Scripts call native functions with a list of [`Value`]s and receive a
//! list back. Recoverable failures are reported in the returned values
//! (`nil` followed by a message); a [`RuntimeError`] is reserved for
//! misuse such as a wrong argument type, which the host raises.

pub mod config;
pub mod native_functions;

use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};
use std::sync::Arc;

use scriptos_base::{HostError, SharedString};

pub use config::OsLibraryConfig;
pub use native_functions::{
    create_os_registry, create_os_registry_with, ChdirFunction, GetcwdFunction,
};

/// Script value crossing the host boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Nil,
    Bool(bool),
    Integer(i64),
    String(SharedString),
}

impl Value {
    /// Returns the script-visible type name.
    pub fn type_name(&self) -> &'static str {
        self.value_type().name()
    }

    /// Returns the script type of this value.
    pub fn value_type(&self) -> Type {
        match self {
            Self::Nil => Type::Nil,
            Self::Bool(_) => Type::Boolean,
            Self::Integer(_) => Type::Number,
            Self::String(_) => Type::String,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => f.write_str("nil"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::String(value) => f.write_str(value),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.into())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Script-level type used in native function signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Nil,
    Boolean,
    Number,
    String,
}

impl Type {
    /// Returns the script-visible type name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
        }
    }
}

/// Error raised to the script instead of being returned as values.
#[derive(Debug)]
pub enum RuntimeError {
    /// Argument at 1-based `position` has the wrong type or is missing.
    BadArgument {
        position: usize,
        function: SharedString,
        expected: Type,
        got: Option<Type>,
    },
    /// No native function is registered under this name.
    UnknownFunction(SharedString),
    /// Host-side failure that cannot be reported through return values.
    Host(HostError),
}

impl Display for RuntimeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadArgument {
                position,
                function,
                expected,
                got,
            } => {
                let got = got.map_or("no value", Type::name);
                write!(
                    f,
                    "bad argument #{position} to '{function}' ({} expected, got {got})",
                    expected.name()
                )
            }
            Self::UnknownFunction(name) => write!(f, "unknown native function '{name}'"),
            Self::Host(error) => Display::fmt(error, f),
        }
    }
}

impl std::error::Error for RuntimeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Host(error) => Some(error),
            _ => None,
        }
    }
}

impl From<HostError> for RuntimeError {
    fn from(value: HostError) -> Self {
        Self::Host(value)
    }
}

/// Function implemented natively and callable from scripts.
pub trait NativeFunction: Send + Sync {
    /// Registered name, including any library prefix such as `os.`.
    fn name(&self) -> &SharedString;

    /// Declared parameter types.
    fn param_types(&self) -> &[Type];

    /// Invokes the function, returning zero or more values.
    fn call(&self, args: Vec<Value>) -> Result<Vec<Value>, RuntimeError>;
}

/// Name-keyed collection of native functions.
#[derive(Default)]
pub struct NativeFunctionRegistry {
    functions: BTreeMap<SharedString, Arc<dyn NativeFunction>>,
}

impl NativeFunctionRegistry {
    /// Registers a function, replacing any previous one with the same name.
    pub fn register(&mut self, function: impl NativeFunction + 'static) {
        self.functions
            .insert(function.name().clone(), Arc::new(function));
    }

    /// Returns `true` if a function is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Looks up a registered function.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn NativeFunction>> {
        self.functions.get(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &SharedString> {
        self.functions.keys()
    }

    /// Calls the function registered under `name`.
    pub fn call(&self, name: &str, args: Vec<Value>) -> Result<Vec<Value>, RuntimeError> {
        match self.get(name) {
            Some(function) => function.call(args),
            None => Err(RuntimeError::UnknownFunction(name.into())),
        }
    }
}

impl fmt::Debug for NativeFunctionRegistry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunctionRegistry")
            .field("functions", &self.functions.keys().collect::<Vec<_>>())
            .finish()
    }
}
