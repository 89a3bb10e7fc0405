//! Reference interpreter for the `$`-prefixed script dialect.

pub mod builtins;
pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod pool;

#[cfg(test)]
mod tests;

pub use builtins::FunctionRegistry;
pub use error::ExecutionError;
pub use parser::{Expr, parse};
pub use pool::{PooledVm, VmPool};

use crate::value::Value;
use interpreter::Interpreter;
use lru::LruCache;
use once_cell::sync::Lazy;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Parsed programs kept per VM instance.
const PROGRAM_CACHE_SIZE: usize = 64;

static DEFAULT_REGISTRY: Lazy<Arc<FunctionRegistry>> =
    Lazy::new(|| Arc::new(FunctionRegistry::default()));

/// Something that can run a script against positional arguments.
pub trait ScriptVm {
    fn eval(&mut self, script: &str, args: &[Value]) -> Result<Value, ExecutionError>;
}

/// Single-threaded script VM. Instances are not shared; use a [`VmPool`]
/// to run scripts from several threads.
pub struct Vm {
    registry: Arc<FunctionRegistry>,
    programs: LruCache<String, Arc<Expr>>,
}

impl Vm {
    pub fn new() -> Self {
        Self::with_registry(Arc::clone(&DEFAULT_REGISTRY))
    }

    pub fn with_registry(registry: Arc<FunctionRegistry>) -> Self {
        let capacity = NonZeroUsize::new(PROGRAM_CACHE_SIZE).unwrap_or(NonZeroUsize::MIN);
        Self {
            registry,
            programs: LruCache::new(capacity),
        }
    }

    pub fn registry(&self) -> &FunctionRegistry {
        &self.registry
    }

    fn program(&mut self, script: &str) -> Result<Arc<Expr>, ExecutionError> {
        if let Some(program) = self.programs.get(script) {
            return Ok(Arc::clone(program));
        }

        let program = Arc::new(parse(script)?);
        self.programs.put(script.to_string(), Arc::clone(&program));
        Ok(program)
    }
}

impl Default for Vm {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptVm for Vm {
    fn eval(&mut self, script: &str, args: &[Value]) -> Result<Value, ExecutionError> {
        let program = self.program(script)?;
        Interpreter::new(&self.registry, args).evaluate(&program)
    }
}

impl std::fmt::Debug for Vm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vm")
            .field("programs", &self.programs.len())
            .finish()
    }
}
