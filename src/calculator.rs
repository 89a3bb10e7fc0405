//! Constant evaluation of SQL expression nodes.
//!
//! A node is compiled into a script once (see [`ScriptCache`]) and the script
//! is then run on a pooled VM with the caller's positional arguments.

pub mod cache;
pub mod computer;
pub mod error;


pub use cache::{CacheStats, ScriptCache};
pub use computer::{NodeKey, ScriptComputer, ScriptSource, SourceKind};
pub use error::EvalError;

use crate::ast::{CaseWhenElseFunction, CastFunction, Function, MathExpressionAtom};
use crate::config::Config;
use crate::value::Value;
use crate::vm::{ScriptVm, VmPool};
use once_cell::sync::Lazy;
use std::sync::Arc;

static GLOBAL: Lazy<Calculator> = Lazy::new(|| Calculator::new(&Config::default()));

/// Compilation cache plus VM pool.
#[derive(Debug)]
pub struct Calculator {
    cache: ScriptCache,
    vms: VmPool,
}

impl Calculator {
    pub fn new(config: &Config) -> Self {
        Self {
            cache: ScriptCache::new(config.cache_capacity),
            vms: VmPool::new(config.vm_pool_size),
        }
    }

    pub fn cache(&self) -> &ScriptCache {
        &self.cache
    }

    pub fn pool(&self) -> &VmPool {
        &self.vms
    }

    pub fn compile_function(&self, node: &Arc<Function>) -> Result<Arc<str>, EvalError> {
        Ok(self.cache.build(Arc::clone(node))?)
    }

    pub fn compile_cast_function(&self, node: &Arc<CastFunction>) -> Result<Arc<str>, EvalError> {
        Ok(self.cache.build(Arc::clone(node))?)
    }

    pub fn compile_case_when_function(
        &self,
        node: &Arc<CaseWhenElseFunction>,
    ) -> Result<Arc<str>, EvalError> {
        Ok(self.cache.build(Arc::clone(node))?)
    }

    pub fn compile(&self, node: &Arc<MathExpressionAtom>) -> Result<Arc<str>, EvalError> {
        Ok(self.cache.build(Arc::clone(node))?)
    }

    pub fn eval_function(&self, node: &Arc<Function>, args: &[Value]) -> Result<Value, EvalError> {
        let script = self.compile_function(node)?;
        self.eval_string(&script, args)
    }

    pub fn eval_cast_function(
        &self,
        node: &Arc<CastFunction>,
        args: &[Value],
    ) -> Result<Value, EvalError> {
        let script = self.compile_cast_function(node)?;
        self.eval_string(&script, args)
    }

    pub fn eval_case_when_function(
        &self,
        node: &Arc<CaseWhenElseFunction>,
        args: &[Value],
    ) -> Result<Value, EvalError> {
        let script = self.compile_case_when_function(node)?;
        self.eval_string(&script, args)
    }

    /// Evaluate an arithmetic node.
    pub fn eval(&self, node: &Arc<MathExpressionAtom>, args: &[Value]) -> Result<Value, EvalError> {
        let script = self.compile(node)?;
        self.eval_string(&script, args)
    }

    /// Run script text directly, bypassing the cache.
    pub fn eval_string(&self, script: &str, args: &[Value]) -> Result<Value, EvalError> {
        let mut vm = self.vms.borrow();
        vm.eval(script, args).map_err(|err| {
            log::debug!("Script execution failed: {err} (script: {script})");
            EvalError::Execution(err)
        })
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

/// The process-wide calculator.
pub fn global() -> &'static Calculator {
    &GLOBAL
}

pub fn eval_function(node: &Arc<Function>, args: &[Value]) -> Result<Value, EvalError> {
    GLOBAL.eval_function(node, args)
}

pub fn eval_cast_function(node: &Arc<CastFunction>, args: &[Value]) -> Result<Value, EvalError> {
    GLOBAL.eval_cast_function(node, args)
}

pub fn eval_case_when_function(
    node: &Arc<CaseWhenElseFunction>,
    args: &[Value],
) -> Result<Value, EvalError> {
    GLOBAL.eval_case_when_function(node, args)
}

pub fn eval(node: &Arc<MathExpressionAtom>, args: &[Value]) -> Result<Value, EvalError> {
    GLOBAL.eval(node, args)
}

pub fn eval_string(script: &str, args: &[Value]) -> Result<Value, EvalError> {
    GLOBAL.eval_string(script, args)
}

/// Whether evaluation failed only because the expression references a column.
pub fn is_eval_with_column_err(err: &EvalError) -> bool {
    err.is_column_reference()
}
