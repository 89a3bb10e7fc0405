pub mod ast;
pub mod calculator;
pub mod config;
pub mod translator;
pub mod value;
pub mod vm;

// Re-export commonly used types
pub use ast::{
    CaseWhenElseFunction, CastFunction, ExpressionAtom, ExpressionNode, Function, FunctionArg,
    MathExpressionAtom, PredicateNode,
};
pub use calculator::{
    CacheStats, Calculator, EvalError, ScriptCache, eval, eval_case_when_function,
    eval_cast_function, eval_function, eval_string, is_eval_with_column_err,
};
pub use config::Config;
pub use translator::{CompileError, translate_function_name};
pub use value::Value;
pub use vm::{ExecutionError, ScriptVm, Vm, VmPool};
