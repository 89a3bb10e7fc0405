use crate::translator::CompileError;
use crate::vm::ExecutionError;

/// Errors returned by the `eval*` family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// The node could not be compiled into a script
    Compile(CompileError),
    /// The script VM failed while running the compiled script
    Execution(ExecutionError),
}

impl EvalError {
    /// True only when compilation stopped at a column reference.
    pub const fn is_column_reference(&self) -> bool {
        matches!(self, Self::Compile(CompileError::ColumnReference))
    }
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Compile(e) => write!(f, "{e}"),
            Self::Execution(e) => write!(f, "Script execution error: {e}"),
        }
    }
}

impl std::error::Error for EvalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Compile(e) => Some(e),
            Self::Execution(e) => Some(e),
        }
    }
}

impl From<CompileError> for EvalError {
    fn from(e: CompileError) -> Self {
        Self::Compile(e)
    }
}

impl From<ExecutionError> for EvalError {
    fn from(e: ExecutionError) -> Self {
        Self::Execution(e)
    }
}
