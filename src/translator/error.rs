use crate::ast::CastType;

/// Errors raised while compiling an expression into script text.
///
/// These are cached alongside the compiled script and replayed on every later
/// request for the same node, so they must be cheap to clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// The expression references a column and cannot be folded into a constant.
    ColumnReference,
    /// Expression atom shape the translator does not handle
    UnsupportedAtom(&'static str),
    /// Callee shape inside a function-call atom the translator does not handle
    UnsupportedFunctionCall(&'static str),
    /// Aggregate functions never appear in a constant expression
    AggregateFunction,
    /// The value of an interval is not a single atom
    InvalidIntervalValue(&'static str),
    UnsupportedCast(CastType),
    /// A comparison side is not a single atom
    UnsupportedCompareAtom(&'static str),
    /// Function argument expression shape the translator does not handle
    UnsupportedArgument(&'static str),
    InvalidCaseBody(&'static str),
    InvalidCastSource(&'static str),
    InvalidNestedExpression(&'static str),
    /// The source node was already consumed by an earlier, aborted compilation
    SourceReleased,
}

impl CompileError {
    pub const fn is_column_reference(&self) -> bool {
        matches!(self, Self::ColumnReference)
    }
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ColumnReference => write!(f, "cannot eval function with column name"),
            Self::UnsupportedAtom(kind) => {
                write!(f, "expression atom within {kind} is not supported yet")
            }
            Self::UnsupportedFunctionCall(kind) => {
                write!(f, "expression atom within function call {kind} is not supported yet")
            }
            Self::AggregateFunction => write!(f, "aggr function should not appear here"),
            Self::InvalidIntervalValue(kind) => {
                write!(f, "invalid expr {kind} for interval expression")
            }
            Self::UnsupportedCast(kind) => write!(f, "cast to {kind} is not supported yet"),
            Self::UnsupportedCompareAtom(kind) => {
                write!(f, "unsupported compare atom node {kind}")
            }
            Self::UnsupportedArgument(kind) => write!(f, "unsupported function argument {kind}"),
            Self::InvalidCaseBody(kind) => {
                write!(f, "invalid expression type {kind} as the CASE body")
            }
            Self::InvalidCastSource(kind) => {
                write!(f, "invalid expression type {kind} as the CAST source")
            }
            Self::InvalidNestedExpression(kind) => {
                write!(f, "invalid expression type {kind} inside parentheses")
            }
            Self::SourceReleased => write!(f, "script source was released before compilation"),
        }
    }
}

impl std::error::Error for CompileError {}
