/// Errors raised by the script VM while parsing or running a script.
///
/// Unlike compile errors these are never cached: they depend on the
/// arguments of each call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    /// Malformed script text
    Syntax { position: usize, message: String },
    UnknownFunction(String),
    ArgumentCount {
        function: String,
        expected: String,
        actual: usize,
    },
    /// `arguments[n]` beyond the supplied arguments
    ArgumentOutOfRange { index: usize, len: usize },
    TypeMismatch(String),
    InvalidCast(String),
    InvalidArgument(String),
}

impl ExecutionError {
    pub(crate) fn syntax(position: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            position,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Syntax { position, message } => {
                write!(f, "Syntax error at position {position}: {message}")
            }
            Self::UnknownFunction(name) => write!(f, "Unknown function: {name}"),
            Self::ArgumentCount {
                function,
                expected,
                actual,
            } => write!(
                f,
                "Function {function} expects {expected} argument(s), got {actual}"
            ),
            Self::ArgumentOutOfRange { index, len } => {
                write!(f, "Argument index {index} out of range (len {len})")
            }
            Self::TypeMismatch(msg) => write!(f, "Type mismatch: {msg}"),
            Self::InvalidCast(msg) => write!(f, "Invalid cast: {msg}"),
            Self::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
        }
    }
}

impl std::error::Error for ExecutionError {}
