//! Translation of SQL expression trees into the `$`-prefixed script dialect.
//!
//! Everything here is pure: a node goes in, script text is appended to the
//! caller's buffer, and nothing is cached. Caching lives in
//! [`crate::calculator`].

pub mod case_when;
pub mod cast;
pub mod error;
pub mod expression;
pub mod function;
pub mod utils;


pub use case_when::translate_case_when;
pub use cast::translate_cast;
pub use error::CompileError;
pub use expression::{translate_atom, translate_math};
pub use function::{translate_arg, translate_function};

/// Prefix separating SQL function names from host builtins in the script VM.
pub const FUNC_PREFIX: &str = "$";

pub(crate) const FUNC_IF: &str = "IF";
pub(crate) const FUNC_UNARY: &str = "UNARY";

/// Translate a SQL function name to its script-side name.
pub fn translate_function_name(name: &str) -> String {
    format!("{FUNC_PREFIX}{name}")
}
