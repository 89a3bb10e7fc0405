use crate::ast::Comparison;
use crate::translator::FUNC_PREFIX;
use crate::value::escape_single_quote;

/// Write a `$`-prefixed function name.
pub fn write_func_name(sb: &mut String, name: &str) {
    sb.push_str(FUNC_PREFIX);
    sb.push_str(name);
}

/// Write a positional argument reference.
pub fn write_variable(sb: &mut String, n: usize) {
    sb.push_str("arguments[");
    sb.push_str(&n.to_string());
    sb.push(']');
}

/// Write a comparison operator in script spelling.
pub fn write_comparison(sb: &mut String, op: Comparison) {
    match op {
        Comparison::Eq => sb.push_str("=="),
        Comparison::Ne => sb.push_str("!="),
        other => sb.push_str(&other.to_string()),
    }
}

/// Write a single-quoted, escaped string literal.
pub fn write_quoted(sb: &mut String, s: &str) {
    sb.push('\'');
    sb.push_str(&escape_single_quote(s));
    sb.push('\'');
}

/// Write a size argument, `0` when absent or not positive.
pub fn write_dimension(sb: &mut String, d: i64) {
    if d > 0 {
        sb.push_str(&d.to_string());
    } else {
        sb.push('0');
    }
}
