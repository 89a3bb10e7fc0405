use crate::ast::{CastFunction, CastTarget, CastType};
use crate::translator::error::CompileError;
use crate::translator::expression::translate_atom;
use crate::translator::utils::{write_dimension, write_func_name, write_quoted};

/// Translate `CAST(source AS type)` / `CONVERT(source USING charset)`.
///
/// The leading arguments depend on the target:
///
/// | target            | script                                  |
/// |-------------------|-----------------------------------------|
/// | UNSIGNED          | `$CAST_UNSIGNED(src)`                   |
/// | SIGNED            | `$CAST_SIGNED(src)`                     |
/// | NCHAR(n)          | `$CAST_NCHAR(n, src)`                   |
/// | CHAR(n) CHARSET c | `$CAST_CHAR(n, 'c', src)`               |
/// | DATE/DATETIME/TIME| `$CAST_DATE(src)` ...                   |
/// | DECIMAL(m, d)     | `$CAST_DECIMAL(m, d, src)`              |
/// | USING c           | `$CAST_CHARSET('c', src)`               |
pub fn translate_cast(sb: &mut String, node: &CastFunction) -> Result<(), CompileError> {
    match &node.target {
        CastTarget::Type(cast) => match cast.kind {
            CastType::Unsigned | CastType::UnsignedInteger => {
                write_func_name(sb, "CAST_UNSIGNED");
                sb.push('(');
            }
            CastType::Signed | CastType::SignedInteger => {
                write_func_name(sb, "CAST_SIGNED");
                sb.push('(');
            }
            CastType::NChar => {
                write_func_name(sb, "CAST_NCHAR");
                sb.push('(');
                write_dimension(sb, cast.dimensions().0);
                sb.push_str(", ");
            }
            CastType::Char => {
                write_func_name(sb, "CAST_CHAR");
                sb.push('(');
                write_dimension(sb, cast.dimensions().0);
                sb.push_str(", ");
                write_quoted(sb, cast.charset().unwrap_or_default());
                sb.push_str(", ");
            }
            CastType::Date => {
                write_func_name(sb, "CAST_DATE");
                sb.push('(');
            }
            CastType::DateTime => {
                write_func_name(sb, "CAST_DATETIME");
                sb.push('(');
            }
            CastType::Time => {
                write_func_name(sb, "CAST_TIME");
                sb.push('(');
            }
            CastType::Decimal => {
                let (d0, d1) = cast.dimensions();
                write_func_name(sb, "CAST_DECIMAL");
                sb.push('(');
                write_dimension(sb, d0);
                sb.push_str(", ");
                write_dimension(sb, d1);
                sb.push_str(", ");
            }
            // TODO: binary and json need byte-string and document values in the VM
            CastType::Binary | CastType::Json => {
                return Err(CompileError::UnsupportedCast(cast.kind));
            }
        },
        CastTarget::Charset(charset) => {
            write_func_name(sb, "CAST_CHARSET");
            sb.push('(');
            write_quoted(sb, charset);
            sb.push_str(", ");
        }
    }

    let next = node
        .source
        .as_atom()
        .ok_or(CompileError::InvalidCastSource(node.source.kind_name()))?;
    translate_atom(sb, next)?;

    sb.push(')');
    Ok(())
}
