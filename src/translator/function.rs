use crate::ast::{ExpressionNode, Function, FunctionArg, PredicateNode};
use crate::translator::error::CompileError;
use crate::translator::expression::{translate_atom, translate_comparison};
use crate::translator::utils::write_func_name;
use crate::translator::{case_when, cast};

/// Translate `name(arg0, arg1, ...)` into `$name(arg0, arg1, ...)`.
pub fn translate_function(sb: &mut String, node: &Function) -> Result<(), CompileError> {
    write_func_name(sb, &node.name);
    sb.push('(');
    for (i, arg) in node.args.iter().enumerate() {
        if i > 0 {
            sb.push_str(", ");
        }
        translate_arg(sb, arg)?;
    }
    sb.push(')');
    Ok(())
}

/// Translate a single function (or CASE branch) argument.
pub fn translate_arg(sb: &mut String, arg: &FunctionArg) -> Result<(), CompileError> {
    match arg {
        FunctionArg::Column(_) => Err(CompileError::ColumnReference),
        FunctionArg::Constant(value) => {
            sb.push_str(&value.to_string());
            Ok(())
        }
        FunctionArg::Expression(expr) => translate_arg_expression(sb, expr),
        FunctionArg::Function(f) => translate_function(sb, f),
        FunctionArg::Cast(f) => cast::translate_cast(sb, f),
        FunctionArg::CaseWhen(f) => case_when::translate_case_when(sb, f),
    }
}

fn translate_arg_expression(sb: &mut String, expr: &ExpressionNode) -> Result<(), CompileError> {
    let ExpressionNode::Predicate(predicate) = expr else {
        return Err(CompileError::UnsupportedArgument(expr.kind_name()));
    };

    match predicate {
        PredicateNode::Atom(p) => translate_atom(sb, &p.atom),
        PredicateNode::BinaryComparison(cmp) => translate_comparison(sb, cmp),
        other => Err(CompileError::UnsupportedArgument(other.kind_name())),
    }
}
