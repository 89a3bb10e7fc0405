use crate::ast::{
    BinaryComparisonPredicateNode, ExpressionAtom, FunctionCall, IntervalExpressionAtom,
    MathExpressionAtom, PredicateNode, UnaryExpressionAtom, UnaryOperand,
};
use crate::translator::error::CompileError;
use crate::translator::utils::{write_comparison, write_func_name, write_variable};
use crate::translator::{FUNC_UNARY, case_when, cast, function};

/// Translate an expression atom into script text.
pub fn translate_atom(sb: &mut String, node: &ExpressionAtom) -> Result<(), CompileError> {
    match node {
        ExpressionAtom::Interval(v) => translate_interval(sb, v),
        ExpressionAtom::Math(v) => translate_math(sb, v),
        ExpressionAtom::Constant(v) => {
            sb.push_str(&v.to_string());
            Ok(())
        }
        ExpressionAtom::Unary(v) => translate_unary(sb, v),
        ExpressionAtom::ColumnName(_) => Err(CompileError::ColumnReference),
        ExpressionAtom::Nested(v) => {
            let next = v
                .first
                .as_atom()
                .ok_or(CompileError::InvalidNestedExpression(v.first.kind_name()))?;
            sb.push('(');
            translate_atom(sb, next)?;
            sb.push(')');
            Ok(())
        }
        ExpressionAtom::Variable(v) => {
            write_variable(sb, v.n());
            Ok(())
        }
        ExpressionAtom::FunctionCall(v) => match v.0.as_ref() {
            FunctionCall::Function(f) => function::translate_function(sb, f),
            FunctionCall::Aggregate(_) => Err(CompileError::AggregateFunction),
            FunctionCall::Cast(f) => cast::translate_cast(sb, f),
            FunctionCall::CaseWhen(f) => case_when::translate_case_when(sb, f),
            other => Err(CompileError::UnsupportedFunctionCall(other.kind_name())),
        },
        other => Err(CompileError::UnsupportedAtom(other.kind_name())),
    }
}

/// Translate `left <op> right`.
pub fn translate_math(sb: &mut String, node: &MathExpressionAtom) -> Result<(), CompileError> {
    translate_atom(sb, &node.left)?;

    sb.push(' ');
    sb.push_str(&node.operator);
    sb.push(' ');

    translate_atom(sb, &node.right)
}

fn translate_interval(sb: &mut String, node: &IntervalExpressionAtom) -> Result<(), CompileError> {
    let PredicateNode::Atom(p) = node.value.as_ref() else {
        return Err(CompileError::InvalidIntervalValue(node.value.kind_name()));
    };

    translate_atom(sb, &p.atom)?;
    sb.push_str(" * ");
    sb.push_str(&node.duration().as_nanos().to_string());
    Ok(())
}

fn translate_unary(sb: &mut String, node: &UnaryExpressionAtom) -> Result<(), CompileError> {
    write_func_name(sb, FUNC_UNARY);
    sb.push_str("('");
    sb.push_str(&node.operator);
    sb.push_str("', ");

    match &node.inner {
        UnaryOperand::Atom(atom) => translate_atom(sb, atom)?,
        UnaryOperand::Comparison(cmp) => translate_comparison(sb, cmp)?,
    }

    sb.push(')');
    Ok(())
}

/// Translate `left <op> right` where both sides must be single atoms.
pub fn translate_comparison(
    sb: &mut String,
    node: &BinaryComparisonPredicateNode,
) -> Result<(), CompileError> {
    translate_compare_atom(sb, &node.left)?;
    sb.push(' ');
    write_comparison(sb, node.op);
    sb.push(' ');
    translate_compare_atom(sb, &node.right)
}

fn translate_compare_atom(sb: &mut String, node: &PredicateNode) -> Result<(), CompileError> {
    match node {
        PredicateNode::Atom(p) => translate_atom(sb, &p.atom),
        other => Err(CompileError::UnsupportedCompareAtom(other.kind_name())),
    }
}
