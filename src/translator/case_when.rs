use crate::ast::CaseWhenElseFunction;
use crate::translator::error::CompileError;
use crate::translator::expression::translate_atom;
use crate::translator::function::translate_arg;
use crate::translator::utils::write_func_name;
use crate::translator::FUNC_IF;

/// Translate a CASE expression into a right-nested chain of `$IF` calls.
///
/// `CASE 2+1 WHEN 1 THEN 'A' WHEN 2 THEN 'B' ELSE '*' END` becomes
/// `$IF(1 == (2 + 1), 'A', $IF(2 == (2 + 1), 'B', '*'))`.
pub fn translate_case_when(
    sb: &mut String,
    node: &CaseWhenElseFunction,
) -> Result<(), CompileError> {
    let case_script = match &node.case {
        Some(case) => {
            let atom = case
                .as_atom()
                .ok_or(CompileError::InvalidCaseBody(case.kind_name()))?;
            let mut b = String::new();
            translate_atom(&mut b, atom)?;
            Some(b)
        }
        None => None,
    };

    for (i, (when, then)) in node.branches.iter().enumerate() {
        if i > 0 {
            sb.push_str(", ");
        }

        write_func_name(sb, FUNC_IF);
        sb.push('(');

        translate_arg(sb, when)?;

        if let Some(case_script) = &case_script {
            sb.push_str(" == (");
            sb.push_str(case_script);
            sb.push(')');
        }

        sb.push_str(", ");

        translate_arg(sb, then)?;
    }

    // no branches: the whole expression is the else value
    if !node.branches.is_empty() {
        sb.push_str(", ");
    }

    match &node.else_value {
        Some(els) => translate_arg(sb, els)?,
        None => sb.push_str("null"),
    }

    for _ in 0..node.branches.len() {
        sb.push(')');
    }

    Ok(())
}
