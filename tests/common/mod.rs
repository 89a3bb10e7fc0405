use std::sync::Arc;

use fnscript::ast::{
    CaseWhenElseFunction, CastFunction, CastTarget, ConvertDataType, ExpressionAtom,
    ExpressionNode, Function, FunctionArg, MathExpressionAtom,
};
use fnscript::{Calculator, Config, Value};

/// Helper function to build an isolated calculator
#[allow(dead_code)]
pub fn create_calculator() -> Calculator {
    Calculator::new(&Config {
        cache_capacity: 64,
        vm_pool_size: 4,
    })
}

/// Helper function to wrap a constant as a function argument
#[allow(dead_code)]
pub fn constant_arg(value: impl Into<Value>) -> FunctionArg {
    FunctionArg::constant(value)
}

/// Helper function to wrap an atom as a function argument
#[allow(dead_code)]
pub fn atom_arg(atom: ExpressionAtom) -> FunctionArg {
    FunctionArg::atom(atom)
}

/// Helper function to create a shared function call node
#[allow(dead_code)]
pub fn create_function(name: &str, args: Vec<FunctionArg>) -> Arc<Function> {
    Arc::new(Function::new(name, args))
}

/// Helper function to create a shared arithmetic node
#[allow(dead_code)]
pub fn create_math(left: ExpressionAtom, operator: &str, right: ExpressionAtom) -> Arc<MathExpressionAtom> {
    Arc::new(MathExpressionAtom::new(left, operator, right))
}

/// Helper function to create a shared CAST node over a single atom
#[allow(dead_code)]
pub fn create_cast(target: ConvertDataType, source: ExpressionAtom) -> Arc<CastFunction> {
    Arc::new(CastFunction::new(
        CastTarget::Type(target),
        ExpressionNode::atom(source),
    ))
}

/// Helper function to create a shared CASE node
#[allow(dead_code)]
pub fn create_case_when(
    case: Option<ExpressionAtom>,
    branches: Vec<(FunctionArg, FunctionArg)>,
    else_value: Option<FunctionArg>,
) -> Arc<CaseWhenElseFunction> {
    Arc::new(CaseWhenElseFunction {
        case: case.map(ExpressionNode::atom),
        branches,
        else_value: else_value.map(Box::new),
    })
}

/// Helper function to generate random integer arguments
#[allow(dead_code)]
pub fn random_int_args(count: usize) -> Vec<i64> {
    (0..count).map(|_| fastrand::i64(-1_000_000..1_000_000)).collect()
}
