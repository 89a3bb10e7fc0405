use criterion::{Criterion, criterion_group, criterion_main};
use fnscript::ast::{
    CaseWhenElseFunction, CastFunction, CastTarget, CastType, ConvertDataType, ExpressionAtom,
    ExpressionNode, Function, FunctionArg, MathExpressionAtom,
};
use fnscript::translator::{translate_case_when, translate_cast, translate_function, translate_math};
use std::hint::black_box;

// Helper to build a CASE node with `n` branches
fn create_case_when(n: i64) -> CaseWhenElseFunction {
    CaseWhenElseFunction {
        case: Some(ExpressionNode::atom(ExpressionAtom::variable(0))),
        branches: (0..n)
            .map(|i| (FunctionArg::constant(i), FunctionArg::constant(format!("v{i}"))))
            .collect(),
        else_value: Some(Box::new(FunctionArg::constant("other"))),
    }
}

fn bench_translate_simple(c: &mut Criterion) {
    let math = MathExpressionAtom::new(
        ExpressionAtom::variable(0),
        "+",
        ExpressionAtom::math(ExpressionAtom::constant(2), "*", ExpressionAtom::variable(1)),
    );
    c.bench_function("translate_math", |b| {
        b.iter(|| {
            let mut sb = String::new();
            translate_math(&mut sb, black_box(&math)).unwrap();
            black_box(sb);
        });
    });

    let function = Function::new(
        "CONCAT",
        vec![
            FunctionArg::constant("it's"),
            FunctionArg::atom(ExpressionAtom::variable(0)),
            FunctionArg::Function(Function::new("UPPER", vec![FunctionArg::constant("x")])),
        ],
    );
    c.bench_function("translate_function", |b| {
        b.iter(|| {
            let mut sb = String::new();
            translate_function(&mut sb, black_box(&function)).unwrap();
            black_box(sb);
        });
    });

    let cast = CastFunction::new(
        CastTarget::Type(ConvertDataType::new(CastType::Decimal).with_dimensions(10, Some(2))),
        ExpressionNode::atom(ExpressionAtom::variable(0)),
    );
    c.bench_function("translate_cast", |b| {
        b.iter(|| {
            let mut sb = String::new();
            translate_cast(&mut sb, black_box(&cast)).unwrap();
            black_box(sb);
        });
    });
}

fn bench_translate_case_when(c: &mut Criterion) {
    for n in [4, 32] {
        let node = create_case_when(n);
        c.bench_function(&format!("translate_case_when_{n}"), |b| {
            b.iter(|| {
                let mut sb = String::new();
                translate_case_when(&mut sb, black_box(&node)).unwrap();
                black_box(sb);
            });
        });
    }
}

criterion_group!(benches, bench_translate_simple, bench_translate_case_when);
criterion_main!(benches);
