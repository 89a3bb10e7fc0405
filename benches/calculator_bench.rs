use criterion::{Criterion, criterion_group, criterion_main};
use fnscript::ast::{ExpressionAtom, Function, FunctionArg, MathExpressionAtom};
use fnscript::{Calculator, Config, Value};
use std::hint::black_box;
use std::sync::Arc;

// Helper to create a calculator with a small pool
fn create_calculator() -> Calculator {
    Calculator::new(&Config {
        cache_capacity: 1024,
        vm_pool_size: 2,
    })
}

fn bench_cached_eval(c: &mut Criterion) {
    let calc = create_calculator();
    let node = Arc::new(MathExpressionAtom::new(
        ExpressionAtom::variable(0),
        "*",
        ExpressionAtom::variable(1),
    ));

    c.bench_function("eval_math_cached", |b| {
        b.iter(|| {
            let args = [Value::Int(fastrand::i64(..1_000)), Value::Int(7)];
            black_box(calc.eval(black_box(&node), &args)).unwrap();
        });
    });

    let function = Arc::new(Function::new(
        "CONCAT",
        vec![FunctionArg::constant("id-"), FunctionArg::atom(ExpressionAtom::variable(0))],
    ));
    c.bench_function("eval_function_cached", |b| {
        b.iter(|| {
            let args = [Value::Int(fastrand::i64(..))];
            black_box(calc.eval_function(black_box(&function), &args)).unwrap();
        });
    });
}

fn bench_uncached(c: &mut Criterion) {
    let calc = create_calculator();

    c.bench_function("eval_math_fresh_node", |b| {
        b.iter(|| {
            let node = Arc::new(MathExpressionAtom::new(
                ExpressionAtom::constant(fastrand::i64(..1_000)),
                "+",
                ExpressionAtom::constant(1),
            ));
            black_box(calc.eval(&node, &[])).unwrap();
        });
    });

    c.bench_function("eval_string", |b| {
        b.iter(|| {
            let result = calc.eval_string(
                black_box("$IF(arguments[0] > 10, 'big', 'small')"),
                &[Value::Int(fastrand::i64(0..20))],
            );
            black_box(result).unwrap();
        });
    });
}

criterion_group!(benches, bench_cached_eval, bench_uncached);
criterion_main!(benches);
