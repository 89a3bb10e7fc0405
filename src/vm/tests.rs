use super::*;
use rust_decimal::Decimal;
use std::str::FromStr;

fn run(script: &str, args: &[Value]) -> Result<Value, ExecutionError> {
    Vm::new().eval(script, args)
}

fn dec(s: &str) -> Value {
    Value::Decimal(Decimal::from_str(s).unwrap())
}

#[test]
fn test_eval_case_chain() {
    let script = "$IF(1 == (2 + 1), 'A', $IF(2 == (2 + 1), 'B', $IF(3 == (2 + 1), 'C', '*')))";
    assert_eq!(run(script, &[]).unwrap(), Value::from("C"));
}

#[test]
fn test_eval_case_without_match_is_null() {
    let script = "$IF(arguments[0] == 1, 'one', null)";
    assert_eq!(run(script, &[Value::Int(2)]).unwrap(), Value::Null);
    assert_eq!(run(script, &[Value::Int(1)]).unwrap(), Value::from("one"));
}

#[test]
fn test_if_is_lazy() {
    // the untaken branch would fail with an out-of-range argument
    let script = "$IF(true, 1, arguments[5])";
    assert_eq!(run(script, &[]).unwrap(), Value::Int(1));
}

#[test]
fn test_if_null_condition_takes_else() {
    assert_eq!(
        run("$IF(null, 'a', 'b')", &[]).unwrap(),
        Value::from("b")
    );
}

#[test]
fn test_arguments_indexing() {
    let args = [Value::Int(10), Value::Int(20), Value::Int(30)];
    assert_eq!(run("arguments[2]", &args).unwrap(), Value::Int(30));
    assert_eq!(
        run("arguments[3]", &args).unwrap_err(),
        ExecutionError::ArgumentOutOfRange { index: 3, len: 3 }
    );
}

#[test]
fn test_interval_product() {
    assert_eq!(
        run("arguments[0] * 5000000000", &[Value::Int(2)]).unwrap(),
        Value::Int(10_000_000_000)
    );
}

#[test]
fn test_cast_scripts() {
    assert_eq!(
        run("$CAST_DECIMAL(10, 2, arguments[0])", &[dec("1.005")]).unwrap(),
        dec("1.01")
    );
    assert_eq!(
        run(r"$CAST_CHAR(0, 'utf8', 'it\'s')", &[]).unwrap(),
        Value::from("it's")
    );
    assert_eq!(
        run("$CAST_SIGNED($UNARY('-', 7))", &[]).unwrap(),
        Value::Int(-7)
    );
}

#[test]
fn test_unknown_function() {
    assert_eq!(
        run("$NOPE(1)", &[]).unwrap_err(),
        ExecutionError::UnknownFunction("NOPE".to_string())
    );
}

#[test]
fn test_lowercase_function_names() {
    assert_eq!(run("$concat('a', 'b')", &[]).unwrap(), Value::from("ab"));
}

#[test]
fn test_comparison_chain_and_null_safe() {
    assert_eq!(run("1 + 1 == 2", &[]).unwrap(), Value::Bool(true));
    assert_eq!(run("null <=> null", &[]).unwrap(), Value::Bool(true));
    assert_eq!(run("null == null", &[]).unwrap(), Value::Null);
    assert_eq!(run("'b' > 'a'", &[]).unwrap(), Value::Bool(true));
}

#[test]
fn test_division_semantics() {
    assert_eq!(run("1 / 4", &[]).unwrap(), dec("0.25"));
    assert_eq!(run("1 / 0", &[]).unwrap(), Value::Null);
    assert_eq!(run("-7 % 3", &[]).unwrap(), Value::Int(-1));
}

#[test]
fn test_program_cache_reuses_parse() {
    let mut vm = Vm::new();
    let script = "arguments[0] + 1";
    assert_eq!(vm.eval(script, &[Value::Int(1)]).unwrap(), Value::Int(2));
    assert_eq!(vm.eval(script, &[Value::Int(5)]).unwrap(), Value::Int(6));
    assert_eq!(vm.programs.len(), 1);
}

#[test]
fn test_syntax_error_is_not_cached() {
    let mut vm = Vm::new();
    assert!(matches!(
        vm.eval("$IF(", &[]),
        Err(ExecutionError::Syntax { .. })
    ));
    assert_eq!(vm.programs.len(), 0);
}

#[test]
fn test_custom_registry() {
    fn answer(_: &[Value]) -> Result<Value, ExecutionError> {
        Ok(Value::Int(42))
    }

    let mut registry = FunctionRegistry::default();
    registry.register("ANSWER", 0, Some(0), builtins::FunctionBody::Native(answer));

    let mut vm = Vm::with_registry(Arc::new(registry));
    assert_eq!(vm.eval("$ANSWER() + 0", &[]).unwrap(), Value::Int(42));
}

#[test]
fn test_min_int_literal_stays_int() {
    let rendered = Value::Int(i64::MIN).to_string();
    assert_eq!(rendered, "-9223372036854775808");
    assert_eq!(run(&rendered, &[]).unwrap(), Value::Int(i64::MIN));
    assert_eq!(run(&format!("{rendered} + 0"), &[]).unwrap(), Value::Int(i64::MIN));
    assert_eq!(run("9223372036854775808", &[]).unwrap(), dec("9223372036854775808"));
}
