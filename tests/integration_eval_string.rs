use fnscript::{EvalError, ExecutionError, Value, eval_string};
use rust_decimal::Decimal;

#[test]
fn test_eval_string_literals() {
    assert_eq!(eval_string("1 + 2 * 3", &[]).unwrap(), Value::Int(7));
    assert_eq!(
        eval_string(r"'it\'s'", &[]).unwrap(),
        Value::from("it's")
    );
    assert_eq!(eval_string("null", &[]).unwrap(), Value::Null);
    assert_eq!(
        eval_string("10 / 4", &[]).unwrap(),
        Value::Decimal(Decimal::new(25, 1))
    );
}

#[test]
fn test_eval_string_with_arguments() {
    let args = [Value::Int(10), Value::Int(20), Value::Int(30)];
    assert_eq!(eval_string("arguments[2]", &args).unwrap(), Value::Int(30));
    assert_eq!(
        eval_string("$COALESCE(arguments[0], arguments[1])", &[Value::Null, Value::Int(2)]).unwrap(),
        Value::Int(2)
    );
}

#[test]
fn test_eval_string_errors() {
    assert!(matches!(
        eval_string("$IF(1, 2)", &[]),
        Err(EvalError::Execution(ExecutionError::ArgumentCount { actual: 2, .. }))
    ));
    assert!(matches!(
        eval_string("1 +* 2", &[]),
        Err(EvalError::Execution(ExecutionError::Syntax { .. }))
    ));
}

#[test]
fn test_random_string_roundtrip_through_script() {
    for _ in 0..50 {
        let text: String = (0..fastrand::usize(0..16))
            .map(|_| fastrand::choice(['a', 'b', '\'', '\\', '\n', 'é']).unwrap())
            .collect();
        let script = Value::from(text.as_str()).to_string();
        assert_eq!(eval_string(&script, &[]).unwrap(), Value::String(text));
    }
}
