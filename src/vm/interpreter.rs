use crate::value::Value;
use crate::vm::builtins::{FunctionBody, FunctionRegistry};
use crate::vm::error::ExecutionError;
use crate::vm::parser::{BinaryOp, Expr, UnaryOp};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::cmp::Ordering;

/// Tree-walking evaluator for a parsed script, bound to one call's arguments.
pub struct Interpreter<'a> {
    registry: &'a FunctionRegistry,
    args: &'a [Value],
}

impl<'a> Interpreter<'a> {
    pub fn new(registry: &'a FunctionRegistry, args: &'a [Value]) -> Self {
        Self { registry, args }
    }

    pub fn evaluate(&self, expr: &Expr) -> Result<Value, ExecutionError> {
        match expr {
            Expr::Literal(value) => Ok(value.clone()),
            Expr::Argument(index) => {
                self.args
                    .get(*index)
                    .cloned()
                    .ok_or(ExecutionError::ArgumentOutOfRange {
                        index: *index,
                        len: self.args.len(),
                    })
            }
            Expr::Unary { op, expr } => {
                let operand = self.evaluate(expr)?;
                match op {
                    UnaryOp::Neg => negate(&operand),
                    UnaryOp::Plus => Ok(operand),
                    UnaryOp::Not => Ok(logical_not(&operand)),
                }
            }
            Expr::Binary { op, left, right } => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;
                binary_operation(*op, &left, &right)
            }
            Expr::Call { name, args } => self.evaluate_call(name, args),
        }
    }

    fn evaluate_call(&self, name: &str, args: &[Expr]) -> Result<Value, ExecutionError> {
        let builtin = self
            .registry
            .get(name)
            .ok_or_else(|| ExecutionError::UnknownFunction(name.to_string()))?;
        builtin.check_arity(args.len())?;

        match builtin.body {
            // only the selected branch is evaluated
            FunctionBody::Conditional => {
                let condition = self.evaluate(&args[0])?;
                if truthy(&condition).unwrap_or(false) {
                    self.evaluate(&args[1])
                } else {
                    self.evaluate(&args[2])
                }
            }
            FunctionBody::Native(f) => {
                let values = args
                    .iter()
                    .map(|arg| self.evaluate(arg))
                    .collect::<Result<Vec<_>, _>>()?;
                f(&values)
            }
        }
    }
}

/// A value in arithmetic context.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Number {
    Int(i64),
    Decimal(Decimal),
}

impl Number {
    pub(crate) fn as_decimal(self) -> Decimal {
        match self {
            Self::Int(i) => Decimal::from(i),
            Self::Decimal(d) => d,
        }
    }

    pub(crate) fn is_zero(self) -> bool {
        match self {
            Self::Int(i) => i == 0,
            Self::Decimal(d) => d.is_zero(),
        }
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        match n {
            Number::Int(i) => Self::Int(i),
            Number::Decimal(d) => Self::Decimal(d),
        }
    }
}

/// Numeric view of a non-null value; `None` for null.
pub(crate) fn to_number(value: &Value) -> Result<Option<Number>, ExecutionError> {
    match value {
        Value::Null => Ok(None),
        Value::Int(i) => Ok(Some(Number::Int(*i))),
        Value::Bool(b) => Ok(Some(Number::Int(i64::from(*b)))),
        Value::Decimal(d) => Ok(Some(Number::Decimal(*d))),
        Value::String(s) => {
            let trimmed = s.trim();
            if let Ok(i) = trimmed.parse::<i64>() {
                return Ok(Some(Number::Int(i)));
            }
            trimmed
                .parse::<Decimal>()
                .map(|d| Some(Number::Decimal(d)))
                .map_err(|_| ExecutionError::TypeMismatch(format!("'{s}' is not a number")))
        }
    }
}

/// Normalise a decimal result back to an integer when it has no fraction.
pub(crate) fn integral(d: Decimal) -> Value {
    if d.fract().is_zero() {
        if let Some(i) = d.to_i64() {
            return Value::Int(i);
        }
    }
    Value::Decimal(d)
}

/// SQL truthiness; `None` is unknown (null).
pub(crate) fn truthy(value: &Value) -> Option<bool> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(*b),
        Value::Int(i) => Some(*i != 0),
        Value::Decimal(d) => Some(!d.is_zero()),
        Value::String(_) => Some(value.as_decimal().is_some_and(|d| !d.is_zero())),
    }
}

pub(crate) fn logical_not(value: &Value) -> Value {
    match truthy(value) {
        Some(b) => Value::Bool(!b),
        None => Value::Null,
    }
}

pub(crate) fn negate(value: &Value) -> Result<Value, ExecutionError> {
    Ok(match to_number(value)? {
        None => Value::Null,
        Some(Number::Int(i)) => match i.checked_neg() {
            Some(n) => Value::Int(n),
            None => Value::Decimal(-Decimal::from(i)),
        },
        // an integer literal one past i64::MAX lexes as a decimal; its negation is i64::MIN
        Some(Number::Decimal(d)) if d.scale() == 0 && -d == Decimal::from(i64::MIN) => {
            Value::Int(i64::MIN)
        }
        Some(Number::Decimal(d)) => Value::Decimal(-d),
    })
}

pub fn binary_operation(op: BinaryOp, left: &Value, right: &Value) -> Result<Value, ExecutionError> {
    match op {
        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul => arithmetic(op, left, right),
        BinaryOp::Div => divide(left, right),
        BinaryOp::IntDiv => int_divide(left, right),
        BinaryOp::Mod => modulo(left, right),
        BinaryOp::NullSafeEq => Ok(Value::Bool(match (left, right) {
            (Value::Null, Value::Null) => true,
            (Value::Null, _) | (_, Value::Null) => false,
            _ => compare(left, right) == Ordering::Equal,
        })),
        _ => {
            if left.is_null() || right.is_null() {
                return Ok(Value::Null);
            }
            let ordering = compare(left, right);
            let result = match op {
                BinaryOp::Eq => ordering.is_eq(),
                BinaryOp::Ne => ordering.is_ne(),
                BinaryOp::Lt => ordering.is_lt(),
                BinaryOp::Lte => ordering.is_le(),
                BinaryOp::Gt => ordering.is_gt(),
                _ => ordering.is_ge(),
            };
            Ok(Value::Bool(result))
        }
    }
}

fn operands(left: &Value, right: &Value) -> Result<Option<(Number, Number)>, ExecutionError> {
    let (Some(l), Some(r)) = (to_number(left)?, to_number(right)?) else {
        return Ok(None);
    };
    Ok(Some((l, r)))
}

pub(crate) fn overflow() -> ExecutionError {
    ExecutionError::InvalidArgument("numeric overflow".to_string())
}

fn arithmetic(op: BinaryOp, left: &Value, right: &Value) -> Result<Value, ExecutionError> {
    let Some((l, r)) = operands(left, right)? else {
        return Ok(Value::Null);
    };

    if let (Number::Int(a), Number::Int(b)) = (l, r) {
        let result = match op {
            BinaryOp::Add => a.checked_add(b),
            BinaryOp::Sub => a.checked_sub(b),
            _ => a.checked_mul(b),
        };
        if let Some(i) = result {
            return Ok(Value::Int(i));
        }
    }

    // mixed operands, or i64 overflow
    let (a, b) = (l.as_decimal(), r.as_decimal());
    let result = match op {
        BinaryOp::Add => a.checked_add(b),
        BinaryOp::Sub => a.checked_sub(b),
        _ => a.checked_mul(b),
    };
    result.map(Value::Decimal).ok_or_else(overflow)
}

fn divide(left: &Value, right: &Value) -> Result<Value, ExecutionError> {
    let Some((l, r)) = operands(left, right)? else {
        return Ok(Value::Null);
    };
    if r.is_zero() {
        return Ok(Value::Null);
    }

    l.as_decimal()
        .checked_div(r.as_decimal())
        .map(|d| Value::Decimal(d.normalize()))
        .ok_or_else(overflow)
}

fn int_divide(left: &Value, right: &Value) -> Result<Value, ExecutionError> {
    let Some((l, r)) = operands(left, right)? else {
        return Ok(Value::Null);
    };
    if r.is_zero() {
        return Ok(Value::Null);
    }

    if let (Number::Int(a), Number::Int(b)) = (l, r) {
        if let Some(i) = a.checked_div(b) {
            return Ok(Value::Int(i));
        }
    }

    l.as_decimal()
        .checked_div(r.as_decimal())
        .map(|d| integral(d.trunc()))
        .ok_or_else(overflow)
}

fn modulo(left: &Value, right: &Value) -> Result<Value, ExecutionError> {
    let Some((l, r)) = operands(left, right)? else {
        return Ok(Value::Null);
    };
    if r.is_zero() {
        return Ok(Value::Null);
    }

    if let (Number::Int(a), Number::Int(b)) = (l, r) {
        // i64::MIN % -1 is the only overflow and its result is 0
        return Ok(Value::Int(a.checked_rem(b).unwrap_or(0)));
    }

    l.as_decimal()
        .checked_rem(r.as_decimal())
        .map(Value::Decimal)
        .ok_or_else(overflow)
}

/// Total order used by comparisons. Numbers compare numerically, strings
/// lexically; a string against a number compares numerically when the
/// string parses, otherwise both sides compare as text.
pub fn compare(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Less,
        (_, Value::Null) => Ordering::Greater,
        (Value::String(a), Value::String(b)) => a.cmp(b),
        _ => match (left.as_decimal(), right.as_decimal()) {
            (Some(a), Some(b)) => a.cmp(&b),
            _ => left.to_plain_string().cmp(&right.to_plain_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Value {
        Value::Decimal(Decimal::from_str(s).unwrap())
    }

    #[test]
    fn test_integer_arithmetic() {
        assert_eq!(
            binary_operation(BinaryOp::Add, &Value::Int(2), &Value::Int(3)).unwrap(),
            Value::Int(5)
        );
        assert_eq!(
            binary_operation(BinaryOp::Mul, &Value::Int(4), &Value::Bool(true)).unwrap(),
            Value::Int(4)
        );
    }

    #[test]
    fn test_overflow_promotes_to_decimal() {
        let result = binary_operation(BinaryOp::Add, &Value::Int(i64::MAX), &Value::Int(1)).unwrap();
        assert_eq!(result, dec("9223372036854775808"));
    }

    #[test]
    fn test_division() {
        assert_eq!(
            binary_operation(BinaryOp::Div, &Value::Int(7), &Value::Int(2)).unwrap(),
            dec("3.5")
        );
        assert_eq!(
            binary_operation(BinaryOp::Div, &Value::Int(7), &Value::Int(0)).unwrap(),
            Value::Null
        );
        assert_eq!(
            binary_operation(BinaryOp::IntDiv, &Value::Int(7), &Value::Int(2)).unwrap(),
            Value::Int(3)
        );
        assert_eq!(
            binary_operation(BinaryOp::Mod, &Value::Int(7), &Value::Int(0)).unwrap(),
            Value::Null
        );
    }

    #[test]
    fn test_null_propagation() {
        for op in [BinaryOp::Add, BinaryOp::Div, BinaryOp::Eq, BinaryOp::Lt] {
            assert_eq!(
                binary_operation(op, &Value::Null, &Value::Int(1)).unwrap(),
                Value::Null
            );
        }
        assert_eq!(
            binary_operation(BinaryOp::NullSafeEq, &Value::Null, &Value::Null).unwrap(),
            Value::Bool(true)
        );
        assert_eq!(
            binary_operation(BinaryOp::NullSafeEq, &Value::Int(1), &Value::Null).unwrap(),
            Value::Bool(false)
        );
    }

    #[test]
    fn test_compare_mixed() {
        assert_eq!(compare(&Value::Int(3), &dec("3.0")), Ordering::Equal);
        assert_eq!(compare(&Value::from("10"), &Value::Int(9)), Ordering::Greater);
        assert_eq!(compare(&Value::from("b"), &Value::from("a")), Ordering::Greater);
    }

    #[test]
    fn test_non_numeric_string_in_arithmetic() {
        assert!(matches!(
            binary_operation(BinaryOp::Add, &Value::from("abc"), &Value::Int(1)),
            Err(ExecutionError::TypeMismatch(_))
        ));
    }

    #[test]
    fn test_truthy() {
        assert_eq!(truthy(&Value::Null), None);
        assert_eq!(truthy(&Value::from("0.0")), Some(false));
        assert_eq!(truthy(&Value::from("2")), Some(true));
        assert_eq!(truthy(&Value::from("abc")), Some(false));
        assert_eq!(truthy(&dec("0.1")), Some(true));
    }

    #[test]
    fn test_negate_min() {
        assert_eq!(negate(&Value::Int(i64::MIN)).unwrap(), dec("9223372036854775808"));
    }

    #[test]
    fn test_negate_back_to_min() {
        let wide = negate(&Value::Int(i64::MIN)).unwrap();
        assert_eq!(negate(&wide).unwrap(), Value::Int(i64::MIN));
        assert_eq!(negate(&dec("9223372036854775808.0")).unwrap(), dec("-9223372036854775808.0"));
        assert!(matches!(
            negate(&dec("9223372036854775808.0")).unwrap(),
            Value::Decimal(_)
        ));
    }
}
