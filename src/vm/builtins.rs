use crate::value::Value;
use crate::vm::error::ExecutionError;
use crate::vm::interpreter::{Number, integral, logical_not, negate, overflow, to_number};
use crate::vm::parser::BinaryOp;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::HashMap;

pub type NativeFn = fn(&[Value]) -> Result<Value, ExecutionError>;

#[derive(Debug, Clone, Copy)]
pub enum FunctionBody {
    /// `IF(cond, then, else)`; arguments are evaluated lazily
    Conditional,
    Native(NativeFn),
}

#[derive(Debug, Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub min_args: usize,
    /// `None` for variadic functions
    pub max_args: Option<usize>,
    pub body: FunctionBody,
}

impl Builtin {
    pub fn check_arity(&self, actual: usize) -> Result<(), ExecutionError> {
        let ok = actual >= self.min_args && self.max_args.is_none_or(|max| actual <= max);
        if ok {
            return Ok(());
        }

        let expected = match self.max_args {
            Some(max) if max == self.min_args => max.to_string(),
            Some(max) => format!("{}..={max}", self.min_args),
            None => format!("at least {}", self.min_args),
        };
        Err(ExecutionError::ArgumentCount {
            function: self.name.to_string(),
            expected,
            actual,
        })
    }
}

/// Host functions callable from scripts as `$NAME(...)`.
#[derive(Debug, Clone)]
pub struct FunctionRegistry {
    functions: HashMap<&'static str, Builtin>,
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        let mut registry = Self {
            functions: HashMap::new(),
        };

        registry.register("IF", 3, Some(3), FunctionBody::Conditional);
        registry.native("UNARY", 2, Some(2), unary);

        registry.native("CAST_UNSIGNED", 1, Some(1), cast_unsigned);
        registry.native("CAST_SIGNED", 1, Some(1), cast_signed);
        registry.native("CAST_CHAR", 3, Some(3), cast_char);
        registry.native("CAST_NCHAR", 2, Some(2), cast_nchar);
        registry.native("CAST_DECIMAL", 3, Some(3), cast_decimal);
        registry.native("CAST_DATE", 1, Some(1), cast_date);
        registry.native("CAST_DATETIME", 1, Some(1), cast_datetime);
        registry.native("CAST_TIME", 1, Some(1), cast_time);
        registry.native("CAST_CHARSET", 2, Some(2), cast_charset);

        registry.native("ABS", 1, Some(1), abs);
        registry.native("CEIL", 1, Some(1), ceil);
        registry.native("CEILING", 1, Some(1), ceil);
        registry.native("FLOOR", 1, Some(1), floor);
        registry.native("ROUND", 1, Some(2), round);
        registry.native("MOD", 2, Some(2), modulo);
        registry.native("CONCAT", 1, None, concat);
        registry.native("UPPER", 1, Some(1), upper);
        registry.native("LOWER", 1, Some(1), lower);
        registry.native("LENGTH", 1, Some(1), length);
        registry.native("CHAR_LENGTH", 1, Some(1), char_length);
        registry.native("IFNULL", 2, Some(2), ifnull);
        registry.native("COALESCE", 1, None, coalesce);

        registry
    }
}

impl FunctionRegistry {
    pub fn register(
        &mut self,
        name: &'static str,
        min_args: usize,
        max_args: Option<usize>,
        body: FunctionBody,
    ) {
        self.functions.insert(
            name,
            Builtin {
                name,
                min_args,
                max_args,
                body,
            },
        );
    }

    fn native(&mut self, name: &'static str, min: usize, max: Option<usize>, f: NativeFn) {
        self.register(name, min, max, FunctionBody::Native(f));
    }

    /// Look up a function; names are matched case-insensitively.
    pub fn get(&self, name: &str) -> Option<&Builtin> {
        self.functions
            .get(name)
            .or_else(|| self.functions.get(name.to_ascii_uppercase().as_str()))
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.functions.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

/// SQL string rendering; booleans become `1`/`0`.
fn sql_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(if *b { "1" } else { "0" }.to_string()),
        other => Some(other.to_plain_string()),
    }
}

fn int_arg(args: &[Value], index: usize, function: &str) -> Result<i64, ExecutionError> {
    match to_number(&args[index])? {
        Some(Number::Int(i)) => Ok(i),
        Some(Number::Decimal(d)) if d.fract().is_zero() => d
            .to_i64()
            .ok_or_else(|| ExecutionError::InvalidArgument(format!("{function}: {d} too large"))),
        other => Err(ExecutionError::InvalidArgument(format!(
            "{function}: argument {index} must be an integer, got {other:?}"
        ))),
    }
}

fn str_arg<'v>(args: &'v [Value], index: usize, function: &str) -> Result<&'v str, ExecutionError> {
    match &args[index] {
        Value::String(s) => Ok(s),
        other => Err(ExecutionError::InvalidArgument(format!(
            "{function}: argument {index} must be a string, got {}",
            other.type_name()
        ))),
    }
}

fn cast_number(value: &Value, target: &str) -> Result<Option<Number>, ExecutionError> {
    to_number(value).map_err(|_| {
        ExecutionError::InvalidCast(format!("cannot cast {value} to {target}"))
    })
}

fn unary(args: &[Value]) -> Result<Value, ExecutionError> {
    let op = str_arg(args, 0, "UNARY")?;
    let operand = &args[1];

    match op.to_ascii_uppercase().as_str() {
        "-" => negate(operand),
        "+" => Ok(operand.clone()),
        "!" | "NOT" => Ok(logical_not(operand)),
        "~" => {
            let Some(n) = cast_unsigned_bits(operand)? else {
                return Ok(Value::Null);
            };
            Ok(unsigned_value(!n))
        }
        other => Err(ExecutionError::InvalidArgument(format!(
            "UNARY: unknown operator {other}"
        ))),
    }
}

/// 2^64, used to wrap negative values into the unsigned range.
fn two_pow_64() -> Decimal {
    Decimal::from(u64::MAX) + Decimal::ONE
}

fn unsigned_value(n: u64) -> Value {
    match i64::try_from(n) {
        Ok(i) => Value::Int(i),
        Err(_) => Value::Decimal(Decimal::from(n)),
    }
}

fn cast_unsigned_bits(value: &Value) -> Result<Option<u64>, ExecutionError> {
    let Some(n) = cast_number(value, "UNSIGNED")? else {
        return Ok(None);
    };

    let mut d = n
        .as_decimal()
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    if d.is_sign_negative() && !d.is_zero() {
        d += two_pow_64();
    }

    d.to_u64()
        .map(Some)
        .ok_or_else(|| ExecutionError::InvalidCast(format!("{value} out of UNSIGNED range")))
}

fn cast_unsigned(args: &[Value]) -> Result<Value, ExecutionError> {
    Ok(cast_unsigned_bits(&args[0])?.map_or(Value::Null, unsigned_value))
}

fn cast_signed(args: &[Value]) -> Result<Value, ExecutionError> {
    let Some(n) = cast_number(&args[0], "SIGNED")? else {
        return Ok(Value::Null);
    };

    let d = n
        .as_decimal()
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    d.to_i64()
        .map(Value::Int)
        .ok_or_else(|| ExecutionError::InvalidCast(format!("{} out of SIGNED range", args[0])))
}

fn truncate_chars(s: String, n: i64) -> String {
    match usize::try_from(n) {
        Ok(n) if n > 0 && s.chars().count() > n => s.chars().take(n).collect(),
        _ => s,
    }
}

fn cast_char(args: &[Value]) -> Result<Value, ExecutionError> {
    let n = int_arg(args, 0, "CAST_CHAR")?;
    // only the charset name is carried; strings are always UTF-8
    str_arg(args, 1, "CAST_CHAR")?;
    Ok(sql_string(&args[2]).map_or(Value::Null, |s| Value::String(truncate_chars(s, n))))
}

fn cast_nchar(args: &[Value]) -> Result<Value, ExecutionError> {
    let n = int_arg(args, 0, "CAST_NCHAR")?;
    Ok(sql_string(&args[1]).map_or(Value::Null, |s| Value::String(truncate_chars(s, n))))
}

fn cast_charset(args: &[Value]) -> Result<Value, ExecutionError> {
    str_arg(args, 0, "CAST_CHARSET")?;
    Ok(sql_string(&args[1]).map_or(Value::Null, Value::String))
}

fn cast_decimal(args: &[Value]) -> Result<Value, ExecutionError> {
    let mut precision = int_arg(args, 0, "CAST_DECIMAL")?;
    let mut scale = int_arg(args, 1, "CAST_DECIMAL")?;
    if precision <= 0 {
        precision = 10;
        scale = 0;
    }
    if scale > precision {
        return Err(ExecutionError::InvalidCast(format!(
            "DECIMAL({precision}, {scale}): scale exceeds precision"
        )));
    }

    let Some(n) = cast_number(&args[2], "DECIMAL")? else {
        return Ok(Value::Null);
    };

    let scale = u32::try_from(scale)
        .map_err(|_| ExecutionError::InvalidCast(format!("invalid DECIMAL scale {scale}")))?;
    let mut d = n
        .as_decimal()
        .round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);

    // clamp to the largest value the declared precision can hold
    if precision <= 28 {
        let mantissa = 10_i128.pow(u32::try_from(precision).unwrap_or(28)) - 1;
        if let Ok(max) = Decimal::try_from_i128_with_scale(mantissa, scale) {
            d = d.clamp(-max, max);
        }
    }

    Ok(Value::Decimal(d))
}

fn days_in_month(year: u32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ if (year % 4 == 0 && year % 100 != 0) || year % 400 == 0 => 29,
        _ => 28,
    }
}

fn fixed_digits(s: &str, len: usize) -> Option<u32> {
    if s.len() == len && s.bytes().all(|b| b.is_ascii_digit()) {
        s.parse().ok()
    } else {
        None
    }
}

fn parse_date(s: &str) -> Option<String> {
    let mut parts = s.split('-');
    let year = fixed_digits(parts.next()?, 4)?;
    let month = fixed_digits(parts.next()?, 2)?;
    let day = fixed_digits(parts.next()?, 2)?;
    if parts.next().is_some() || !(1..=12).contains(&month) {
        return None;
    }
    if day == 0 || day > days_in_month(year, month) {
        return None;
    }
    Some(format!("{year:04}-{month:02}-{day:02}"))
}

/// `HH:MM:SS[.fraction]`, hours bounded by `max_hours`.
fn parse_clock(s: &str, max_hours: u32) -> Option<String> {
    let (clock, fraction) = match s.split_once('.') {
        Some((clock, fraction)) => (clock, Some(fraction)),
        None => (s, None),
    };

    let mut parts = clock.split(':');
    let hours_text = parts.next()?;
    if hours_text.is_empty() || hours_text.len() > 3 {
        return None;
    }
    let hours = fixed_digits(hours_text, hours_text.len())?;
    let minutes = fixed_digits(parts.next()?, 2)?;
    let seconds = fixed_digits(parts.next()?, 2)?;
    if parts.next().is_some() || hours > max_hours || minutes > 59 || seconds > 59 {
        return None;
    }

    let mut out = format!("{hours:02}:{minutes:02}:{seconds:02}");
    if let Some(fraction) = fraction {
        if fraction.is_empty() || fraction.len() > 6 || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }
        out.push('.');
        out.push_str(fraction);
    }
    Some(out)
}

fn parse_datetime(s: &str) -> Option<String> {
    let s = s.trim();
    match s.split_once([' ', 'T']) {
        Some((date, clock)) => Some(format!("{} {}", parse_date(date)?, parse_clock(clock, 23)?)),
        None => Some(format!("{} 00:00:00", parse_date(s)?)),
    }
}

fn parse_time(s: &str) -> Option<String> {
    let s = s.trim();
    match s.strip_prefix('-') {
        Some(rest) => Some(format!("-{}", parse_clock(rest, 838)?)),
        None => parse_clock(s, 838),
    }
}

fn cast_temporal(value: &Value, parse: fn(&str) -> Option<String>) -> Value {
    match value {
        Value::String(s) => parse(s).map_or(Value::Null, Value::String),
        _ => Value::Null,
    }
}

fn cast_date(args: &[Value]) -> Result<Value, ExecutionError> {
    Ok(cast_temporal(&args[0], |s| {
        let s = s.trim();
        let date = s.split_once([' ', 'T']).map_or(s, |(date, _)| date);
        parse_date(date)
    }))
}

fn cast_datetime(args: &[Value]) -> Result<Value, ExecutionError> {
    Ok(cast_temporal(&args[0], parse_datetime))
}

fn cast_time(args: &[Value]) -> Result<Value, ExecutionError> {
    Ok(cast_temporal(&args[0], parse_time))
}

fn abs(args: &[Value]) -> Result<Value, ExecutionError> {
    Ok(match to_number(&args[0])? {
        None => Value::Null,
        Some(Number::Int(i)) => match i.checked_abs() {
            Some(a) => Value::Int(a),
            None => Value::Decimal(Decimal::from(i).abs()),
        },
        Some(Number::Decimal(d)) => Value::Decimal(d.abs()),
    })
}

fn ceil(args: &[Value]) -> Result<Value, ExecutionError> {
    Ok(match to_number(&args[0])? {
        None => Value::Null,
        Some(Number::Int(i)) => Value::Int(i),
        Some(Number::Decimal(d)) => integral(d.ceil()),
    })
}

fn floor(args: &[Value]) -> Result<Value, ExecutionError> {
    Ok(match to_number(&args[0])? {
        None => Value::Null,
        Some(Number::Int(i)) => Value::Int(i),
        Some(Number::Decimal(d)) => integral(d.floor()),
    })
}

fn round(args: &[Value]) -> Result<Value, ExecutionError> {
    let places = if args.len() > 1 {
        if args[1].is_null() {
            return Ok(Value::Null);
        }
        int_arg(args, 1, "ROUND")?
    } else {
        0
    };

    let Some(n) = to_number(&args[0])? else {
        return Ok(Value::Null);
    };
    let d = n.as_decimal();

    let rounded = if places >= 0 {
        let places = u32::try_from(places.min(28)).unwrap_or(28);
        d.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
    } else {
        let exp = u32::try_from(places.unsigned_abs()).unwrap_or(u32::MAX);
        match power_of_ten(exp) {
            Some(factor) => (d / factor)
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .checked_mul(factor)
                .ok_or_else(overflow)?,
            // 10^exp is past Decimal::MAX, so only the upper half rounds away from zero
            None => match power_of_ten(exp - 1).and_then(|h| h.checked_mul(Decimal::from(5))) {
                Some(half) if d.abs() >= half => return Err(overflow()),
                _ => Decimal::ZERO,
            },
        }
    };

    Ok(match n {
        Number::Int(_) => integral(rounded),
        Number::Decimal(_) => Value::Decimal(rounded),
    })
}

fn power_of_ten(exp: u32) -> Option<Decimal> {
    10_i128
        .checked_pow(exp)
        .and_then(|n| Decimal::try_from_i128_with_scale(n, 0).ok())
}

fn modulo(args: &[Value]) -> Result<Value, ExecutionError> {
    crate::vm::interpreter::binary_operation(BinaryOp::Mod, &args[0], &args[1])
}

fn concat(args: &[Value]) -> Result<Value, ExecutionError> {
    let mut out = String::new();
    for arg in args {
        match sql_string(arg) {
            Some(s) => out.push_str(&s),
            None => return Ok(Value::Null),
        }
    }
    Ok(Value::String(out))
}

fn upper(args: &[Value]) -> Result<Value, ExecutionError> {
    Ok(sql_string(&args[0]).map_or(Value::Null, |s| Value::String(s.to_uppercase())))
}

fn lower(args: &[Value]) -> Result<Value, ExecutionError> {
    Ok(sql_string(&args[0]).map_or(Value::Null, |s| Value::String(s.to_lowercase())))
}

fn length(args: &[Value]) -> Result<Value, ExecutionError> {
    Ok(sql_string(&args[0]).map_or(Value::Null, |s| Value::Int(s.len() as i64)))
}

fn char_length(args: &[Value]) -> Result<Value, ExecutionError> {
    Ok(sql_string(&args[0]).map_or(Value::Null, |s| Value::Int(s.chars().count() as i64)))
}

fn ifnull(args: &[Value]) -> Result<Value, ExecutionError> {
    Ok(if args[0].is_null() {
        args[1].clone()
    } else {
        args[0].clone()
    })
}

fn coalesce(args: &[Value]) -> Result<Value, ExecutionError> {
    Ok(args
        .iter()
        .find(|v| !v.is_null())
        .cloned()
        .unwrap_or(Value::Null))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn call(name: &str, args: &[Value]) -> Result<Value, ExecutionError> {
        let registry = FunctionRegistry::default();
        let builtin = registry.get(name).unwrap();
        builtin.check_arity(args.len())?;
        match builtin.body {
            FunctionBody::Native(f) => f(args),
            FunctionBody::Conditional => panic!("{name} is not native"),
        }
    }

    fn dec(s: &str) -> Value {
        Value::Decimal(Decimal::from_str(s).unwrap())
    }

    #[test]
    fn test_registry_lookup_is_case_insensitive() {
        let registry = FunctionRegistry::default();
        assert!(registry.get("cast_signed").is_some());
        assert!(registry.get("Concat").is_some());
        assert!(registry.get("NOPE").is_none());
        assert!(registry.names().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_arity_errors() {
        let err = call("ABS", &[]).unwrap_err();
        assert_eq!(
            err,
            ExecutionError::ArgumentCount {
                function: "ABS".to_string(),
                expected: "1".to_string(),
                actual: 0,
            }
        );
        assert!(call("ROUND", &[Value::Int(1), Value::Int(2), Value::Int(3)]).is_err());
    }

    #[test]
    fn test_unary() {
        assert_eq!(call("UNARY", &["-".into(), Value::Int(5)]).unwrap(), Value::Int(-5));
        assert_eq!(call("UNARY", &["+".into(), Value::Int(5)]).unwrap(), Value::Int(5));
        assert_eq!(
            call("UNARY", &["NOT".into(), Value::Bool(true)]).unwrap(),
            Value::Bool(false)
        );
        assert_eq!(call("UNARY", &["!".into(), Value::Null]).unwrap(), Value::Null);
        assert_eq!(
            call("UNARY", &["~".into(), Value::Int(0)]).unwrap(),
            dec("18446744073709551615")
        );
        assert!(call("UNARY", &["?".into(), Value::Int(0)]).is_err());
    }

    #[test]
    fn test_cast_unsigned_wraps_negative() {
        assert_eq!(
            call("CAST_UNSIGNED", &[Value::Int(-1)]).unwrap(),
            dec("18446744073709551615")
        );
        assert_eq!(call("CAST_UNSIGNED", &[dec("2.5")]).unwrap(), Value::Int(3));
        assert_eq!(call("CAST_UNSIGNED", &[Value::Null]).unwrap(), Value::Null);
    }

    #[test]
    fn test_cast_signed() {
        assert_eq!(call("CAST_SIGNED", &["42".into()]).unwrap(), Value::Int(42));
        assert_eq!(call("CAST_SIGNED", &[dec("-2.5")]).unwrap(), Value::Int(-3));
        assert!(matches!(
            call("CAST_SIGNED", &["abc".into()]),
            Err(ExecutionError::InvalidCast(_))
        ));
    }

    #[test]
    fn test_cast_char_truncates() {
        assert_eq!(
            call("CAST_CHAR", &[Value::Int(3), "utf8".into(), "abcdef".into()]).unwrap(),
            Value::from("abc")
        );
        assert_eq!(
            call("CAST_CHAR", &[Value::Int(0), "".into(), Value::Int(12345)]).unwrap(),
            Value::from("12345")
        );
        assert_eq!(
            call("CAST_NCHAR", &[Value::Int(2), "héllo".into()]).unwrap(),
            Value::from("hé")
        );
        assert_eq!(
            call("CAST_CHARSET", &["utf8".into(), Value::Bool(true)]).unwrap(),
            Value::from("1")
        );
    }

    #[test]
    fn test_cast_decimal() {
        assert_eq!(
            call("CAST_DECIMAL", &[Value::Int(5), Value::Int(2), dec("3.14159")]).unwrap(),
            dec("3.14")
        );
        // clamped to 999.99
        assert_eq!(
            call("CAST_DECIMAL", &[Value::Int(5), Value::Int(2), Value::Int(123456)]).unwrap(),
            dec("999.99")
        );
        // DECIMAL with no precision is DECIMAL(10, 0)
        assert_eq!(
            call("CAST_DECIMAL", &[Value::Int(0), Value::Int(0), dec("7.5")]).unwrap(),
            dec("8")
        );
        assert!(call("CAST_DECIMAL", &[Value::Int(2), Value::Int(3), Value::Int(1)]).is_err());
    }

    #[test]
    fn test_cast_temporal() {
        assert_eq!(
            call("CAST_DATE", &["2024-02-29 10:11:12".into()]).unwrap(),
            Value::from("2024-02-29")
        );
        assert_eq!(call("CAST_DATE", &["2023-02-29".into()]).unwrap(), Value::Null);
        assert_eq!(
            call("CAST_DATETIME", &["2024-01-02".into()]).unwrap(),
            Value::from("2024-01-02 00:00:00")
        );
        assert_eq!(
            call("CAST_DATETIME", &["2024-01-02 25:00:00".into()]).unwrap(),
            Value::Null
        );
        assert_eq!(
            call("CAST_TIME", &["-100:30:00.5".into()]).unwrap(),
            Value::from("-100:30:00.5")
        );
        assert_eq!(call("CAST_TIME", &[Value::Int(1)]).unwrap(), Value::Null);
    }

    #[test]
    fn test_math_functions() {
        assert_eq!(call("ABS", &[Value::Int(-3)]).unwrap(), Value::Int(3));
        assert_eq!(call("CEIL", &[dec("1.2")]).unwrap(), Value::Int(2));
        assert_eq!(call("FLOOR", &[dec("-1.2")]).unwrap(), Value::Int(-2));
        assert_eq!(call("ROUND", &[dec("2.5")]).unwrap(), dec("3"));
        assert_eq!(call("ROUND", &[dec("1.255"), Value::Int(2)]).unwrap(), dec("1.26"));
        assert_eq!(call("ROUND", &[Value::Int(1250), Value::Int(-2)]).unwrap(), Value::Int(1300));
        assert_eq!(
            call("ROUND", &[dec("250000000000000000000"), Value::Int(-20)]).unwrap(),
            dec("300000000000000000000")
        );
        assert_eq!(call("ROUND", &[Value::Int(5), Value::Int(-40)]).unwrap(), Value::Int(0));
        assert_eq!(
            call("ROUND", &[dec("40000000000000000000000000000"), Value::Int(-29)]).unwrap(),
            dec("0")
        );
        assert!(matches!(
            call("ROUND", &[dec("79228162514264337593543950335"), Value::Int(-1)]),
            Err(ExecutionError::InvalidArgument(_))
        ));
        assert!(matches!(
            call("ROUND", &[dec("60000000000000000000000000000"), Value::Int(-29)]),
            Err(ExecutionError::InvalidArgument(_))
        ));
        assert_eq!(call("MOD", &[Value::Int(10), Value::Int(3)]).unwrap(), Value::Int(1));
    }

    #[test]
    fn test_string_functions() {
        assert_eq!(
            call("CONCAT", &["a".into(), Value::Int(1), Value::Bool(false)]).unwrap(),
            Value::from("a10")
        );
        assert_eq!(call("CONCAT", &["a".into(), Value::Null]).unwrap(), Value::Null);
        assert_eq!(call("UPPER", &["abc".into()]).unwrap(), Value::from("ABC"));
        assert_eq!(call("LOWER", &["ABC".into()]).unwrap(), Value::from("abc"));
        assert_eq!(call("LENGTH", &["héllo".into()]).unwrap(), Value::Int(6));
        assert_eq!(call("CHAR_LENGTH", &["héllo".into()]).unwrap(), Value::Int(5));
    }

    #[test]
    fn test_null_functions() {
        assert_eq!(call("IFNULL", &[Value::Null, Value::Int(2)]).unwrap(), Value::Int(2));
        assert_eq!(
            call("COALESCE", &[Value::Null, Value::Null, "x".into()]).unwrap(),
            Value::from("x")
        );
        assert_eq!(call("COALESCE", &[Value::Null]).unwrap(), Value::Null);
    }
}
