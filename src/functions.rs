//! Runtime implementations of the DSEL predicate functions.
//!
//! Every function takes already-evaluated arguments and returns a boolean.
//! A value is *empty* when it is null (or missing) or a blank string; it is
//! *valid* for a type when it is not empty and conforms to that type.
use std::{cmp::Ordering, str::FromStr};

use chrono::{DateTime, NaiveDate, NaiveTime};
use regex::Regex;

use crate::{
    convert::FieldType,
    el::Builtin,
    error::{EvalError, FunctionArityError},
    pattern,
    value::Value,
};

/// Calls `builtin` with evaluated arguments.
///
/// # Examples
///
/// ```
/// use tql_dsel::{Value, el::Builtin, functions};
///
/// let args = [Value::String("Bob Dole".to_string()), Value::String("Aaa Aaaa".to_string())];
/// assert_eq!(functions::call(Builtin::Complies, &args), Ok(Value::Boolean(true)));
/// ```
pub fn call(builtin: Builtin, args: &[Value]) -> Result<Value, EvalError> {
    let result = match builtin {
        Builtin::Between => between(args)?,
        Builtin::In => {
            expect_args(builtin, args, &[2])?;
            match &args[1] {
                Value::Array(items) => {
                    !args[0].is_empty_value() && items.iter().any(|item| args[0].loosely_equals(item))
                }
                other => {
                    return Err(EvalError::TypeError(format!(
                        "in() requires an array, got {}",
                        other.type_name()
                    )));
                }
            }
        }
        Builtin::Contains => {
            expect_args(builtin, args, &[2, 3])?;
            let case_sensitive = args.get(2).is_none_or(Value::as_bool);
            contains(&args[0], &args[1], case_sensitive)
        }
        Builtin::ContainsIgnoreCase => {
            expect_args(builtin, args, &[2])?;
            contains(&args[0], &args[1], false)
        }
        Builtin::Complies => complies(args)?,
        Builtin::WordComplies => word_complies(args)?,
        Builtin::Matches => matches(args)?,
        Builtin::IsEmpty => {
            expect_args(builtin, args, &[1])?;
            args[0].is_empty_value()
        }
        Builtin::IsNull => {
            expect_args(builtin, args, &[1])?;
            args[0] == Value::Null
        }
        Builtin::IsValid => {
            expect_args(builtin, args, &[1, 2])?;
            match args.get(1) {
                Some(type_name) => is_of_type(&args[0], field_type(type_name)?),
                None => !args[0].is_empty_value(),
            }
        }
        Builtin::IsInvalid => {
            expect_args(builtin, args, &[1, 2])?;
            match args.get(1) {
                Some(type_name) => {
                    !args[0].is_empty_value() && !conforms(&args[0], field_type(type_name)?)
                }
                None => false,
            }
        }
        Builtin::IsOfType => {
            expect_args(builtin, args, &[2])?;
            is_of_type(&args[0], field_type(&args[1])?)
        }
    };
    Ok(Value::Boolean(result))
}

/// `complies(value, pattern)`: the value fully matches the character pattern.
pub fn complies(args: &[Value]) -> Result<bool, EvalError> {
    let (value, char_pattern) = two_non_null(Builtin::Complies, args)?;
    Ok(compile(&pattern::to_regex(&char_pattern))?.is_match(&value))
}

/// `wordComplies(value, pattern)`: the value fully matches the word pattern.
pub fn word_complies(args: &[Value]) -> Result<bool, EvalError> {
    let (value, word_pattern) = two_non_null(Builtin::WordComplies, args)?;
    Ok(compile(&pattern::word_pattern_to_regex(&word_pattern))?.is_match(&value))
}

/// `matches(value, regex)`: the regex finds a match anywhere in the value.
pub fn matches(args: &[Value]) -> Result<bool, EvalError> {
    let (value, regex) = two_non_null(Builtin::Matches, args)?;
    Ok(compile(&regex)?.is_match(&value))
}

fn compile(regex: &str) -> Result<Regex, EvalError> {
    Regex::new(regex).map_err(|e| EvalError::InvalidRegex {
        pattern: regex.to_string(),
        message: e.to_string(),
    })
}

/// Whether a non-empty value can be read as `field_type`.
pub fn conforms(value: &Value, field_type: FieldType) -> bool {
    match (field_type, value) {
        (_, Value::Null | Value::Array(_) | Value::Object(_)) => false,
        (FieldType::String, _) => true,
        (FieldType::Integer, Value::Integer(n)) => i32::try_from(*n).is_ok(),
        (FieldType::Integer, Value::String(s)) => s.trim().parse::<i32>().is_ok(),
        (FieldType::Long, Value::Integer(_)) => true,
        (FieldType::Long, Value::String(s)) => s.trim().parse::<i64>().is_ok(),
        (FieldType::Double | FieldType::Float | FieldType::Decimal, Value::Integer(_) | Value::Float(_)) => {
            true
        }
        (FieldType::Double | FieldType::Float | FieldType::Decimal, Value::String(_)) => {
            value.as_decimal().is_some() || value.as_string().trim().parse::<f64>().is_ok()
        }
        (FieldType::Boolean, Value::Boolean(_)) => true,
        (FieldType::Boolean, Value::String(s)) => {
            s.trim().eq_ignore_ascii_case("true") || s.trim().eq_ignore_ascii_case("false")
        }
        (FieldType::Date, Value::String(s)) => is_date(s.trim()),
        _ => false,
    }
}

fn is_of_type(value: &Value, field_type: FieldType) -> bool {
    !value.is_empty_value() && conforms(value, field_type)
}

/// `yyyy-MM-dd`, optionally followed by `T` or a space and a time of day.
fn is_date(text: &str) -> bool {
    let (date, time) = match text.split_once(['T', ' ']) {
        Some((date, time)) => (date, Some(time)),
        None => (text, None),
    };
    date.len() == 10
        && NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok()
        && time.is_none_or(|time| {
            ["%H:%M:%S%.f", "%H:%M:%S", "%H:%M"]
                .iter()
                .any(|format| NaiveTime::parse_from_str(time, format).is_ok())
                || DateTime::parse_from_rfc3339(text).is_ok()
        })
}

fn between(args: &[Value]) -> Result<bool, EvalError> {
    expect_args(Builtin::Between, args, &[3, 5])?;
    let value = &args[0];
    if value.is_empty_value() {
        return Ok(false);
    }
    let (lower_open, upper_open) = match args {
        [_, _, _, lower_open, upper_open] => (lower_open.as_bool(), upper_open.as_bool()),
        _ => (false, false),
    };
    let above = match value.compare(&args[1]) {
        Some(Ordering::Greater) => true,
        Some(Ordering::Equal) => !lower_open,
        _ => false,
    };
    let below = match value.compare(&args[2]) {
        Some(Ordering::Less) => true,
        Some(Ordering::Equal) => !upper_open,
        _ => false,
    };
    Ok(above && below)
}

fn contains(value: &Value, needle: &Value, case_sensitive: bool) -> bool {
    if *value == Value::Null || *needle == Value::Null {
        return false;
    }
    let (value, needle) = (value.as_string(), needle.as_string());
    if case_sensitive {
        value.contains(&needle)
    } else {
        value.to_lowercase().contains(&needle.to_lowercase())
    }
}

fn field_type(value: &Value) -> Result<FieldType, EvalError> {
    match value {
        Value::String(name) => {
            FieldType::from_str(name).map_err(|e| EvalError::TypeError(e.to_string()))
        }
        other => Err(EvalError::TypeError(format!(
            "type name must be a string, got {}",
            other.type_name()
        ))),
    }
}

fn expect_args(builtin: Builtin, args: &[Value], counts: &[usize]) -> Result<(), FunctionArityError> {
    if counts.contains(&args.len()) {
        return Ok(());
    }
    Err(FunctionArityError {
        function: builtin.name(),
        expected: counts
            .iter()
            .map(usize::to_string)
            .collect::<Vec<_>>()
            .join(" or "),
        found: args.len(),
    })
}

/// String forms of the two non-null arguments. Null arguments are not counted.
fn two_non_null(builtin: Builtin, args: &[Value]) -> Result<(String, String), FunctionArityError> {
    let non_null: Vec<&Value> = args.iter().filter(|arg| **arg != Value::Null).collect();
    match non_null.as_slice() {
        [value, second] => Ok((value.as_string(), second.as_string())),
        _ => Err(FunctionArityError {
            function: builtin.name(),
            expected: "2".to_string(),
            found: non_null.len(),
        }),
    }
}
