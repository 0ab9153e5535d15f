use std::cmp::Ordering;

use tracing::trace;

use crate::{
    el::{BinaryOp, ElNode, FunctionName, LiteralKind, UnaryOp},
    error::EvalError,
    functions,
    value::Value,
};

/// Evaluation context: the record that field references resolve against.
#[derive(Debug, Clone, Copy)]
pub struct EvalContext<'a> {
    pub record: &'a Value,
}

impl<'a> EvalContext<'a> {
    pub fn new(record: &'a Value) -> Self {
        EvalContext { record }
    }
}

/// Evaluates DSEL trees against records.
///
/// Field references read the record (dotted names walk nested objects);
/// a missing field evaluates to [`Value::Null`].
#[derive(Debug, Default, Clone, Copy)]
pub struct Evaluator;

impl Evaluator {
    pub fn new() -> Self {
        Self
    }

    /// Evaluates a filter expression and reduces the result to a boolean.
    ///
    /// # Examples
    ///
    /// ```
    /// use tql_dsel::{Evaluator, Value, convert::convert_for_db};
    ///
    /// let filter = convert_for_db("(age between [18, 65]) and (name complies 'Aaa')", None).unwrap();
    /// let record = Value::from(serde_json::json!({"name": "Bob", "age": 42}));
    ///
    /// assert_eq!(Evaluator::new().matches(&filter, &record), Ok(true));
    /// ```
    pub fn matches(&self, node: &ElNode, record: &Value) -> Result<bool, EvalError> {
        let value = self.evaluate(node, record)?;
        trace!(%node, ?value, "Evaluated filter");
        Ok(value.as_bool())
    }

    /// Evaluates any expression against `record`.
    pub fn evaluate(&self, node: &ElNode, record: &Value) -> Result<Value, EvalError> {
        self.eval_node(node, &EvalContext::new(record))
    }

    fn eval_node(&self, node: &ElNode, context: &EvalContext) -> Result<Value, EvalError> {
        match node {
            ElNode::Literal { kind, value } => literal_value(*kind, value),
            ElNode::FieldRef(name) => Ok(context.record.field(name)),
            ElNode::ArrayLiteral(items) => {
                let mut values = Vec::with_capacity(items.len());
                for item in items {
                    values.push(self.eval_node(item, context)?);
                }
                Ok(Value::Array(values))
            }
            ElNode::UnaryOp {
                op: UnaryOp::Not,
                operand,
            } => Ok(Value::Boolean(!self.eval_node(operand, context)?.as_bool())),
            ElNode::BinaryOp { op, left, right } => match op {
                BinaryOp::And => {
                    if !self.eval_node(left, context)?.as_bool() {
                        return Ok(Value::Boolean(false));
                    }
                    Ok(Value::Boolean(self.eval_node(right, context)?.as_bool()))
                }
                BinaryOp::Or => {
                    if self.eval_node(left, context)?.as_bool() {
                        return Ok(Value::Boolean(true));
                    }
                    Ok(Value::Boolean(self.eval_node(right, context)?.as_bool()))
                }
                _ => {
                    let left_val = self.eval_node(left, context)?;
                    let right_val = self.eval_node(right, context)?;
                    Ok(Value::Boolean(apply_comparison(*op, &left_val, &right_val)))
                }
            },
            ElNode::Call { name, args } => {
                let FunctionName::Builtin(builtin) = name else {
                    return Err(EvalError::UnknownFunction(name.to_string()));
                };
                let mut values = Vec::with_capacity(args.len());
                for arg in args {
                    values.push(self.eval_node(arg, context)?);
                }
                functions::call(*builtin, &values)
            }
        }
    }
}

/// Incomparable operands are unequal and never ordered.
fn apply_comparison(op: BinaryOp, left: &Value, right: &Value) -> bool {
    let ordering = left.compare(right);
    match op {
        BinaryOp::Eq => ordering == Some(Ordering::Equal),
        BinaryOp::NotEq => ordering != Some(Ordering::Equal),
        BinaryOp::Lt => ordering == Some(Ordering::Less),
        BinaryOp::Gt => ordering == Some(Ordering::Greater),
        BinaryOp::LtEq => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
        BinaryOp::GtEq => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
        BinaryOp::And | BinaryOp::Or => false,
    }
}

fn literal_value(kind: LiteralKind, text: &str) -> Result<Value, EvalError> {
    let number_error = || EvalError::TypeError(format!("invalid number literal '{text}'"));
    match kind {
        LiteralKind::String => Ok(Value::String(text.to_string())),
        LiteralKind::Integer => match text.parse::<i64>() {
            Ok(n) => Ok(Value::Integer(n)),
            Err(_) => text.parse::<f64>().map(Value::Float).map_err(|_| number_error()),
        },
        LiteralKind::Decimal => text.parse::<f64>().map(Value::Float).map_err(|_| number_error()),
        LiteralKind::Boolean => Ok(Value::Boolean(text == "true")),
        LiteralKind::Null => Ok(Value::Null),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::el;

    fn eval(text: &str, record: serde_json::Value) -> Result<bool, EvalError> {
        let node = el::parse(text).unwrap();
        Evaluator::new().matches(&node, &Value::from(record))
    }

    #[test]
    fn test_comparisons() {
        let record = serde_json::json!({"price": 98.183, "name": "abc"});
        assert_eq!(eval("price == 98.183", record.clone()), Ok(true));
        assert_eq!(eval("price < 100", record.clone()), Ok(true));
        assert_eq!(eval("name != 'abc'", record.clone()), Ok(false));
        assert_eq!(eval("missing == 'abc'", record), Ok(false));
    }

    #[test]
    fn test_short_circuit() {
        // The right side would fail if it were evaluated.
        let record = serde_json::json!({"a": 1});
        assert_eq!(eval("a == 2 && lowerCase(a) == 'x'", record.clone()), Ok(false));
        assert_eq!(eval("a == 1 || lowerCase(a) == 'x'", record.clone()), Ok(true));
        assert_eq!(
            eval("a == 1 && lowerCase(a) == 'x'", record),
            Err(EvalError::UnknownFunction("lowerCase".to_string()))
        );
    }
}
