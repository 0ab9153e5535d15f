use std::collections::HashSet;

use tracing::debug;

use crate::{
    ast::{ComparisonOp, Literal, LiteralType, Target, TqlElement},
    el::{self, BinaryOp, Builtin, ElNode, LiteralKind, UnaryOp},
    error::ConversionError,
};

/// Converts a DSEL tree back to a TQL tree.
///
/// # Examples
///
/// ```
/// use tql_dsel::convert::{convert_for_db, dsel_to_tql};
///
/// let node = convert_for_db("(name complies 'Aaa Aaaa')", None).unwrap();
/// let element = dsel_to_tql::convert(&node).unwrap();
/// assert_eq!(element.to_query_string(), "(name complies 'Aaa Aaaa')");
/// ```
pub fn convert(node: &ElNode) -> Result<TqlElement, ConversionError> {
    let element = convert_node(node)?;
    debug!(%node, query = %element, "Converted DSEL expression to TQL");
    Ok(element)
}

/// Parses DSEL text, then converts the tree with [`convert`].
pub fn convert_text(text: &str) -> Result<TqlElement, ConversionError> {
    let node = el::parse(text)?;
    convert(&node)
}

fn convert_node(node: &ElNode) -> Result<TqlElement, ConversionError> {
    match node {
        ElNode::BinaryOp { op, .. } if op.is_logical() => logical(node, *op),
        ElNode::BinaryOp { op, left, right } => comparison(*op, left, right),
        ElNode::UnaryOp {
            op: UnaryOp::Not,
            operand,
        } => Ok(TqlElement::Not(Box::new(convert_node(operand)?))),
        ElNode::Call { name, args } => match name.builtin() {
            Some(builtin) => call(builtin, args),
            None => Err(ConversionError::UnrecognizedShape(format!(
                "call to unknown function '{name}'"
            ))),
        },
        ElNode::Literal { .. } | ElNode::FieldRef(_) | ElNode::ArrayLiteral(_) => Err(
            ConversionError::UnrecognizedShape(format!("'{node}' is not a predicate")),
        ),
    }
}

fn logical(node: &ElNode, op: BinaryOp) -> Result<TqlElement, ConversionError> {
    let operands = node.left_spine(op);

    if let Some(wildcard) = collapse_wildcard(op, &operands) {
        debug!(query = %wildcard, branches = operands.len(), "Collapsed per-field predicates");
        return Ok(wildcard);
    }

    let children = operands
        .into_iter()
        .map(convert_node)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(match op {
        BinaryOp::And => TqlElement::And(children),
        _ => TqlElement::Or(children),
    })
}

/// Recognizes the chains the forward converter emits for `*` in db mode:
/// at least two calls of the same emptiness/validity builtin, each on a
/// different field.
fn collapse_wildcard(op: BinaryOp, operands: &[&ElNode]) -> Option<TqlElement> {
    if operands.len() < 2 {
        return None;
    }

    let candidates: &[Builtin] = match op {
        BinaryOp::Or => &[Builtin::IsEmpty, Builtin::IsInvalid],
        BinaryOp::And => &[Builtin::IsValid],
        _ => return None,
    };

    for &builtin in candidates {
        let mut seen = HashSet::new();
        let all_match = operands.iter().all(|operand| {
            wildcard_branch_field(operand, builtin).is_some_and(|field| seen.insert(field))
        });
        if all_match {
            return Some(match builtin {
                Builtin::IsEmpty => TqlElement::IsEmpty(Target::AllFields),
                Builtin::IsValid => TqlElement::IsValid(Target::AllFields),
                _ => TqlElement::IsInvalid(Target::AllFields),
            });
        }
    }
    None
}

/// Field of `builtin(field)`, or of `builtin(field, 'TYPE')` for the
/// validity builtins.
fn wildcard_branch_field(node: &ElNode, builtin: Builtin) -> Option<&str> {
    let ElNode::Call { name, args } = node else {
        return None;
    };
    if name.builtin() != Some(builtin) {
        return None;
    }
    match args.as_slice() {
        [ElNode::FieldRef(field)] => Some(field.as_str()),
        [ElNode::FieldRef(field), type_name] if builtin != Builtin::IsEmpty => {
            string_value(type_name).map(|_| field.as_str())
        }
        _ => None,
    }
}

fn comparison(op: BinaryOp, left: &ElNode, right: &ElNode) -> Result<TqlElement, ConversionError> {
    let op = comparison_op(op)?;
    match (left, right) {
        (ElNode::FieldRef(field), ElNode::Literal { .. }) => Ok(TqlElement::FieldComparison {
            field: field.clone(),
            op,
            value: tql_literal(right)?,
        }),
        (ElNode::FieldRef(field), ElNode::FieldRef(other_field)) => {
            Err(ConversionError::UnsupportedElement(format!(
                "field to field comparison ({field} {op} {other_field})"
            )))
        }
        _ => Err(ConversionError::UnrecognizedShape(format!(
            "comparison '{left} {} {right}' must compare a field with a literal",
            op.symbol()
        ))),
    }
}

fn comparison_op(op: BinaryOp) -> Result<ComparisonOp, ConversionError> {
    match op {
        BinaryOp::Eq => Ok(ComparisonOp::Eq),
        BinaryOp::NotEq => Ok(ComparisonOp::Neq),
        BinaryOp::Lt => Ok(ComparisonOp::Lt),
        BinaryOp::Gt => Ok(ComparisonOp::Gt),
        BinaryOp::LtEq => Ok(ComparisonOp::Le),
        BinaryOp::GtEq => Ok(ComparisonOp::Ge),
        BinaryOp::And | BinaryOp::Or => Err(ConversionError::UnrecognizedShape(format!(
            "'{}' is not a comparison",
            op.symbol()
        ))),
    }
}

fn call(builtin: Builtin, args: &[ElNode]) -> Result<TqlElement, ConversionError> {
    let shape_error = || {
        ConversionError::UnrecognizedShape(ElNode::builtin(builtin, args.to_vec()).to_string())
    };

    let element = match (builtin, args) {
        (Builtin::Between, [ElNode::FieldRef(field), lower, upper, flags @ ..]) => {
            let (lower_open, upper_open) = match flags {
                [] => (false, false),
                [lower_open, upper_open] => (
                    bool_value(lower_open).ok_or_else(shape_error)?,
                    bool_value(upper_open).ok_or_else(shape_error)?,
                ),
                _ => return Err(shape_error()),
            };
            let lower = tql_literal(lower)?;
            let upper = tql_literal(upper)?;
            check_compatible("between", &[lower.clone(), upper.clone()])?;
            TqlElement::Between {
                field: field.clone(),
                lower,
                upper,
                lower_open,
                upper_open,
            }
        }
        (Builtin::In, [ElNode::FieldRef(field), ElNode::ArrayLiteral(items)]) if !items.is_empty() => {
            let values = items.iter().map(tql_literal).collect::<Result<Vec<_>, _>>()?;
            check_compatible("in", &values)?;
            TqlElement::In {
                field: field.clone(),
                values,
            }
        }
        (Builtin::Contains, [ElNode::FieldRef(field), value, flags @ ..]) => {
            let case_sensitive = match flags {
                [] => true,
                [flag] => bool_value(flag).ok_or_else(shape_error)?,
                _ => return Err(shape_error()),
            };
            TqlElement::Contains {
                field: field.clone(),
                value: string_value(value).ok_or_else(shape_error)?.to_string(),
                ignore_case: !case_sensitive,
            }
        }
        (Builtin::ContainsIgnoreCase, [ElNode::FieldRef(field), value]) => TqlElement::Contains {
            field: field.clone(),
            value: string_value(value).ok_or_else(shape_error)?.to_string(),
            ignore_case: true,
        },
        (Builtin::Complies, [ElNode::FieldRef(field), pattern]) => TqlElement::Complies {
            field: field.clone(),
            pattern: string_value(pattern).ok_or_else(shape_error)?.to_string(),
        },
        (Builtin::WordComplies, [ElNode::FieldRef(field), pattern]) => TqlElement::WordComplies {
            field: field.clone(),
            pattern: string_value(pattern).ok_or_else(shape_error)?.to_string(),
        },
        (Builtin::Matches, [ElNode::FieldRef(field), regex]) => TqlElement::MatchesRegex {
            field: field.clone(),
            regex: string_value(regex).ok_or_else(shape_error)?.to_string(),
        },
        (Builtin::IsEmpty, [ElNode::FieldRef(field)]) => {
            TqlElement::IsEmpty(Target::Field(field.clone()))
        }
        (Builtin::IsNull, [ElNode::FieldRef(field)]) => TqlElement::IsNull {
            field: field.clone(),
        },
        (Builtin::IsValid | Builtin::IsInvalid | Builtin::IsOfType, [ElNode::FieldRef(field), rest @ ..]) => {
            let typed = match rest {
                [] => false,
                [type_name] if string_value(type_name).is_some() => true,
                _ => return Err(shape_error()),
            };
            let target = Target::Field(field.clone());
            match builtin {
                Builtin::IsInvalid => TqlElement::IsInvalid(target),
                Builtin::IsOfType if !typed => return Err(shape_error()),
                _ => TqlElement::IsValid(target),
            }
        }
        _ => return Err(shape_error()),
    };
    Ok(element)
}

fn tql_literal(node: &ElNode) -> Result<Literal, ConversionError> {
    let ElNode::Literal { kind, value } = node else {
        return Err(ConversionError::UnrecognizedShape(format!(
            "expected a literal, got '{node}'"
        )));
    };
    let kind = match kind {
        LiteralKind::String => LiteralType::String,
        LiteralKind::Integer => LiteralType::Int,
        LiteralKind::Decimal => LiteralType::Double,
        LiteralKind::Boolean => LiteralType::Boolean,
        LiteralKind::Null => {
            return Err(ConversionError::UnrecognizedShape(
                "null literal has no TQL equivalent".to_string(),
            ));
        }
    };
    Ok(Literal::new(kind, value.as_str()))
}

fn check_compatible(context: &'static str, literals: &[Literal]) -> Result<(), ConversionError> {
    let Some(first) = literals.first() else {
        return Ok(());
    };
    match literals
        .iter()
        .find(|literal| !first.kind.is_compatible_with(literal.kind))
    {
        Some(mismatch) => Err(ConversionError::MixedLiteralTypes {
            context,
            first: first.kind.to_string(),
            second: mismatch.kind.to_string(),
        }),
        None => Ok(()),
    }
}

fn string_value(node: &ElNode) -> Option<&str> {
    match node {
        ElNode::Literal {
            kind: LiteralKind::String,
            value,
        } => Some(value),
        _ => None,
    }
}

fn bool_value(node: &ElNode) -> Option<bool> {
    match node {
        ElNode::Literal {
            kind: LiteralKind::Boolean,
            value,
        } => Some(value == "true"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn collapses_distinct_field_chains() {
        let element = convert_text("isEmpty(a) || isEmpty(b) || isEmpty(c)").unwrap();
        assert_eq!(element, TqlElement::IsEmpty(Target::AllFields));
    }

    #[test]
    fn repeated_field_does_not_collapse() {
        let element = convert_text("isEmpty(a) || isEmpty(a)").unwrap();
        assert_eq!(element.to_query_string(), "(a is empty) or (a is empty)");
    }

    #[test]
    fn unknown_function_is_rejected() {
        assert!(matches!(
            convert_text("lowerCase(name) == 'x'"),
            Err(ConversionError::UnrecognizedShape(_))
        ));
        assert!(matches!(
            convert_text("upperCase(name)"),
            Err(ConversionError::UnrecognizedShape(_))
        ));
    }

    #[test]
    fn mixed_list_is_rejected() {
        assert_eq!(
            convert_text("in(f, [1, 'a'])"),
            Err(ConversionError::MixedLiteralTypes {
                context: "in",
                first: "INT".to_string(),
                second: "STRING".to_string(),
            })
        );
    }
}
