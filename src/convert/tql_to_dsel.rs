use tracing::debug;

use crate::{
    ast::{ComparisonOp, Literal, LiteralType, Target, TqlElement},
    convert::{ConversionMode, FieldType, FieldTypes},
    el::{BinaryOp, Builtin, ElNode, LiteralKind},
    error::ConversionError,
    parser,
};

/// Converts TQL text to a DSEL tree using query-level predicate shapes.
///
/// `field_types` is only needed for wildcard predicates; without it a
/// wildcard fails with [`ConversionError::MissingFieldTypes`].
///
/// # Examples
///
/// ```
/// use tql_dsel::convert::convert_for_db;
///
/// let node = convert_for_db("(field1 between [3, 621])", None).unwrap();
/// assert_eq!(node.to_string(), "between(field1, 3, 621)");
/// ```
pub fn convert_for_db(text: &str, field_types: Option<&FieldTypes>) -> Result<ElNode, ConversionError> {
    let empty = FieldTypes::new();
    convert_text(text, ConversionMode::Db, field_types.unwrap_or(&empty))
}

/// Converts TQL text to a DSEL tree using data-evaluation predicate shapes.
///
/// These shapes depend on each field's declared type and do not convert back
/// to the original query text.
pub fn convert_for_runtime(text: &str, field_types: &FieldTypes) -> Result<ElNode, ConversionError> {
    convert_text(text, ConversionMode::Runtime, field_types)
}

fn convert_text(text: &str, mode: ConversionMode, field_types: &FieldTypes) -> Result<ElNode, ConversionError> {
    let element = parser::parse(text)?;
    debug!(query = text, ?element, "Parsed TQL query");
    let node = TqlToDsel::new(mode, field_types).convert(&element)?;
    debug!(?mode, %node, "Converted TQL query to DSEL");
    Ok(node)
}

/// Rewrites a [`TqlElement`] tree into an [`ElNode`] tree.
#[derive(Debug, Clone, Copy)]
pub struct TqlToDsel<'a> {
    mode: ConversionMode,
    field_types: &'a FieldTypes,
}

impl<'a> TqlToDsel<'a> {
    pub fn new(mode: ConversionMode, field_types: &'a FieldTypes) -> Self {
        TqlToDsel { mode, field_types }
    }

    pub fn convert(&self, element: &TqlElement) -> Result<ElNode, ConversionError> {
        match element {
            TqlElement::FieldComparison { field, op, value } => Ok(ElNode::binary(
                comparison_op(*op),
                ElNode::field(field.as_str()),
                literal(value),
            )),
            TqlElement::FieldToFieldComparison {
                field,
                op,
                other_field,
            } => Err(ConversionError::UnsupportedElement(format!(
                "field to field comparison ({field} {op} {other_field})"
            ))),
            TqlElement::Between {
                field,
                lower,
                upper,
                lower_open,
                upper_open,
            } => {
                let mut args = vec![ElNode::field(field.as_str()), literal(lower), literal(upper)];
                if *lower_open || *upper_open {
                    args.push(ElNode::boolean(*lower_open));
                    args.push(ElNode::boolean(*upper_open));
                }
                Ok(ElNode::builtin(Builtin::Between, args))
            }
            TqlElement::In { field, values } => Ok(ElNode::builtin(
                Builtin::In,
                vec![
                    ElNode::field(field.as_str()),
                    ElNode::ArrayLiteral(values.iter().map(literal).collect()),
                ],
            )),
            TqlElement::Contains {
                field,
                value,
                ignore_case,
            } => Ok(ElNode::builtin(
                Builtin::Contains,
                vec![
                    ElNode::field(field.as_str()),
                    ElNode::string(value.as_str()),
                    ElNode::boolean(!ignore_case),
                ],
            )),
            TqlElement::Complies { field, pattern } => {
                Ok(field_call(Builtin::Complies, field, Some(pattern.as_str())))
            }
            TqlElement::WordComplies { field, pattern } => {
                Ok(field_call(Builtin::WordComplies, field, Some(pattern.as_str())))
            }
            TqlElement::MatchesRegex { field, regex } => {
                Ok(field_call(Builtin::Matches, field, Some(regex.as_str())))
            }
            TqlElement::IsNull { field } => Ok(field_call(Builtin::IsNull, field, None)),
            TqlElement::IsEmpty(target) => self.expand(target, Predicate::Empty),
            TqlElement::IsValid(target) => self.expand(target, Predicate::Valid),
            TqlElement::IsInvalid(target) => self.expand(target, Predicate::Invalid),
            TqlElement::Not(inner) => Ok(ElNode::not(self.convert(inner)?)),
            TqlElement::And(items) => self.chain(BinaryOp::And, items),
            TqlElement::Or(items) => self.chain(BinaryOp::Or, items),
        }
    }

    fn chain(&self, op: BinaryOp, items: &[TqlElement]) -> Result<ElNode, ConversionError> {
        let operands = items
            .iter()
            .map(|item| self.convert(item))
            .collect::<Result<Vec<_>, _>>()?;
        ElNode::left_fold(op, operands).ok_or_else(|| {
            ConversionError::UnsupportedElement(format!("empty '{}' group", op.symbol()))
        })
    }

    /// Emptiness and validity predicates, expanded over every declared
    /// field for the wildcard target.
    fn expand(&self, target: &Target, predicate: Predicate) -> Result<ElNode, ConversionError> {
        match target {
            Target::Field(field) => self.field_predicate(field, self.field_types.get(field), predicate),
            Target::AllFields => {
                if self.field_types.is_empty() {
                    return Err(ConversionError::MissingFieldTypes {
                        predicate: predicate.tql_name(),
                    });
                }
                let branches = self
                    .field_types
                    .iter()
                    .map(|(field, field_type)| self.field_predicate(field, Some(field_type), predicate))
                    .collect::<Result<Vec<_>, _>>()?;
                debug!(
                    predicate = predicate.tql_name(),
                    fields = branches.len(),
                    "Expanded wildcard predicate"
                );
                let op = match predicate {
                    Predicate::Valid => BinaryOp::And,
                    Predicate::Empty | Predicate::Invalid => BinaryOp::Or,
                };
                ElNode::left_fold(op, branches).ok_or(ConversionError::MissingFieldTypes {
                    predicate: predicate.tql_name(),
                })
            }
        }
    }

    fn field_predicate(
        &self,
        field: &str,
        field_type: Option<FieldType>,
        predicate: Predicate,
    ) -> Result<ElNode, ConversionError> {
        match self.mode {
            ConversionMode::Db => {
                let builtin = match predicate {
                    Predicate::Empty => return Ok(field_call(Builtin::IsEmpty, field, None)),
                    Predicate::Valid => Builtin::IsValid,
                    Predicate::Invalid => Builtin::IsInvalid,
                };
                let type_name = field_type.map(FieldType::name);
                Ok(field_call(builtin, field, type_name))
            }
            ConversionMode::Runtime => match predicate {
                Predicate::Empty => Ok(match field_type {
                    Some(FieldType::String) | None => field_call(Builtin::IsEmpty, field, None),
                    Some(_) => field_call(Builtin::IsNull, field, None),
                }),
                Predicate::Valid => {
                    let field_type = required_type(field, field_type)?;
                    Ok(field_call(Builtin::IsOfType, field, Some(field_type.name())))
                }
                Predicate::Invalid => {
                    let field_type = required_type(field, field_type)?;
                    Ok(ElNode::binary(
                        BinaryOp::And,
                        ElNode::not(field_call(Builtin::IsEmpty, field, None)),
                        ElNode::not(field_call(Builtin::IsOfType, field, Some(field_type.name()))),
                    ))
                }
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Predicate {
    Empty,
    Valid,
    Invalid,
}

impl Predicate {
    fn tql_name(self) -> &'static str {
        match self {
            Predicate::Empty => "is empty",
            Predicate::Valid => "is valid",
            Predicate::Invalid => "is invalid",
        }
    }
}

fn required_type(field: &str, field_type: Option<FieldType>) -> Result<FieldType, ConversionError> {
    field_type.ok_or_else(|| ConversionError::MissingFieldType {
        field: field.to_string(),
    })
}

/// `builtin(field)` or `builtin(field, 'argument')`
fn field_call(builtin: Builtin, field: &str, argument: Option<&str>) -> ElNode {
    let mut args = vec![ElNode::field(field)];
    if let Some(argument) = argument {
        args.push(ElNode::string(argument));
    }
    ElNode::builtin(builtin, args)
}

fn comparison_op(op: ComparisonOp) -> BinaryOp {
    match op {
        ComparisonOp::Eq => BinaryOp::Eq,
        ComparisonOp::Neq => BinaryOp::NotEq,
        ComparisonOp::Lt => BinaryOp::Lt,
        ComparisonOp::Gt => BinaryOp::Gt,
        ComparisonOp::Le => BinaryOp::LtEq,
        ComparisonOp::Ge => BinaryOp::GtEq,
    }
}

fn literal(literal: &Literal) -> ElNode {
    let kind = match literal.kind {
        LiteralType::String => LiteralKind::String,
        LiteralType::Int => LiteralKind::Integer,
        LiteralType::Double => LiteralKind::Decimal,
        LiteralType::Boolean => LiteralKind::Boolean,
    };
    ElNode::literal(kind, literal.value.as_str())
}
