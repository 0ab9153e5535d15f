use std::fmt;

use crate::ast::{ComparisonOp, Literal};

/// Subject of an existence or validity predicate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    /// A single named field
    Field(String),
    /// Every field of the record (`*`)
    AllFields,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Field(name) => f.write_str(name),
            Target::AllFields => f.write_str("*"),
        }
    }
}

/// TQL abstract syntax tree node.
///
/// Precedence is resolved by the parser; the tree is the single source of
/// truth when the query is written back out with [`TqlElement::to_query_string`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TqlElement {
    /// Field compared against a literal
    ///
    /// # Example
    /// ```text
    /// (age >= 18)
    /// ```
    FieldComparison {
        field: String,
        op: ComparisonOp,
        value: Literal,
    },

    /// Field compared against another field
    ///
    /// Parsed, but rejected by both converters.
    ///
    /// # Example
    /// ```text
    /// (field1 < field2)
    /// ```
    FieldToFieldComparison {
        field: String,
        op: ComparisonOp,
        other_field: String,
    },

    /// Range check, each bound closed (`[`/`]`) or open (`]`/`[`)
    ///
    /// # Examples
    /// ```text
    /// (price between [3, 621])
    /// (price between ]3, 621[)
    /// ```
    Between {
        field: String,
        lower: Literal,
        upper: Literal,
        lower_open: bool,
        upper_open: bool,
    },

    /// Membership in a literal list
    ///
    /// # Example
    /// ```text
    /// (code in [1, 2, 3])
    /// ```
    In { field: String, values: Vec<Literal> },

    /// Substring check
    ///
    /// # Examples
    /// ```text
    /// (name contains 'lo')
    /// (name containsIgnoreCase 'LO')
    /// ```
    Contains {
        field: String,
        value: String,
        ignore_case: bool,
    },

    /// Character pattern check
    ///
    /// # Example
    /// ```text
    /// (name complies 'Aaa Aaaa')
    /// ```
    Complies { field: String, pattern: String },

    /// Word pattern check
    ///
    /// # Example
    /// ```text
    /// (name wordComplies '[Word] [word]')
    /// ```
    WordComplies { field: String, pattern: String },

    /// Regular expression match (`~`)
    ///
    /// # Example
    /// ```text
    /// (name ~ '^[A-Z][a-z]*$')
    /// ```
    MatchesRegex { field: String, regex: String },

    /// `(field is empty)` or `(* is empty)`
    IsEmpty(Target),

    /// `(field is valid)` or `(* is valid)`
    IsValid(Target),

    /// `(field is invalid)` or `(* is invalid)`
    IsInvalid(Target),

    /// `(field is null)`
    IsNull { field: String },

    /// `(not (inner))`
    Not(Box<TqlElement>),

    /// Conjunction of two or more elements
    And(Vec<TqlElement>),

    /// Disjunction of two or more elements
    Or(Vec<TqlElement>),
}

impl TqlElement {
    /// Serializes the tree back to TQL text.
    ///
    /// Every predicate is wrapped in parentheses, and a logical group nested
    /// inside another logical group is parenthesized once more, so parsing
    /// the output yields an equal tree.
    pub fn to_query_string(&self) -> String {
        self.to_string()
    }

    fn is_logical(&self) -> bool {
        matches!(self, TqlElement::And(_) | TqlElement::Or(_))
    }
}

impl fmt::Display for TqlElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TqlElement::FieldComparison { field, op, value } => {
                write!(f, "({field} {op} {value})")
            }
            TqlElement::FieldToFieldComparison {
                field,
                op,
                other_field,
            } => write!(f, "({field} {op} {other_field})"),
            TqlElement::Between {
                field,
                lower,
                upper,
                lower_open,
                upper_open,
            } => {
                let open = if *lower_open { ']' } else { '[' };
                let close = if *upper_open { '[' } else { ']' };
                write!(f, "({field} between {open}{lower}, {upper}{close})")
            }
            TqlElement::In { field, values } => {
                let items: Vec<String> = values.iter().map(ToString::to_string).collect();
                write!(f, "({field} in [{}])", items.join(", "))
            }
            TqlElement::Contains {
                field,
                value,
                ignore_case,
            } => {
                let op = if *ignore_case {
                    "containsIgnoreCase"
                } else {
                    "contains"
                };
                write!(f, "({field} {op} {})", Literal::string(value.as_str()))
            }
            TqlElement::Complies { field, pattern } => {
                write!(f, "({field} complies {})", Literal::string(pattern.as_str()))
            }
            TqlElement::WordComplies { field, pattern } => write!(
                f,
                "({field} wordComplies {})",
                Literal::string(pattern.as_str())
            ),
            TqlElement::MatchesRegex { field, regex } => {
                write!(f, "({field} ~ {})", Literal::string(regex.as_str()))
            }
            TqlElement::IsEmpty(target) => write!(f, "({target} is empty)"),
            TqlElement::IsValid(target) => write!(f, "({target} is valid)"),
            TqlElement::IsInvalid(target) => write!(f, "({target} is invalid)"),
            TqlElement::IsNull { field } => write!(f, "({field} is null)"),
            TqlElement::Not(inner) => write!(f, "(not ({inner}))"),
            TqlElement::And(items) => write_joined(f, items, " and "),
            TqlElement::Or(items) => write_joined(f, items, " or "),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, items: &[TqlElement], separator: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        if item.is_logical() {
            write!(f, "({item})")?;
        } else {
            write!(f, "{item}")?;
        }
    }
    Ok(())
}
