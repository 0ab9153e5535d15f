use std::fmt;

/// Comparison operators of a TQL field comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOp {
    /// Equal (`=`)
    Eq,
    /// Not equal (`!=`)
    Neq,
    /// Less than (`<`)
    Lt,
    /// Greater than (`>`)
    Gt,
    /// Less than or equal (`<=`)
    Le,
    /// Greater than or equal (`>=`)
    Ge,
}

impl ComparisonOp {
    pub fn symbol(self) -> &'static str {
        match self {
            ComparisonOp::Eq => "=",
            ComparisonOp::Neq => "!=",
            ComparisonOp::Lt => "<",
            ComparisonOp::Gt => ">",
            ComparisonOp::Le => "<=",
            ComparisonOp::Ge => ">=",
        }
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Word operators that follow a field name, resolved once by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredicateKeyword {
    Contains,
    ContainsIgnoreCase,
    Between,
    In,
    Complies,
    WordComplies,
    Is,
}

impl PredicateKeyword {
    pub fn from_word(word: &str) -> Option<Self> {
        match word {
            "contains" => Some(PredicateKeyword::Contains),
            "containsIgnoreCase" => Some(PredicateKeyword::ContainsIgnoreCase),
            "between" => Some(PredicateKeyword::Between),
            "in" => Some(PredicateKeyword::In),
            "complies" => Some(PredicateKeyword::Complies),
            "wordComplies" => Some(PredicateKeyword::WordComplies),
            "is" => Some(PredicateKeyword::Is),
            _ => None,
        }
    }
}

/// The word after `is`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateKeyword {
    Empty,
    Valid,
    Invalid,
    Null,
}

impl StateKeyword {
    pub fn from_word(word: &str) -> Option<Self> {
        match word {
            "empty" => Some(StateKeyword::Empty),
            "valid" => Some(StateKeyword::Valid),
            "invalid" => Some(StateKeyword::Invalid),
            "null" => Some(StateKeyword::Null),
            _ => None,
        }
    }
}
