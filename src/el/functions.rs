use std::fmt;

/// Predicate functions known to this crate.
///
/// Names are resolved to a variant once, when a call node is built or parsed,
/// and every later stage dispatches on the variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    /// `between(value, lower, upper[, lowerOpen, upperOpen])`
    Between,
    /// `in(value, [items])`
    In,
    /// `contains(value, substring[, caseSensitive])`
    Contains,
    /// `containsIgnoreCase(value, substring)`
    ContainsIgnoreCase,
    /// `complies(value, charPattern)`
    Complies,
    /// `wordComplies(value, wordPattern)`
    WordComplies,
    /// `matches(value, regex)`
    Matches,
    /// `isEmpty(value)`
    IsEmpty,
    /// `isNull(value)`
    IsNull,
    /// `isValid(value[, type])`
    IsValid,
    /// `isInvalid(value[, type])`
    IsInvalid,
    /// `isOfType(value, type)`
    IsOfType,
}

impl Builtin {
    pub const ALL: [Builtin; 12] = [
        Builtin::Between,
        Builtin::In,
        Builtin::Contains,
        Builtin::ContainsIgnoreCase,
        Builtin::Complies,
        Builtin::WordComplies,
        Builtin::Matches,
        Builtin::IsEmpty,
        Builtin::IsNull,
        Builtin::IsValid,
        Builtin::IsInvalid,
        Builtin::IsOfType,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Builtin::Between => "between",
            Builtin::In => "in",
            Builtin::Contains => "contains",
            Builtin::ContainsIgnoreCase => "containsIgnoreCase",
            Builtin::Complies => "complies",
            Builtin::WordComplies => "wordComplies",
            Builtin::Matches => "matches",
            Builtin::IsEmpty => "isEmpty",
            Builtin::IsNull => "isNull",
            Builtin::IsValid => "isValid",
            Builtin::IsInvalid => "isInvalid",
            Builtin::IsOfType => "isOfType",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Builtin::ALL.into_iter().find(|b| b.name() == name)
    }
}

/// Name of a called function: a known builtin, or anything else.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FunctionName {
    Builtin(Builtin),
    Custom(String),
}

impl FunctionName {
    pub fn as_str(&self) -> &str {
        match self {
            FunctionName::Builtin(b) => b.name(),
            FunctionName::Custom(name) => name,
        }
    }

    pub fn builtin(&self) -> Option<Builtin> {
        match self {
            FunctionName::Builtin(b) => Some(*b),
            FunctionName::Custom(_) => None,
        }
    }
}

impl From<&str> for FunctionName {
    fn from(name: &str) -> Self {
        Builtin::from_name(name)
            .map(FunctionName::Builtin)
            .unwrap_or_else(|| FunctionName::Custom(name.to_string()))
    }
}

impl From<Builtin> for FunctionName {
    fn from(builtin: Builtin) -> Self {
        FunctionName::Builtin(builtin)
    }
}

impl fmt::Display for FunctionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[test]
fn test_name_resolution() {
    for builtin in Builtin::ALL {
        assert_eq!(FunctionName::from(builtin.name()), FunctionName::Builtin(builtin));
    }
    assert_eq!(
        FunctionName::from("lowerCase"),
        FunctionName::Custom("lowerCase".to_string())
    );
}
