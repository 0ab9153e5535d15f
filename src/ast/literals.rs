use std::fmt;

/// Semantic type tag carried by every TQL literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralType {
    String,
    Int,
    Double,
    Boolean,
}

impl LiteralType {
    /// Whether two literal types may appear together in an `in` list or a
    /// `between` range. Integers and decimals share the numeric family.
    pub fn is_compatible_with(self, other: LiteralType) -> bool {
        self == other || (self.is_numeric() && other.is_numeric())
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, LiteralType::Int | LiteralType::Double)
    }

    pub fn name(self) -> &'static str {
        match self {
            LiteralType::String => "STRING",
            LiteralType::Int => "INT",
            LiteralType::Double => "DOUBLE",
            LiteralType::Boolean => "BOOLEAN",
        }
    }
}

impl fmt::Display for LiteralType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A typed literal.
///
/// `value` holds the unescaped content for strings and the exact source text
/// for numbers and booleans, so numbers keep their written form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal {
    pub kind: LiteralType,
    pub value: String,
}

impl Literal {
    pub fn new(kind: LiteralType, value: impl Into<String>) -> Self {
        Literal {
            kind,
            value: value.into(),
        }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Literal::new(LiteralType::String, value)
    }

    pub fn int(value: impl Into<String>) -> Self {
        Literal::new(LiteralType::Int, value)
    }

    pub fn double(value: impl Into<String>) -> Self {
        Literal::new(LiteralType::Double, value)
    }

    pub fn boolean(value: bool) -> Self {
        Literal::new(LiteralType::Boolean, value.to_string())
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            LiteralType::String => write!(f, "'{}'", escape_string(&self.value)),
            _ => f.write_str(&self.value),
        }
    }
}

/// Escapes a string for a single-quoted TQL literal.
///
/// A backslash is doubled only where the lexer would otherwise read it as
/// an escape (before `'`, before `\\`, or at the end), so regexes such as
/// `\d+` print as written.
pub fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' if matches!(chars.peek(), None | Some('\'' | '\\')) => out.push_str("\\\\"),
            c => out.push(c),
        }
    }
    out
}
