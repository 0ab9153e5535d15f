/// Lexical tokens of DSEL source text.
#[derive(Debug, Clone, PartialEq)]
pub enum ElToken {
    /// Integer literal, kept as written
    Integer(String),
    /// Decimal literal, kept as written
    Decimal(String),
    /// String literal in single or double quotes
    String(String),
    Boolean(bool),
    Null,

    /// Field reference or function name
    ///
    /// # Examples
    /// ```text
    /// field1
    /// address.city
    /// isEmpty
    /// ```
    Identifier(String),

    // Comparison
    /// `==` (or `=`)
    EqEq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,

    // Logical
    /// `&&`
    AndAnd,
    /// `||`
    OrOr,
    /// `!`
    Bang,

    // Delimiters
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,

    Eof,
}

impl ElToken {
    pub fn describe(&self) -> String {
        match self {
            ElToken::Integer(s) | ElToken::Decimal(s) | ElToken::Identifier(s) => s.clone(),
            ElToken::String(s) => format!("'{s}'"),
            ElToken::Boolean(b) => b.to_string(),
            ElToken::Null => "null".to_string(),
            ElToken::EqEq => "==".to_string(),
            ElToken::NotEq => "!=".to_string(),
            ElToken::Lt => "<".to_string(),
            ElToken::Gt => ">".to_string(),
            ElToken::LtEq => "<=".to_string(),
            ElToken::GtEq => ">=".to_string(),
            ElToken::AndAnd => "&&".to_string(),
            ElToken::OrOr => "||".to_string(),
            ElToken::Bang => "!".to_string(),
            ElToken::LParen => "(".to_string(),
            ElToken::RParen => ")".to_string(),
            ElToken::LBracket => "[".to_string(),
            ElToken::RBracket => "]".to_string(),
            ElToken::Comma => ",".to_string(),
            ElToken::Eof => "end of input".to_string(),
        }
    }
}
