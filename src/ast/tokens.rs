#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    /// Integer literal, kept as written
    ///
    /// # Examples
    /// ```text
    /// 42
    /// -10
    /// ```
    Integer(String),

    /// Decimal literal, kept as written so that `99.20` prints back as `99.20`
    ///
    /// # Examples
    /// ```text
    /// 3.14
    /// 99.20
    /// ```
    Decimal(String),

    /// String literal enclosed in single quotes
    ///
    /// # Examples
    /// ```text
    /// 'hello'
    /// 'it\'s'
    /// ```
    String(String),

    /// Boolean values
    Boolean(bool),

    // Identifiers
    /// Field name or operator word
    ///
    /// Starts with a letter or underscore, followed by letters, digits,
    /// underscores or dots. Operator words (`contains`, `between`, `is`, ...)
    /// are resolved by the parser depending on their position.
    ///
    /// # Examples
    /// ```text
    /// firstName
    /// address.city
    /// containsIgnoreCase
    /// ```
    Identifier(String),

    /// Wildcard field (`*`), only valid with `is empty`, `is valid` and `is invalid`
    Star,

    // Comparison
    /// Equality (`=`)
    Eq,
    /// Inequality (`!=`)
    NotEq,
    /// Less than (`<`)
    Lt,
    /// Greater than (`>`)
    Gt,
    /// Less than or equal (`<=`)
    LtEq,
    /// Greater than or equal (`>=`)
    GtEq,
    /// Regex match (`~`)
    Tilde,

    // Logical
    /// Logical AND (word)
    And,
    /// Logical OR (word)
    Or,
    /// Logical NOT (word)
    Not,

    // Delimiters
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,

    /// End of input
    Eof,
}

impl Token {
    /// Short description used in error messages.
    pub fn describe(&self) -> String {
        match self {
            Token::Integer(s) | Token::Decimal(s) => s.clone(),
            Token::String(s) => format!("'{s}'"),
            Token::Boolean(b) => b.to_string(),
            Token::Identifier(s) => s.clone(),
            Token::Star => "*".to_string(),
            Token::Eq => "=".to_string(),
            Token::NotEq => "!=".to_string(),
            Token::Lt => "<".to_string(),
            Token::Gt => ">".to_string(),
            Token::LtEq => "<=".to_string(),
            Token::GtEq => ">=".to_string(),
            Token::Tilde => "~".to_string(),
            Token::And => "and".to_string(),
            Token::Or => "or".to_string(),
            Token::Not => "not".to_string(),
            Token::LParen => "(".to_string(),
            Token::RParen => ")".to_string(),
            Token::LBracket => "[".to_string(),
            Token::RBracket => "]".to_string(),
            Token::Comma => ",".to_string(),
            Token::Eof => "end of input".to_string(),
        }
    }
}
