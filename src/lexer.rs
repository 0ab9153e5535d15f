use crate::{ast::Token, error::ParseError};

/// Character offset into the source text.
pub type Position = usize;

/// Character cursor shared by the TQL and DSEL lexers.
pub(crate) struct Cursor {
    input: Vec<char>,
    position: Position,
}

impl Cursor {
    pub(crate) fn new(input: &str) -> Self {
        Cursor {
            input: input.chars().collect(),
            position: 0,
        }
    }

    pub(crate) fn position(&self) -> Position {
        self.position
    }

    pub(crate) fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    pub(crate) fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    pub(crate) fn advance(&mut self) {
        self.position += 1;
    }

    pub(crate) fn advance_by(&mut self, count: usize) {
        self.position += count;
    }

    /// Characters from `offset` past the current position to the end of input.
    pub(crate) fn rest(&self, offset: usize) -> &[char] {
        self.input.get(self.position + offset..).unwrap_or_default()
    }

    pub(crate) fn skip_whitespace(&mut self) {
        while self.current_char().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    /// Reads a field or keyword; dots join path segments.
    pub(crate) fn read_identifier(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if ch.is_alphanumeric() || ch == '_' || ch == '.' {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    /// Reads an optionally negative number. The flag is set when it has a
    /// fractional part.
    pub(crate) fn read_number(&mut self) -> (String, bool) {
        let mut number = String::new();
        let mut is_decimal = false;

        if self.current_char() == Some('-') {
            number.push('-');
            self.advance();
        }

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                number.push(ch);
                self.advance();
            } else if ch == '.'
                && !is_decimal
                && self.peek_char(1).is_some_and(|c| c.is_ascii_digit())
            {
                is_decimal = true;
                number.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        (number, is_decimal)
    }
}

pub struct Lexer {
    cursor: Cursor,
    token_start: Position,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            cursor: Cursor::new(input),
            token_start: 0,
        }
    }

    /// Start offset of the token returned by the last call to [`Lexer::next_token`].
    pub fn token_start(&self) -> Position {
        self.token_start
    }

    fn read_string(&mut self) -> Result<String, ParseError> {
        let cursor = &mut self.cursor;
        let start = cursor.position();
        let mut result = String::new();
        cursor.advance(); // Consume opening quote

        while let Some(ch) = cursor.current_char() {
            match ch {
                '\'' => {
                    cursor.advance();
                    return Ok(result);
                }
                '\\' => {
                    cursor.advance(); // Consume backslash
                    match cursor.current_char() {
                        Some('\'') => result.push('\''),
                        Some('\\') => result.push('\\'),
                        // Unknown escapes are kept verbatim, regexes rely on them
                        Some(other) => {
                            result.push('\\');
                            result.push(other);
                        }
                        None => {
                            return Err(ParseError::new(
                                cursor.position(),
                                "unterminated string: unexpected end of input after backslash",
                            ));
                        }
                    }
                    cursor.advance();
                }
                _ => {
                    result.push(ch);
                    cursor.advance();
                }
            }
        }

        Err(ParseError::new(start, "unterminated string: missing closing quote"))
    }

    fn read_number(&mut self) -> Token {
        match self.cursor.read_number() {
            (number, true) => Token::Decimal(number),
            (number, false) => Token::Integer(number),
        }
    }

    fn single(&mut self, token: Token) -> Token {
        self.cursor.advance();
        token
    }

    fn pair(&mut self, second: char, matched: Token, unmatched: Token) -> Token {
        if self.cursor.peek_char(1) == Some(second) {
            self.cursor.advance_by(2);
            matched
        } else {
            self.cursor.advance();
            unmatched
        }
    }

    pub fn next_token(&mut self) -> Result<Token, ParseError> {
        self.cursor.skip_whitespace();
        self.token_start = self.cursor.position();

        let token = match self.cursor.current_char() {
            None => Token::Eof,
            Some('(') => self.single(Token::LParen),
            Some(')') => self.single(Token::RParen),
            Some('[') => self.single(Token::LBracket),
            Some(']') => self.single(Token::RBracket),
            Some(',') => self.single(Token::Comma),
            Some('*') => self.single(Token::Star),
            Some('~') => self.single(Token::Tilde),
            Some('=') => self.single(Token::Eq),
            Some('<') => self.pair('=', Token::LtEq, Token::Lt),
            Some('>') => self.pair('=', Token::GtEq, Token::Gt),
            Some('!') => {
                if self.cursor.peek_char(1) == Some('=') {
                    self.cursor.advance_by(2);
                    Token::NotEq
                } else {
                    return Err(ParseError::new(
                        self.cursor.position(),
                        "unexpected '!' (did you mean '!=' or 'not'?)",
                    ));
                }
            }
            Some('\'') => Token::String(self.read_string()?),
            Some('-') if self.cursor.peek_char(1).is_some_and(|c| c.is_ascii_digit()) => {
                self.read_number()
            }
            Some(ch) if ch.is_ascii_digit() => self.read_number(),
            Some(ch) if ch.is_alphabetic() || ch == '_' => {
                let ident = self.cursor.read_identifier();

                match ident.as_str() {
                    "and" => Token::And,
                    "or" => Token::Or,
                    "not" => Token::Not,
                    "true" => Token::Boolean(true),
                    "false" => Token::Boolean(false),
                    _ => Token::Identifier(ident),
                }
            }
            Some(ch) => {
                return Err(ParseError::new(
                    self.cursor.position(),
                    format!("unexpected character '{ch}'"),
                ));
            }
        };

        Ok(token)
    }
}

#[test]
fn test_keywords() {
    let mut lexer = Lexer::new("and or not true false");
    assert_eq!(lexer.next_token(), Ok(Token::And));
    assert_eq!(lexer.next_token(), Ok(Token::Or));
    assert_eq!(lexer.next_token(), Ok(Token::Not));
    assert_eq!(lexer.next_token(), Ok(Token::Boolean(true)));
    assert_eq!(lexer.next_token(), Ok(Token::Boolean(false)));
    assert_eq!(lexer.next_token(), Ok(Token::Eof));
}

#[test]
fn test_comparison() {
    let mut lexer = Lexer::new("(field1 <= 98.183)");
    assert_eq!(lexer.next_token(), Ok(Token::LParen));
    assert_eq!(lexer.next_token(), Ok(Token::Identifier("field1".to_string())));
    assert_eq!(lexer.next_token(), Ok(Token::LtEq));
    assert_eq!(lexer.next_token(), Ok(Token::Decimal("98.183".to_string())));
    assert_eq!(lexer.token_start(), 11);
    assert_eq!(lexer.next_token(), Ok(Token::RParen));
}
