use std::mem;

use crate::{
    el::ElToken,
    error::ParseError,
    lexer::{Cursor, Position},
};

/// Lexer for DSEL source text.
///
/// Pretty-printed DSEL puts each `&&`/`||` operand on its own line behind an
/// indent. A line-leading run of layout characters directly in front of
/// `&&` or `||` is skipped like whitespace. [`ElLexer::with_indent`] also
/// skips repetitions of a known indent unit, whatever its characters.
pub struct ElLexer {
    cursor: Cursor,
    token_start: Position,
    indent_unit: Vec<char>,
    line_start: bool,
}

impl ElLexer {
    pub fn new(input: &str) -> Self {
        Self::with_indent(input, "")
    }

    pub fn with_indent(input: &str, indent_unit: &str) -> Self {
        ElLexer {
            cursor: Cursor::new(input),
            token_start: 0,
            indent_unit: indent_unit.chars().collect(),
            line_start: false,
        }
    }

    pub fn token_start(&self) -> Position {
        self.token_start
    }

    fn skip_layout(&mut self) {
        while let Some(ch) = self.cursor.current_char().filter(|c| c.is_whitespace()) {
            self.line_start |= ch == '\n';
            self.cursor.advance();
        }
        if mem::take(&mut self.line_start) {
            let indent = self.indent_len();
            self.cursor.advance_by(indent);
        }
    }

    /// Length of the indent in front of a line-leading `&&` or `||`, else 0.
    fn indent_len(&self) -> usize {
        let rest = self.cursor.rest(0);
        let opens_operator =
            |len: usize| matches!(rest.get(len..len + 2), Some(['&', '&'] | ['|', '|']));

        if self.indent_unit.is_empty() {
            let len = rest.iter().take_while(|c| is_layout_char(**c)).count();
            return if opens_operator(len) { len } else { 0 };
        }

        // The unit may itself contain '&' or '|', so try the longest run first
        let unit = self.indent_unit.as_slice();
        let mut runs = vec![0];
        let mut len = 0;
        while rest[len..].starts_with(unit) {
            len += unit.len();
            runs.push(len);
        }
        runs.into_iter()
            .rev()
            .map(|len| {
                len + rest[len..]
                    .iter()
                    .take_while(|c| c.is_whitespace() && **c != '\n')
                    .count()
            })
            .find(|len| opens_operator(*len))
            .unwrap_or(0)
    }

    fn read_string(&mut self, quote: char) -> Result<String, ParseError> {
        let cursor = &mut self.cursor;
        let start = cursor.position();
        let mut result = String::new();
        cursor.advance(); // Consume opening quote

        while let Some(ch) = cursor.current_char() {
            match ch {
                c if c == quote => {
                    cursor.advance();
                    return Ok(result);
                }
                '\\' => {
                    cursor.advance();
                    match cursor.current_char() {
                        Some('n') => result.push('\n'),
                        Some('t') => result.push('\t'),
                        Some('r') => result.push('\r'),
                        Some(c @ ('\'' | '"' | '\\')) => result.push(c),
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

    fn read_number(&mut self) -> ElToken {
        match self.cursor.read_number() {
            (number, true) => ElToken::Decimal(number),
            (number, false) => ElToken::Integer(number),
        }
    }

    fn double(&mut self, token: ElToken) -> ElToken {
        self.cursor.advance_by(2);
        token
    }

    fn single(&mut self, token: ElToken) -> ElToken {
        self.cursor.advance();
        token
    }

    pub fn next_token(&mut self) -> Result<ElToken, ParseError> {
        self.skip_layout();
        self.token_start = self.cursor.position();

        let next = self.cursor.peek_char(1);
        let token = match self.cursor.current_char() {
            None => ElToken::Eof,
            Some('(') => self.single(ElToken::LParen),
            Some(')') => self.single(ElToken::RParen),
            Some('[') => self.single(ElToken::LBracket),
            Some(']') => self.single(ElToken::RBracket),
            Some(',') => self.single(ElToken::Comma),
            Some('=') if next == Some('=') => self.double(ElToken::EqEq),
            Some('=') => self.single(ElToken::EqEq),
            Some('!') if next == Some('=') => self.double(ElToken::NotEq),
            Some('!') => self.single(ElToken::Bang),
            Some('<') if next == Some('=') => self.double(ElToken::LtEq),
            Some('<') => self.single(ElToken::Lt),
            Some('>') if next == Some('=') => self.double(ElToken::GtEq),
            Some('>') => self.single(ElToken::Gt),
            Some('&') if next == Some('&') => self.double(ElToken::AndAnd),
            Some('|') if next == Some('|') => self.double(ElToken::OrOr),
            Some(quote @ ('\'' | '"')) => ElToken::String(self.read_string(quote)?),
            Some('-') if next.is_some_and(|c| c.is_ascii_digit()) => self.read_number(),
            Some(ch) if ch.is_ascii_digit() => self.read_number(),
            Some(ch) if ch.is_alphabetic() || ch == '_' => {
                let ident = self.cursor.read_identifier();
                match ident.as_str() {
                    "true" => ElToken::Boolean(true),
                    "false" => ElToken::Boolean(false),
                    "null" => ElToken::Null,
                    _ => ElToken::Identifier(ident),
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

/// Characters that never start a token a continuation line could open with.
fn is_layout_char(c: char) -> bool {
    c != '\n'
        && !c.is_alphanumeric()
        && !matches!(c, '_' | '\'' | '"' | '(' | ')' | '[' | ']' | ',' | '&' | '|')
}

#[test]
fn test_operators() {
    let mut lexer = ElLexer::new("a == 1 && !b || c != -2.5");
    let expected = [
        ElToken::Identifier("a".to_string()),
        ElToken::EqEq,
        ElToken::Integer("1".to_string()),
        ElToken::AndAnd,
        ElToken::Bang,
        ElToken::Identifier("b".to_string()),
        ElToken::OrOr,
        ElToken::Identifier("c".to_string()),
        ElToken::NotEq,
        ElToken::Decimal("-2.5".to_string()),
        ElToken::Eof,
    ];
    for token in expected {
        assert_eq!(lexer.next_token(), Ok(token));
    }
}

#[test]
fn test_line_indent_is_layout() {
    let mut lexer = ElLexer::new("a\n--&& b");
    assert_eq!(lexer.next_token(), Ok(ElToken::Identifier("a".to_string())));
    assert_eq!(lexer.next_token(), Ok(ElToken::AndAnd));
    assert_eq!(lexer.token_start(), 4);
    assert_eq!(lexer.next_token(), Ok(ElToken::Identifier("b".to_string())));

    let mut lexer = ElLexer::with_indent("a\nabab|| b", "ab");
    assert_eq!(lexer.next_token(), Ok(ElToken::Identifier("a".to_string())));
    assert_eq!(lexer.next_token(), Ok(ElToken::OrOr));

    let mut lexer = ElLexer::with_indent("a\n&&& b", "&");
    lexer.next_token().unwrap();
    assert_eq!(lexer.next_token(), Ok(ElToken::AndAnd));
    assert_eq!(lexer.token_start(), 3);

    // Only in front of an operator
    let mut lexer = ElLexer::new("a &&\n-1 == b");
    lexer.next_token().unwrap();
    lexer.next_token().unwrap();
    assert_eq!(lexer.next_token(), Ok(ElToken::Integer("-1".to_string())));
}
