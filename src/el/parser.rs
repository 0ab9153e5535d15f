use std::mem;

use tracing::trace;

use crate::{
    el::{BinaryOp, ElLexer, ElNode, ElToken, FunctionName, LiteralKind},
    error::ParseError,
    lexer::Position,
};

/// Parses DSEL text into an [`ElNode`]. Inverse of the printer.
///
/// # Examples
///
/// ```
/// use tql_dsel::el::{self, ElNode};
///
/// let node = el::parse("isEmpty(field1)").unwrap();
/// assert!(matches!(node, ElNode::Call { .. }));
/// ```
pub fn parse(text: &str) -> Result<ElNode, ParseError> {
    let mut parser = ElParser::new(ElLexer::new(text))?;
    let node = parser.parse()?;
    trace!(expression = text, ?node, "Parsed DSEL expression");
    Ok(node)
}

/// Parses DSEL text pretty-printed with `indent_unit`.
///
/// [`parse`] already skips indents made of layout characters; this form also
/// reads back output indented with letters or digits.
pub fn parse_indented(text: &str, indent_unit: &str) -> Result<ElNode, ParseError> {
    ElParser::new(ElLexer::with_indent(text, indent_unit))?.parse()
}

/// Recursive-descent DSEL parser.
///
/// Precedence, loosest first: `||`, `&&`, comparison (non-associative),
/// prefix `!`, primary.
pub struct ElParser {
    lexer: ElLexer,
    current_token: ElToken,
    current_position: Position,
}

impl ElParser {
    pub fn new(mut lexer: ElLexer) -> Result<Self, ParseError> {
        let current_token = lexer.next_token()?;
        let current_position = lexer.token_start();
        Ok(ElParser {
            lexer,
            current_token,
            current_position,
        })
    }

    fn advance(&mut self) -> Result<(), ParseError> {
        self.current_token = self.lexer.next_token()?;
        self.current_position = self.lexer.token_start();
        Ok(())
    }

    fn check(&self, token: &ElToken) -> bool {
        mem::discriminant(&self.current_token) == mem::discriminant(token)
    }

    fn expect(&mut self, expected: ElToken) -> Result<(), ParseError> {
        if !self.check(&expected) {
            return Err(self.unexpected(&format!("'{}'", expected.describe())));
        }
        self.advance()
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        ParseError::new(
            self.current_position,
            format!("expected {expected}, got {}", self.current_token.describe()),
        )
    }

    pub fn parse(&mut self) -> Result<ElNode, ParseError> {
        let node = self.parse_expression()?;
        if !self.check(&ElToken::Eof) {
            return Err(self.unexpected("operator or end of input"));
        }
        Ok(node)
    }

    pub fn parse_expression(&mut self) -> Result<ElNode, ParseError> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Result<ElNode, ParseError> {
        let mut left = self.parse_and()?;

        while self.check(&ElToken::OrOr) {
            self.advance()?;
            let right = self.parse_and()?;
            left = ElNode::binary(BinaryOp::Or, left, right);
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<ElNode, ParseError> {
        let mut left = self.parse_comparison()?;

        while self.check(&ElToken::AndAnd) {
            self.advance()?;
            let right = self.parse_comparison()?;
            left = ElNode::binary(BinaryOp::And, left, right);
        }
        Ok(left)
    }

    fn parse_comparison(&mut self) -> Result<ElNode, ParseError> {
        let left = self.parse_unary()?;

        let op = match &self.current_token {
            ElToken::EqEq => BinaryOp::Eq,
            ElToken::NotEq => BinaryOp::NotEq,
            ElToken::Lt => BinaryOp::Lt,
            ElToken::Gt => BinaryOp::Gt,
            ElToken::LtEq => BinaryOp::LtEq,
            ElToken::GtEq => BinaryOp::GtEq,
            _ => return Ok(left),
        };
        self.advance()?;
        let right = self.parse_unary()?;
        Ok(ElNode::binary(op, left, right))
    }

    fn parse_unary(&mut self) -> Result<ElNode, ParseError> {
        if self.check(&ElToken::Bang) {
            self.advance()?;
            let operand = self.parse_unary()?;
            return Ok(ElNode::not(operand));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<ElNode, ParseError> {
        match mem::replace(&mut self.current_token, ElToken::Eof) {
            ElToken::Integer(n) => {
                self.advance()?;
                Ok(ElNode::literal(LiteralKind::Integer, n))
            }
            ElToken::Decimal(n) => {
                self.advance()?;
                Ok(ElNode::literal(LiteralKind::Decimal, n))
            }
            ElToken::String(s) => {
                self.advance()?;
                Ok(ElNode::string(s))
            }
            ElToken::Boolean(b) => {
                self.advance()?;
                Ok(ElNode::boolean(b))
            }
            ElToken::Null => {
                self.advance()?;
                Ok(ElNode::literal(LiteralKind::Null, "null"))
            }
            ElToken::Identifier(name) => {
                self.advance()?;
                if self.check(&ElToken::LParen) {
                    self.advance()?;
                    let args = self.parse_list(ElToken::RParen)?;
                    Ok(ElNode::Call {
                        name: FunctionName::from(name.as_str()),
                        args,
                    })
                } else {
                    Ok(ElNode::FieldRef(name))
                }
            }
            ElToken::LParen => {
                self.advance()?;
                let node = self.parse_expression()?;
                self.expect(ElToken::RParen)?;
                Ok(node)
            }
            ElToken::LBracket => {
                self.advance()?;
                let items = self.parse_list(ElToken::RBracket)?;
                Ok(ElNode::ArrayLiteral(items))
            }
            token => {
                self.current_token = token;
                Err(self.unexpected("expression"))
            }
        }
    }

    /// Comma-separated expressions up to and including `close`.
    fn parse_list(&mut self, close: ElToken) -> Result<Vec<ElNode>, ParseError> {
        let mut items = vec![];

        while !self.check(&close) {
            items.push(self.parse_expression()?);

            if !self.check(&close) {
                self.expect(ElToken::Comma)?;
            }
        }

        self.expect(close)?;
        Ok(items)
    }
}
