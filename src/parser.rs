use std::mem;

use tracing::trace;

use crate::{
    ast::{
        ComparisonOp, Literal, PredicateKeyword, StateKeyword, Target, Token,
        TqlElement,
    },
    error::ParseError,
    lexer::{Lexer, Position},
};

/// Parses TQL text into a [`TqlElement`].
///
/// # Examples
///
/// ```
/// use tql_dsel::parser;
///
/// let element = parser::parse("(field1 = 123) and (field2 < 124)").unwrap();
/// assert_eq!(element.to_query_string(), "(field1 = 123) and (field2 < 124)");
/// ```
pub fn parse(text: &str) -> Result<TqlElement, ParseError> {
    let mut parser = Parser::new(Lexer::new(text))?;
    let element = parser.parse()?;
    trace!(query = text, ?element, "Parsed TQL query");
    Ok(element)
}

pub struct Parser {
    lexer: Lexer,
    current_token: Token,
    current_position: Position,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Result<Self, ParseError> {
        let current_token = lexer.next_token()?;
        let current_position = lexer.token_start();
        Ok(Parser {
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

    fn check(&self, token: &Token) -> bool {
        mem::discriminant(&self.current_token) == mem::discriminant(token)
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::new(self.current_position, message)
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        self.error(format!(
            "expected {expected}, got {}",
            self.current_token.describe()
        ))
    }

    /// Parse a complete query, rejecting trailing input.
    pub fn parse(&mut self) -> Result<TqlElement, ParseError> {
        let element = self.parse_or()?;
        match self.current_token {
            Token::Eof => Ok(element),
            Token::RParen => Err(self.error("unmatched ')'")),
            _ => Err(self.unexpected("'and', 'or' or end of input")),
        }
    }

    fn parse_or(&mut self) -> Result<TqlElement, ParseError> {
        let mut operands = vec![self.parse_and()?];

        while self.check(&Token::Or) {
            self.advance()?;
            operands.push(self.parse_and()?);
        }

        Ok(if operands.len() == 1 {
            operands.remove(0)
        } else {
            TqlElement::Or(operands)
        })
    }

    fn parse_and(&mut self) -> Result<TqlElement, ParseError> {
        let mut operands = vec![self.parse_operand()?];

        while self.check(&Token::And) {
            self.advance()?;
            operands.push(self.parse_operand()?);
        }

        Ok(if operands.len() == 1 {
            operands.remove(0)
        } else {
            TqlElement::And(operands)
        })
    }

    /// `not (...)` or a parenthesized group
    fn parse_operand(&mut self) -> Result<TqlElement, ParseError> {
        if self.check(&Token::Not) {
            self.advance()?;
            let inner = self.parse_group()?;
            return Ok(TqlElement::Not(Box::new(inner)));
        }
        self.parse_group()
    }

    /// `'(' (expression | predicate) ')'`
    fn parse_group(&mut self) -> Result<TqlElement, ParseError> {
        if !self.check(&Token::LParen) {
            return Err(self.unexpected("'('"));
        }
        let open_position = self.current_position;
        self.advance()?;

        let inner = match self.current_token {
            Token::LParen | Token::Not => self.parse_or()?,
            _ => self.parse_predicate()?,
        };

        if !self.check(&Token::RParen) {
            return Err(match self.current_token {
                Token::Eof => ParseError::new(open_position, "unmatched '('"),
                _ => self.unexpected("')'"),
            });
        }
        self.advance()?;
        Ok(inner)
    }

    fn parse_predicate(&mut self) -> Result<TqlElement, ParseError> {
        let target = match mem::replace(&mut self.current_token, Token::Eof) {
            // DSEL reads `null` as a literal, so such a field could not convert back
            Token::Identifier(name) if name == "null" => {
                self.current_token = Token::Identifier(name);
                return Err(self.error("'null' cannot be used as a field name"));
            }
            Token::Identifier(name) => Target::Field(name),
            Token::Star => Target::AllFields,
            token => {
                self.current_token = token;
                return Err(self.unexpected("field name or '*'"));
            }
        };
        let field_position = self.current_position;
        self.advance()?;

        let operator_position = self.current_position;
        let op = match &self.current_token {
            Token::Eq => Some(ComparisonOp::Eq),
            Token::NotEq => Some(ComparisonOp::Neq),
            Token::Lt => Some(ComparisonOp::Lt),
            Token::Gt => Some(ComparisonOp::Gt),
            Token::LtEq => Some(ComparisonOp::Le),
            Token::GtEq => Some(ComparisonOp::Ge),
            _ => None,
        };

        if let Some(op) = op {
            let field = single_field(target, field_position, op.symbol())?;
            self.advance()?;
            return self.parse_comparison(field, op);
        }

        if self.check(&Token::Tilde) {
            let field = single_field(target, field_position, "~")?;
            self.advance()?;
            let regex = self.parse_string_operand("~")?;
            return Ok(TqlElement::MatchesRegex { field, regex });
        }

        let keyword = match &self.current_token {
            Token::Identifier(word) => PredicateKeyword::from_word(word)
                .ok_or_else(|| self.error(format!("unknown operator '{word}'")))?,
            Token::RParen | Token::Eof => return Err(self.error("missing operator")),
            other => return Err(self.error(format!("unknown operator '{}'", other.describe()))),
        };
        self.advance()?;

        match keyword {
            PredicateKeyword::Is => self.parse_state(target, field_position),
            PredicateKeyword::Contains | PredicateKeyword::ContainsIgnoreCase => {
                let ignore_case = keyword == PredicateKeyword::ContainsIgnoreCase;
                let name = if ignore_case { "containsIgnoreCase" } else { "contains" };
                let field = single_field(target, field_position, name)?;
                let value = self.parse_string_operand(name)?;
                Ok(TqlElement::Contains {
                    field,
                    value,
                    ignore_case,
                })
            }
            PredicateKeyword::Complies => {
                let field = single_field(target, field_position, "complies")?;
                let pattern = self.parse_string_operand("complies")?;
                Ok(TqlElement::Complies { field, pattern })
            }
            PredicateKeyword::WordComplies => {
                let field = single_field(target, field_position, "wordComplies")?;
                let pattern = self.parse_string_operand("wordComplies")?;
                Ok(TqlElement::WordComplies { field, pattern })
            }
            PredicateKeyword::Between => {
                let field = single_field(target, field_position, "between")?;
                self.parse_between(field)
            }
            PredicateKeyword::In => {
                let field = single_field(target, field_position, "in")?;
                self.parse_in(field, operator_position)
            }
        }
    }

    fn parse_comparison(&mut self, field: String, op: ComparisonOp) -> Result<TqlElement, ParseError> {
        if let Token::Identifier(other) = &self.current_token {
            let other_field = other.clone();
            self.advance()?;
            return Ok(TqlElement::FieldToFieldComparison {
                field,
                op,
                other_field,
            });
        }
        let value = self.parse_literal()?;
        Ok(TqlElement::FieldComparison { field, op, value })
    }

    fn parse_state(&mut self, target: Target, field_position: Position) -> Result<TqlElement, ParseError> {
        let state = match &self.current_token {
            Token::Identifier(word) => StateKeyword::from_word(word).ok_or_else(|| {
                self.error(format!(
                    "unknown operator 'is {word}' (expected empty, valid, invalid or null)"
                ))
            })?,
            _ => return Err(self.unexpected("'empty', 'valid', 'invalid' or 'null'")),
        };
        self.advance()?;

        Ok(match state {
            StateKeyword::Empty => TqlElement::IsEmpty(target),
            StateKeyword::Valid => TqlElement::IsValid(target),
            StateKeyword::Invalid => TqlElement::IsInvalid(target),
            StateKeyword::Null => TqlElement::IsNull {
                field: single_field(target, field_position, "is null")?,
            },
        })
    }

    fn parse_between(&mut self, field: String) -> Result<TqlElement, ParseError> {
        let lower_open = match self.current_token {
            Token::LBracket => false,
            Token::RBracket => true,
            _ => return Err(self.unexpected("'[' or ']'")),
        };
        self.advance()?;

        let lower_position = self.current_position;
        let lower = self.parse_literal()?;
        if !self.check(&Token::Comma) {
            return Err(self.unexpected("','"));
        }
        self.advance()?;
        let upper = self.parse_literal()?;

        let upper_open = match self.current_token {
            Token::RBracket => false,
            Token::LBracket => true,
            _ => return Err(self.unexpected("']' or '['")),
        };
        self.advance()?;

        check_literal_types(&[&lower, &upper], "between", lower_position)?;
        Ok(TqlElement::Between {
            field,
            lower,
            upper,
            lower_open,
            upper_open,
        })
    }

    fn parse_in(&mut self, field: String, operator_position: Position) -> Result<TqlElement, ParseError> {
        if !self.check(&Token::LBracket) {
            return Err(self.unexpected("'['"));
        }
        self.advance()?;

        let mut values = vec![self.parse_literal()?];
        while self.check(&Token::Comma) {
            self.advance()?;
            values.push(self.parse_literal()?);
        }

        if !self.check(&Token::RBracket) {
            return Err(self.unexpected("',' or ']'"));
        }
        self.advance()?;

        let refs: Vec<&Literal> = values.iter().collect();
        check_literal_types(&refs, "in", operator_position)?;
        Ok(TqlElement::In { field, values })
    }

    fn parse_literal(&mut self) -> Result<Literal, ParseError> {
        let literal = match mem::replace(&mut self.current_token, Token::Eof) {
            Token::String(s) => Literal::string(s),
            Token::Integer(n) => Literal::int(n),
            Token::Decimal(n) => Literal::double(n),
            Token::Boolean(b) => Literal::boolean(b),
            token => {
                self.current_token = token;
                return Err(self.unexpected("literal"));
            }
        };
        self.advance()?;
        Ok(literal)
    }

    fn parse_string_operand(&mut self, operator: &str) -> Result<String, ParseError> {
        match mem::replace(&mut self.current_token, Token::Eof) {
            Token::String(s) => {
                self.advance()?;
                Ok(s)
            }
            token => {
                self.current_token = token;
                Err(self.unexpected(&format!("quoted string after '{operator}'")))
            }
        }
    }
}

fn single_field(target: Target, position: Position, operator: &str) -> Result<String, ParseError> {
    match target {
        Target::Field(name) => Ok(name),
        Target::AllFields => Err(ParseError::new(
            position,
            format!("wildcard '*' is not supported with '{operator}'"),
        )),
    }
}

fn check_literal_types(literals: &[&Literal], operator: &str, position: Position) -> Result<(), ParseError> {
    let Some(first) = literals.first() else {
        return Ok(());
    };
    match literals
        .iter()
        .find(|literal| !first.kind.is_compatible_with(literal.kind))
    {
        Some(mismatch) => Err(ParseError::new(
            position,
            format!(
                "mixed literal types in '{operator}': {} and {}",
                first.kind, mismatch.kind
            ),
        )),
        None => Ok(()),
    }
}
