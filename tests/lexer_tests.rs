// tests/lexer_tests.rs

use tql_dsel::ast::Token;
use tql_dsel::el::{ElLexer, ElToken};
use tql_dsel::lexer::Lexer;

fn tql_tokens(input: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token().unwrap();
        if token == Token::Eof {
            break;
        }
        tokens.push(token);
    }
    tokens
}

fn dsel_tokens(input: &str) -> Vec<ElToken> {
    let mut lexer = ElLexer::new(input);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token().unwrap();
        if token == ElToken::Eof {
            break;
        }
        tokens.push(token);
    }
    tokens
}

// ============================================================================
// TQL Punctuation and Operators
// ============================================================================

#[test]
fn test_single_char_tokens() {
    let test_cases = vec![
        ("(", Token::LParen),
        (")", Token::RParen),
        ("[", Token::LBracket),
        ("]", Token::RBracket),
        (",", Token::Comma),
        ("*", Token::Star),
        ("~", Token::Tilde),
        ("=", Token::Eq),
        ("<", Token::Lt),
        (">", Token::Gt),
    ];

    for (input, expected) in test_cases {
        let mut lexer = Lexer::new(input);
        let token = lexer.next_token().unwrap();
        assert_eq!(token, expected, "Failed for input: {}", input);
        assert_eq!(lexer.next_token().unwrap(), Token::Eof);
    }
}

#[test]
fn test_two_char_tokens() {
    let test_cases = vec![("!=", Token::NotEq), ("<=", Token::LtEq), (">=", Token::GtEq)];

    for (input, expected) in test_cases {
        let mut lexer = Lexer::new(input);
        assert_eq!(lexer.next_token().unwrap(), expected, "Failed for input: {}", input);
        assert_eq!(lexer.next_token().unwrap(), Token::Eof);
    }
}

#[test]
fn test_lone_bang_is_rejected() {
    let mut lexer = Lexer::new("(a ! b)");
    lexer.next_token().unwrap();
    lexer.next_token().unwrap();
    let err = lexer.next_token().unwrap_err();
    assert_eq!(err.position, 3);
}

// ============================================================================
// TQL Literals
// ============================================================================

#[test]
fn test_numbers() {
    assert_eq!(
        tql_tokens("12 98.183 -3 -0.5 99.20"),
        vec![
            Token::Integer("12".to_string()),
            Token::Decimal("98.183".to_string()),
            Token::Integer("-3".to_string()),
            Token::Decimal("-0.5".to_string()),
            Token::Decimal("99.20".to_string()),
        ]
    );
}

#[test]
fn test_strings() {
    assert_eq!(
        tql_tokens(r"'abc' 'it\'s' 'back\\slash' '^\d+$'"),
        vec![
            Token::String("abc".to_string()),
            Token::String("it's".to_string()),
            Token::String(r"back\slash".to_string()),
            Token::String(r"^\d+$".to_string()),
        ]
    );
}

#[test]
fn test_unterminated_string() {
    let mut lexer = Lexer::new("(name = 'abc");
    lexer.next_token().unwrap();
    lexer.next_token().unwrap();
    lexer.next_token().unwrap();
    let err = lexer.next_token().unwrap_err();
    assert_eq!(err.position, 8);
    assert!(err.message.contains("unterminated string"));
}

#[test]
fn test_identifiers_and_keywords() {
    assert_eq!(
        tql_tokens("address.city and or not containsIgnoreCase true"),
        vec![
            Token::Identifier("address.city".to_string()),
            Token::And,
            Token::Or,
            Token::Not,
            Token::Identifier("containsIgnoreCase".to_string()),
            Token::Boolean(true),
        ]
    );
}

#[test]
fn test_full_predicate() {
    assert_eq!(
        tql_tokens("(field1 between ]3, 621[)"),
        vec![
            Token::LParen,
            Token::Identifier("field1".to_string()),
            Token::Identifier("between".to_string()),
            Token::RBracket,
            Token::Integer("3".to_string()),
            Token::Comma,
            Token::Integer("621".to_string()),
            Token::LBracket,
            Token::RParen,
        ]
    );
}

// ============================================================================
// DSEL
// ============================================================================

#[test]
fn test_dsel_operators() {
    assert_eq!(
        dsel_tokens("== = != < > <= >= && || !"),
        vec![
            ElToken::EqEq,
            ElToken::EqEq,
            ElToken::NotEq,
            ElToken::Lt,
            ElToken::Gt,
            ElToken::LtEq,
            ElToken::GtEq,
            ElToken::AndAnd,
            ElToken::OrOr,
            ElToken::Bang,
        ]
    );
}

#[test]
fn test_dsel_literals() {
    assert_eq!(
        dsel_tokens(r#"'a\'b' "double" 'line\n' 42 2.5 true null"#),
        vec![
            ElToken::String("a'b".to_string()),
            ElToken::String("double".to_string()),
            ElToken::String("line\n".to_string()),
            ElToken::Integer("42".to_string()),
            ElToken::Decimal("2.5".to_string()),
            ElToken::Boolean(true),
            ElToken::Null,
        ]
    );
}

#[test]
fn test_dsel_call() {
    assert_eq!(
        dsel_tokens("in(field1, [1, 2])"),
        vec![
            ElToken::Identifier("in".to_string()),
            ElToken::LParen,
            ElToken::Identifier("field1".to_string()),
            ElToken::Comma,
            ElToken::LBracket,
            ElToken::Integer("1".to_string()),
            ElToken::Comma,
            ElToken::Integer("2".to_string()),
            ElToken::RBracket,
            ElToken::RParen,
        ]
    );
}

#[test]
fn test_dsel_single_ampersand_is_rejected() {
    let mut lexer = ElLexer::new("a & b");
    lexer.next_token().unwrap();
    assert!(lexer.next_token().is_err());
}
