// tests/dsel_parser_tests.rs

use pretty_assertions::assert_eq;
use tql_dsel::el::{BinaryOp, Builtin, ElNode, FunctionName, LiteralKind, parse};

#[test]
fn test_comparison() {
    assert_eq!(
        parse("field1 == 'abc'").unwrap(),
        ElNode::binary(BinaryOp::Eq, ElNode::field("field1"), ElNode::string("abc"))
    );
    // single '=' is accepted as equality
    assert_eq!(parse("field1 = 'abc'").unwrap(), parse("field1 == 'abc'").unwrap());
}

#[test]
fn test_logical_operators_fold_left() {
    let node = parse("a == 1 || b == 2 || c == 3").unwrap();
    match node {
        ElNode::BinaryOp {
            op: BinaryOp::Or,
            left,
            right,
        } => {
            assert!(matches!(*left, ElNode::BinaryOp { op: BinaryOp::Or, .. }));
            assert!(matches!(*right, ElNode::BinaryOp { op: BinaryOp::Eq, .. }));
        }
        other => panic!("Expected or, got {:?}", other),
    }
}

#[test]
fn test_and_binds_tighter_than_or() {
    let node = parse("a == 1 || b == 2 && c == 3").unwrap();
    match node {
        ElNode::BinaryOp {
            op: BinaryOp::Or,
            right,
            ..
        } => assert!(matches!(*right, ElNode::BinaryOp { op: BinaryOp::And, .. })),
        other => panic!("Expected or, got {:?}", other),
    }
}

#[test]
fn test_parentheses_override_precedence() {
    let node = parse("(a == 1 || b == 2) && c == 3").unwrap();
    assert!(matches!(node, ElNode::BinaryOp { op: BinaryOp::And, .. }));
}

#[test]
fn test_builtin_calls_resolve_once() {
    let node = parse("between(field1, 3, 621.5)").unwrap();
    assert_eq!(
        node,
        ElNode::builtin(
            Builtin::Between,
            vec![
                ElNode::field("field1"),
                ElNode::literal(LiteralKind::Integer, "3"),
                ElNode::literal(LiteralKind::Decimal, "621.5"),
            ]
        )
    );

    match parse("lowerCase(name)").unwrap() {
        ElNode::Call { name, .. } => assert_eq!(name, FunctionName::Custom("lowerCase".to_string())),
        other => panic!("Expected call, got {:?}", other),
    }
}

#[test]
fn test_arrays_and_negation() {
    assert_eq!(
        parse("!in(f, ['a', 'b'])").unwrap(),
        ElNode::not(ElNode::builtin(
            Builtin::In,
            vec![
                ElNode::field("f"),
                ElNode::ArrayLiteral(vec![ElNode::string("a"), ElNode::string("b")]),
            ]
        ))
    );
    assert_eq!(
        parse("!(a == 1)").unwrap(),
        ElNode::not(ElNode::binary(
            BinaryOp::Eq,
            ElNode::field("a"),
            ElNode::literal(LiteralKind::Integer, "1")
        ))
    );
}

#[test]
fn test_multiline_input() {
    let text = "isEmpty(field1)\n|| isEmpty(accountNumber)";
    assert_eq!(
        parse(text).unwrap(),
        parse("isEmpty(field1) || isEmpty(accountNumber)").unwrap()
    );
}

#[test]
fn test_errors() {
    assert!(parse("isEmpty(field1").is_err());
    assert!(parse("a == ").is_err());
    assert!(parse("a == 1 b").is_err());
    assert!(parse("f(a,, b)").is_err());

    let err = parse("a == 1 )").unwrap_err();
    assert_eq!(err.position, 7);
}
