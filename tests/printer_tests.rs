// tests/printer_tests.rs

use pretty_assertions::assert_eq;
use tql_dsel::el::{self, BinaryOp, Builtin, ElNode, LiteralKind};
use tql_dsel::printer::{ElNodePrinter, pretty_print, to_dsel};

fn is_empty(field: &str) -> ElNode {
    ElNode::builtin(Builtin::IsEmpty, vec![ElNode::field(field)])
}

fn eq(field: &str, value: &str) -> ElNode {
    ElNode::binary(BinaryOp::Eq, ElNode::field(field), ElNode::string(value))
}

#[test]
fn test_literals() {
    let node = ElNode::builtin(
        Builtin::In,
        vec![
            ElNode::field("field1"),
            ElNode::ArrayLiteral(vec![
                ElNode::literal(LiteralKind::Decimal, "525.87"),
                ElNode::literal(LiteralKind::Integer, "12"),
                ElNode::literal(LiteralKind::Decimal, "99.20"),
            ]),
        ],
    );
    assert_eq!(to_dsel(&node), "in(field1, [525.87, 12, 99.20])");
    assert_eq!(to_dsel(&ElNode::string("it's")), r"'it\'s'");
    assert_eq!(to_dsel(&ElNode::literal(LiteralKind::Null, "null")), "null");
}

#[test]
fn test_minimal_parentheses() {
    let and_in_or = ElNode::binary(
        BinaryOp::Or,
        ElNode::binary(BinaryOp::And, eq("a", "1"), eq("b", "2")),
        eq("c", "3"),
    );
    assert_eq!(to_dsel(&and_in_or), "a == '1' && b == '2' || c == '3'");

    let or_in_and = ElNode::binary(
        BinaryOp::And,
        ElNode::binary(BinaryOp::Or, eq("a", "1"), eq("b", "2")),
        eq("c", "3"),
    );
    assert_eq!(to_dsel(&or_in_and), "(a == '1' || b == '2') && c == '3'");

    let right_nested = ElNode::binary(
        BinaryOp::Or,
        eq("a", "1"),
        ElNode::binary(BinaryOp::Or, eq("b", "2"), eq("c", "3")),
    );
    assert_eq!(to_dsel(&right_nested), "a == '1' || (b == '2' || c == '3')");
}

#[test]
fn test_negation() {
    assert_eq!(to_dsel(&ElNode::not(is_empty("f"))), "!isEmpty(f)");
    assert_eq!(to_dsel(&ElNode::not(eq("f", "x"))), "!(f == 'x')");
}

#[test]
fn test_pretty_layout() {
    let node = ElNode::left_fold(
        BinaryOp::Or,
        vec![is_empty("field1"), is_empty("accountNumber"), is_empty("name")],
    )
    .unwrap();
    assert_eq!(
        pretty_print(&node, "  ", false),
        "isEmpty(field1)\n|| isEmpty(accountNumber)\n|| isEmpty(name)"
    );

    let nested = ElNode::binary(
        BinaryOp::Or,
        ElNode::binary(BinaryOp::And, eq("a", "1"), eq("b", "2")),
        eq("c", "3"),
    );
    assert_eq!(
        pretty_print(&nested, "    ", false),
        "a == '1'\n    && b == '2'\n|| c == '3'"
    );
}

#[test]
fn test_output_is_deterministic_and_parses_back() {
    let nodes = vec![
        ElNode::left_fold(BinaryOp::And, vec![is_empty("a"), eq("b", "x\ty"), is_empty("c")]).unwrap(),
        ElNode::binary(
            BinaryOp::Or,
            ElNode::not(ElNode::binary(BinaryOp::And, is_empty("a"), is_empty("b"))),
            ElNode::builtin(
                Builtin::Matches,
                vec![ElNode::field("name"), ElNode::string(r"^[A-Z]\d+$")],
            ),
        ),
    ];

    for node in nodes {
        for printer in [
            ElNodePrinter::new("  ", true),
            ElNodePrinter::new("\t", false),
            ElNodePrinter::new("-", false),
        ] {
            let first = printer.pretty_print(&node);
            assert_eq!(first, printer.pretty_print(&node));
            assert_eq!(el::parse(&first).unwrap(), node, "Failed for output: {}", first);
        }
    }
}

#[test]
fn test_any_indent_unit_parses_back() {
    let node = ElNode::binary(
        BinaryOp::And,
        ElNode::binary(BinaryOp::Or, eq("a", "1"), eq("b", "2")),
        ElNode::not(ElNode::binary(BinaryOp::Or, is_empty("c"), is_empty("d"))),
    );
    for unit in ["-", "ab", "&", "||", "9"] {
        let printer = ElNodePrinter::new(unit, false);
        let printed = printer.pretty_print(&node);
        assert_eq!(printer.parse(&printed).unwrap(), node, "Failed for output: {}", printed);
    }
    assert_eq!(
        pretty_print(&node, "ab", false),
        "(a == '1'\nab|| b == '2')\n&& !(isEmpty(c)\n|| isEmpty(d))"
    );
}

#[test]
fn test_display_is_compact() {
    let node = ElNode::binary(BinaryOp::And, is_empty("a"), is_empty("b"));
    assert_eq!(node.to_string(), "isEmpty(a) && isEmpty(b)");
}
