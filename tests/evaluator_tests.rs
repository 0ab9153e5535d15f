// tests/evaluator_tests.rs

use serde_json::json;
use tql_dsel::convert::{FieldType, FieldTypes, convert_for_db, convert_for_runtime};
use tql_dsel::el::{self, Builtin};
use tql_dsel::error::{EvalError, FunctionArityError};
use tql_dsel::functions;
use tql_dsel::{Evaluator, Value};

fn record(value: serde_json::Value) -> Value {
    Value::from(value)
}

fn matches_db(query: &str, doc: serde_json::Value) -> bool {
    let node = convert_for_db(query, None).unwrap();
    Evaluator::new().matches(&node, &record(doc)).unwrap()
}

fn s(text: &str) -> Value {
    Value::String(text.to_string())
}

// ============================================================================
// complies
// ============================================================================

#[test]
fn test_complies_matches_char_pattern() {
    assert_eq!(functions::complies(&[s("Bob Dole"), s("Aaa Aaaa")]), Ok(true));
    assert_eq!(functions::complies(&[s("bob dole"), s("Aaa Aaaa")]), Ok(false));
    assert_eq!(functions::complies(&[Value::Integer(123), s("999")]), Ok(true));
}

#[test]
fn test_complies_requires_two_non_null_arguments() {
    let arity = |found| {
        EvalError::Arity(FunctionArityError {
            function: "complies",
            expected: "2".to_string(),
            found,
        })
    };
    assert_eq!(functions::complies(&[s("Bob")]), Err(arity(1)));
    assert_eq!(functions::complies(&[s("Bob"), Value::Null]), Err(arity(1)));
    assert_eq!(functions::complies(&[s("a"), s("a"), s("a")]), Err(arity(3)));
    assert_eq!(functions::complies(&[]), Err(arity(0)));
}

#[test]
fn test_complies_ignores_null_arguments() {
    assert_eq!(functions::complies(&[s("Bob"), s("Aaa"), Value::Null]), Ok(true));
    assert_eq!(functions::complies(&[Value::Null, s("Bob"), s("Aaa")]), Ok(true));
    assert_eq!(
        functions::call(Builtin::WordComplies, &[s("Hello"), Value::Null, s("[Word]")]),
        Ok(Value::Boolean(true))
    );
    assert_eq!(functions::matches(&[s("bob"), s("^b"), Value::Null]), Ok(true));
}

#[test]
fn test_complies_on_missing_field_is_an_error() {
    let node = el::parse("complies(name, 'Aaa')").unwrap();
    let result = Evaluator::new().matches(&node, &record(json!({})));
    assert!(matches!(result, Err(EvalError::Arity(_))));
}

#[test]
fn test_word_complies() {
    assert_eq!(
        functions::word_complies(&[s("Hello world7"), s("[Word] [word][digit]")]),
        Ok(true)
    );
    assert!(functions::word_complies(&[s("Hello")]).is_err());
}

// ============================================================================
// matches
// ============================================================================

#[test]
fn test_matches() {
    assert_eq!(functions::matches(&[s("Bob"), s("^[A-Z][a-z]*$")]), Ok(true));
    assert_eq!(functions::matches(&[s("bob"), s("^[A-Z][a-z]*$")]), Ok(false));
    assert!(matches!(
        functions::matches(&[s("bob"), s("(")]),
        Err(EvalError::InvalidRegex { .. })
    ));
    assert!(matches!(
        functions::matches(&[Value::Null, s("a")]),
        Err(EvalError::Arity(_))
    ));
}

// ============================================================================
// Other builtins
// ============================================================================

#[test]
fn test_emptiness_and_types() {
    let call = |builtin, args: &[Value]| functions::call(builtin, args).unwrap();
    assert_eq!(call(Builtin::IsEmpty, &[s("  ")]), Value::Boolean(true));
    assert_eq!(call(Builtin::IsEmpty, &[Value::Integer(0)]), Value::Boolean(false));
    assert_eq!(call(Builtin::IsNull, &[s("")]), Value::Boolean(false));
    assert_eq!(call(Builtin::IsValid, &[s("12"), s("INTEGER")]), Value::Boolean(true));
    assert_eq!(call(Builtin::IsValid, &[s(""), s("STRING")]), Value::Boolean(false));
    assert_eq!(call(Builtin::IsInvalid, &[s("twelve"), s("INTEGER")]), Value::Boolean(true));
    assert_eq!(call(Builtin::IsInvalid, &[Value::Null, s("INTEGER")]), Value::Boolean(false));
    assert_eq!(call(Builtin::IsOfType, &[s("2024-01-31"), s("date")]), Value::Boolean(true));
}

#[test]
fn test_unknown_type_name() {
    assert!(matches!(
        functions::call(Builtin::IsOfType, &[s("x"), s("BLOB")]),
        Err(EvalError::TypeError(_))
    ));
}

#[test]
fn test_total_arity_checks() {
    assert_eq!(
        functions::call(Builtin::Between, &[Value::Integer(1), Value::Integer(2)]),
        Err(EvalError::Arity(FunctionArityError {
            function: "between",
            expected: "3 or 5".to_string(),
            found: 2,
        }))
    );
}

// ============================================================================
// Converted filters
// ============================================================================

#[test]
fn test_comparison_filters() {
    let doc = json!({"field1": "abc", "price": 98.183, "count": 12, "flag": false});
    assert!(matches_db("(field1 = 'abc')", doc.clone()));
    assert!(matches_db("(price < 100)", doc.clone()));
    assert!(matches_db("(price = 98.183)", doc.clone()));
    assert!(matches_db("(count >= 12)", doc.clone()));
    assert!(matches_db("(flag = false)", doc.clone()));
    assert!(!matches_db("(field1 != 'abc')", doc));
}

#[test]
fn test_between_and_in_filters() {
    let doc = json!({"amount": 3, "code": "b"});
    assert!(matches_db("(amount between [3, 621])", doc.clone()));
    assert!(!matches_db("(amount between ]3, 621])", doc.clone()));
    assert!(matches_db("(amount in [525.87, 3.0, 99.20])", doc.clone()));
    assert!(matches_db("(code in ['a', 'b'])", doc.clone()));
    assert!(matches_db("(code between ['a', 'c'])", doc));
}

#[test]
fn test_string_filters() {
    let doc = json!({"greeting": "Hello World", "name": "Bob Dole"});
    assert!(matches_db("(greeting contains 'World')", doc.clone()));
    assert!(!matches_db("(greeting contains 'world')", doc.clone()));
    assert!(matches_db("(greeting containsIgnoreCase 'wORLD')", doc.clone()));
    assert!(matches_db("(name complies 'Aaa Aaaa')", doc.clone()));
    assert!(matches_db("(name wordComplies '[Word] [Word]')", doc.clone()));
    assert!(matches_db("(name ~ '^B')", doc));
}

#[test]
fn test_logical_filters() {
    let doc = json!({"firstName": "Jacques", "lastName": "Dupond"});
    let query = "((firstName = 'John') and (lastName = 'Doe')) or (firstName = 'Jacques')";
    assert!(matches_db(query, doc.clone()));
    assert!(!matches_db("(not ((firstName = 'Jacques')))", doc));
}

#[test]
fn test_nested_fields() {
    let doc = json!({"address": {"city": "Nantes"}});
    assert!(matches_db("(address.city = 'Nantes')", doc.clone()));
    assert!(matches_db("(address.zip is empty)", doc));
}

#[test]
fn test_runtime_wildcards() {
    let field_types = FieldTypes::new()
        .with("field1", FieldType::String)
        .with("accountNumber", FieldType::Integer);
    let evaluator = Evaluator::new();

    let empty = convert_for_runtime("(* is empty)", &field_types).unwrap();
    assert_eq!(
        evaluator.matches(&empty, &record(json!({"field1": " ", "accountNumber": 7}))),
        Ok(true)
    );
    assert_eq!(
        evaluator.matches(&empty, &record(json!({"field1": "x", "accountNumber": 7}))),
        Ok(false)
    );

    let invalid = convert_for_runtime("(* is invalid)", &field_types).unwrap();
    assert_eq!(
        evaluator.matches(&invalid, &record(json!({"field1": "x", "accountNumber": "seven"}))),
        Ok(true)
    );
    assert_eq!(
        evaluator.matches(&invalid, &record(json!({"field1": "x", "accountNumber": "7"}))),
        Ok(false)
    );

    let valid = convert_for_runtime("(* is valid)", &field_types).unwrap();
    assert_eq!(
        evaluator.matches(&valid, &record(json!({"field1": "x", "accountNumber": 7}))),
        Ok(true)
    );
    assert_eq!(
        evaluator.matches(&valid, &record(json!({"field1": "x"}))),
        Ok(false)
    );
}

#[test]
fn test_db_and_runtime_shapes_agree() {
    let field_types = FieldTypes::new()
        .with("field1", FieldType::String)
        .with("accountNumber", FieldType::Integer);
    let records = [
        json!({"field1": "x", "accountNumber": 7}),
        json!({"field1": "", "accountNumber": "7"}),
        json!({"field1": "x", "accountNumber": "seven"}),
        json!({"field1": "x"}),
    ];
    let evaluator = Evaluator::new();

    for query in ["(* is valid)", "(* is invalid)"] {
        let db = convert_for_db(query, Some(&field_types)).unwrap();
        let runtime = convert_for_runtime(query, &field_types).unwrap();
        for doc in &records {
            let doc = record(doc.clone());
            assert_eq!(
                evaluator.matches(&db, &doc),
                evaluator.matches(&runtime, &doc),
                "Failed for {} on {:?}",
                query,
                doc
            );
        }
    }
}
