//! Evaluate filters against JSON input

use tracing::debug;

use super::CliError;
use crate::{
    Evaluator, Value,
    convert::{self, ConversionMode, FieldTypes},
    el, parser,
};

/// Options for the eval command
#[derive(Debug, Clone, Default)]
pub struct EvalOptions {
    /// The filter, TQL unless `dsel` is set
    pub filter: String,
    /// Treat the filter as a DSEL expression
    pub dsel: bool,
    /// Conversion mode for TQL filters
    pub mode: ConversionMode,
    /// Declared field types for wildcard and validity predicates
    pub field_types: FieldTypes,
    /// JSON input string
    pub input: Option<String>,
}

/// Result of an eval operation
#[derive(Debug, PartialEq)]
pub enum EvalResult {
    /// The input was a single record
    Record(bool),
    /// The input was an array; the records that passed the filter
    Matches(serde_json::Value),
}

/// Evaluates the filter against one record or an array of records.
pub fn execute_eval(options: &EvalOptions) -> Result<EvalResult, CliError> {
    let node = if options.dsel {
        el::parse(&options.filter)?
    } else {
        let element = parser::parse(&options.filter)?;
        convert::tql_element_to_dsel(&element, options.mode, &options.field_types)?
    };
    debug!(%node, "Evaluating filter");

    let json_str = options.input.as_ref().ok_or(CliError::NoInput)?;
    let json_value: serde_json::Value = serde_json::from_str(json_str)?;

    let evaluator = Evaluator::new();
    match json_value {
        serde_json::Value::Array(records) => {
            let mut matches = Vec::new();
            for record in records {
                if evaluator.matches(&node, &Value::from(record.clone()))? {
                    matches.push(record);
                }
            }
            Ok(EvalResult::Matches(serde_json::Value::Array(matches)))
        }
        record => Ok(EvalResult::Record(evaluator.matches(&node, &Value::from(record))?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_filter_array() {
        let options = EvalOptions {
            filter: "(age > 30)".to_string(),
            input: Some(r#"[{"age": 25}, {"age": 42}]"#.to_string()),
            ..Default::default()
        };
        assert_eq!(
            execute_eval(&options).unwrap(),
            EvalResult::Matches(json!([{"age": 42}]))
        );
    }

    #[test]
    fn test_dsel_single_record() {
        let options = EvalOptions {
            filter: "complies(name, 'Aaa')".to_string(),
            dsel: true,
            input: Some(r#"{"name": "Bob"}"#.to_string()),
            ..Default::default()
        };
        assert_eq!(execute_eval(&options).unwrap(), EvalResult::Record(true));
    }

    #[test]
    fn test_missing_input() {
        let options = EvalOptions {
            filter: "(age > 30)".to_string(),
            ..Default::default()
        };
        assert!(matches!(execute_eval(&options), Err(CliError::NoInput)));
    }
}
