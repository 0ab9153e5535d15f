//! Syntax check of TQL queries

use super::CliError;
use crate::parser;

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The TQL query to check
    pub query: String,
}

/// Parses the query and returns its normalized text.
pub fn execute_check(options: &CheckOptions) -> Result<String, CliError> {
    let element = parser::parse(&options.query)?;
    Ok(element.to_query_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_normalizes() {
        let options = CheckOptions {
            query: "(field1   =  'abc')".to_string(),
        };
        assert_eq!(execute_check(&options).unwrap(), "(field1 = 'abc')");
    }

    #[test]
    fn test_check_reports_position() {
        let options = CheckOptions {
            query: "(field1 = 'abc'".to_string(),
        };
        assert!(matches!(execute_check(&options), Err(CliError::Parse(_))));
    }
}
