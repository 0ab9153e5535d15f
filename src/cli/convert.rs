//! TQL <-> DSEL text conversion for the CLI

use std::{fs, path::Path};

use super::CliError;
use crate::{
    convert::{self, ConversionMode, FieldType, FieldTypes},
    parser,
    printer::ElNodePrinter,
};

/// Options for the to-dsel command
#[derive(Debug, Clone)]
pub struct ToDselOptions {
    /// The TQL query to convert
    pub query: String,
    /// Emit data-evaluation shapes instead of query-level ones
    pub mode: ConversionMode,
    /// Declared field types, in declaration order
    pub field_types: FieldTypes,
    /// Print on a single line
    pub compact: bool,
    /// Indentation unit for multi-line output
    pub indent: String,
}

impl Default for ToDselOptions {
    fn default() -> Self {
        ToDselOptions {
            query: String::new(),
            mode: ConversionMode::Db,
            field_types: FieldTypes::new(),
            compact: true,
            indent: "  ".to_string(),
        }
    }
}

/// Options for the to-tql command
#[derive(Debug, Clone, Default)]
pub struct ToTqlOptions {
    /// The DSEL expression to convert
    pub expression: String,
}

/// Converts a TQL query to DSEL text.
pub fn execute_to_dsel(options: &ToDselOptions) -> Result<String, CliError> {
    let element = parser::parse(&options.query)?;
    let node = convert::tql_element_to_dsel(&element, options.mode, &options.field_types)?;
    Ok(ElNodePrinter::new(options.indent.as_str(), options.compact).pretty_print(&node))
}

/// Converts a DSEL expression to TQL text.
pub fn execute_to_tql(options: &ToTqlOptions) -> Result<String, CliError> {
    Ok(convert::dsel_text_to_tql(&options.expression)?)
}

/// Parses one `name=TYPE` declaration.
pub fn parse_field_spec(spec: &str) -> Result<(String, FieldType), CliError> {
    let (name, type_name) = spec
        .split_once('=')
        .ok_or_else(|| CliError::InvalidFieldSpec(spec.to_string()))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(CliError::InvalidFieldSpec(spec.to_string()));
    }
    Ok((name.to_string(), type_name.parse::<FieldType>()?))
}

/// Field types from an optional JSON file, then `name=TYPE` declarations.
///
/// Declarations for a field already in the file replace its type in place.
pub fn field_types_from_args(specs: &[String], file: Option<&Path>) -> Result<FieldTypes, CliError> {
    let mut field_types = match file {
        Some(path) => {
            let text = fs::read_to_string(path)?;
            let json: serde_json::Value = serde_json::from_str(&text)?;
            FieldTypes::from_json(&json)?
        }
        None => FieldTypes::new(),
    };
    for spec in specs {
        let (name, field_type) = parse_field_spec(spec)?;
        field_types.insert(name, field_type);
    }
    Ok(field_types)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_specs() {
        let specs = vec!["field1=STRING".to_string(), "accountNumber=integer".to_string()];
        let field_types = field_types_from_args(&specs, None).unwrap();
        assert_eq!(field_types.get("accountNumber"), Some(FieldType::Integer));
        assert!(matches!(
            parse_field_spec("field1"),
            Err(CliError::InvalidFieldSpec(_))
        ));
        assert!(matches!(
            parse_field_spec("field1=BLOB"),
            Err(CliError::Conversion(_))
        ));
    }

    #[test]
    fn test_to_dsel_runtime() {
        let options = ToDselOptions {
            query: "(* is empty)".to_string(),
            mode: ConversionMode::Runtime,
            field_types: FieldTypes::new()
                .with("field1", FieldType::String)
                .with("accountNumber", FieldType::Integer),
            ..Default::default()
        };
        assert_eq!(
            execute_to_dsel(&options).unwrap(),
            "isEmpty(field1) || isNull(accountNumber)"
        );
    }
}
