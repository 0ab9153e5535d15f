use std::{fmt, str::FromStr};

use crate::error::ConversionError;

/// Declared semantic type of a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    String,
    Integer,
    Long,
    Double,
    Float,
    Decimal,
    Boolean,
    Date,
}

impl FieldType {
    pub fn name(self) -> &'static str {
        match self {
            FieldType::String => "STRING",
            FieldType::Integer => "INTEGER",
            FieldType::Long => "LONG",
            FieldType::Double => "DOUBLE",
            FieldType::Float => "FLOAT",
            FieldType::Decimal => "DECIMAL",
            FieldType::Boolean => "BOOLEAN",
            FieldType::Date => "DATE",
        }
    }
}

impl FromStr for FieldType {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "STRING" => Ok(FieldType::String),
            "INTEGER" | "INT" => Ok(FieldType::Integer),
            "LONG" => Ok(FieldType::Long),
            "DOUBLE" => Ok(FieldType::Double),
            "FLOAT" => Ok(FieldType::Float),
            "DECIMAL" => Ok(FieldType::Decimal),
            "BOOLEAN" => Ok(FieldType::Boolean),
            "DATE" => Ok(FieldType::Date),
            _ => Err(ConversionError::UnknownFieldType(s.to_string())),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Field name to declared type, in the order the caller supplied them.
///
/// Wildcard predicates expand into one branch per entry, in this order, so
/// the order decides the text of the generated expression.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldTypes {
    entries: Vec<(String, FieldType)>,
}

impl FieldTypes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a field. A replaced field keeps its original position.
    pub fn insert(&mut self, field: impl Into<String>, field_type: FieldType) {
        let field = field.into();
        match self.entries.iter_mut().find(|(name, _)| *name == field) {
            Some(entry) => entry.1 = field_type,
            None => self.entries.push((field, field_type)),
        }
    }

    /// Builder-style [`FieldTypes::insert`].
    pub fn with(mut self, field: impl Into<String>, field_type: FieldType) -> Self {
        self.insert(field, field_type);
        self
    }

    pub fn get(&self, field: &str) -> Option<FieldType> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, t)| *t)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, FieldType)> {
        self.entries.iter().map(|(name, t)| (name.as_str(), *t))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Builds a map from a JSON object of `"field": "TYPE"` pairs, keeping
    /// the object's key order.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, ConversionError> {
        let serde_json::Value::Object(map) = value else {
            return Err(ConversionError::UnknownFieldType(format!(
                "expected a JSON object of field types, got {value}"
            )));
        };
        let mut types = FieldTypes::new();
        for (field, type_value) in map {
            let type_name = type_value
                .as_str()
                .ok_or_else(|| ConversionError::UnknownFieldType(type_value.to_string()))?;
            types.insert(field.as_str(), type_name.parse()?);
        }
        Ok(types)
    }
}

impl<S: Into<String>> FromIterator<(S, FieldType)> for FieldTypes {
    fn from_iter<I: IntoIterator<Item = (S, FieldType)>>(iter: I) -> Self {
        let mut types = FieldTypes::new();
        for (field, field_type) in iter {
            types.insert(field, field_type);
        }
        types
    }
}

/// Which predicate shapes the TQL to DSEL converter emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConversionMode {
    /// Query-level shapes that convert back to the same TQL
    #[default]
    Db,
    /// Data-evaluation shapes, type-specific per field
    Runtime,
}
