//! Conversion between TQL and DSEL trees.
//!
//! ```text
//! TQL text -> [parser] -> TqlElement -> [tql_to_dsel] -> ElNode -> [printer] -> DSEL text
//! DSEL text -> [el::parse] -> ElNode -> [dsel_to_tql] -> TqlElement -> TQL text
//! ```
//!
//! Both directions are pure functions over immutable trees. Under
//! [`ConversionMode::Db`] a query converted to DSEL and back yields the same
//! query text; [`ConversionMode::Runtime`] trades that for type-specific
//! evaluation shapes.
pub mod dsel_to_tql;
pub mod field_types;
pub mod tql_to_dsel;

pub use field_types::{ConversionMode, FieldType, FieldTypes};
pub use tql_to_dsel::{TqlToDsel, convert_for_db, convert_for_runtime};

use crate::{ast::TqlElement, error::ConversionError};

/// DSEL text to TQL text.
pub fn dsel_text_to_tql(text: &str) -> Result<String, ConversionError> {
    dsel_to_tql::convert_text(text).map(|element| element.to_query_string())
}

/// Converts a TQL tree with the given mode, for callers that already parsed
/// the query.
pub fn tql_element_to_dsel(
    element: &TqlElement,
    mode: ConversionMode,
    field_types: &FieldTypes,
) -> Result<crate::el::ElNode, ConversionError> {
    TqlToDsel::new(mode, field_types).convert(element)
}
