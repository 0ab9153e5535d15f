//! Bridge between TQL, a declarative record-filtering query language, and
//! DSEL, a data-shaping expression language.
//!
//! ```
//! use tql_dsel::convert::{convert_for_db, dsel_to_tql};
//!
//! let query = "((firstName = 'John') and (lastName = 'Doe')) or (firstName = 'Jacques')";
//! let node = convert_for_db(query, None).unwrap();
//! assert_eq!(
//!     node.to_string(),
//!     "firstName == 'John' && lastName == 'Doe' || firstName == 'Jacques'"
//! );
//! assert_eq!(dsel_to_tql::convert(&node).unwrap().to_query_string(), query);
//! ```
pub mod ast;
pub mod cli;
pub mod convert;
pub mod el;
pub mod error;
pub mod evaluator;
pub mod functions;
pub mod lexer;
pub mod parser;
pub mod pattern;
pub mod printer;
pub mod value;

pub use ast::{Target, Token, TqlElement};
pub use convert::{ConversionMode, FieldType, FieldTypes, TqlToDsel, convert_for_db, convert_for_runtime};
pub use el::{ElNode, parse as parse_dsel};
pub use error::{ConversionError, EvalError, FunctionArityError, ParseError};
pub use evaluator::{EvalContext, Evaluator};
pub use lexer::{Lexer, Position};
pub use parser::{Parser, parse};
pub use printer::{ElNodePrinter, pretty_print, to_dsel};
pub use value::Value;
