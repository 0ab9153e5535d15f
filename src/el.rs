//! # DSEL - Abstract Syntax Tree, lexer and parser
//!
//! The data-shaping expression language used for runtime transform logic.
//! Filters converted from TQL are plain boolean DSEL expressions:
//!
//! ```text
//! field1 == 'abc' && between(amount, 3, 621)
//! isEmpty(field1) || isEmpty(accountNumber)
//! !isOfType(field1, 'STRING')
//! ```
//!
//! - **[node]** - the [`ElNode`] tree
//! - **[operators]** - binary and unary operators with their precedence
//! - **[functions]** - the builtin predicate functions, resolved by name
//! - **[lexer]** / **[parser]** - DSEL text to [`ElNode`]
//!
//! The inverse direction, [`ElNode`] to text, lives in [`crate::printer`].
pub mod functions;
pub mod lexer;
pub mod node;
pub mod operators;
pub mod parser;
pub mod tokens;

pub use functions::{Builtin, FunctionName};
pub use lexer::ElLexer;
pub use node::{ElNode, LiteralKind};
pub use operators::{BinaryOp, UnaryOp};
pub use parser::{ElParser, parse, parse_indented};
pub use tokens::ElToken;
