//! Error types shared by the parsers, converters and evaluator.

use thiserror::Error;

/// Malformed TQL or DSEL source text.
///
/// `position` is a character offset into the source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("parse error at position {position}: {message}")]
pub struct ParseError {
    /// Character offset where the problem was detected
    pub position: usize,
    /// Human-readable description
    pub message: String,
}

impl ParseError {
    pub fn new(position: usize, message: impl Into<String>) -> Self {
        ParseError {
            position,
            message: message.into(),
        }
    }
}

/// Errors raised while translating between the TQL and DSEL trees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// The source text could not be parsed
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A TQL element with no DSEL counterpart
    #[error("unsupported element: {0}")]
    UnsupportedElement(String),

    /// A wildcard predicate was converted without any field types
    #[error("'{predicate}' on all fields requires a field type map")]
    MissingFieldTypes { predicate: &'static str },

    /// A field has no declared type but the chosen shape needs one
    #[error("no declared type for field '{field}'")]
    MissingFieldType { field: String },

    /// A field type name that is not one of the known semantic types
    #[error("unknown field type '{0}'")]
    UnknownFieldType(String),

    /// A literal list or range mixing incompatible literal types
    #[error("mixed literal types in {context}: {first} and {second}")]
    MixedLiteralTypes {
        context: &'static str,
        first: String,
        second: String,
    },

    /// A DSEL shape with no TQL inverse
    #[error("unrecognized expression shape: {0}")]
    UnrecognizedShape(String),
}

/// A predicate function invoked with the wrong number of arguments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("wrong number of parameters for '{function}' (expected: {expected}, found: {found})")]
pub struct FunctionArityError {
    pub function: &'static str,
    pub expected: String,
    pub found: usize,
}

/// Errors that can occur while evaluating a DSEL tree against a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error(transparent)]
    Arity(#[from] FunctionArityError),

    /// Call to a function this crate does not implement
    #[error("unknown function '{0}'")]
    UnknownFunction(String),

    /// Type mismatch or invalid operation for the given type
    #[error("type error: {0}")]
    TypeError(String),

    /// A regular expression (direct or translated from a pattern) failed to compile
    #[error("invalid regex '{pattern}': {message}")]
    InvalidRegex { pattern: String, message: String },
}
