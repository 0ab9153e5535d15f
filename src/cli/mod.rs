//! CLI support for tql-dsel
//!
//! Provides programmatic access to the `tqldsel` subcommands for embedding
//! in other tools.

mod check;
mod convert;
mod eval;

pub use check::{CheckOptions, execute_check};
pub use convert::{
    ToDselOptions, ToTqlOptions, execute_to_dsel, execute_to_tql, field_types_from_args,
    parse_field_spec,
};
pub use eval::{EvalOptions, EvalResult, execute_eval};

use std::io;

use thiserror::Error;

use crate::error::{ConversionError, EvalError, ParseError};

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Conversion error: {0}")]
    Conversion(#[from] ConversionError),

    #[error("Evaluation error: {0}")]
    Eval(#[from] EvalError),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No input provided. Use --input or pipe JSON to stdin.")]
    NoInput,

    /// A `--field` argument that is not `name=TYPE`
    #[error("Invalid field declaration '{0}', expected name=TYPE")]
    InvalidFieldSpec(String),
}
