//! # TQL - Abstract Syntax Tree
//!
//! This module defines the Abstract Syntax Tree for TQL, the declarative
//! record filtering language.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[literals]** - Typed literals (string, integer, decimal, boolean)
//! - **[operators]** - Comparison operators and predicate keywords
//! - **[elements]** - Filter predicates and logical combinators
//!
//! ## Quick Start
//!
//! ```text
//! ((firstName = 'John') and (lastName = 'Doe')) or (firstName = 'Jacques')
//! ```
//!
//! ## Core Concepts
//!
//! ### Mandatory parentheses
//!
//! Every predicate is written inside parentheses. `and`/`or` combine
//! parenthesized operands and are left-associative; `not` wraps exactly one
//! parenthesized operand:
//!
//! ```text
//! (not ((field1 = 'value1')))
//! ```
//!
//! ### Predicates
//!
//! - **Comparison** `=`, `!=`, `<`, `>`, `<=`, `>=`
//! - **Membership** `between [lo, hi]`, `in [a, b, c]`
//! - **Strings** `contains`, `containsIgnoreCase`, `complies`, `wordComplies`, `~`
//! - **State** `is empty`, `is valid`, `is invalid`, `is null`
//!
//! ### Wildcard
//!
//! `*` stands for every field of the record, and is only accepted with
//! `is empty`, `is valid` and `is invalid`:
//!
//! ```text
//! (* is empty)
//! ```
pub mod elements;
pub mod literals;
pub mod operators;
pub mod tokens;

pub use elements::{Target, TqlElement};
pub use literals::{Literal, LiteralType};
pub use operators::{ComparisonOp, PredicateKeyword, StateKeyword};
pub use tokens::Token;
