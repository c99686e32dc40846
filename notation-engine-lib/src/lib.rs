//! Validation, evaluation and conversion of prefix and postfix arithmetic expressions.
//!
//! Expressions are sequences of tokens that have already been split apart, such as
//! `["*", "+", "1", "2", "3"]`. See [`engine`] for the entry points.

pub mod engine;
