use crate::engine::operator::BinaryOperator;
use crate::engine::Notation;
use thiserror::Error;

/// Why an expression could not be validated, evaluated or converted.
///
/// Every `position` is an index into the token slice the caller passed in.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    #[error("the expression contains no tokens")]
    EmptyExpression,

    #[error("token {position} (`{token}`) is neither an operator nor an integer literal")]
    MalformedToken { position: usize, token: String },

    #[error("operator `{operator}` at token {position} does not have two operands")]
    MissingOperands {
        position: usize,
        operator: BinaryOperator,
    },

    #[error("{remaining} values are left without an operator to combine them")]
    ExcessOperands { remaining: usize },

    #[error("division by zero at token {position}")]
    DivisionByZero { position: usize },

    #[error("operator `{operator}` at token {position} overflows a 32-bit integer")]
    Overflow {
        position: usize,
        operator: BinaryOperator,
    },

    #[error("operator `{operator}` at token {position} has no arithmetic meaning")]
    UnsupportedOperator {
        position: usize,
        operator: BinaryOperator,
    },

    #[error("{notation} expressions can only be produced, not read")]
    UnsupportedNotation { notation: Notation },

    #[error("unknown notation `{name}`, expected one of prefix, postfix or infix")]
    UnknownNotation { name: String },
}

impl NotationError {
    /// True for errors that describe the shape of the input rather than its arithmetic.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            NotationError::EmptyExpression
                | NotationError::MalformedToken { .. }
                | NotationError::MissingOperands { .. }
                | NotationError::ExcessOperands { .. }
        )
    }
}
