use crate::engine::error::NotationError;
use crate::engine::token::{AsToken, Token};
use log::trace;

/// Checks that the tokens form a well-formed prefix expression.
///
/// Scans right to left, tracking how deep the evaluation stack would be. Nothing is
/// computed, so an expression that would divide by zero still validates.
///
/// returns: The classified tokens, or why the expression is malformed.
///
/// # Examples
///
/// ```
/// use notation_engine::engine::validator::check_prefix;
///
/// assert!(check_prefix(&["+", "3", "4"]).is_ok());
/// assert!(check_prefix(&["3", "4", "+"]).is_err());
/// ```
pub fn check_prefix<T: AsToken>(tokens: &[T]) -> Result<Vec<Token>, NotationError> {
    let classified = classify_all(tokens)?;

    let mut depth: usize = 0;
    for (position, token) in classified.iter().enumerate().rev() {
        depth = step(depth, position, token)?;
    }
    settle(depth)?;

    Ok(classified)
}

/// Checks that the tokens form a well-formed postfix expression.
///
/// Scans left to right with a running count of operands minus operators, which is
/// exactly the evaluation stack depth. The count must end at one and an operator may
/// never find fewer than two values beneath it.
///
/// returns: The classified tokens, or why the expression is malformed.
pub fn check_postfix<T: AsToken>(tokens: &[T]) -> Result<Vec<Token>, NotationError> {
    let classified = classify_all(tokens)?;

    let mut depth: usize = 0;
    for (position, token) in classified.iter().enumerate() {
        depth = step(depth, position, token)?;
    }
    settle(depth)?;

    Ok(classified)
}

/// Whether the tokens form a well-formed prefix expression. Never fails.
pub fn is_valid_prefix<T: AsToken>(tokens: &[T]) -> bool {
    check_prefix(tokens)
        .map_err(|error| trace!("Rejected prefix expression: {}", error))
        .is_ok()
}

/// Whether the tokens form a well-formed postfix expression. Never fails.
pub fn is_valid_postfix<T: AsToken>(tokens: &[T]) -> bool {
    check_postfix(tokens)
        .map_err(|error| trace!("Rejected postfix expression: {}", error))
        .is_ok()
}

fn classify_all<T: AsToken>(tokens: &[T]) -> Result<Vec<Token>, NotationError> {
    tokens
        .iter()
        .enumerate()
        .map(|(position, token)| token.as_token(position))
        .collect()
}

fn step(depth: usize, position: usize, token: &Token) -> Result<usize, NotationError> {
    match token {
        Token::Operand(_) => Ok(depth + 1),
        Token::Operator(_) if depth >= 2 => Ok(depth - 1),
        Token::Operator(operator) => Err(NotationError::MissingOperands {
            position,
            operator: *operator,
        }),
        Token::LeftParenthesis | Token::RightParenthesis => Err(NotationError::MalformedToken {
            position,
            token: token.to_string(),
        }),
    }
}

fn settle(depth: usize) -> Result<(), NotationError> {
    match depth {
        0 => Err(NotationError::EmptyExpression),
        1 => Ok(()),
        remaining => Err(NotationError::ExcessOperands { remaining }),
    }
}
