pub mod converter;
pub mod error;
pub mod evaluator;
pub mod operator;
pub mod syntax;
pub mod token;
pub mod validator;

#[cfg(test)]
mod test_strategies;

use crate::engine::converter::convert_checked;
use crate::engine::token::{AsToken, Token};
use anyhow::{Context, Result};
use std::fmt;
use std::fmt::Formatter;
use std::str;
use string_builder::Builder;

pub use error::NotationError;

/// How operators are ordered relative to their operands.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Notation {
    /// Operator before its operands.
    Prefix,
    /// Operator after its operands.
    Postfix,
    /// Operator between its operands, always fully parenthesized. Only ever produced.
    Infix,
}

impl fmt::Display for Notation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Notation::Prefix => write!(f, "prefix"),
            Notation::Postfix => write!(f, "postfix"),
            Notation::Infix => write!(f, "infix"),
        }
    }
}

impl str::FromStr for Notation {
    type Err = NotationError;

    fn from_str(input: &str) -> Result<Notation, Self::Err> {
        match input.to_ascii_lowercase().as_str() {
            "prefix" => Ok(Notation::Prefix),
            "postfix" => Ok(Notation::Postfix),
            "infix" => Ok(Notation::Infix),
            _ => Err(NotationError::UnknownNotation {
                name: input.to_string(),
            }),
        }
    }
}

/// Checks that the tokens are a well-formed expression in the given notation.
///
/// returns: The classified tokens, or why they are not a well-formed expression.
pub fn check<T: AsToken>(tokens: &[T], notation: Notation) -> Result<Vec<Token>, NotationError> {
    match notation {
        Notation::Prefix => validator::check_prefix(tokens),
        Notation::Postfix => validator::check_postfix(tokens),
        Notation::Infix => Err(NotationError::UnsupportedNotation { notation }),
    }
}

/// Whether the tokens are a well-formed expression in the given notation.
///
/// # Examples
///
/// ```
/// use notation_engine::engine::{is_valid, Notation};
///
/// assert!(is_valid(&["3", "4", "+"], Notation::Postfix));
/// assert!(!is_valid(&["3", "4", "+", "5"], Notation::Postfix));
/// ```
pub fn is_valid<T: AsToken>(tokens: &[T], notation: Notation) -> bool {
    match notation {
        Notation::Prefix => validator::is_valid_prefix(tokens),
        Notation::Postfix => validator::is_valid_postfix(tokens),
        Notation::Infix => false,
    }
}

/// Evaluates an expression written in the given notation.
///
/// # Arguments
///
/// * `tokens`: The expression, one token per element.
/// * `notation`: Either prefix or postfix; infix can not be read.
///
/// returns: The integer value of the expression.
///
/// # Examples
///
/// ```
/// use notation_engine::engine::{evaluate, Notation, NotationError};
///
/// assert_eq!(evaluate(&["+", "3", "4"], Notation::Prefix), Ok(7));
/// assert_eq!(
///     evaluate(&["/", "6", "0"], Notation::Prefix),
///     Err(NotationError::DivisionByZero { position: 0 })
/// );
/// ```
pub fn evaluate<T: AsToken>(tokens: &[T], notation: Notation) -> Result<i32, NotationError> {
    match notation {
        Notation::Prefix => evaluator::evaluate_prefix(tokens),
        Notation::Postfix => evaluator::evaluate_postfix(tokens),
        Notation::Infix => Err(NotationError::UnsupportedNotation { notation }),
    }
}

/// Converts an expression from one notation into another.
///
/// # Arguments
///
/// * `tokens`: The expression, one token per element.
/// * `from`: The notation the tokens are written in. Either prefix or postfix.
/// * `to`: The notation to render the expression in.
///
/// returns: The tokens of the re-rendered expression.
///
/// # Examples
///
/// ```
/// use notation_engine::engine::{convert, render, Notation};
/// # use notation_engine::engine::NotationError;
///
/// let infix = convert(&["3", "4", "+"], Notation::Postfix, Notation::Infix)?;
/// assert_eq!(render(&infix), ["(", "3", "+", "4", ")"]);
/// # Ok::<(), NotationError>(())
/// ```
pub fn convert<T: AsToken>(
    tokens: &[T],
    from: Notation,
    to: Notation,
) -> Result<Vec<Token>, NotationError> {
    let tokens = check(tokens, from)?;
    convert_checked(&tokens, from, to)
}

/// Renders each token as its own string.
pub fn render(tokens: &[Token]) -> Vec<String> {
    tokens.iter().map(Token::to_string).collect()
}

/// Pretty-prints the given tokens with added whitespace.
///
/// Tokens are separated by single spaces, except right after an opening parenthesis
/// and right before a closing one.
///
/// # Examples
///
/// ```
/// use notation_engine::engine::converter::prefix_to_infix;
/// use notation_engine::engine::tokens_to_string;
/// # use anyhow::Result;
///
/// # fn main() -> Result<()> {
/// let infix = prefix_to_infix(&["*", "+", "1", "2", "3"])?;
/// assert_eq!(tokens_to_string(&infix)?, "((1 + 2) * 3)");
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn tokens_to_string(tokens: &[Token]) -> Result<String> {
    let mut builder = Builder::new(tokens.len() * 2);

    let mut previous: Option<&Token> = None;
    for token in tokens {
        let separated = !matches!(
            (previous, token),
            (None, _) | (Some(Token::LeftParenthesis), _) | (_, Token::RightParenthesis)
        );
        if separated {
            builder.append(" ");
        }
        builder.append(token.to_string());
        previous = Some(token);
    }

    builder.string().context("Failed to build token string")
}
