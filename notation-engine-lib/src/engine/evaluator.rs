use crate::engine::error::NotationError;
use crate::engine::operator::BinaryOperator;
use crate::engine::syntax::stack_visitor::{walk, StackVisitor};
use crate::engine::token::{AsToken, Operand, Token};
use crate::engine::validator::{check_postfix, check_prefix};
use crate::engine::Notation;
use itertools::Itertools;
use log::debug;

/// Evaluates a prefix expression.
///
/// # Arguments
///
/// * `tokens`: The expression, in prefix order.
///
/// returns: The value of the expression, or why it could not be computed.
///
/// # Examples
///
/// ```
/// use notation_engine::engine::evaluator::evaluate_prefix;
///
/// assert_eq!(evaluate_prefix(&["-", "5", "3"]), Ok(2));
/// ```
pub fn evaluate_prefix<T: AsToken>(tokens: &[T]) -> Result<i32, NotationError> {
    let tokens = check_prefix(tokens)?;
    evaluate_checked(&tokens, Notation::Prefix)
}

/// Evaluates a postfix expression.
///
/// # Arguments
///
/// * `tokens`: The expression, in postfix order.
///
/// returns: The value of the expression, or why it could not be computed.
pub fn evaluate_postfix<T: AsToken>(tokens: &[T]) -> Result<i32, NotationError> {
    let tokens = check_postfix(tokens)?;
    evaluate_checked(&tokens, Notation::Postfix)
}

fn evaluate_checked(tokens: &[Token], notation: Notation) -> Result<i32, NotationError> {
    let value = walk(tokens, notation, &mut Evaluation)?;
    debug!(
        "Evaluated {} expression `{}` to {}",
        notation,
        tokens.iter().join(" "),
        value
    );
    Ok(value)
}

pub(crate) struct Evaluation;

impl StackVisitor for Evaluation {
    type Output = i32;

    fn visit_operand(&mut self, operand: &Operand, _position: usize) -> Result<i32, NotationError> {
        Ok(operand.value())
    }

    fn visit_operator(
        &mut self,
        operator: BinaryOperator,
        position: usize,
        left_operand: i32,
        right_operand: i32,
    ) -> Result<i32, NotationError> {
        operator.evaluate(left_operand, right_operand, position)
    }
}
