use crate::engine::error::NotationError;
use crate::engine::operator::BinaryOperator;
use crate::engine::token::{Operand, Token};
use crate::engine::Notation;
use itertools::Either;

/// Receives the operands and operators of an expression in stack order.
///
/// Whatever a visit returns is pushed onto the walk's stack, and later handed back
/// as an operand of the operator that consumes it.
pub(crate) trait StackVisitor {
    type Output;

    fn visit_operand(
        &mut self,
        operand: &Operand,
        position: usize,
    ) -> Result<Self::Output, NotationError>;

    fn visit_operator(
        &mut self,
        operator: BinaryOperator,
        position: usize,
        left_operand: Self::Output,
        right_operand: Self::Output,
    ) -> Result<Self::Output, NotationError>;
}

/// Walks the tokens once in the direction `notation` dictates and returns the single
/// value left on the stack.
///
/// Prefix is walked right to left and the first value popped is the left operand.
/// Postfix is walked left to right and the first value popped is the right operand.
/// Visitors always receive `(left, right)`.
pub(crate) fn walk<V: StackVisitor>(
    tokens: &[Token],
    notation: Notation,
    visitor: &mut V,
) -> Result<V::Output, NotationError> {
    let ordered = match notation {
        Notation::Prefix => Either::Left(tokens.iter().enumerate().rev()),
        Notation::Postfix => Either::Right(tokens.iter().enumerate()),
        Notation::Infix => return Err(NotationError::UnsupportedNotation { notation }),
    };

    let mut stack: Vec<V::Output> = Vec::with_capacity(tokens.len() / 2 + 1);
    for (position, token) in ordered {
        match token {
            Token::Operand(operand) => stack.push(visitor.visit_operand(operand, position)?),
            Token::Operator(operator) => {
                let operator = *operator;
                let missing_operands = || NotationError::MissingOperands { position, operator };
                let first = stack.pop().ok_or_else(missing_operands)?;
                let second = stack.pop().ok_or_else(missing_operands)?;
                let (left_operand, right_operand) = match notation {
                    Notation::Prefix => (first, second),
                    _ => (second, first),
                };
                let combined =
                    visitor.visit_operator(operator, position, left_operand, right_operand)?;
                stack.push(combined);
            }
            Token::LeftParenthesis | Token::RightParenthesis => {
                return Err(NotationError::MalformedToken {
                    position,
                    token: token.to_string(),
                })
            }
        }
    }

    let root = stack.pop().ok_or(NotationError::EmptyExpression)?;
    if !stack.is_empty() {
        return Err(NotationError::ExcessOperands {
            remaining: stack.len() + 1,
        });
    }
    Ok(root)
}
