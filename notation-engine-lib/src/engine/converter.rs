use crate::engine::error::NotationError;
use crate::engine::operator::BinaryOperator;
use crate::engine::syntax::stack_visitor::{walk, StackVisitor};
use crate::engine::token::{AsToken, Operand, Token};
use crate::engine::validator::{check_postfix, check_prefix};
use crate::engine::Notation;
use itertools::Itertools;
use log::debug;

/// Converts a prefix expression into postfix order.
///
/// # Examples
///
/// ```
/// use notation_engine::engine::converter::prefix_to_postfix;
/// use notation_engine::engine::render;
///
/// let postfix = prefix_to_postfix(&["-", "5", "3"]).unwrap();
/// assert_eq!(render(&postfix), ["5", "3", "-"]);
/// ```
pub fn prefix_to_postfix<T: AsToken>(tokens: &[T]) -> Result<Vec<Token>, NotationError> {
    let tokens = check_prefix(tokens)?;
    convert_checked(&tokens, Notation::Prefix, Notation::Postfix)
}

/// Converts a postfix expression into prefix order.
pub fn postfix_to_prefix<T: AsToken>(tokens: &[T]) -> Result<Vec<Token>, NotationError> {
    let tokens = check_postfix(tokens)?;
    convert_checked(&tokens, Notation::Postfix, Notation::Prefix)
}

/// Converts a prefix expression into fully parenthesized infix.
///
/// # Examples
///
/// ```
/// use notation_engine::engine::converter::prefix_to_infix;
/// use notation_engine::engine::render;
///
/// let infix = prefix_to_infix(&["*", "+", "1", "2", "3"]).unwrap();
/// assert_eq!(render(&infix), ["(", "(", "1", "+", "2", ")", "*", "3", ")"]);
/// ```
pub fn prefix_to_infix<T: AsToken>(tokens: &[T]) -> Result<Vec<Token>, NotationError> {
    let tokens = check_prefix(tokens)?;
    convert_checked(&tokens, Notation::Prefix, Notation::Infix)
}

/// Converts a postfix expression into fully parenthesized infix.
pub fn postfix_to_infix<T: AsToken>(tokens: &[T]) -> Result<Vec<Token>, NotationError> {
    let tokens = check_postfix(tokens)?;
    convert_checked(&tokens, Notation::Postfix, Notation::Infix)
}

/// Re-renders already validated tokens. A `from` that equals `to` is a copy.
pub(crate) fn convert_checked(
    tokens: &[Token],
    from: Notation,
    to: Notation,
) -> Result<Vec<Token>, NotationError> {
    let converted = if from == to {
        tokens.to_vec()
    } else {
        walk(tokens, from, &mut Rendering { target: to })?
    };
    debug!(
        "Converted {} `{}` to {} `{}`",
        from,
        tokens.iter().join(" "),
        to,
        converted.iter().join(" ")
    );
    Ok(converted)
}

/// Builds the target notation's token sequence for every sub-expression.
struct Rendering {
    target: Notation,
}

impl StackVisitor for Rendering {
    type Output = Vec<Token>;

    fn visit_operand(
        &mut self,
        operand: &Operand,
        _position: usize,
    ) -> Result<Vec<Token>, NotationError> {
        Ok(vec![Token::Operand(operand.clone())])
    }

    fn visit_operator(
        &mut self,
        operator: BinaryOperator,
        _position: usize,
        mut left_operand: Vec<Token>,
        mut right_operand: Vec<Token>,
    ) -> Result<Vec<Token>, NotationError> {
        if self.target == Notation::Postfix {
            left_operand.append(&mut right_operand);
            left_operand.push(operator.token());
            return Ok(left_operand);
        }

        let mut tokens = Vec::with_capacity(left_operand.len() + right_operand.len() + 3);
        if self.target == Notation::Prefix {
            tokens.push(operator.token());
            tokens.append(&mut left_operand);
            tokens.append(&mut right_operand);
        } else {
            tokens.push(Token::LeftParenthesis);
            tokens.append(&mut left_operand);
            tokens.push(operator.token());
            tokens.append(&mut right_operand);
            tokens.push(Token::RightParenthesis);
        }
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::evaluator::{evaluate_postfix, evaluate_prefix};
    use crate::engine::render;
    use crate::engine::test_strategies::prefix_expression;
    use parameterized_macro::parameterized;
    use proptest::prelude::*;

    #[parameterized(
    prefix = {
    &["7"],
    &["+", "3", "4"],
    &["-", "5", "3"],
    &["*", "+", "1", "2", "3"],
    &["-", "*", "2", "3", "/", "8", "4"],
    &["^", "2", "-007"],
    },
    postfix = {
    &["7"],
    &["3", "4", "+"],
    &["5", "3", "-"],
    &["1", "2", "+", "3", "*"],
    &["2", "3", "*", "8", "4", "/", "-"],
    &["2", "-007", "^"],
    }
    )]
    fn prefix_and_postfix_convert_into_each_other(prefix: &[&str], postfix: &[&str]) {
        assert_eq!(render(&prefix_to_postfix(prefix).unwrap()), postfix);
        assert_eq!(render(&postfix_to_prefix(postfix).unwrap()), prefix);
    }

    #[test]
    fn prefix_to_infix_parenthesizes_every_operation() {
        let infix = prefix_to_infix(&["*", "+", "1", "2", "3"]).unwrap();

        assert_eq!(
            render(&infix),
            ["(", "(", "1", "+", "2", ")", "*", "3", ")"]
        );
    }

    #[test]
    fn postfix_to_infix_parenthesizes_every_operation() {
        let infix = postfix_to_infix(&["5", "1", "2", "+", "4", "*", "+", "3", "-"]).unwrap();

        assert_eq!(
            render(&infix),
            [
                "(", "(", "5", "+", "(", "(", "1", "+", "2", ")", "*", "4", ")", ")", "-",
                "3", ")"
            ]
        );
    }

    #[test]
    fn infix_keeps_operand_order_of_non_commutative_operators() {
        let from_prefix = prefix_to_infix(&["-", "5", "3"]).unwrap();
        let from_postfix = postfix_to_infix(&["5", "3", "-"]).unwrap();

        assert_eq!(render(&from_prefix), ["(", "5", "-", "3", ")"]);
        assert_eq!(from_prefix, from_postfix);
    }

    #[test]
    fn single_operand_converts_to_itself() {
        assert_eq!(render(&prefix_to_infix(&["-12"]).unwrap()), ["-12"]);
        assert_eq!(render(&postfix_to_infix(&["-12"]).unwrap()), ["-12"]);
    }

    #[test]
    fn converting_invalid_expression_returns_err() {
        assert_eq!(
            prefix_to_postfix(&["3", "4", "+"]),
            Err(NotationError::MissingOperands {
                position: 2,
                operator: BinaryOperator::Add
            })
        );
        assert_eq!(
            prefix_to_postfix(&["+", "3", "4", "5"]),
            Err(NotationError::ExcessOperands { remaining: 2 })
        );
        assert!(postfix_to_prefix(&["+", "3", "4"]).is_err());
        assert!(prefix_to_infix(&["+"]).is_err());
        assert!(postfix_to_infix(&["3", "+", "4"]).is_err());
    }

    #[test]
    fn converting_division_by_zero_succeeds() {
        let postfix = prefix_to_postfix(&["/", "6", "0"]).unwrap();
        assert_eq!(render(&postfix), ["6", "0", "/"]);
    }

    proptest! {
        #[test]
        fn prefix_round_trips_through_postfix(prefix in prefix_expression(&["+", "-", "*", "/", "^"])) {
            let postfix = prefix_to_postfix(&prefix).unwrap();
            let regenerated = postfix_to_prefix(&postfix).unwrap();

            prop_assert_eq!(render(&regenerated), prefix);
        }

        #[test]
        fn postfix_round_trips_through_prefix(prefix in prefix_expression(&["+", "-", "*", "/", "^"])) {
            let postfix = render(&prefix_to_postfix(&prefix).unwrap());
            let regenerated = prefix_to_postfix(&postfix_to_prefix(&postfix).unwrap()).unwrap();

            prop_assert_eq!(render(&regenerated), postfix);
        }

        #[test]
        fn both_infix_conversions_agree(prefix in prefix_expression(&["+", "-", "*", "/", "^"])) {
            let postfix = prefix_to_postfix(&prefix).unwrap();

            prop_assert_eq!(prefix_to_infix(&prefix).unwrap(), postfix_to_infix(&postfix).unwrap());
        }

        #[test]
        fn prefix_and_postfix_evaluate_to_same_value(prefix in prefix_expression(&["+", "-", "*"])) {
            let postfix = prefix_to_postfix(&prefix).unwrap();

            prop_assert_eq!(evaluate_prefix(&prefix).unwrap(), evaluate_postfix(&postfix).unwrap());
        }
    }
}
