use crate::engine::error::NotationError;
use crate::engine::token::Token;
use std::fmt;
use std::fmt::Formatter;

/// A binary arithmetic operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    /// Recognized so that expressions containing it validate and convert,
    /// but it can not be evaluated.
    Exponentiate,
}

impl BinaryOperator {
    pub fn token(&self) -> Token {
        Token::Operator(*self)
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Exponentiate => "^",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<BinaryOperator> {
        match symbol {
            "+" => Some(BinaryOperator::Add),
            "-" => Some(BinaryOperator::Subtract),
            "*" => Some(BinaryOperator::Multiply),
            "/" => Some(BinaryOperator::Divide),
            "^" => Some(BinaryOperator::Exponentiate),
            _ => None,
        }
    }

    /// Combines `left` and `right`, in that order.
    ///
    /// Division truncates toward zero. `position` is only used to locate the operator
    /// in the error, should the arithmetic fail.
    ///
    /// # Examples
    ///
    /// ```
    /// use notation_engine::engine::operator::BinaryOperator;
    ///
    /// assert_eq!(BinaryOperator::Subtract.evaluate(5, 3, 0), Ok(2));
    /// assert!(BinaryOperator::Divide.evaluate(6, 0, 0).is_err());
    /// ```
    pub fn evaluate(&self, left: i32, right: i32, position: usize) -> Result<i32, NotationError> {
        let result = match self {
            BinaryOperator::Add => left.checked_add(right),
            BinaryOperator::Subtract => left.checked_sub(right),
            BinaryOperator::Multiply => left.checked_mul(right),
            BinaryOperator::Divide => {
                if right == 0 {
                    return Err(NotationError::DivisionByZero { position });
                }
                left.checked_div(right)
            }
            BinaryOperator::Exponentiate => {
                return Err(NotationError::UnsupportedOperator {
                    position,
                    operator: *self,
                })
            }
        };
        result.ok_or(NotationError::Overflow {
            position,
            operator: *self,
        })
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
