use crate::engine::error::NotationError;
use crate::engine::operator::BinaryOperator;
use std::fmt;
use std::fmt::Formatter;
use std::str;

/// A discrete part of an expression.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Token {
    Operand(Operand),
    Operator(BinaryOperator),
    /// Only produced when rendering infix; never valid input.
    LeftParenthesis,
    /// Only produced when rendering infix; never valid input.
    RightParenthesis,
}

/// An integer literal, keeping the text it was written as.
///
/// The text is what gets rendered, so `007` converts to `007`, not `7`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Operand {
    value: i32,
    text: String,
}

impl Operand {
    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Parses text of the form `-?[0-9]+` that fits in an `i32`.
    ///
    /// A leading `+`, whitespace or any other decoration is rejected.
    pub fn parse(text: &str) -> Option<Operand> {
        let digits = text.strip_prefix('-').unwrap_or(text);
        if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
            return None;
        }
        let value = text.parse::<i32>().ok()?;
        Some(Operand {
            value,
            text: text.to_string(),
        })
    }

    /// A zero without text, standing in for a subtree that is being taken apart.
    pub(crate) fn placeholder() -> Operand {
        Operand {
            value: 0,
            text: String::new(),
        }
    }
}

impl From<i32> for Operand {
    fn from(value: i32) -> Self {
        Operand {
            value,
            text: value.to_string(),
        }
    }
}

impl Token {
    /// Classifies a single token string.
    ///
    /// Operator symbols are checked before integer literals, so `-` is always subtraction.
    /// `position` is only used to locate the token in the error.
    pub fn classify(text: &str, position: usize) -> Result<Token, NotationError> {
        if let Some(operator) = BinaryOperator::from_symbol(text) {
            return Ok(Token::Operator(operator));
        }
        match text {
            "(" => Ok(Token::LeftParenthesis),
            ")" => Ok(Token::RightParenthesis),
            text => Operand::parse(text).map(Token::Operand).ok_or_else(|| {
                NotationError::MalformedToken {
                    position,
                    token: text.to_string(),
                }
            }),
        }
    }

    pub fn is_operand(&self) -> bool {
        matches!(self, Token::Operand(_))
    }

    pub fn is_operator(&self) -> bool {
        matches!(self, Token::Operator(_))
    }
}

impl From<i32> for Token {
    fn from(value: i32) -> Self {
        Token::Operand(Operand::from(value))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Token::Operand(operand) => write!(f, "{}", operand.text),
            Token::Operator(operator) => write!(f, "{}", operator),
            Token::LeftParenthesis => write!(f, "("),
            Token::RightParenthesis => write!(f, ")"),
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl str::FromStr for Token {
    type Err = NotationError;

    /// Classifies `input` as if it were the first token of an expression.
    fn from_str(input: &str) -> Result<Token, Self::Err> {
        Token::classify(input, 0)
    }
}

/// Anything an expression can be made of: token strings or already classified tokens.
pub trait AsToken {
    fn as_token(&self, position: usize) -> Result<Token, NotationError>;
}

impl AsToken for Token {
    fn as_token(&self, _position: usize) -> Result<Token, NotationError> {
        Ok(self.clone())
    }
}

impl AsToken for &str {
    fn as_token(&self, position: usize) -> Result<Token, NotationError> {
        Token::classify(self, position)
    }
}

impl AsToken for String {
    fn as_token(&self, position: usize) -> Result<Token, NotationError> {
        Token::classify(self, position)
    }
}
