//! Arithmetic core: operators, errors, parser and evaluator.
//!
//! The evaluator is deliberately small: it accepts decimal literals, the four
//! basic operators, unary minus and parentheses, and nothing else.

pub mod evaluator;
pub mod history;
pub mod parser;

use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Display symbol for multiplication as shown on the keypad.
pub const MULTIPLY_TOKEN: &str = "x";

/// Everything that can go wrong while turning input text into a number.
///
/// The dispatcher collapses all of these into the error marker; the variants
/// exist so tests and the one-shot CLI can say what happened.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Nothing to evaluate
    #[error("Empty expression")]
    EmptyExpression,
    /// Character outside the arithmetic alphabet
    #[error("Unexpected character: '{0}'")]
    UnexpectedChar(char),
    /// Literal that does not parse as a number (e.g. a lone `.`)
    #[error("Invalid number: '{0}'")]
    InvalidNumber(String),
    /// Token in a position the grammar does not allow
    #[error("Unexpected token: {0}")]
    UnexpectedToken(String),
    /// Input ended while an operand was expected
    #[error("Unexpected end of expression")]
    UnexpectedEnd,
    /// `(` without matching `)`
    #[error("Unclosed parenthesis")]
    UnclosedParen,
    /// Division by zero attempted
    #[error("Division by zero")]
    DivisionByZero,
    /// Result overflowed to infinity or became NaN
    #[error("Result is not a finite number")]
    NonFinite,
    /// More tokens than the parser accepts
    #[error("Expression too long (limit is {0} tokens)")]
    TooLong(usize),
}

/// Binary arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (*)
    Multiply,
    /// Division (/)
    Divide,
}

impl Operation {
    /// Returns the operator symbol as accepted by the parser
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }

    /// Maps an operator symbol to its operation
    #[must_use]
    pub const fn from_symbol(ch: char) -> Option<Self> {
        match ch {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '*' => Some(Self::Multiply),
            '/' => Some(Self::Divide),
            _ => None,
        }
    }

    /// Applies the operation, rejecting division by zero and non-finite results
    pub fn apply(self, a: f64, b: f64) -> CalcResult<f64> {
        let value = match self {
            Self::Add => a + b,
            Self::Subtract => a - b,
            Self::Multiply => a * b,
            Self::Divide => {
                if b == 0.0 {
                    return Err(CalcError::DivisionByZero);
                }
                a / b
            }
        };
        if value.is_finite() {
            Ok(value)
        } else {
            Err(CalcError::NonFinite)
        }
    }
}

/// Formats a value the way the display shows it.
///
/// Uses the shortest representation that round-trips, so `5.0` shows as `5`
/// and `0.1 + 0.2` keeps its full tail. Negative zero shows as `0`.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{value}")
}
