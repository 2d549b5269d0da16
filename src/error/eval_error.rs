use crate::machine::operator::Operator;

/// Result type used by the evaluation engine.
///
/// Every feed or finish either succeeds with `T` or fails with an
/// [`EvalError`] after the session has been reset.
pub type EvalResult<T> = Result<T, EvalError>;

#[derive(Debug, Clone, PartialEq)]
/// Represents all errors that can abort the evaluation of an expression.
pub enum EvalError {
    /// A character arrived where neither an operand, a unary operator nor a
    /// binary operator is allowed.
    InvalidCharacter {
        /// The offending character.
        character: char,
        /// Zero-based index of the character within the expression.
        position:  usize,
    },
    /// The accumulated digits and dots do not form a number, e.g. `.` or
    /// `1.2.3`.
    InvalidNumber {
        /// The accumulated text.
        text:     String,
        /// Zero-based index of the character that ended the number, or the
        /// expression length if input ended first.
        position: usize,
    },
    /// An operator was folded with fewer operands than it consumes.
    InsufficientOperands {
        /// The operator being folded.
        operator:  Operator,
        /// Operands the operator consumes.
        required:  usize,
        /// Operands that were available.
        available: usize,
    },
    /// After all operators were folded the operand stack did not hold
    /// exactly one value.
    UnbalancedResult {
        /// Values left on the operand stack.
        operands: usize,
    },
    /// A `)` arrived with no open `(` to close.
    UnmatchedParenthesis {
        /// Zero-based index of the `)`.
        position: usize,
    },
    /// Input ended while a `(` was still open.
    UnclosedParenthesis,
    /// The session was stopped and no longer evaluates.
    SessionStopped,
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCharacter { character, position } => {
                write!(f, "Character '{character}' at position {position} is not valid here.")
            },
            Self::InvalidNumber { text, position } => {
                write!(f, "'{text}' ending at position {position} is not a valid number.")
            },
            Self::InsufficientOperands { operator,
                                         required,
                                         available, } => write!(f,
                                                                "Too few operands for {operator}: needs {required}, found {available}."),
            Self::UnbalancedResult { operands } => write!(f,
                                                          "Too few or too many operators for the number of operands: {operands} value(s) left."),
            Self::UnmatchedParenthesis { position } => {
                write!(f, "Closing parenthesis at position {position} has no opening match.")
            },
            Self::UnclosedParenthesis => write!(f, "Expression ended with an unclosed parenthesis."),
            Self::SessionStopped => write!(f, "The evaluator has been stopped."),
        }
    }
}

impl std::error::Error for EvalError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_input() {
        let e = EvalError::InvalidCharacter { character: 'x',
                                              position:  3, };
        assert_eq!(e.to_string(), "Character 'x' at position 3 is not valid here.");

        let e = EvalError::InsufficientOperands { operator:  Operator::Addition,
                                                  required:  2,
                                                  available: 1, };
        assert_eq!(e.to_string(), "Too few operands for addition: needs 2, found 1.");
    }
}
