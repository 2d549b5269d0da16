//! # stepcalc
//!
//! stepcalc evaluates arithmetic expressions that arrive one character at a
//! time. Parentheses, unary negation, `*`, `/`, `+` and `-` are supported on
//! floating-point operands, and whitespace may appear anywhere between
//! tokens.
//!
//! Evaluation is carried out by a table-driven automaton that parses and
//! folds in the same pass. It suspends after every character and resumes
//! exactly where it stopped, so a caller can feed input as it arrives and
//! inspect the session in between.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{error::EvalResult, machine::Session};

/// Provides unified error types for evaluation and the shell.
///
/// This module defines every error raised while an expression is fed or
/// finished, and the errors that end a shell run. Each evaluation error
/// names the offending character, position or stack condition.
///
/// # Responsibilities
/// - Defines the error enums for evaluation and shell failures.
/// - Attaches the character position or operand counts for context.
/// - Implements the standard error traits for reporting.
pub mod error;
/// The incremental evaluation engine.
///
/// This module holds the transition table, the session that runs it, the
/// operator model and the trace hook. It is the whole of the evaluator; the
/// shell only drives it.
///
/// # Responsibilities
/// - Classifies each character by its position in the grammar.
/// - Maintains the operand and operator stacks and folds by precedence.
/// - Suspends after each character and reduces the stacks on finish.
pub mod machine;
/// The interactive shell.
///
/// Reads lines, recognises the `help`, `exit` and `reset` commands, and
/// feeds every other line to a session character by character, printing
/// the result or the error.
pub mod shell;

/// Evaluates a complete expression.
///
/// This feeds every character of `source` to a fresh [`Session`] and
/// finishes it.
///
/// # Errors
/// Returns the first error raised while feeding or finishing.
///
/// # Examples
/// ```
/// use stepcalc::evaluate;
///
/// assert_eq!(evaluate("2+3*4").unwrap(), 14.0);
/// assert_eq!(evaluate("((1+2)*(3-1))").unwrap(), 6.0);
///
/// // A number directly followed by `(` is rejected.
/// assert!(evaluate("5(2)").is_err());
/// ```
pub fn evaluate(source: &str) -> EvalResult<f64> {
    let mut session = Session::new();
    session.feed_str(source)?;
    session.finish()
}
