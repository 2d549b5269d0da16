/// Evaluation errors.
///
/// Defines every way a single expression can fail: characters that do not
/// fit the grammar at their position, malformed numbers, operators without
/// enough operands, unbalanced parentheses and results that do not reduce to
/// a single value.
pub mod eval_error;
/// Shell errors.
///
/// Contains the errors that end an interactive or batch run, such as I/O
/// failures or an unusable trace file.
pub mod shell_error;

pub use eval_error::{EvalError, EvalResult};
pub use shell_error::ShellError;
