/// Table actions.
///
/// The operations that touch the session: pushing and popping the two
/// stacks, building operator tokens from the current character, converting
/// accumulated text to an operand, and folding an operator into its result.
mod actions;
/// Operator tokens and their precedence classes.
///
/// Builds tokens from characters according to whether a unary or a binary
/// operator is expected, and decides whether a stacked operator folds before
/// an incoming one.
pub mod operator;
/// Table predicates.
///
/// Character-class tests, stack-shape tests and tests on the incoming or the
/// active operator.
mod predicates;
/// The resumable session that owns the stacks and runs the table.
///
/// # Responsibilities
/// - Holds all parse state between calls so evaluation can resume after any
///   character.
/// - Runs rows until an action suspends, recording each transition.
/// - Resets itself whenever an expression fails.
pub mod session;
/// The transition table.
///
/// A fixed array of rules, one per [`table::StateId`], each naming a
/// predicate and the action and next state for either outcome. The table
/// encodes the whole grammar and the order in which operators are folded.
pub mod table;
/// Pluggable recording of every transition the engine takes.
pub mod trace;

pub use session::Session;
