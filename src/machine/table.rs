use std::fmt;

use crate::machine::operator::Operator;

/// Identifies a row of the transition table.
///
/// The discriminant of each variant is the index of its row in [`TABLE`].
/// Rows are grouped into three regions: parsing (unary expectation, binary
/// expectation and in-line folding), subexpression (draining back to the
/// matching `(` once a `)` arrives), and final evaluation (draining both
/// stacks once input ends).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateId {
    UnaryWhitespace,
    UnaryOperator,
    UnaryNumber,
    BinaryNumber,
    CheckAccumulating,
    BinaryWhitespace,
    BinaryOperator,
    CheckClosing,
    CheckPrecedence,
    EnsureOperands,
    IsNegation,
    IsMultiplication,
    IsDivision,
    IsAddition,
    IsSubtraction,

    SubexpressionPop,
    SubIsParenthesis,
    SubEnsureOperands,
    SubIsNegation,
    SubIsMultiplication,
    SubIsDivision,
    SubIsAddition,
    SubIsSubtraction,

    FinalCheckAccumulating,
    FinalPop,
    FinalIsParenthesis,
    FinalEnsureOperands,
    FinalIsNegation,
    FinalIsMultiplication,
    FinalIsDivision,
    FinalIsAddition,
    FinalIsSubtraction,
    FinalSingleOperand,
}

impl StateId {
    /// Number of rows in the table.
    pub const COUNT: usize = Self::FinalSingleOperand as usize + 1;

    /// The state every session starts in, and returns to after a reset.
    pub const INITIAL: Self = Self::UnaryWhitespace;

    /// The state `finish` jumps to once input has ended.
    pub const FINAL: Self = Self::FinalCheckAccumulating;

    /// Row index of the state in [`TABLE`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the table row for this state.
    #[must_use]
    pub fn rule(self) -> &'static Rule {
        &TABLE[self.index()]
    }
}

/// A test evaluated against the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    /// The current character is whitespace.
    IsWhitespace,
    /// The current character is `-` or `(`.
    IsUnaryOperatorChar,
    /// The current character is `)`, `*`, `/`, `+` or `-`.
    IsBinaryOperatorChar,
    /// The current character is a digit or `.`.
    IsNumberChar,
    /// Operand text is being accumulated.
    IsAccumulatingOperand,
    /// The operator stack holds at least one token.
    OperatorStackNonEmpty,
    /// The operand stack holds exactly one value.
    OperandStackHasExactlyOne,
    /// The operator stack top must fold before the incoming operator is
    /// pushed. False on an empty stack.
    HasPrecedenceAtLeast,
    /// The operand stack holds at least as many values as the active
    /// operator consumes.
    HasSufficientOperands,
    /// The incoming operator is of the given kind.
    IncomingIs(Operator),
    /// The active (just popped) operator is of the given kind.
    ActiveIs(Operator),
}

/// What a failing branch reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    InvalidCharacter,
    InsufficientOperands,
    UnbalancedResult,
    UnmatchedParenthesis,
    UnclosedParenthesis,
}

/// An operation performed when a branch is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Do nothing and keep running.
    Ignore,
    /// Consume the current character without using it, then suspend.
    Skip,
    /// Push the unary token for the current character, then suspend.
    PushUnaryOperator,
    /// Append the current character to the operand text, then suspend.
    AccumulateDigit,
    /// Convert the operand text to a value and push it.
    PushOperand,
    /// Build the incoming binary token from the current character.
    BuildBinaryOperator,
    /// Pop the operator stack top into the active slot.
    PopOperator,
    /// Push the incoming token, then suspend.
    PushOperator,
    /// Discard the `(` sentinel matched by the current `)`, then suspend.
    CloseGroup,
    /// `-x`
    Negate,
    /// `l * r`
    Multiply,
    /// `l / r`
    Divide,
    /// `l + r`
    Add,
    /// `l - r`
    Subtract,
    /// Take the single remaining operand as the result, then suspend.
    Complete,
    /// Abort the expression.
    Fail(Failure),
}

/// One side of a rule: the action to perform and the state to move to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Branch {
    pub action: Action,
    pub next:   StateId,
}

/// A row of the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    /// Stable identifier printed in traces. The hundreds digit names the
    /// region.
    pub id:        u16,
    pub state:     StateId,
    pub predicate: Predicate,
    pub on_true:   Branch,
    pub on_false:  Branch,
}

impl Rule {
    /// Returns the branch selected by a predicate outcome.
    #[must_use]
    pub const fn branch(&self, outcome: bool) -> Branch {
        if outcome { self.on_true } else { self.on_false }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = format!("{:?}", self.state);
        let predicate = format!("{:?}", self.predicate);
        let true_action = format!("{:?}", self.on_true.action);
        let true_next = format!("{:?}", self.on_true.next);
        let false_action = format!("{:?}", self.on_false.action);
        let false_next = format!("{:?}", self.on_false.next);
        write!(f,
               "{:<5}{state:<24}{predicate:<32}{true_action:<20}{true_next:<24}{false_action:<36}{false_next}",
               self.id)
    }
}

const fn rule(id: u16,
              state: StateId,
              predicate: Predicate,
              on_true: (Action, StateId),
              on_false: (Action, StateId))
              -> Rule {
    Rule { id,
           state,
           predicate,
           on_true: Branch { action: on_true.0,
                             next:   on_true.1, },
           on_false: Branch { action: on_false.0,
                              next:   on_false.1, } }
}

use Action::{
    Add, AccumulateDigit, BuildBinaryOperator, CloseGroup, Complete, Divide, Fail, Ignore,
    Multiply, Negate, PopOperator, PushOperand, PushOperator, PushUnaryOperator, Skip, Subtract,
};
use Failure::{
    InsufficientOperands, InvalidCharacter, UnbalancedResult, UnclosedParenthesis,
    UnmatchedParenthesis,
};
use Operator::{Addition, Division, Multiplication, Negation, Parenthesis, Subtraction};
use Predicate::{
    ActiveIs, HasPrecedenceAtLeast, HasSufficientOperands, IncomingIs, IsAccumulatingOperand,
    IsBinaryOperatorChar, IsNumberChar, IsUnaryOperatorChar, IsWhitespace,
    OperandStackHasExactlyOne, OperatorStackNonEmpty,
};
use StateId as S;

/// The transition table shared by every session.
///
/// Each row is `predicate ? (true action, next) : (false action, next)`.
/// Suspending actions (`Skip`, `PushUnaryOperator`, `AccumulateDigit`,
/// `PushOperator`, `CloseGroup`, `Complete`) end a run; every other action
/// lets the engine move straight on to the next row.
#[rustfmt::skip]
pub static TABLE: [Rule; StateId::COUNT] = [
    // Parsing.
    rule(101, S::UnaryWhitespace,        IsWhitespace,              (Skip, S::UnaryWhitespace),                 (Ignore, S::UnaryOperator)),
    rule(102, S::UnaryOperator,          IsUnaryOperatorChar,       (PushUnaryOperator, S::UnaryWhitespace),    (Ignore, S::UnaryNumber)),
    rule(103, S::UnaryNumber,            IsNumberChar,              (AccumulateDigit, S::BinaryNumber),         (Fail(InvalidCharacter), S::UnaryWhitespace)),
    rule(104, S::BinaryNumber,           IsNumberChar,              (AccumulateDigit, S::BinaryNumber),         (Ignore, S::CheckAccumulating)),
    rule(105, S::CheckAccumulating,      IsAccumulatingOperand,     (PushOperand, S::BinaryWhitespace),         (Ignore, S::BinaryWhitespace)),
    rule(106, S::BinaryWhitespace,       IsWhitespace,              (Skip, S::BinaryNumber),                    (Ignore, S::BinaryOperator)),
    rule(107, S::BinaryOperator,         IsBinaryOperatorChar,      (BuildBinaryOperator, S::CheckClosing),     (Fail(InvalidCharacter), S::UnaryWhitespace)),
    rule(108, S::CheckClosing,           IncomingIs(Parenthesis),   (Ignore, S::SubexpressionPop),              (Ignore, S::CheckPrecedence)),
    rule(109, S::CheckPrecedence,        HasPrecedenceAtLeast,      (PopOperator, S::EnsureOperands),           (PushOperator, S::UnaryWhitespace)),
    rule(110, S::EnsureOperands,         HasSufficientOperands,     (Ignore, S::IsNegation),                    (Fail(InsufficientOperands), S::UnaryWhitespace)),
    rule(111, S::IsNegation,             ActiveIs(Negation),        (Negate, S::CheckPrecedence),               (Ignore, S::IsMultiplication)),
    rule(112, S::IsMultiplication,       ActiveIs(Multiplication),  (Multiply, S::CheckPrecedence),             (Ignore, S::IsDivision)),
    rule(113, S::IsDivision,             ActiveIs(Division),        (Divide, S::CheckPrecedence),               (Ignore, S::IsAddition)),
    rule(114, S::IsAddition,             ActiveIs(Addition),        (Add, S::CheckPrecedence),                  (Ignore, S::IsSubtraction)),
    rule(115, S::IsSubtraction,          ActiveIs(Subtraction),     (Subtract, S::CheckPrecedence),             (Fail(InvalidCharacter), S::UnaryWhitespace)),

    // Subexpression: a `)` folds everything down to its `(`.
    rule(201, S::SubexpressionPop,       OperatorStackNonEmpty,     (PopOperator, S::SubIsParenthesis),         (Fail(UnmatchedParenthesis), S::UnaryWhitespace)),
    rule(202, S::SubIsParenthesis,       ActiveIs(Parenthesis),     (CloseGroup, S::BinaryWhitespace),          (Ignore, S::SubEnsureOperands)),
    rule(203, S::SubEnsureOperands,      HasSufficientOperands,     (Ignore, S::SubIsNegation),                 (Fail(InsufficientOperands), S::UnaryWhitespace)),
    rule(204, S::SubIsNegation,          ActiveIs(Negation),        (Negate, S::SubexpressionPop),              (Ignore, S::SubIsMultiplication)),
    rule(205, S::SubIsMultiplication,    ActiveIs(Multiplication),  (Multiply, S::SubexpressionPop),            (Ignore, S::SubIsDivision)),
    rule(206, S::SubIsDivision,          ActiveIs(Division),        (Divide, S::SubexpressionPop),              (Ignore, S::SubIsAddition)),
    rule(207, S::SubIsAddition,          ActiveIs(Addition),        (Add, S::SubexpressionPop),                 (Ignore, S::SubIsSubtraction)),
    rule(208, S::SubIsSubtraction,       ActiveIs(Subtraction),     (Subtract, S::SubexpressionPop),            (Fail(InvalidCharacter), S::UnaryWhitespace)),

    // Final evaluation: input has ended.
    rule(301, S::FinalCheckAccumulating, IsAccumulatingOperand,     (PushOperand, S::FinalPop),                 (Ignore, S::FinalPop)),
    rule(302, S::FinalPop,               OperatorStackNonEmpty,     (PopOperator, S::FinalIsParenthesis),       (Ignore, S::FinalSingleOperand)),
    rule(303, S::FinalIsParenthesis,     ActiveIs(Parenthesis),     (Fail(UnclosedParenthesis), S::UnaryWhitespace), (Ignore, S::FinalEnsureOperands)),
    rule(304, S::FinalEnsureOperands,    HasSufficientOperands,     (Ignore, S::FinalIsNegation),               (Fail(InsufficientOperands), S::UnaryWhitespace)),
    rule(305, S::FinalIsNegation,        ActiveIs(Negation),        (Negate, S::FinalPop),                      (Ignore, S::FinalIsMultiplication)),
    rule(306, S::FinalIsMultiplication,  ActiveIs(Multiplication),  (Multiply, S::FinalPop),                    (Ignore, S::FinalIsDivision)),
    rule(307, S::FinalIsDivision,        ActiveIs(Division),        (Divide, S::FinalPop),                      (Ignore, S::FinalIsAddition)),
    rule(308, S::FinalIsAddition,        ActiveIs(Addition),        (Add, S::FinalPop),                         (Ignore, S::FinalIsSubtraction)),
    rule(309, S::FinalIsSubtraction,     ActiveIs(Subtraction),     (Subtract, S::FinalPop),                    (Fail(InvalidCharacter), S::UnaryWhitespace)),
    rule(310, S::FinalSingleOperand,     OperandStackHasExactlyOne, (Complete, S::UnaryWhitespace),             (Fail(UnbalancedResult), S::UnaryWhitespace)),
];

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn rows_sit_at_their_state_index() {
        for (index, rule) in TABLE.iter().enumerate() {
            assert_eq!(rule.state.index(), index, "rule {} is out of place", rule.id);
            assert_eq!(rule.state.rule(), rule);
        }
    }

    #[test]
    fn rule_ids_are_unique() {
        let ids: HashSet<u16> = TABLE.iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), TABLE.len());
    }

    #[test]
    fn every_row_is_reachable_from_an_entry_state() {
        let mut seen = HashSet::new();
        let mut pending = vec![StateId::INITIAL, StateId::FINAL];
        while let Some(state) = pending.pop() {
            if !seen.insert(state) {
                continue;
            }
            let rule = state.rule();
            pending.push(rule.on_true.next);
            pending.push(rule.on_false.next);
        }
        assert_eq!(seen.len(), StateId::COUNT);
    }

    #[test]
    fn failures_return_to_the_initial_state() {
        for rule in &TABLE {
            for branch in [rule.on_true, rule.on_false] {
                if matches!(branch.action, Action::Fail(_)) {
                    assert_eq!(branch.next, StateId::INITIAL, "rule {}", rule.id);
                }
            }
        }
    }

    #[test]
    fn display_starts_with_the_rule_id() {
        let line = StateId::CheckPrecedence.rule().to_string();
        assert!(line.starts_with("109  CheckPrecedence"));
        assert!(line.contains("PopOperator"));
        assert!(line.ends_with("UnaryWhitespace"));
    }
}
