use std::fmt;

/// Characters that may open an operand unit when a unary operator is
/// expected.
pub const UNARY_OPERATORS: [char; 2] = ['-', '('];
/// Characters that may continue an expression when a binary operator is
/// expected.
pub const BINARY_OPERATORS: [char; 5] = [')', '*', '/', '+', '-'];

/// The kind of an operator held on the operator stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `(` or `)`. Only ever used as a group sentinel, never folded.
    Parenthesis,
    /// Unary `-`.
    Negation,
    /// `*`
    Multiplication,
    /// `/`
    Division,
    /// `+`
    Addition,
    /// Binary `-`.
    Subtraction,
}

impl Operator {
    /// Returns the precedence class of the operator.
    #[must_use]
    pub const fn precedence(self) -> Precedence {
        match self {
            Self::Parenthesis => Precedence::Parenthesis,
            Self::Addition | Self::Subtraction => Precedence::AdditionSubtraction,
            Self::Multiplication | Self::Division => Precedence::MultiplicationDivision,
            Self::Negation => Precedence::Negation,
        }
    }

    /// Returns the number of operands a fold of this operator consumes.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::Parenthesis => 0,
            Self::Negation => 1,
            Self::Multiplication | Self::Division | Self::Addition | Self::Subtraction => 2,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Parenthesis => "parenthesis",
            Self::Negation => "negation",
            Self::Multiplication => "multiplication",
            Self::Division => "division",
            Self::Addition => "addition",
            Self::Subtraction => "subtraction",
        };
        f.write_str(name)
    }
}

/// Precedence classes, ordered from loosest to tightest binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precedence {
    /// Group sentinels. Lower than everything so no binary operator folds
    /// past an open `(`.
    Parenthesis,
    /// `+` and binary `-`.
    AdditionSubtraction,
    /// `*` and `/`.
    MultiplicationDivision,
    /// Unary `-`.
    Negation,
}

/// An operator as it sits on the operator stack.
///
/// The precedence and arity are always those of `operator`; the token only
/// carries them alongside so the table predicates can read them directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorToken {
    /// The operator kind.
    pub operator:   Operator,
    /// The precedence class used for fold-or-push decisions.
    pub precedence: Precedence,
    /// Operands consumed by a fold: 0 for sentinels, 1 for negation, 2
    /// otherwise.
    pub arity:      usize,
}

impl OperatorToken {
    /// Builds the token for `operator`.
    #[must_use]
    pub const fn new(operator: Operator) -> Self {
        Self { operator,
               precedence: operator.precedence(),
               arity: operator.arity() }
    }

    /// Builds the token for a character seen where a unary operator is
    /// expected.
    ///
    /// # Returns
    /// - `Some` for `(` (group sentinel) and `-` (negation).
    /// - `None` for any other character.
    ///
    /// # Example
    /// ```
    /// use stepcalc::machine::operator::{Operator, OperatorToken};
    ///
    /// let token = OperatorToken::unary('-').unwrap();
    /// assert_eq!(token.operator, Operator::Negation);
    /// assert_eq!(token.arity, 1);
    /// assert!(OperatorToken::unary('+').is_none());
    /// ```
    #[must_use]
    pub const fn unary(c: char) -> Option<Self> {
        match c {
            '(' => Some(Self::new(Operator::Parenthesis)),
            '-' => Some(Self::new(Operator::Negation)),
            _ => None,
        }
    }

    /// Builds the token for a character seen where a binary operator is
    /// expected. `)` yields the closing group sentinel.
    #[must_use]
    pub const fn binary(c: char) -> Option<Self> {
        match c {
            ')' => Some(Self::new(Operator::Parenthesis)),
            '*' => Some(Self::new(Operator::Multiplication)),
            '/' => Some(Self::new(Operator::Division)),
            '+' => Some(Self::new(Operator::Addition)),
            '-' => Some(Self::new(Operator::Subtraction)),
            _ => None,
        }
    }

    /// Returns `true` when `self`, already on the stack, must be folded
    /// before `incoming` is pushed. Equal precedence folds, which makes the
    /// binary operators left-associative.
    #[must_use]
    pub fn binds_at_least(&self, incoming: &Self) -> bool {
        self.precedence >= incoming.precedence
    }

    /// The source character for the token.
    #[must_use]
    pub const fn symbol(&self) -> char {
        match self.operator {
            Operator::Parenthesis => '(',
            Operator::Negation | Operator::Subtraction => '-',
            Operator::Multiplication => '*',
            Operator::Division => '/',
            Operator::Addition => '+',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precedence_is_a_strict_total_order() {
        assert!(Precedence::Parenthesis < Precedence::AdditionSubtraction);
        assert!(Precedence::AdditionSubtraction < Precedence::MultiplicationDivision);
        assert!(Precedence::MultiplicationDivision < Precedence::Negation);
    }

    #[test]
    fn minus_depends_on_position() {
        let unary = OperatorToken::unary('-').unwrap();
        let binary = OperatorToken::binary('-').unwrap();
        assert_eq!(unary.operator, Operator::Negation);
        assert_eq!(binary.operator, Operator::Subtraction);
        assert_eq!(binary.arity, 2);
    }

    #[test]
    fn parentheses_are_zero_arity_sentinels() {
        let open = OperatorToken::unary('(').unwrap();
        let close = OperatorToken::binary(')').unwrap();
        assert_eq!(open, close);
        assert_eq!(open.arity, 0);
        assert!(OperatorToken::binary('(').is_none());
        assert!(OperatorToken::unary(')').is_none());
    }

    #[test]
    fn equal_precedence_folds_first() {
        let add = OperatorToken::binary('+').unwrap();
        let sub = OperatorToken::binary('-').unwrap();
        let mul = OperatorToken::binary('*').unwrap();
        let open = OperatorToken::unary('(').unwrap();
        assert!(add.binds_at_least(&sub));
        assert!(mul.binds_at_least(&add));
        assert!(!add.binds_at_least(&mul));
        assert!(!open.binds_at_least(&add));
    }

    #[test]
    fn symbols_round_trip_through_binary() {
        for c in ['*', '/', '+', '-'] {
            assert_eq!(OperatorToken::binary(c).unwrap().symbol(), c);
        }
    }
}
