use crate::machine::{
    operator::{BINARY_OPERATORS, UNARY_OPERATORS},
    session::Session,
    table::Predicate,
    trace::TraceSink,
};

impl<T: TraceSink> Session<T> {
    /// Evaluates a table predicate against the current character and stacks.
    pub(crate) fn holds(&self, predicate: Predicate) -> bool {
        match predicate {
            Predicate::IsWhitespace => self.input.is_whitespace(),
            Predicate::IsUnaryOperatorChar => UNARY_OPERATORS.contains(&self.input),
            Predicate::IsBinaryOperatorChar => BINARY_OPERATORS.contains(&self.input),
            Predicate::IsNumberChar => is_number_char(self.input),
            Predicate::IsAccumulatingOperand => self.accumulating,
            Predicate::OperatorStackNonEmpty => !self.operators.is_empty(),
            Predicate::OperandStackHasExactlyOne => self.operands.len() == 1,
            Predicate::HasPrecedenceAtLeast => match (self.operators.last(), &self.incoming) {
                (Some(top), Some(incoming)) => top.binds_at_least(incoming),
                _ => false,
            },
            Predicate::HasSufficientOperands => {
                self.active.is_some_and(|token| self.operands.len() >= token.arity)
            },
            Predicate::IncomingIs(operator) => {
                self.incoming.is_some_and(|token| token.operator == operator)
            },
            Predicate::ActiveIs(operator) => {
                self.active.is_some_and(|token| token.operator == operator)
            },
        }
    }
}

/// Digits and `.` are the only characters an operand is made of.
#[must_use]
pub const fn is_number_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::operator::{Operator, OperatorToken};

    #[test]
    fn character_classes() {
        let mut session = Session::new();
        for (c, unary, binary, number) in [('-', true, true, false),
                                           ('(', true, false, false),
                                           (')', false, true, false),
                                           ('*', false, true, false),
                                           ('7', false, false, true),
                                           ('.', false, false, true),
                                           ('e', false, false, false)]
        {
            session.input = c;
            assert_eq!(session.holds(Predicate::IsUnaryOperatorChar), unary, "{c}");
            assert_eq!(session.holds(Predicate::IsBinaryOperatorChar), binary, "{c}");
            assert_eq!(session.holds(Predicate::IsNumberChar), number, "{c}");
        }
        session.input = '\t';
        assert!(session.holds(Predicate::IsWhitespace));
    }

    #[test]
    fn precedence_check_is_false_on_an_empty_stack() {
        let mut session = Session::new();
        session.incoming = OperatorToken::binary('+');
        assert!(!session.holds(Predicate::HasPrecedenceAtLeast));
        session.operators.push(OperatorToken::new(Operator::Subtraction));
        assert!(session.holds(Predicate::HasPrecedenceAtLeast));
    }

    #[test]
    fn operand_count_follows_arity() {
        let mut session = Session::new();
        session.active = OperatorToken::unary('-');
        assert!(!session.holds(Predicate::HasSufficientOperands));
        session.operands.push(1.0);
        assert!(session.holds(Predicate::HasSufficientOperands));
        session.active = OperatorToken::binary('*');
        assert!(!session.holds(Predicate::HasSufficientOperands));
        assert!(session.holds(Predicate::OperandStackHasExactlyOne));
        assert!(session.holds(Predicate::ActiveIs(Operator::Multiplication)));
    }
}
