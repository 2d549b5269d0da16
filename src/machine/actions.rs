use crate::{
    error::{EvalError, EvalResult},
    machine::{
        operator::{Operator, OperatorToken},
        session::Session,
        table::{Action, Failure},
        trace::TraceSink,
    },
};

/// Whether the engine keeps running after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Move on to the next row immediately.
    Continue,
    /// The current character is used up (or the expression is reduced);
    /// wait for the caller.
    Suspend,
}

impl<T: TraceSink> Session<T> {
    /// Performs a table action.
    ///
    /// Folds pop the right operand first and then the left one, so
    /// `left OP right` keeps source order. Division by zero follows IEEE 754
    /// and yields an infinity or NaN.
    pub(crate) fn perform(&mut self, action: Action) -> EvalResult<Flow> {
        match action {
            Action::Ignore => Ok(Flow::Continue),
            Action::Skip => Ok(Flow::Suspend),
            Action::PushUnaryOperator => {
                let token = OperatorToken::unary(self.input).ok_or_else(|| {
                                                                self.failure(Failure::InvalidCharacter)
                                                            })?;
                self.operators.push(token);
                Ok(Flow::Suspend)
            },
            Action::AccumulateDigit => {
                self.operand_text.push(self.input);
                self.accumulating = true;
                Ok(Flow::Suspend)
            },
            Action::PushOperand => {
                let value =
                    self.operand_text
                        .parse::<f64>()
                        .map_err(|_| EvalError::InvalidNumber { text:     self.operand_text.clone(),
                                                                position: self.position, })?;
                self.operands.push(value);
                self.operand_text.clear();
                self.accumulating = false;
                Ok(Flow::Continue)
            },
            Action::BuildBinaryOperator => {
                let token = OperatorToken::binary(self.input).ok_or_else(|| {
                                                                 self.failure(Failure::InvalidCharacter)
                                                             })?;
                self.incoming = Some(token);
                Ok(Flow::Continue)
            },
            Action::PopOperator => {
                self.active = self.operators.pop();
                Ok(Flow::Continue)
            },
            Action::PushOperator => {
                if let Some(token) = self.incoming.take() {
                    self.operators.push(token);
                }
                Ok(Flow::Suspend)
            },
            Action::CloseGroup => {
                self.active = None;
                self.incoming = None;
                Ok(Flow::Suspend)
            },
            Action::Negate => {
                let value = self.pop_operand()?;
                self.push_result(-value)
            },
            Action::Multiply => self.fold(|left, right| left * right),
            Action::Divide => self.fold(|left, right| left / right),
            Action::Add => self.fold(|left, right| left + right),
            Action::Subtract => self.fold(|left, right| left - right),
            Action::Complete => {
                self.result = self.operands.pop();
                Ok(Flow::Suspend)
            },
            Action::Fail(failure) => Err(self.failure(failure)),
        }
    }

    /// Pops right, then left, and pushes `op(left, right)`.
    fn fold(&mut self, op: impl FnOnce(f64, f64) -> f64) -> EvalResult<Flow> {
        let right = self.pop_operand()?;
        let left = self.pop_operand()?;
        self.push_result(op(left, right))
    }

    fn push_result(&mut self, value: f64) -> EvalResult<Flow> {
        self.operands.push(value);
        self.active = None;
        Ok(Flow::Continue)
    }

    fn pop_operand(&mut self) -> EvalResult<f64> {
        self.operands
            .pop()
            .ok_or_else(|| self.failure(Failure::InsufficientOperands))
    }

    /// Builds the error for a failing branch from the current state.
    fn failure(&self, failure: Failure) -> EvalError {
        match failure {
            Failure::InvalidCharacter => EvalError::InvalidCharacter { character: self.input,
                                                                       position:  self.position, },
            Failure::InsufficientOperands => {
                let token = self.active.unwrap_or(OperatorToken::new(Operator::Parenthesis));
                EvalError::InsufficientOperands { operator:  token.operator,
                                                  required:  token.arity,
                                                  available: self.operands.len(), }
            },
            Failure::UnbalancedResult => {
                EvalError::UnbalancedResult { operands: self.operands.len() }
            },
            Failure::UnmatchedParenthesis => {
                EvalError::UnmatchedParenthesis { position: self.position }
            },
            Failure::UnclosedParenthesis => EvalError::UnclosedParenthesis,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with(operands: &[f64], active: char) -> Session {
        let mut session = Session::new();
        session.operands.extend_from_slice(operands);
        session.active = OperatorToken::binary(active);
        session
    }

    #[test]
    fn folds_keep_source_order() {
        let mut session = session_with(&[10.0, 4.0], '-');
        assert_eq!(session.perform(Action::Subtract), Ok(Flow::Continue));
        assert_eq!(session.operands, vec![6.0]);
        assert!(session.active.is_none());

        let mut session = session_with(&[1.0, 8.0, 2.0], '/');
        session.perform(Action::Divide).unwrap();
        assert_eq!(session.operands, vec![1.0, 4.0]);
    }

    #[test]
    fn division_by_zero_is_not_an_error() {
        let mut session = session_with(&[1.0, 0.0], '/');
        session.perform(Action::Divide).unwrap();
        assert!(session.operands[0].is_infinite());

        let mut session = session_with(&[0.0, 0.0], '/');
        session.perform(Action::Divide).unwrap();
        assert!(session.operands[0].is_nan());
    }

    #[test]
    fn negation_pops_a_single_operand() {
        let mut session = Session::new();
        session.operands = vec![2.0, 5.0];
        session.active = OperatorToken::unary('-');
        session.perform(Action::Negate).unwrap();
        assert_eq!(session.operands, vec![2.0, -5.0]);
    }

    #[test]
    fn malformed_operand_text_is_rejected() {
        let mut session = Session::new();
        session.operand_text = "1.2.3".to_string();
        session.accumulating = true;
        session.position = 5;
        assert_eq!(session.perform(Action::PushOperand),
                   Err(EvalError::InvalidNumber { text:     "1.2.3".to_string(),
                                                  position: 5, }));
    }

    #[test]
    fn fold_without_operands_reports_the_operator() {
        let mut session = session_with(&[3.0], '+');
        assert_eq!(session.perform(Action::Add),
                   Err(EvalError::InsufficientOperands { operator:  Operator::Addition,
                                                         required:  2,
                                                         available: 0, }));
    }
}
