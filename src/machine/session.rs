use crate::{
    error::{EvalError, EvalResult},
    machine::{
        actions::Flow,
        operator::OperatorToken,
        table::StateId,
        trace::{Discard, TraceSink, TraceStep},
    },
};

/// The resumable evaluation state for one expression at a time.
///
/// A session is driven from outside: [`Session::feed`] hands it one
/// character, runs the transition table from the saved state until the
/// character has been used up, and returns. [`Session::finish`] switches to
/// the final-evaluation rows and reduces both stacks to the result. Between
/// calls the whole state is held here and can be inspected.
///
/// ## Usage
///
/// ```
/// use stepcalc::machine::Session;
///
/// let mut session = Session::new();
/// for c in "(2 + 3) * 4".chars() {
///     session.feed(c).unwrap();
/// }
/// assert_eq!(session.finish().unwrap(), 20.0);
/// ```
#[derive(Debug)]
pub struct Session<T: TraceSink = Discard> {
    pub(crate) state:        StateId,
    /// The character currently being classified.
    pub(crate) input:        char,
    /// Index of `input` within the expression.
    pub(crate) position:     usize,
    /// Characters fed since the last reset.
    pub(crate) consumed:     usize,
    pub(crate) operand_text: String,
    pub(crate) accumulating: bool,
    pub(crate) operands:     Vec<f64>,
    pub(crate) operators:    Vec<OperatorToken>,
    /// The operator just lexed and not yet pushed.
    pub(crate) incoming:     Option<OperatorToken>,
    /// The operator just popped for folding.
    pub(crate) active:       Option<OperatorToken>,
    pub(crate) result:       Option<f64>,
    running:                 bool,
    trace:                   T,
}

impl Session {
    /// Creates a session that does not trace.
    #[must_use]
    pub fn new() -> Self {
        Self::with_trace(Discard)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TraceSink> Session<T> {
    /// Creates a session that records every transition into `trace`.
    pub fn with_trace(trace: T) -> Self {
        Self { state: StateId::INITIAL,
               input: ' ',
               position: 0,
               consumed: 0,
               operand_text: String::new(),
               accumulating: false,
               operands: Vec::new(),
               operators: Vec::new(),
               incoming: None,
               active: None,
               result: None,
               running: true,
               trace }
    }

    /// Feeds the next character of the expression.
    ///
    /// Every character must be fed, in order, including whitespace. The
    /// engine runs until the character has been consumed and then suspends.
    /// Feeding a stopped session does nothing.
    ///
    /// # Errors
    /// Returns an [`EvalError`] if the character cannot appear at this point
    /// or completes an operation that cannot be carried out. The session is
    /// reset before the error is returned.
    pub fn feed(&mut self, c: char) -> EvalResult<()> {
        if !self.running {
            return Ok(());
        }
        self.input = c;
        self.position = self.consumed;
        self.consumed += 1;
        self.run()
    }

    /// Feeds every character of `text` in order.
    ///
    /// # Errors
    /// Stops at, and returns, the first error raised by [`Session::feed`].
    pub fn feed_str(&mut self, text: &str) -> EvalResult<()> {
        text.chars().try_for_each(|c| self.feed(c))
    }

    /// Signals the end of the expression and reduces it to a single value.
    ///
    /// On success the session is reset and ready for the next expression.
    ///
    /// # Errors
    /// Returns an [`EvalError`] if the expression is incomplete or
    /// unbalanced, or [`EvalError::SessionStopped`] after [`Session::quit`].
    ///
    /// # Example
    /// ```
    /// use stepcalc::{error::EvalError, machine::Session};
    ///
    /// let mut session = Session::new();
    /// session.feed_str("5 5").unwrap();
    /// assert_eq!(session.finish(), Err(EvalError::UnbalancedResult { operands: 2 }));
    ///
    /// session.feed_str("-5+3").unwrap();
    /// assert_eq!(session.finish(), Ok(-2.0));
    /// ```
    pub fn finish(&mut self) -> EvalResult<f64> {
        if !self.running {
            return Err(EvalError::SessionStopped);
        }
        self.state = StateId::FINAL;
        self.position = self.consumed;
        self.run()?;
        let result = self.result.take().ok_or(EvalError::UnbalancedResult { operands: 0 });
        self.reset();
        if let Ok(value) = result {
            log::debug!("expression reduced to {value}");
        }
        result
    }

    /// Clears both stacks, the operand text and the operator slots, and
    /// returns to the initial state. The trace sink and the running flag are
    /// kept.
    pub fn reset(&mut self) {
        self.state = StateId::INITIAL;
        self.input = ' ';
        self.position = 0;
        self.consumed = 0;
        self.operand_text.clear();
        self.accumulating = false;
        self.operands.clear();
        self.operators.clear();
        self.incoming = None;
        self.active = None;
        self.result = None;
    }

    /// Stops the session permanently. Later feeds are ignored.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Returns `false` once [`Session::quit`] has been called.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// The state the next run resumes from.
    #[must_use]
    pub const fn state(&self) -> StateId {
        self.state
    }

    /// The operand stack, bottom first.
    #[must_use]
    pub fn operands(&self) -> &[f64] {
        &self.operands
    }

    /// The operator stack, bottom first.
    #[must_use]
    pub fn operators(&self) -> &[OperatorToken] {
        &self.operators
    }

    /// Digits and dots accumulated for the operand being read.
    #[must_use]
    pub fn pending_operand(&self) -> &str {
        &self.operand_text
    }

    /// Whether an operand is being accumulated.
    #[must_use]
    pub const fn is_accumulating(&self) -> bool {
        self.accumulating
    }

    /// Returns `true` when the session holds no partial expression.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.state == StateId::INITIAL
        && self.operand_text.is_empty()
        && !self.accumulating
        && self.operands.is_empty()
        && self.operators.is_empty()
        && self.incoming.is_none()
        && self.active.is_none()
    }

    /// The trace sink.
    pub const fn trace(&self) -> &T {
        &self.trace
    }

    /// The trace sink, mutably.
    pub const fn trace_mut(&mut self) -> &mut T {
        &mut self.trace
    }

    /// Consumes the session and returns its trace sink.
    pub fn into_trace(self) -> T {
        self.trace
    }

    /// Runs the table from the saved state until an action suspends.
    fn run(&mut self) -> EvalResult<()> {
        while self.running {
            let rule = self.state.rule();
            let outcome = self.holds(rule.predicate);
            self.trace.record(TraceStep { outcome, rule });
            let branch = rule.branch(outcome);
            match self.perform(branch.action) {
                Ok(flow) => {
                    self.state = branch.next;
                    if flow == Flow::Suspend {
                        break;
                    }
                },
                Err(e) => {
                    log::debug!("rule {} aborted the expression: {e}", rule.id);
                    self.reset();
                    return Err(e);
                },
            }
        }
        Ok(())
    }
}
