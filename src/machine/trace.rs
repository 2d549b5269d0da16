use std::{
    fmt,
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use crate::machine::table::Rule;

/// A single transition taken by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceStep {
    /// What the rule's predicate evaluated to.
    pub outcome: bool,
    /// The rule whose branch was taken.
    pub rule:    &'static Rule,
}

impl fmt::Display for TraceStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = if self.outcome { "True" } else { "False" };
        write!(f, "{outcome:<10}{}", self.rule)
    }
}

/// Receives one record per transition, in execution order.
pub trait TraceSink {
    /// Records a step. Called after the predicate is evaluated and before
    /// the selected action runs.
    fn record(&mut self, step: TraceStep);
}

/// Discards every step. The default sink.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Discard;

impl TraceSink for Discard {
    fn record(&mut self, _step: TraceStep) {}
}

/// Forwards every step to the `log` facade at trace level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogTrace;

impl TraceSink for LogTrace {
    fn record(&mut self, step: TraceStep) {
        log::trace!("{step}");
    }
}

/// Keeps every step in memory.
impl TraceSink for Vec<TraceStep> {
    fn record(&mut self, step: TraceStep) {
        self.push(step);
    }
}

impl<S: TraceSink + ?Sized> TraceSink for &mut S {
    fn record(&mut self, step: TraceStep) {
        (**self).record(step);
    }
}

impl<S: TraceSink + ?Sized> TraceSink for Box<S> {
    fn record(&mut self, step: TraceStep) {
        (**self).record(step);
    }
}

/// Column titles written at the top of every trace.
pub const TRACE_HEADER: &str = "Transition trace\n\
Outcome   Rule State                   Predicate                       True                True next               False                               False next\n\
--------------------------------------------------------------------------------------------------------------------------------------------------------------------------";

/// Writes a header followed by one line per step, flushing after each line
/// so the trace survives an abrupt exit.
///
/// A failed write is reported once through the logger and further writes are
/// dropped; tracing never interrupts evaluation.
#[derive(Debug)]
pub struct WriterTrace<W: Write> {
    writer: W,
    failed: bool,
}

impl WriterTrace<BufWriter<File>> {
    /// Creates (or truncates) the file at `path` and writes the header.
    ///
    /// # Errors
    /// Returns the I/O error if the file cannot be created or the header
    /// cannot be written.
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        Self::new(BufWriter::new(File::create(path)?))
    }
}

impl<W: Write> WriterTrace<W> {
    /// Wraps `writer` and writes the header to it.
    ///
    /// # Errors
    /// Returns the I/O error if the header cannot be written.
    pub fn new(mut writer: W) -> io::Result<Self> {
        writeln!(writer, "{TRACE_HEADER}")?;
        writer.flush()?;
        Ok(Self { writer,
                  failed: false })
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> TraceSink for WriterTrace<W> {
    fn record(&mut self, step: TraceStep) {
        if self.failed {
            return;
        }
        if let Err(e) = writeln!(self.writer, "{step}").and_then(|()| self.writer.flush()) {
            log::warn!("trace output disabled after write failure: {e}");
            self.failed = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::table::StateId;

    fn step(outcome: bool) -> TraceStep {
        TraceStep { outcome,
                    rule: StateId::UnaryWhitespace.rule() }
    }

    #[test]
    fn steps_render_outcome_then_rule() {
        assert!(step(true).to_string().starts_with("True      101  UnaryWhitespace"));
        assert!(step(false).to_string().starts_with("False     101  UnaryWhitespace"));
    }

    #[test]
    fn writer_trace_emits_header_then_lines() {
        let mut trace = WriterTrace::new(Vec::new()).unwrap();
        trace.record(step(true));
        trace.record(step(false));
        let text = String::from_utf8(trace.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), TRACE_HEADER.lines().count() + 2);
        assert!(lines[lines.len() - 2].starts_with("True"));
        assert!(lines[lines.len() - 1].starts_with("False"));
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn header_failure_is_reported() {
        assert!(WriterTrace::new(Broken).is_err());
    }

    #[test]
    fn boxed_sinks_forward() {
        let mut steps: Vec<TraceStep> = Vec::new();
        {
            let mut boxed: Box<dyn TraceSink + '_> = Box::new(&mut steps);
            boxed.record(step(true));
        }
        assert_eq!(steps, vec![step(true)]);
    }
}
