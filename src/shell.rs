use std::io::{BufRead, Write};

use crate::{
    error::{EvalResult, ShellError},
    machine::{
        Session,
        trace::{Discard, TraceSink},
    },
};

/// Recognition of the words the shell handles itself.
pub mod command;

use command::Command;

/// Printed when the shell starts and on `help`.
pub const BANNER: &str = "\
**********************************************
*  Step-by-step arithmetic expression shell  *
**********************************************

Supported operators:

    ( )  Parenthesis
     -   Negation
     *   Multiplication
     /   Division
     +   Addition
     -   Subtraction

Whitespace between tokens is ignored.
Type `help` to show this again, `reset` to clear, `exit` to quit.
";

/// Printed before every line is read in interactive mode.
pub const PROMPT: &str = "Please enter an expression:> ";

/// Reads lines from `input`, evaluates them with a [`Session`] and writes
/// results and errors to `output`.
///
/// Evaluation errors are reported and the shell carries on with a fresh
/// expression; only I/O failures end a run.
pub struct Shell<R, W, T: TraceSink = Discard> {
    input:    R,
    output:   W,
    session:  Session<T>,
    failures: usize,
}

impl<R: BufRead, W: Write, T: TraceSink> Shell<R, W, T> {
    /// Creates a shell around `session`.
    pub const fn new(input: R, output: W, session: Session<T>) -> Self {
        Self { input,
               output,
               session,
               failures: 0 }
    }

    /// Runs interactively: banner, then prompt and evaluate until end of
    /// input or `exit`.
    pub fn run(&mut self) -> Result<(), ShellError> {
        self.banner()?;
        self.read_loop(true)
    }

    /// Runs without banner or prompts, one output line per input line.
    ///
    /// # Returns
    /// The number of lines that failed to evaluate.
    pub fn run_batch(&mut self) -> Result<usize, ShellError> {
        self.read_loop(false)?;
        Ok(self.failures)
    }

    /// Handles one line of input.
    pub fn handle(&mut self, line: &str) -> Result<(), ShellError> {
        if line.trim().is_empty() {
            return Ok(());
        }
        match Command::parse(line) {
            Some(Command::Help) => self.banner()?,
            Some(Command::Exit) => {
                log::debug!("exit requested");
                self.session.quit();
            },
            Some(Command::Reset) => {
                self.session.reset();
                writeln!(self.output, "Cleared.")?;
            },
            None => match self.evaluate(line) {
                Ok(value) => writeln!(self.output, "Result: {value}")?,
                Err(e) => {
                    self.failures += 1;
                    writeln!(self.output, "Error: {e}")?;
                },
            },
        }
        Ok(())
    }

    /// The session the shell drives.
    pub const fn session(&self) -> &Session<T> {
        &self.session
    }

    /// Consumes the shell and returns its output.
    pub fn into_output(self) -> W {
        self.output
    }

    fn read_loop(&mut self, interactive: bool) -> Result<(), ShellError> {
        let mut line = String::new();
        while self.session.is_running() {
            if interactive {
                write!(self.output, "{PROMPT}")?;
                self.output.flush()?;
            }
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }
            self.handle(line.trim_end_matches(['\r', '\n']))?;
        }
        self.output.flush()?;
        Ok(())
    }

    fn evaluate(&mut self, line: &str) -> EvalResult<f64> {
        self.session.feed_str(line)?;
        self.session.finish()
    }

    fn banner(&mut self) -> Result<(), ShellError> {
        writeln!(self.output, "{BANNER}")?;
        Ok(())
    }
}
