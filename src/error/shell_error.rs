use std::{io, path::PathBuf};

#[derive(Debug)]
/// Represents all errors raised by the interactive shell and the CLI around
/// it. Evaluation errors are not among them: the shell reports those and
/// carries on.
pub enum ShellError {
    /// Reading input or writing output failed.
    Io(io::Error),
    /// The trace file could not be opened.
    TraceFile {
        /// Path that was requested.
        path:   PathBuf,
        /// Underlying failure.
        source: io::Error,
    },
}

impl std::fmt::Display for ShellError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::TraceFile { path, source } => {
                write!(f, "Failed to open trace file '{}': {source}", path.display())
            },
        }
    }
}

impl std::error::Error for ShellError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) | Self::TraceFile { source: e, .. } => Some(e),
        }
    }
}

impl From<io::Error> for ShellError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
