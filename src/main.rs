use std::{
    fs::File,
    io::{self, BufReader},
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser;
use stepcalc::{
    error::ShellError,
    machine::{
        Session,
        trace::{Discard, LogTrace, TraceSink, WriterTrace},
    },
    shell::Shell,
};

/// stepcalc evaluates arithmetic expressions one character at a time with a
/// table-driven automaton.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells stepcalc to read expressions, one per line, from the file named
    /// by the positional argument.
    #[arg(short, long, requires = "contents")]
    file: bool,

    /// Writes every transition of the automaton to this file.
    #[arg(long, value_name = "PATH")]
    trace: Option<PathBuf>,

    /// Sends every transition of the automaton to the logger at trace level.
    #[arg(long)]
    log_trace: bool,

    /// An expression to evaluate, or a file path with `--file`. Starts the
    /// interactive shell when omitted.
    contents: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = if args.log_trace { "trace" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    let session = match trace_sink(&args) {
        Ok(trace) => Session::with_trace(trace),
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        },
    };

    match run(args, session) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        },
    }
}

fn trace_sink(args: &Args) -> Result<Box<dyn TraceSink>, ShellError> {
    if let Some(path) = &args.trace {
        let sink = WriterTrace::create(path).map_err(|source| {
                                                ShellError::TraceFile { path: path.clone(),
                                                                        source }
                                            })?;
        return Ok(Box::new(sink));
    }
    if args.log_trace {
        Ok(Box::new(LogTrace))
    } else {
        Ok(Box::new(Discard))
    }
}

fn run(args: Args, mut session: Session<Box<dyn TraceSink>>) -> Result<ExitCode, ShellError> {
    match (args.contents, args.file) {
        (None, _) => {
            let mut shell = Shell::new(io::stdin().lock(), io::stdout().lock(), session);
            shell.run()?;
            Ok(ExitCode::SUCCESS)
        },
        (Some(path), true) => {
            let Ok(file) = File::open(&path) else {
                eprintln!("Failed to read the input file '{path}'. Perhaps this file does not exist?");
                return Ok(ExitCode::FAILURE);
            };
            let mut shell = Shell::new(BufReader::new(file), io::stdout().lock(), session);
            let failures = shell.run_batch()?;
            Ok(if failures == 0 { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        },
        (Some(expression), false) => {
            match session.feed_str(&expression).and_then(|()| session.finish()) {
                Ok(value) => {
                    println!("{value}");
                    Ok(ExitCode::SUCCESS)
                },
                Err(e) => {
                    eprintln!("{e}");
                    Ok(ExitCode::FAILURE)
                },
            }
        },
    }
}
