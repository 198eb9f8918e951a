//! langford CLI entry point
//!
//! Checks whether a sequence of numbers is a Langford pairing, or searches
//! for one of a given order.

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use langford::cli::{self, Args, Command, PROGRAM, USAGE};

fn main() -> ExitCode {
    let args = match Args::parse() {
        Ok(args) => args,
        Err(err) => {
            eprint!("{}", err.render());
            return ExitCode::FAILURE;
        }
    };

    if args.command == Command::Help {
        eprintln!("{}", USAGE);
        return ExitCode::SUCCESS;
    }

    // Set up logging; stdout is reserved for the report.
    let level = if args.verbose { Level::DEBUG } else { Level::WARN };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();

    match execute(&args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}: {:#}", PROGRAM, err);
            ExitCode::FAILURE
        }
    }
}

fn execute(command: &Command) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    cli::run(command, &mut out)?;
    out.flush().context("failed to flush standard output")?;
    Ok(())
}
