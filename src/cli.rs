//! Argument parsing and output formatting for the `langford` binary.
//!
//! The binary has two modes: `langford -c n` constructs a Langford pairing
//! of order `n`, and `langford num...` checks whether the given numbers
//! form a Langford pairing. `langford -a n` additionally lists every
//! pairing of order `n`.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::io::{self, Write};
use std::ops::ControlFlow;

use anyhow::{Context, Result};
use clap::builder::FalseyValueParser;
use clap::{ArgAction, Parser};
use tracing::debug;

use crate::{validate, Constructor};

/// The name under which diagnostics are reported.
pub const PROGRAM: &str = "langford";

/// The one-line usage summary printed for `-h` and for an empty command line.
pub const USAGE: &str = "usage: langford [-h] [-v] -c n | -a n | num...";

#[derive(Parser, Debug)]
#[command(name = PROGRAM)]
#[command(about = "Validate and construct Langford pairings")]
#[command(disable_help_flag = true)]
struct Cli {
    /// Enable verbose logging
    #[arg(
        short,
        long,
        env = "LANGFORD_VERBOSE",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new()
    )]
    verbose: bool,

    /// Construct the first Langford pairing of order n
    #[arg(short = 'c', value_name = "n", num_args = 0.., allow_hyphen_values = true)]
    construct: Option<Vec<String>>,

    /// List every Langford pairing of order n
    #[arg(short = 'a', value_name = "n", num_args = 0.., allow_hyphen_values = true)]
    all: Option<Vec<String>>,

    /// Sequence to check
    #[arg(value_name = "num")]
    sequence: Vec<String>,
}

/// The kind of command selected by the first argument that is not a
/// verbosity flag.
enum Lead {
    Help,
    Order,
    Sequence,
}

fn is_verbose_flag(arg: &OsStr) -> bool {
    arg == "-v" || arg == "--verbose"
}

/// What the binary was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the usage summary
    Help,
    /// Construct the first pairing of the given order
    Construct(usize),
    /// List every pairing of the given order
    Enumerate(usize),
    /// Check whether a sequence is a pairing
    Validate(Vec<i64>),
}

/// Parsed command line arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    /// Command to execute
    pub command: Command,
    /// Verbose mode (debug logging)
    pub verbose: bool,
}

/// A command line that cannot be executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    /// No arguments at all
    NoArguments,
    /// `-c` or `-a` without an order
    MissingOrder { flag: char },
    /// `-c` or `-a` followed by more than one value
    TooManyOrders { flag: char },
    /// A token that should be an integer but isn't
    NotAnInteger(String),
    /// A negative order
    InvalidOrder(String),
    /// Rejected by the argument parser (e.g. a token that isn't UTF-8)
    Rejected(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NoArguments => write!(f, "no arguments given"),
            CliError::MissingOrder { flag } => {
                write!(f, "-{} option requires an argument.", flag)
            }
            CliError::TooManyOrders { flag } => {
                write!(f, "-{} option received too many arguments.", flag)
            }
            CliError::NotAnInteger(token) => write!(f, "{} is not an integer.", token),
            CliError::InvalidOrder(token) => write!(f, "{} is not a valid order.", token),
            CliError::Rejected(message) => write!(f, "{}", message.trim_end()),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Returns the text to print on the standard error stream, including
    /// the trailing newline.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            CliError::NoArguments => format!("{}\n", USAGE),
            CliError::NotAnInteger(_) | CliError::InvalidOrder(_) => format!("error: {}\n", self),
            CliError::MissingOrder { .. } | CliError::TooManyOrders { .. } => {
                format!("{}: {}\n", PROGRAM, self)
            }
            CliError::Rejected(_) => format!("{}\n", self),
        }
    }
}

impl Args {
    /// Parse command line arguments from `std::env::args_os()`
    pub fn parse() -> Result<Self, CliError> {
        Self::parse_from(std::env::args_os().skip(1))
    }

    /// Parse command line arguments, not including the program name
    ///
    /// The first argument other than `-v`/`--verbose` selects the command:
    /// `-h` prints the usage summary whatever follows it, `-c` and `-a`
    /// take every remaining argument as their order, and anything else
    /// starts a sequence in which every token must be an integer.
    pub fn parse_from<I, T>(args: I) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let mut args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        let Some(ix) = args.iter().position(|arg| !is_verbose_flag(arg)) else {
            // Nothing, or only flags such as `-v`, was given.
            return Err(CliError::NoArguments);
        };
        let lead = match args[ix].to_str() {
            Some("-h" | "--help") => Lead::Help,
            Some("-c" | "-a") => Lead::Order,
            _ => Lead::Sequence,
        };
        match lead {
            Lead::Help => {
                return Ok(Args {
                    command: Command::Help,
                    verbose: false,
                })
            }
            Lead::Order => {}
            // Keep the parser from reading tokens such as `-x` as flags.
            Lead::Sequence => args.insert(ix, OsString::from("--")),
        }
        let cli = Cli::try_parse_from(std::iter::once(OsString::from(PROGRAM)).chain(args))
            .map_err(|err| CliError::Rejected(err.to_string()))?;

        let command = if let Some(values) = &cli.construct {
            Command::Construct(parse_order('c', values)?)
        } else if let Some(values) = &cli.all {
            Command::Enumerate(parse_order('a', values)?)
        } else {
            let sequence = cli
                .sequence
                .iter()
                .map(|token| parse_integer(token))
                .collect::<Result<_, _>>()?;
            Command::Validate(sequence)
        };
        Ok(Args {
            command,
            verbose: cli.verbose,
        })
    }
}

/// Parses the single value that must follow `-c` or `-a`.
fn parse_order(flag: char, values: &[String]) -> Result<usize, CliError> {
    let token = match values {
        [] => return Err(CliError::MissingOrder { flag }),
        [token] => token,
        _ => return Err(CliError::TooManyOrders { flag }),
    };
    let order = parse_integer(token)?;
    usize::try_from(order).map_err(|_| CliError::InvalidOrder(token.clone()))
}

fn parse_integer(token: &str) -> Result<i64, CliError> {
    token
        .parse()
        .map_err(|_| CliError::NotAnInteger(token.to_string()))
}

/// Formats a sequence as `[a, b, c]`.
#[derive(Debug, Clone, Copy)]
pub struct Bracketed<'a>(pub &'a [i64]);

impl fmt::Display for Bracketed<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (ix, value) in self.0.iter().enumerate() {
            if ix > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, "]")
    }
}

/// Executes a command, writing its report to `out`.
///
/// [`Command::Help`] writes nothing, because the usage summary belongs on
/// the standard error stream. Fails if the order is too large for its
/// sequence buffer to be allocated, or if writing fails.
pub fn run<W: Write>(command: &Command, out: &mut W) -> Result<()> {
    match command {
        Command::Help => {}
        Command::Construct(order) => {
            let mut constructor = new_constructor(*order)?;
            match constructor.find_first() {
                Some(sequence) => writeln!(out, "Your sequence: {}", Bracketed(sequence))?,
                None => {
                    debug!(order, "no pairing of this order exists");
                    writeln!(out, "No results found.")?;
                }
            }
        }
        Command::Enumerate(order) => enumerate(new_constructor(*order)?, out)?,
        Command::Validate(sequence) => {
            writeln!(out, "Your sequence: {}", Bracketed(sequence))?;
            match validate(sequence) {
                Ok(()) => writeln!(out, "It is a langford pairing!")?,
                Err(violation) => {
                    debug!(%violation, "not a langford pairing");
                    writeln!(out, "It is NOT a langford pairing.")?;
                }
            }
        }
    }
    Ok(())
}

fn new_constructor(order: usize) -> Result<Constructor> {
    Constructor::try_new(order).with_context(|| format!("order {} is too large", order))
}

/// Writes every pairing found by `constructor`, one per line, followed by
/// their number.
fn enumerate<W: Write>(mut constructor: Constructor, out: &mut W) -> io::Result<()> {
    let mut count = 0usize;
    let mut result = Ok(());
    constructor.solve(|sequence| match writeln!(out, "{}", Bracketed(sequence)) {
        Ok(()) => {
            count += 1;
            ControlFlow::Continue(())
        }
        Err(err) => {
            result = Err(err);
            ControlFlow::Break(())
        }
    });
    result?;
    match count {
        0 => writeln!(out, "No results found."),
        1 => writeln!(out, "Found 1 pairing."),
        _ => writeln!(out, "Found {} pairings.", count),
    }
}
