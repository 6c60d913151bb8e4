//! CLI argument parsing.
//!
//! This module provides the argument parser for the bucket-studio CLI.
//! Parsing accepts any iterator of strings so it can be tested without a
//! process environment.

use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{StudioError, StudioResult};

/// CLI arguments container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    /// The command to execute.
    pub command: Command,
}

/// How a trace is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One block of text per step.
    #[default]
    Text,
    /// Pretty-printed JSON trace.
    Json,
    /// YAML trace.
    Yaml,
}

impl FromStr for OutputFormat {
    type Err = StudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "yaml" => Ok(Self::Yaml),
            other => Err(StudioError::invalid_input(format!(
                "unknown format '{other}' (expected text, json or yaml)"
            ))),
        }
    }
}

/// Available CLI commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Sample a random input and print its trace.
    Generate {
        /// Optional seed override.
        seed: Option<u64>,
        /// Optional array size override.
        size: Option<usize>,
        /// Optional configuration file.
        config_path: Option<PathBuf>,
        /// Output format.
        format: OutputFormat,
    },
    /// Print the trace of a given input.
    Run {
        /// Values to sort.
        input: Vec<i64>,
        /// Output format.
        format: OutputFormat,
    },
    /// Audit traces and check that replays are identical.
    Verify {
        /// Optional seed; entropy when absent.
        seed: Option<u64>,
        /// Number of inputs to check.
        runs: usize,
    },
    /// Print the illustrative listing.
    Listing {
        /// Optional configuration file supplying the bucket scheme.
        config_path: Option<PathBuf>,
    },
    /// Arguments could not be parsed; carries the reason.
    Invalid(String),
    /// Show help
    Help,
    /// Show version
    Version,
}

/// Parse a comma-separated list of integers such as `5,25,45`.
///
/// # Errors
///
/// Returns `StudioError::InvalidInput` naming the first bad entry.
pub fn parse_input(text: &str) -> StudioResult<Vec<i64>> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    text.split(',')
        .map(str::trim)
        .map(|item| {
            item.parse::<i64>()
                .map_err(|_| StudioError::invalid_input(format!("'{item}' is not an integer")))
        })
        .collect()
}

impl Args {
    /// Parse command-line arguments from an iterator.
    #[must_use]
    pub fn parse_from<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
        Self::parse_from_vec(&args)
    }

    /// Parse command-line arguments from the environment.
    #[must_use]
    pub fn parse() -> Self {
        Self::parse_from(std::env::args())
    }

    /// Internal parsing from a vector of strings.
    fn parse_from_vec(args: &[String]) -> Self {
        if args.len() < 2 {
            return Self {
                command: Command::Help,
            };
        }

        let command = match args[1].as_str() {
            "generate" => Self::parse_generate_command(args),
            "run" => Self::parse_run_command(args),
            "verify" => Self::parse_verify_command(args),
            "listing" => Self::parse_listing_command(args),
            "-h" | "--help" | "help" => Command::Help,
            "-V" | "--version" | "version" => Command::Version,
            unknown => Command::Invalid(format!("unknown command '{unknown}'")),
        };

        Self { command }
    }

    /// Parse the 'generate' command arguments.
    fn parse_generate_command(args: &[String]) -> Command {
        let mut seed = None;
        let mut size = None;
        let mut config_path = None;
        let mut format = OutputFormat::default();

        let mut i = 2;
        while i < args.len() {
            let value = args.get(i + 1);
            let parsed = match (args[i].as_str(), value) {
                ("--seed", Some(v)) => parse_number("--seed", v).map(|n| seed = Some(n)),
                ("--size", Some(v)) => parse_number("--size", v).map(|n| size = Some(n)),
                ("--config", Some(v)) => {
                    config_path = Some(PathBuf::from(v));
                    Ok(())
                }
                ("--format", Some(v)) => v.parse().map(|f| format = f),
                (flag, None) if flag.starts_with("--") => Err(StudioError::invalid_input(
                    format!("{flag} requires a value"),
                )),
                (flag, _) => Err(StudioError::invalid_input(format!(
                    "unexpected argument '{flag}' for 'generate'"
                ))),
            };
            if let Err(e) = parsed {
                return Command::Invalid(e.to_string());
            }
            i += 2;
        }

        Command::Generate {
            seed,
            size,
            config_path,
            format,
        }
    }

    /// Parse the 'run' command arguments.
    fn parse_run_command(args: &[String]) -> Command {
        let Some(text) = args.get(2) else {
            return Command::Invalid("'run' requires a comma-separated input".to_string());
        };

        let input = match parse_input(text) {
            Ok(input) => input,
            Err(e) => return Command::Invalid(e.to_string()),
        };

        let format = match (args.get(3).map(String::as_str), args.get(4), args.len()) {
            (None, _, _) => OutputFormat::default(),
            (Some("--format"), Some(v), 5) => match v.parse::<OutputFormat>() {
                Ok(f) => f,
                Err(e) => return Command::Invalid(e.to_string()),
            },
            _ => {
                return Command::Invalid(
                    "usage: run <v1,v2,...> [--format text|json|yaml]".to_string(),
                )
            }
        };

        Command::Run { input, format }
    }

    /// Parse the 'listing' command arguments.
    fn parse_listing_command(args: &[String]) -> Command {
        match (args.get(2).map(String::as_str), args.get(3), args.len()) {
            (None, _, _) => Command::Listing { config_path: None },
            (Some("--config"), Some(path), 4) => Command::Listing {
                config_path: Some(PathBuf::from(path)),
            },
            _ => Command::Invalid("usage: listing [--config FILE]".to_string()),
        }
    }

    /// Parse the 'verify' command arguments.
    fn parse_verify_command(args: &[String]) -> Command {
        let mut seed = None;
        let mut runs = 3;

        let mut i = 2;
        while i < args.len() {
            let parsed = match (args[i].as_str(), args.get(i + 1)) {
                ("--seed", Some(v)) => parse_number("--seed", v).map(|n| seed = Some(n)),
                ("--runs", Some(v)) => parse_number("--runs", v).map(|n| runs = n),
                (flag, None) if flag.starts_with("--") => Err(StudioError::invalid_input(
                    format!("{flag} requires a value"),
                )),
                (flag, _) => Err(StudioError::invalid_input(format!(
                    "unexpected argument '{flag}' for 'verify'"
                ))),
            };
            if let Err(e) = parsed {
                return Command::Invalid(e.to_string());
            }
            i += 2;
        }

        Command::Verify { seed, runs }
    }
}

/// Parse the value of a numeric flag.
fn parse_number<T: FromStr>(flag: &str, value: &str) -> StudioResult<T> {
    value
        .parse()
        .map_err(|_| StudioError::invalid_input(format!("{flag} expects a number, got '{value}'")))
}

