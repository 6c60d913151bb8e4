//! CLI command handlers.
//!
//! This module contains the execution logic for each CLI command.

use std::path::Path;
use std::process::ExitCode;

use tracing::{info, warn};

use crate::config::StudioConfig;
use crate::engine::StudioRng;
use crate::error::StudioResult;
use crate::replay::Trace;
use crate::sort::BucketScheme;

use super::args::OutputFormat;
use super::output::{
    print_help, print_listing, print_verify_results, print_version, render_trace, VerifyOutcome,
};
use super::{Args, Command};

/// Main CLI entry point.
///
/// Dispatches to the appropriate command handler based on parsed arguments.
#[must_use]
pub fn run_cli(args: Args) -> ExitCode {
    match args.command {
        Command::Generate {
            seed,
            size,
            config_path,
            format,
        } => generate(seed, size, config_path.as_deref(), format),
        Command::Run { input, format } => run_input(&input, format),
        Command::Verify { seed, runs } => verify(seed, runs),
        Command::Listing { config_path } => listing(config_path.as_deref()),
        Command::Invalid(reason) => {
            eprintln!("Error: {reason}");
            eprintln!("Run 'bucket-studio help' for usage.");
            ExitCode::from(1)
        }
        Command::Help => {
            print_help();
            ExitCode::SUCCESS
        }
        Command::Version => {
            print_version();
            ExitCode::SUCCESS
        }
    }
}

/// Resolve configuration from an optional file plus command-line overrides.
///
/// # Errors
///
/// Returns error if the file cannot be loaded or the overridden
/// configuration fails validation.
pub fn resolve_config(
    config_path: Option<&Path>,
    seed: Option<u64>,
    size: Option<usize>,
) -> StudioResult<StudioConfig> {
    let mut config = match config_path {
        Some(path) => StudioConfig::load(path)?,
        None => StudioConfig::default(),
    };
    if let Some(seed) = seed {
        config.reproducibility.seed = Some(seed);
    }
    if let Some(size) = size {
        config.input.size = size;
    }
    config.check()?;
    Ok(config)
}

/// Sample an input from `config` and build its trace.
///
/// # Errors
///
/// Returns error if the configuration is inconsistent.
pub fn generate_trace(config: &StudioConfig) -> StudioResult<Trace> {
    let scheme = config.scheme()?;
    let sampler = config.sampler()?;
    let mut rng = config.rng();
    let input = sampler.sample(&mut rng);
    info!(seed = rng.seed(), size = input.len(), "sampled input");
    Trace::generate(&input, scheme)
}

/// Sample a random input and print its trace.
#[must_use]
pub fn generate(
    seed: Option<u64>,
    size: Option<usize>,
    config_path: Option<&Path>,
    format: OutputFormat,
) -> ExitCode {
    let result = resolve_config(config_path, seed, size)
        .and_then(|config| generate_trace(&config))
        .and_then(|trace| render_trace(&trace, format));
    emit(result)
}

/// Print the trace of a given input.
#[must_use]
pub fn run_input(input: &[i64], format: OutputFormat) -> ExitCode {
    let result = Trace::generate(input, BucketScheme::default())
        .and_then(|trace| render_trace(&trace, format));
    emit(result)
}

/// Print the listing for the configured bucket scheme.
#[must_use]
pub fn listing(config_path: Option<&Path>) -> ExitCode {
    let scheme = resolve_config(config_path, None, None).and_then(|config| config.scheme());
    match scheme {
        Ok(scheme) => {
            print_listing(&scheme);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

/// Generate, audit and replay traces for `runs` sampled inputs.
///
/// # Errors
///
/// Returns error if a trace cannot be generated.
pub fn verify_runs(seed: Option<u64>, runs: usize) -> StudioResult<Vec<VerifyOutcome>> {
    let config = resolve_config(None, seed, None)?;
    let scheme = config.scheme()?;
    let sampler = config.sampler()?;
    let mut rng = seed.map_or_else(StudioRng::from_entropy, StudioRng::new);
    info!(seed = rng.seed(), runs, "verifying traces");

    let mut outcomes = Vec::with_capacity(runs);
    for _ in 0..runs {
        let input = sampler.sample(&mut rng);
        let first = Trace::generate(&input, scheme)?;
        let replay = Trace::generate(&input, scheme)?;
        let violation = first.audit().err().map(|e| e.to_string());
        if let Some(v) = &violation {
            warn!(?input, violation = %v, "trace guard failed");
        }
        outcomes.push(VerifyOutcome {
            identical: first.checksum == replay.checksum && first == replay,
            steps: first.len(),
            checksum: first.checksum,
            input,
            violation,
        });
    }
    Ok(outcomes)
}

/// Audit traces and check deterministic replay.
#[must_use]
pub fn verify(seed: Option<u64>, runs: usize) -> ExitCode {
    match verify_runs(seed, runs) {
        Ok(outcomes) => {
            print_verify_results(&outcomes);
            if outcomes.iter().all(VerifyOutcome::passed) {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

fn emit(result: StudioResult<String>) -> ExitCode {
    match result {
        Ok(text) => {
            print!("{text}");
            if !text.ends_with('\n') {
                println!();
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}
