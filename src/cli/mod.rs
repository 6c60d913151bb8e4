//! CLI module for bucket-studio.
//!
//! All CLI logic lives here rather than in `main.rs` so it can be tested.
//! The entry point `run_cli` is called from `main.rs` with parsed arguments.

mod args;
mod commands;
mod output;

pub use args::{parse_input, Args, Command, OutputFormat};
pub use commands::{generate_trace, resolve_config, run_cli, verify_runs};
pub use output::{
    print_help, print_listing, print_version, render_listing, render_snapshot, render_trace,
    VerifyOutcome,
};
