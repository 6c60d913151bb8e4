//! CLI output formatting.
//!
//! Rendering functions return `String`s so they can be tested; the `print_*`
//! wrappers write them to stdout.

use std::fmt::Write as _;

use crate::error::StudioResult;
use crate::replay::Trace;
use crate::sort::{listing, listing_line, BucketScheme, Snapshot};

use super::args::OutputFormat;

/// Result of one verification run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyOutcome {
    /// Input that was traced.
    pub input: Vec<i64>,
    /// Number of steps in the trace.
    pub steps: usize,
    /// Checksum of the first generation.
    pub checksum: String,
    /// Whether the replay produced the same checksum.
    pub identical: bool,
    /// Guard failure, if any.
    pub violation: Option<String>,
}

impl VerifyOutcome {
    /// Whether this run passed every check.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.identical && self.violation.is_none()
    }
}

/// Print version information.
pub fn print_version() {
    println!("bucket-studio {}", env!("CARGO_PKG_VERSION"));
}

/// Print help message.
pub fn print_help() {
    println!(
        r"bucket-studio - Step-by-step bucket sort traces

USAGE:
    bucket-studio <COMMAND> [OPTIONS]

COMMANDS:
    generate                    Sample a random array and print its trace
        --seed <N>              Seed for the array (default: random)
        --size <N>              Number of elements (default: 12)
        --config <FILE>         Load settings from a YAML file
        --format <FMT>          text, json or yaml (default: text)

    run <v1,v2,...>             Print the trace of the given array
        --format <FMT>          text, json or yaml (default: text)

    verify                      Audit traces and check deterministic replay
        --seed <N>              Seed for the sampled arrays
        --runs <N>              Number of arrays to check (default: 3)

    listing                     Print the illustrative listing
        --config <FILE>         Use the bucket scheme from a YAML file
    help                        Show this help message
    version                     Show version information

EXAMPLES:
    bucket-studio generate --seed 42
    bucket-studio run 5,25,45,65,85,15
    bucket-studio run 5,25,45 --format json
    bucket-studio verify --runs 10

Set RUST_LOG=debug to see generator events on stderr.
"
    );
}

/// Render the listing for `scheme` with line numbers, marking `highlight`.
#[must_use]
pub fn render_listing(scheme: &BucketScheme, highlight: Option<usize>) -> String {
    let mut out = String::new();
    for (i, line) in listing(scheme).iter().enumerate() {
        let marker = if highlight == Some(i) { '>' } else { ' ' };
        let _ = writeln!(out, "{marker} {:>2} | {line}", i + 1);
    }
    out
}

/// Print the illustrative listing for `scheme`.
pub fn print_listing(scheme: &BucketScheme) {
    print!("{}", render_listing(scheme, None));
}

/// Render a single snapshot as text.
///
/// ```text
/// [3/20] distribute  25 falls in the range 20-40, so it goes to bucket 1.
///   array:   5  *25  45   .
///   bucket 0 [0-20):  5
/// ```
#[must_use]
pub fn render_snapshot(
    index: usize,
    total: usize,
    snapshot: &Snapshot,
    scheme: &BucketScheme,
) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "[{}/{total}] {:<11} {}",
        index + 1,
        snapshot.phase(),
        snapshot.narration
    );

    let active = snapshot.active_index();
    let slots: Vec<String> = snapshot
        .values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let mark = if active == Some(i) { "*" } else { "" };
            v.map_or_else(|| format!("{mark}."), |v| format!("{mark}{v}"))
        })
        .collect();
    let _ = writeln!(out, "  array:  {}", slots.join(" "));

    for (b, contents) in snapshot.buckets.iter().enumerate() {
        let mark = if snapshot.active_bucket() == Some(b) { '*' } else { ' ' };
        let items: Vec<String> = contents.iter().map(ToString::to_string).collect();
        let _ = writeln!(
            out,
            " {mark}bucket {b} [{}): {}",
            scheme.label(b),
            items.join(" ")
        );
    }

    let code = snapshot
        .highlight_line
        .and_then(|line| listing_line(scheme, line).map(|text| (line, text)));
    if let Some((line, text)) = code {
        let _ = writeln!(out, "  code {:>2}: {}", line + 1, text.trim());
    }
    out
}

/// Render a whole trace as text.
#[must_use]
pub fn render_trace_text(trace: &Trace) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "input:    {:?}", trace.input);
    let _ = writeln!(out, "steps:    {}", trace.len());
    let _ = writeln!(out, "checksum: {}\n", trace.checksum);
    for (i, snapshot) in trace.steps.iter().enumerate() {
        out.push_str(&render_snapshot(i, trace.len(), snapshot, &trace.scheme));
        out.push('\n');
    }
    let _ = writeln!(out, "sorted:   {:?}", trace.sorted());
    out
}

/// Render a trace in the requested format.
///
/// # Errors
///
/// Returns error if JSON or YAML serialization fails.
pub fn render_trace(trace: &Trace, format: OutputFormat) -> StudioResult<String> {
    match format {
        OutputFormat::Text => Ok(render_trace_text(trace)),
        OutputFormat::Json => trace.to_json(),
        OutputFormat::Yaml => trace.to_yaml(),
    }
}

/// Print verification results.
pub fn print_verify_results(outcomes: &[VerifyOutcome]) {
    let passed = outcomes.iter().filter(|o| o.passed()).count();
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Trace Verification");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");

    for (i, outcome) in outcomes.iter().enumerate() {
        let sym = if outcome.passed() { "✓" } else { "✗" };
        println!("  {sym} Run {}: {:?}", i + 1, outcome.input);
        println!("      steps: {}  checksum: {}", outcome.steps, outcome.checksum);
        if !outcome.identical {
            println!("      replay produced a different checksum");
        }
        if let Some(violation) = &outcome.violation {
            println!("      guard: {violation}");
        }
    }

    let status = if passed == outcomes.len() { "PASSED" } else { "FAILED" };
    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Result: {status} ({passed}/{} runs)", outcomes.len());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
}
