//! CLI output for batch runs.
//!
//! # Line Protocol
//!
//! One line per candidate, emitted as results complete, then a single
//! summary line:
//!
//! ```text
//! OK /photos/b.jpg -> /photos/output/b.webp
//! SKIP /photos/a.jpg (exists)
//! FAIL /photos/c.jpg Failed to decode /photos/c.jpg: unsupported format
//! converted=1 skipped=1 failed=1 outDir=/photos/output
//! ```
//!
//! A dry run prints the same `OK` line a real conversion would, so the
//! preview reads exactly like the run it predicts. Paths are printed as
//! resolved absolute paths, making every line actionable on its own.
//!
//! # Architecture
//!
//! Each line has a `format_*` function (returns `String`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are
//! pure — no I/O, no side effects.

use crate::batch::{BatchSummary, FileResult, Outcome};

/// Format the protocol line for one file result.
pub fn format_file_line(result: &FileResult) -> String {
    match &result.outcome {
        Outcome::Converted | Outcome::Reported => format!(
            "OK {} -> {}",
            result.input.display(),
            result.output.display()
        ),
        Outcome::Skipped => format!("SKIP {} (exists)", result.input.display()),
        Outcome::Failed(msg) => format!("FAIL {} {}", result.input.display(), msg),
    }
}

/// Print one file result line to stdout.
pub fn print_file_line(result: &FileResult) {
    println!("{}", format_file_line(result));
}

/// Format the end-of-run summary line.
pub fn format_summary_line(summary: &BatchSummary) -> String {
    format!(
        "converted={} skipped={} failed={} outDir={}",
        summary.converted,
        summary.skipped,
        summary.failed,
        summary.out_dir.display()
    )
}

/// Print the summary line to stdout.
pub fn print_summary_line(summary: &BatchSummary) {
    println!("{}", format_summary_line(summary));
}
