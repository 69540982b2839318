//! Per-file conversion decisions.
//!
//! Everything here is a pure function. The batch runner supplies the one
//! filesystem fact a decision needs (does the output already exist?) as a
//! plain boolean, so the skip/force/dry-run matrix can be tested without a
//! filesystem.

use std::path::{Path, PathBuf};

/// Planner verdict for one candidate file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Output already exists and overwrite was not requested.
    Skip,
    /// A real run would convert this file; report only, write nothing.
    Report,
    /// Perform the conversion.
    Convert,
}

/// Decide what to do with one candidate.
///
/// Skip wins over everything: an existing output without `force` is never
/// re-encoded, not even in a dry run.
pub fn decide(output_exists: bool, force: bool, dry_run: bool) -> Decision {
    if output_exists && !force {
        Decision::Skip
    } else if dry_run {
        Decision::Report
    } else {
        Decision::Convert
    }
}

/// Derive the output path for a source file: the source's base name with a
/// `.webp` extension, directly under the output directory.
///
/// Nesting under the input directory is deliberately flattened, which is why
/// two sources sharing a stem collide on one output path. The batch runner
/// detects that case before converting anything.
pub fn output_path(source: &Path, out_dir: &Path) -> PathBuf {
    let mut name = source.file_stem().unwrap_or_default().to_os_string();
    name.push(".webp");
    out_dir.join(name)
}
