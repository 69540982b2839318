//! Candidate discovery under the input directory.
//!
//! Walks the input tree, keeps files with a known raster extension, drops
//! anything matched by an exclusion glob, and returns the survivors in
//! sorted order so later stages behave identically from run to run.
//!
//! ## Exclusion rules
//!
//! Patterns match against a candidate's path relative to the input root,
//! case-insensitively. Two sources of patterns:
//!
//! - `--exclude` flags, verbatim from the user
//! - the output directory itself, escaped, as `<rel>/**`, whenever it sits
//!   inside the input directory
//!
//! The second rule is what makes repeated runs stable when the output
//! directory is nested under the input directory: files the converter wrote
//! on an earlier run are never picked up as candidates on the next one.
//! Hidden entries (dot-prefixed files and directories) are always skipped.

use crate::imaging::INPUT_EXTENSIONS;
use crate::options::RunOptions;
use glob::{MatchOptions, Pattern};
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Invalid exclude pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        source: glob::PatternError,
    },
}

/// Discover candidate files under the input directory, in sorted order.
///
/// Discovery completes fully before any conversion starts; the returned list
/// is the fixed work set for the whole run.
pub fn discover(options: &RunOptions) -> Result<Vec<PathBuf>, ScanError> {
    let patterns = build_exclusions(options)?;
    let match_options = match_options();

    let mut files = Vec::new();
    for entry in WalkDir::new(&options.in_dir)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e))
    {
        let entry = entry?;
        if !entry.file_type().is_file() || !has_image_extension(entry.path()) {
            continue;
        }

        let rel = entry
            .path()
            .strip_prefix(&options.in_dir)
            .unwrap_or_else(|_| entry.path());
        if patterns
            .iter()
            .any(|p| p.matches_path_with(rel, match_options))
        {
            log::debug!("excluded {}", entry.path().display());
            continue;
        }

        files.push(entry.path().to_path_buf());
    }

    files.sort();
    Ok(files)
}

/// Compile the exclusion patterns for a run: the output-directory pattern
/// (when applicable) plus any user-supplied globs.
fn build_exclusions(options: &RunOptions) -> Result<Vec<Pattern>, ScanError> {
    let mut patterns = Vec::new();

    if let Some(raw) = output_dir_pattern(&options.in_dir, &options.out_dir) {
        patterns.push(compile(&raw)?);
    }
    for raw in &options.excludes {
        patterns.push(compile(raw)?);
    }

    for p in &patterns {
        log::debug!("exclude pattern {}", p);
    }
    Ok(patterns)
}

fn compile(raw: &str) -> Result<Pattern, ScanError> {
    Pattern::new(raw).map_err(|source| ScanError::Pattern {
        pattern: raw.to_string(),
        source,
    })
}

/// Pattern covering everything under the output directory, or `None` when
/// the output directory lies outside the input directory (nothing to
/// exclude) or equals it (excluding would empty the whole run).
///
/// The directory prefix is escaped: a bracket or star in a legal directory
/// name must match literally, unlike user `--exclude` strings, which are
/// patterns by contract.
fn output_dir_pattern(in_dir: &Path, out_dir: &Path) -> Option<String> {
    let rel = out_dir.strip_prefix(in_dir).ok()?;
    if rel.as_os_str().is_empty() {
        return None;
    }
    Some(format!("{}/**", Pattern::escape(&rel.to_string_lossy())))
}

/// Case-insensitive matching, like the extension filter.
fn match_options() -> MatchOptions {
    MatchOptions {
        case_sensitive: false,
        ..MatchOptions::new()
    }
}

fn is_hidden(entry: &walkdir::DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

fn has_image_extension(path: &Path) -> bool {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    INPUT_EXTENSIONS.contains(&ext.as_str())
}
