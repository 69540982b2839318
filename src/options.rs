//! Run configuration assembled from CLI flags.
//!
//! [`RunOptions`] is built once at startup and never mutated. Path fields are
//! resolved to absolute form by [`RunOptions::resolve`], which also creates
//! the output directory; everything downstream can rely on both directories
//! existing and being absolute.

use crate::imaging::Quality;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OptionsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Input directory not found: {0}")]
    InputDirMissing(PathBuf),
    #[error("Input path is not a directory: {0}")]
    InputNotDir(PathBuf),
}

/// Immutable configuration for one run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Directory searched for candidate images.
    pub in_dir: PathBuf,
    /// Directory converted files are written to.
    pub out_dir: PathBuf,
    /// Target width in pixels. Narrower sources keep their size.
    pub width: u32,
    /// Lossy WebP encoding quality.
    pub quality: Quality,
    /// Overwrite outputs that already exist.
    pub force: bool,
    /// Report what would be converted without writing image files.
    pub dry_run: bool,
    /// Worker count; `None` means one per core.
    pub jobs: Option<usize>,
    /// Extra exclusion globs, matched against paths relative to `in_dir`.
    pub excludes: Vec<String>,
}

impl RunOptions {
    /// Validate the input directory, create the output directory, and fix
    /// both paths to canonical absolute form.
    ///
    /// Resolution happens before discovery so that the output-directory
    /// exclusion in [`scan`](crate::scan) can compare real paths rather than
    /// whatever mix of relative spellings arrived on the command line.
    pub fn resolve(mut self) -> Result<Self, OptionsError> {
        if !self.in_dir.exists() {
            return Err(OptionsError::InputDirMissing(self.in_dir));
        }
        if !self.in_dir.is_dir() {
            return Err(OptionsError::InputNotDir(self.in_dir));
        }
        fs::create_dir_all(&self.out_dir)?;
        self.in_dir = fs::canonicalize(&self.in_dir)?;
        self.out_dir = fs::canonicalize(&self.out_dir)?;
        Ok(self)
    }

    /// Resolve the effective worker count.
    ///
    /// - `None` → use all available cores
    /// - `Some(n)` → use `min(n, cores)` (users can constrain down, not up)
    pub fn effective_jobs(&self) -> usize {
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        self.jobs.map(|n| n.min(cores)).unwrap_or(cores)
    }
}
