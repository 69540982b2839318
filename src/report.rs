//! Machine-readable run reports.
//!
//! `--report <path>` writes a JSON document describing the whole run: the
//! resolved settings, one entry per candidate, and the summary counts. The
//! stdout line protocol stays the human surface; the report is for scripts
//! and CI steps that want to act on results without parsing log lines.
//!
//! ```text
//! {
//!   "settings": { "in_dir": "...", "out_dir": "...", "width": 500, ... },
//!   "files": [
//!     { "input": "...", "output": "...", "status": "converted" },
//!     { "input": "...", "output": "...", "status": "failed", "message": "..." }
//!   ],
//!   "summary": { "converted": 1, "skipped": 0, "failed": 1 }
//! }
//! ```
//!
//! The `message` field appears only on failed entries. File entries follow
//! the result order of the batch runner, sorted by input path.

use crate::batch::{BatchSummary, FileResult, Outcome};
use crate::options::RunOptions;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Top-level report document.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RunReport {
    pub settings: ReportSettings,
    pub files: Vec<FileEntry>,
    pub summary: ReportSummary,
}

/// The resolved settings the run actually used, absolute paths included.
/// `jobs` is the requested worker count; `null` means all cores.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ReportSettings {
    pub in_dir: PathBuf,
    pub out_dir: PathBuf,
    pub width: u32,
    pub quality: u32,
    pub force: bool,
    pub dry_run: bool,
    pub jobs: Option<usize>,
    pub excludes: Vec<String>,
}

/// One candidate's fate.
#[derive(Debug, Clone, serde::Serialize)]
pub struct FileEntry {
    pub input: PathBuf,
    pub output: PathBuf,
    pub status: FileStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Converted,
    Reported,
    Skipped,
    Failed,
}

/// Summary counts, matching the stdout summary line.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ReportSummary {
    pub converted: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl RunReport {
    /// Assemble a report from the run's resolved options and results.
    pub fn build(options: &RunOptions, results: &[FileResult], summary: &BatchSummary) -> Self {
        RunReport {
            settings: ReportSettings {
                in_dir: options.in_dir.clone(),
                out_dir: options.out_dir.clone(),
                width: options.width,
                quality: options.quality.value(),
                force: options.force,
                dry_run: options.dry_run,
                jobs: options.jobs,
                excludes: options.excludes.clone(),
            },
            files: results.iter().map(FileEntry::from_result).collect(),
            summary: ReportSummary {
                converted: summary.converted,
                skipped: summary.skipped,
                failed: summary.failed,
            },
        }
    }

    /// Write the report as pretty-printed JSON.
    pub fn write(&self, path: &Path) -> Result<(), ReportError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

impl FileEntry {
    fn from_result(result: &FileResult) -> Self {
        let (status, message) = match &result.outcome {
            Outcome::Converted => (FileStatus::Converted, None),
            Outcome::Reported => (FileStatus::Reported, None),
            Outcome::Skipped => (FileStatus::Skipped, None),
            Outcome::Failed(msg) => (FileStatus::Failed, Some(msg.clone())),
        };
        FileEntry {
            input: result.input.clone(),
            output: result.output.clone(),
            status,
            message,
        }
    }
}
