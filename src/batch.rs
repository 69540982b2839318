//! Batch execution: one result per candidate, no matter what.
//!
//! The batch runner takes the sorted candidate list from discovery and
//! produces exactly one [`FileResult`] for every input. Per-file failures are
//! captured in the result instead of aborting the run, so one unreadable
//! image never blocks the rest of the batch.
//!
//! Output paths are claimed up front: when two inputs would land on the same
//! output file, the first one in sorted order keeps it and the rest fail
//! with a collision message before any conversion starts. Collision failures
//! keep their candidate's slot in the dispatch order, so progress events
//! stay in candidate order when running on a single worker.

use crate::imaging::{ConvertParams, ImageBackend};
use crate::options::RunOptions;
use crate::plan::{self, Decision};
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;

/// What happened to a single candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The output file was written.
    Converted,
    /// Dry-run: the file would have been converted.
    Reported,
    /// The output already existed and `--force` was not given.
    Skipped,
    /// Conversion failed; the message says why.
    Failed(String),
}

/// The per-file record a run produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileResult {
    pub input: PathBuf,
    pub output: PathBuf,
    pub outcome: Outcome,
}

/// Counts for the end-of-run summary line.
///
/// Dry-run results count as converted: the summary reports what the run
/// would do, in the same shape as a real run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub converted: usize,
    pub skipped: usize,
    pub failed: usize,
    pub out_dir: PathBuf,
}

impl BatchSummary {
    pub fn tally(results: &[FileResult], out_dir: &Path) -> Self {
        let mut summary = BatchSummary {
            converted: 0,
            skipped: 0,
            failed: 0,
            out_dir: out_dir.to_path_buf(),
        };
        for result in results {
            match result.outcome {
                Outcome::Converted | Outcome::Reported => summary.converted += 1,
                Outcome::Skipped => summary.skipped += 1,
                Outcome::Failed(_) => summary.failed += 1,
            }
        }
        summary
    }
}

/// One dispatch slot per candidate, in candidate order.
enum Work {
    /// The candidate owns its output path; plan and convert it.
    Claimed { input: PathBuf, output: PathBuf },
    /// The output path belongs to an earlier candidate; fail in place.
    Collision(FileResult),
}

/// Process every candidate and return one result per input, in candidate
/// order.
///
/// Candidates are expected in sorted order, as [`crate::scan::discover`]
/// returns them; collision claims and result order depend on it. Each result
/// is also sent on `events` as its slot completes — in candidate order on a
/// single worker, in completion order otherwise. The sender is dropped
/// before returning, so a receiver loop terminates once the batch is done.
pub fn run(
    backend: &impl ImageBackend,
    candidates: &[PathBuf],
    options: &RunOptions,
    events: Option<Sender<FileResult>>,
) -> Vec<FileResult> {
    let work = claim_outputs(candidates, &options.out_dir);

    work.par_iter()
        .map(|item| {
            let result = match item {
                Work::Claimed { input, output } => handle_one(backend, input, output, options),
                Work::Collision(failed) => failed.clone(),
            };
            if let Some(tx) = &events {
                let _ = tx.send(result.clone());
            }
            result
        })
        .collect()
}

/// Pair each candidate with its output path, in candidate order.
///
/// The first input in list order keeps a contested output; later inputs for
/// the same output become failed results naming the winner, in the slot
/// their candidate occupies.
fn claim_outputs(candidates: &[PathBuf], out_dir: &Path) -> Vec<Work> {
    let mut owners: HashMap<PathBuf, PathBuf> = HashMap::new();
    let mut work = Vec::with_capacity(candidates.len());

    for input in candidates {
        let output = plan::output_path(input, out_dir);
        match owners.get(&output) {
            None => {
                owners.insert(output.clone(), input.clone());
                work.push(Work::Claimed {
                    input: input.clone(),
                    output,
                });
            }
            Some(winner) => {
                work.push(Work::Collision(FileResult {
                    input: input.clone(),
                    output: output.clone(),
                    outcome: Outcome::Failed(format!(
                        "output collision: {} already produced by {}",
                        output.display(),
                        winner.display()
                    )),
                }));
            }
        }
    }

    work
}

fn handle_one(
    backend: &impl ImageBackend,
    input: &Path,
    output: &Path,
    options: &RunOptions,
) -> FileResult {
    let decision = plan::decide(output.exists(), options.force, options.dry_run);
    log::debug!(
        "{} -> {}: {:?}",
        input.display(),
        output.display(),
        decision
    );

    let outcome = match decision {
        Decision::Skip => Outcome::Skipped,
        Decision::Report => Outcome::Reported,
        Decision::Convert => {
            let params = ConvertParams {
                source: input.to_path_buf(),
                output: output.to_path_buf(),
                width: options.width,
                quality: options.quality,
            };
            match backend.convert(&params) {
                Ok(()) => Outcome::Converted,
                Err(e) => Outcome::Failed(e.to_string()),
            }
        }
    };

    FileResult {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::Quality;
    use crate::imaging::backend::tests::MockBackend;
    use std::fs;
    use std::sync::mpsc;
    use tempfile::TempDir;

    fn test_options(tmp: &TempDir) -> RunOptions {
        RunOptions {
            in_dir: tmp.path().join("in"),
            out_dir: tmp.path().join("out"),
            width: 500,
            quality: Quality::default(),
            force: false,
            dry_run: false,
            jobs: Some(1),
            excludes: vec![],
        }
    }

    fn candidates(tmp: &TempDir, names: &[&str]) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = names.iter().map(|n| tmp.path().join("in").join(n)).collect();
        paths.sort();
        paths
    }

    fn outcome_for<'a>(results: &'a [FileResult], name: &str) -> &'a Outcome {
        &results
            .iter()
            .find(|r| r.input.ends_with(name))
            .unwrap()
            .outcome
    }

    fn existing_output(options: &RunOptions, name: &str) {
        fs::create_dir_all(&options.out_dir).unwrap();
        fs::write(options.out_dir.join(name), "old").unwrap();
    }

    #[test]
    fn converts_all_fresh_inputs() {
        let tmp = TempDir::new().unwrap();
        let options = test_options(&tmp);
        let inputs = candidates(&tmp, &["a.jpg", "b.png", "c.tif"]);
        let backend = MockBackend::new();

        let results = run(&backend, &inputs, &options, None);

        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|r| r.outcome == Outcome::Converted));
        assert_eq!(backend.get_operations().len(), 3);

        let summary = BatchSummary::tally(&results, &options.out_dir);
        assert_eq!(
            (summary.converted, summary.skipped, summary.failed),
            (3, 0, 0)
        );
    }

    #[test]
    fn skips_inputs_with_existing_outputs() {
        let tmp = TempDir::new().unwrap();
        let options = test_options(&tmp);
        existing_output(&options, "a.webp");
        let inputs = candidates(&tmp, &["a.jpg", "b.png"]);
        let backend = MockBackend::new();

        let results = run(&backend, &inputs, &options, None);

        assert_eq!(*outcome_for(&results, "a.jpg"), Outcome::Skipped);
        assert_eq!(*outcome_for(&results, "b.png"), Outcome::Converted);
        assert_eq!(backend.get_operations().len(), 1);
    }

    #[test]
    fn force_reconverts_existing_outputs() {
        let tmp = TempDir::new().unwrap();
        let mut options = test_options(&tmp);
        options.force = true;
        existing_output(&options, "a.webp");
        let inputs = candidates(&tmp, &["a.jpg", "b.png"]);
        let backend = MockBackend::new();

        let results = run(&backend, &inputs, &options, None);

        assert!(results.iter().all(|r| r.outcome == Outcome::Converted));
        assert_eq!(backend.get_operations().len(), 2);
    }

    #[test]
    fn dry_run_reports_without_touching_the_backend() {
        let tmp = TempDir::new().unwrap();
        let mut options = test_options(&tmp);
        options.dry_run = true;
        existing_output(&options, "a.webp");
        let inputs = candidates(&tmp, &["a.jpg", "b.png", "c.tif"]);
        let backend = MockBackend::new();

        let results = run(&backend, &inputs, &options, None);

        // Existing outputs are still skipped in a dry run.
        assert_eq!(*outcome_for(&results, "a.jpg"), Outcome::Skipped);
        assert_eq!(*outcome_for(&results, "b.png"), Outcome::Reported);
        assert_eq!(*outcome_for(&results, "c.tif"), Outcome::Reported);
        assert!(backend.get_operations().is_empty());

        // A dry run previews the real summary, so reported counts as converted.
        let summary = BatchSummary::tally(&results, &options.out_dir);
        assert_eq!(
            (summary.converted, summary.skipped, summary.failed),
            (2, 1, 0)
        );
    }

    #[test]
    fn one_failure_does_not_abort_the_rest() {
        let tmp = TempDir::new().unwrap();
        let options = test_options(&tmp);
        let inputs = candidates(&tmp, &["a.jpg", "bad.png", "c.tif"]);
        let backend = MockBackend::failing_on(&["bad.png"]);

        let results = run(&backend, &inputs, &options, None);

        assert_eq!(*outcome_for(&results, "a.jpg"), Outcome::Converted);
        assert_eq!(*outcome_for(&results, "c.tif"), Outcome::Converted);
        assert!(matches!(
            outcome_for(&results, "bad.png"),
            Outcome::Failed(msg) if msg.contains("bad.png")
        ));

        let summary = BatchSummary::tally(&results, &options.out_dir);
        assert_eq!(
            summary.converted + summary.skipped + summary.failed,
            inputs.len()
        );
    }

    #[test]
    fn colliding_outputs_fail_all_but_the_first() {
        let tmp = TempDir::new().unwrap();
        let options = test_options(&tmp);
        // Both flatten to out/x.webp; a/x.jpg sorts first and wins.
        let inputs = candidates(&tmp, &["a/x.jpg", "b/x.png"]);
        let backend = MockBackend::new();

        let results = run(&backend, &inputs, &options, None);

        assert_eq!(*outcome_for(&results, "a/x.jpg"), Outcome::Converted);
        assert!(matches!(
            outcome_for(&results, "b/x.png"),
            Outcome::Failed(msg) if msg.contains("collision") && msg.contains("x.jpg")
        ));
        assert_eq!(backend.get_operations().len(), 1);

        let summary = BatchSummary::tally(&results, &options.out_dir);
        assert_eq!(
            (summary.converted, summary.skipped, summary.failed),
            (1, 0, 1)
        );
    }

    #[test]
    fn every_result_is_sent_on_the_events_channel() {
        let tmp = TempDir::new().unwrap();
        let options = test_options(&tmp);
        let inputs = candidates(&tmp, &["a.jpg", "b.png", "c.tif"]);
        let backend = MockBackend::new();
        let (tx, rx) = mpsc::channel();

        let results = run(&backend, &inputs, &options, Some(tx));
        let events: Vec<FileResult> = rx.iter().collect();

        assert_eq!(events.len(), results.len());
        assert_eq!(events.len(), 3);
    }

    #[test]
    fn results_come_back_sorted_by_input() {
        let tmp = TempDir::new().unwrap();
        let options = test_options(&tmp);
        let inputs = candidates(&tmp, &["z.jpg", "a.jpg", "m.png"]);
        let backend = MockBackend::new();

        let results = run(&backend, &inputs, &options, None);

        let mut sorted = results.clone();
        sorted.sort_by(|a, b| a.input.cmp(&b.input));
        assert_eq!(results, sorted);
    }

    #[test]
    fn claim_outputs_pairs_unique_inputs() {
        let tmp = TempDir::new().unwrap();
        let inputs = candidates(&tmp, &["a.jpg", "b.png"]);
        let out_dir = tmp.path().join("out");

        let work = claim_outputs(&inputs, &out_dir);

        assert_eq!(work.len(), 2);
        assert!(matches!(
            &work[0],
            Work::Claimed { output, .. } if *output == out_dir.join("a.webp")
        ));
        assert!(matches!(&work[1], Work::Claimed { .. }));
    }

    #[test]
    fn claim_outputs_keeps_collisions_in_candidate_order() {
        let tmp = TempDir::new().unwrap();
        let inputs = candidates(&tmp, &["a/x.jpg", "b/x.png", "c.jpg"]);
        let out_dir = tmp.path().join("out");

        let work = claim_outputs(&inputs, &out_dir);

        assert_eq!(work.len(), 3);
        assert!(matches!(&work[0], Work::Claimed { .. }));
        assert!(matches!(
            &work[1],
            Work::Collision(r) if r.input.ends_with("b/x.png")
        ));
        assert!(matches!(&work[2], Work::Claimed { .. }));
    }

    #[test]
    fn single_worker_events_follow_candidate_order() {
        let tmp = TempDir::new().unwrap();
        let options = test_options(&tmp);
        let inputs = candidates(&tmp, &["a/x.jpg", "b/x.png", "c.jpg"]);
        let backend = MockBackend::new();
        let (tx, rx) = mpsc::channel();

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(1)
            .build()
            .unwrap();
        let results = pool.install(|| run(&backend, &inputs, &options, Some(tx)));

        // One worker dispatches slots left to right, collision included.
        let events: Vec<FileResult> = rx.iter().collect();
        assert_eq!(events, results);
        assert!(matches!(events[1].outcome, Outcome::Failed(_)));
    }
}
