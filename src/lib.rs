//! # photo500
//!
//! Batch image converter for directories of photos. Point it at an input
//! directory and it re-encodes every raster image it finds as a downsized
//! lossy WebP in an output directory. Outputs that already exist are skipped,
//! so re-running after adding a handful of photos only pays for the new ones.
//!
//! # Architecture: Discover, Decide, Convert
//!
//! A run is a fixed three-step pipeline:
//!
//! ```text
//! 1. Discover   input dir   →  sorted candidate list        (walk + filter)
//! 2. Decide     candidate   →  Skip | Report | Convert      (pure, per file)
//! 3. Convert    candidate   →  <stem>.webp in the out dir   (decode, resize, encode)
//! ```
//!
//! This separation exists for three reasons:
//!
//! - **Reproducibility**: the candidate list is fixed and sorted before any
//!   conversion starts, so runs behave the same regardless of worker count.
//! - **Isolation**: every candidate reaches exactly one outcome, and a file
//!   that fails to decode never stops the rest of the batch.
//! - **Testability**: decisions are pure functions of their inputs, so the
//!   skip/force/dry-run matrix can be tested without touching an encoder.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`options`] | Run configuration from CLI flags: path resolution, worker count |
//! | [`scan`] | Candidate discovery — recursive walk, extension filter, exclusion globs |
//! | [`plan`] | Pure per-file decisions and output path derivation |
//! | [`batch`] | Drives candidates through planner and codec, tallies outcomes |
//! | [`imaging`] | Decode, resize, and WebP encode behind the [`imaging::ImageBackend`] trait |
//! | [`output`] | Console protocol — `OK`/`SKIP`/`FAIL` lines and the summary |
//! | [`report`] | Optional JSON record of a finished run |
//!
//! # Design Decisions
//!
//! ## WebP-Only Output
//!
//! Every output is a lossy WebP at a single target width. One modern format
//! with universal browser support keeps the output directory flat and
//! predictable; callers that need more formats can run the tool twice into
//! different directories.
//!
//! ## Flat Output Naming
//!
//! Outputs are named `<input stem>.webp` directly under the output directory,
//! regardless of how deeply the source was nested. Two sources that share a
//! stem therefore collide; the batch detects this up front and reports the
//! loser as failed instead of letting two writers race for one path.
//!
//! ## Pure-Rust Imaging
//!
//! The [`imaging`] module uses the `image` crate (Lanczos3 resampling) and the
//! `webp` crate (lossy encoding) — both pure Rust. No system ImageMagick or
//! libvips to install, no version conflicts; the binary is self-contained.
//!
//! ## Skip-By-Default
//!
//! An existing output is taken as "already done". Only `--force` re-encodes.
//! This makes the tool safe to run from a cron job or a build script: the
//! steady-state cost of a run with no new photos is a directory walk.

pub mod batch;
pub mod imaging;
pub mod options;
pub mod output;
pub mod plan;
pub mod report;
pub mod scan;
