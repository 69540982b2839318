//! Conversion backend trait and shared error type.
//!
//! The [`ImageBackend`] trait defines the single operation a backend must
//! support: convert one source image into a WebP file at an output path.
//!
//! The production implementation is
//! [`WebpBackend`](super::webp_backend::WebpBackend) — pure Rust, statically
//! linked into the binary. Tests use the recording mock in [`tests`].

use super::params::ConvertParams;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Trait for conversion backends.
///
/// `Sync` so a single backend instance can be shared across rayon workers.
pub trait ImageBackend: Sync {
    /// Decode, resize, and encode one source image to the output path.
    fn convert(&self, params: &ConvertParams) -> Result<(), BackendError>;
}
