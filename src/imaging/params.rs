//! Parameter types for conversion operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the [`batch`](crate::batch) runner (which decides what
//! to convert) and the [`backend`](super::backend) (which does the actual
//! pixel work). This separation allows swapping backends (e.g. for testing
//! with a mock) without changing batch logic.

use std::path::PathBuf;

/// Quality setting for lossy WebP encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(75)
    }
}

/// Everything one conversion needs: where to read, where to write, how
/// wide, how lossy.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertParams {
    pub source: PathBuf,
    pub output: PathBuf,
    /// Target width in pixels; sources narrower than this keep their size.
    pub width: u32,
    pub quality: Quality,
}
