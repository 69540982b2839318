//! Pure Rust conversion backend — no external tools required.
//!
//! ## Crate mapping
//!
//! | Step | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, WebP) | `image` crate, format sniffed from content |
//! | Resize | `image::DynamicImage::resize_exact` with `Lanczos3` filter |
//! | Encode → WebP | `webp::Encoder` (lossy, quality-parameterized) |
//! | Write | `tempfile::NamedTempFile` + rename onto the destination |
//!
//! The `image` crate's own WebP encoder is lossless-only, which is why
//! encoding goes through the `webp` crate instead.

use super::backend::{BackendError, ImageBackend};
use super::calculations::fit_width;
use super::params::ConvertParams;
use image::imageops::FilterType;
use image::{DynamicImage, ImageReader};
use std::io::Write;
use std::path::Path;

/// Extensions whose decoders are compiled in, matched case-insensitively.
pub const INPUT_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "tif", "tiff", "webp"];

/// Pure Rust backend using the `image` and `webp` crates.
///
/// See the [module docs](self) for the crate-to-step mapping.
pub struct WebpBackend;

impl WebpBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WebpBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Load and decode an image from disk.
///
/// The format is sniffed from the file's leading bytes rather than trusted
/// from the extension, so a PNG renamed to `.jpg` still decodes.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    ImageReader::open(path)
        .map_err(BackendError::Io)?
        .with_guessed_format()
        .map_err(BackendError::Io)?
        .decode()
        .map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
        })
}

/// Encode as lossy WebP and write to the destination.
///
/// The encoded bytes go into a temp file in the same directory, which is then
/// renamed onto the destination path. An interrupted run therefore never
/// leaves a truncated output, and existing files are replaced in one step.
fn save_webp(img: &DynamicImage, path: &Path, quality: u32) -> Result<(), BackendError> {
    // webp::Encoder only accepts 8-bit RGB/RGBA buffers
    let normalized;
    let img = match img {
        DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_) => img,
        other => {
            normalized = DynamicImage::ImageRgba8(other.to_rgba8());
            &normalized
        }
    };

    let encoder = webp::Encoder::from_image(img)
        .map_err(|e| BackendError::ProcessingFailed(format!("WebP encode failed: {e}")))?;
    let encoded = encoder.encode(quality as f32);

    let dir = path.parent().ok_or_else(|| {
        BackendError::ProcessingFailed(format!("Output path has no parent: {}", path.display()))
    })?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(BackendError::Io)?;
    tmp.write_all(&encoded).map_err(BackendError::Io)?;
    tmp.persist(path).map_err(|e| BackendError::Io(e.error))?;
    Ok(())
}

impl ImageBackend for WebpBackend {
    fn convert(&self, params: &ConvertParams) -> Result<(), BackendError> {
        let img = load_image(&params.source)?;

        let (w, h) = fit_width((img.width(), img.height()), params.width);
        let resized = if (w, h) == (img.width(), img.height()) {
            img
        } else {
            img.resize_exact(w, h, FilterType::Lanczos3)
        };

        save_webp(&resized, &params.output, params.quality.value())
    }
}
