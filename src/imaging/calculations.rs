//! Pure calculation functions for output dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Calculate output dimensions for a proportional fit to `target_width`.
///
/// Sources wider than the target are scaled down preserving aspect ratio;
/// sources at or below the target keep their original dimensions (the
/// converter never enlarges).
///
/// # Arguments
/// * `source` - Original image dimensions (width, height)
/// * `target_width` - Requested output width in pixels
///
/// # Returns
/// * `(width, height)` - Final output dimensions
pub fn fit_width(source: (u32, u32), target_width: u32) -> (u32, u32) {
    let (src_w, src_h) = source;

    if src_w <= target_width {
        return (src_w, src_h);
    }

    let ratio = target_width as f64 / src_w as f64;
    // Floor at 1px so extreme aspect ratios still produce an encodable image
    let h = (src_h as f64 * ratio).round().max(1.0) as u32;
    (target_width, h)
}
