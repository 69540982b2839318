//! Image decode, resize, and WebP encode — pure Rust, no external tools.
//!
//! | Step | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` with content sniffing |
//! | **Resize** | Lanczos3 via `DynamicImage::resize_exact` |
//! | **Encode** | `webp::Encoder`, lossy, quality from [`Quality`] |
//!
//! The module is split into:
//! - **Calculations**: pure width-fit math (unit testable)
//! - **Params**: data structures describing one conversion
//! - **Backend**: [`ImageBackend`] trait + [`WebpBackend`]

pub mod backend;
mod calculations;
mod params;
pub mod webp_backend;

pub use backend::{BackendError, ImageBackend};
pub use params::{ConvertParams, Quality};
pub use webp_backend::{INPUT_EXTENSIONS, WebpBackend};
