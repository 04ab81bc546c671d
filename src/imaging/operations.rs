//! In-memory pixel operations.
//!
//! Each step takes a decoded image and returns a new one (or encoded bytes),
//! so the whole cell pipeline can be tested without touching the filesystem.

use super::backend::BackendError;
use super::overlay::stamp_marker;
use super::params::Quality;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::DynamicImage;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Resize to exactly `size × size` with Lanczos3.
///
/// The aspect ratio is not preserved: every cell on the sheet is square, so
/// non-square sources are stretched to fill it.
pub fn resize_to_cell(img: &DynamicImage, size: u32) -> DynamicImage {
    img.resize_exact(size, size, FilterType::Lanczos3)
}

/// Resize, then optionally stamp the corner marker.
pub fn render_cell(img: &DynamicImage, size: u32, overlay: bool) -> DynamicImage {
    let resized = resize_to_cell(img, size);
    if overlay {
        stamp_marker(&resized)
    } else {
        resized
    }
}

/// Encode as baseline RGB JPEG. Alpha is dropped.
pub fn encode_jpeg(img: &DynamicImage, quality: Quality) -> Result<Vec<u8>> {
    let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
    let mut bytes = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut bytes, quality.value());
    rgb.write_with_encoder(encoder)
        .map_err(|e| BackendError::Encode(e.to_string()))?;
    Ok(bytes)
}
