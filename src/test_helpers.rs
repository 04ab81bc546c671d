//! Shared test utilities: synthetic image fixtures and tiny image sets.
//!
//! Fixtures are generated on the fly into temp directories, so the repository
//! carries no binary test data.

use crate::types::{ImageAsset, ImageSet};
use image::{ImageEncoder, Rgb, RgbImage};
use std::path::Path;

// =========================================================================
// Fixture files
// =========================================================================

/// Write a gradient JPEG of the given size.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new(writer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}

/// Write a single-colour PNG of the given size.
pub fn create_test_png(path: &Path, width: u32, height: u32, color: [u8; 3]) {
    RgbImage::from_pixel(width, height, Rgb(color))
        .save_with_format(path, image::ImageFormat::Png)
        .unwrap();
}

/// Write bytes that no decoder accepts.
pub fn create_corrupt_file(path: &Path) {
    std::fs::write(path, b"definitely not an image").unwrap();
}

// =========================================================================
// In-memory sets
// =========================================================================

/// An image set of `n` distinct fake assets named `img0` .. `img{n-1}`.
pub fn fake_image_set(n: usize) -> ImageSet {
    let assets = (0..n)
        .map(|i| ImageAsset::new(format!("img{i}"), 50, 50, vec![i as u8, 0xAB]))
        .collect();
    ImageSet::new(assets).expect("fake_image_set needs n > 0")
}
