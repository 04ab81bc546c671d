//! Pure Rust preparation backend using the `image` crate.
//!
//! Decoding sniffs the file content rather than trusting the extension, so a
//! PNG saved as `.jpg` still loads and a text file named `.png` fails cleanly.

use super::backend::{BackendError, ImageBackend};
use super::operations::{encode_jpeg, render_cell};
use super::params::CellParams;
use crate::types::ImageAsset;
use image::{DynamicImage, ImageReader};
use std::path::Path;

/// Production backend. Stateless; one instance is shared by all workers.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Load and decode an image from disk.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    ImageReader::open(path)?
        .with_guessed_format()?
        .decode()
        .map_err(|e| BackendError::Decode(format!("{}: {}", path.display(), e)))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

impl ImageBackend for RustBackend {
    fn prepare_cell(&self, params: &CellParams) -> Result<ImageAsset, BackendError> {
        let img = load_image(&params.source)?;
        let cell = render_cell(&img, params.size, params.overlay);
        let data = encode_jpeg(&cell, params.quality)?;
        Ok(ImageAsset::new(
            file_name(&params.source),
            params.size,
            params.size,
            data,
        ))
    }
}
