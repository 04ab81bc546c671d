//! Candidate discovery.
//!
//! Lists a single directory (no recursion) and keeps the files whose
//! extension is on the allow-list. Matching is case sensitive: `photo.JPG`
//! is not a candidate.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Extensions treated as images, without the leading dot.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp"];

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Cannot read image folder {}: {source}", path.display())]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Whether the file name carries one of [`IMAGE_EXTENSIONS`].
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e))
}

/// List candidate image files directly inside `dir`, sorted by path.
///
/// Sub-directories are skipped even if their name looks like an image.
/// Entries that vanish or cannot be stat'ed while listing are ignored.
pub fn scan(dir: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let entries = fs::read_dir(dir).map_err(|source| ScanError::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut candidates: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| !p.is_dir() && is_image_file(p))
        .collect();
    candidates.sort();
    Ok(candidates)
}
