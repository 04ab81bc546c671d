//! Image preparation backend trait and its error type.
//!
//! The [`ImageBackend`] trait has one operation: turn a source file into a
//! ready-to-embed [`ImageAsset`]. The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend); tests use a mock that
//! records calls and fails on demand.

use super::params::CellParams;
use crate::types::ImageAsset;
use thiserror::Error;

/// Failure to prepare a single file. The loader logs these and skips the
/// file; they never abort a run.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Decode failed: {0}")]
    Decode(String),
    #[error("Encode failed: {0}")]
    Encode(String),
}

/// Trait for image preparation backends.
///
/// `Sync` because the loader calls it from rayon workers.
pub trait ImageBackend: Sync {
    /// Decode, resize, optionally stamp, and encode one source file.
    fn prepare_cell(&self, params: &CellParams) -> Result<ImageAsset, BackendError>;
}
