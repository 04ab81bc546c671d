//! Parameter types for cell preparation.
//!
//! These structs describe *what* to produce, not *how*. They are the interface
//! between the loader (which decides which files to prepare) and the
//! [`backend`](super::backend) (which does the pixel work), so the loader can
//! run against a mock backend in tests.

use std::path::PathBuf;

/// Quality setting for JPEG encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u8);

impl Quality {
    pub fn new(value: u8) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(90)
    }
}

/// Everything needed to prepare one source file as a grid cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CellParams {
    pub source: PathBuf,
    /// Output is `size × size` pixels regardless of the source aspect ratio.
    pub size: u32,
    pub quality: Quality,
    /// Stamp the corner marker after resizing.
    pub overlay: bool,
}
