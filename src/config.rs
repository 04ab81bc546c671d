//! Sheet configuration module.
//!
//! Handles loading and validating the optional `config.toml` that controls
//! page layout and image preparation. Command-line arguments decide *what* is
//! generated (input folder, page count, output path); this file decides *how*
//! it looks.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [grid]
//! rows = 5                  # Cells per column
//! cols = 5                  # Cells per row
//! cell_pixels = 50          # Pixel size each image is resized to (square)
//!
//! [page]
//! width_mm = 210.0          # A4 portrait
//! height_mm = 297.0
//! margin_top_mm = 10.0
//! margin_left_mm = 10.0     # Also used as the right margin
//! spacing_mm = 2.0          # Gap between neighbouring cells
//!
//! [images]
//! quality = 90              # JPEG quality of the embedded images (1-100)
//!
//! [processing]
//! max_processes = 4         # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! Config files are sparse: override just the values you want. Unknown keys
//! are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Sheet configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SheetConfig {
    /// Grid dimensions and cell resolution.
    pub grid: GridConfig,
    /// Physical page size, margins and spacing.
    pub page: PageConfig,
    /// Encoding settings for prepared cell images.
    pub images: ImagesConfig,
    /// Parallel loading settings.
    pub processing: ProcessingConfig,
}

impl SheetConfig {
    /// Validate config values are within acceptable ranges.
    ///
    /// Besides per-field ranges this checks that the derived cell size is
    /// positive and that the whole grid fits on the page vertically.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.rows == 0 || self.grid.cols == 0 {
            return Err(ConfigError::Validation(
                "grid.rows and grid.cols must be non-zero".into(),
            ));
        }
        if self.grid.cell_pixels == 0 {
            return Err(ConfigError::Validation(
                "grid.cell_pixels must be non-zero".into(),
            ));
        }
        if self.images.quality == 0 || self.images.quality > 100 {
            return Err(ConfigError::Validation(
                "images.quality must be 1-100".into(),
            ));
        }
        let page = &self.page;
        let lengths = [
            page.width_mm,
            page.height_mm,
            page.margin_top_mm,
            page.margin_left_mm,
            page.spacing_mm,
        ];
        if lengths.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(ConfigError::Validation(
                "page lengths must be finite and non-negative".into(),
            ));
        }

        let cell = self.cell_size_mm();
        if cell <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "{} columns do not fit on a {}mm wide page",
                self.grid.cols, page.width_mm
            )));
        }
        let grid_height = page.margin_top_mm
            + self.grid.rows as f64 * cell
            + (self.grid.rows - 1) as f64 * page.spacing_mm;
        if grid_height > page.height_mm {
            return Err(ConfigError::Validation(format!(
                "{} rows need {:.1}mm but the page is {}mm tall",
                self.grid.rows, grid_height, page.height_mm
            )));
        }
        Ok(())
    }

    /// Printed side length of one cell, derived from the page width so the
    /// grid spans exactly the space between the left and right margins.
    pub fn cell_size_mm(&self) -> f64 {
        let cols = self.grid.cols as f64;
        (self.page.width_mm - 2.0 * self.page.margin_left_mm - (cols - 1.0) * self.page.spacing_mm)
            / cols
    }
}

/// Grid dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    pub rows: usize,
    pub cols: usize,
    /// Every source image is resized to `cell_pixels × cell_pixels`.
    pub cell_pixels: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: 5,
            cols: 5,
            cell_pixels: 50,
        }
    }
}

/// Page geometry in millimetres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageConfig {
    pub width_mm: f64,
    pub height_mm: f64,
    pub margin_top_mm: f64,
    pub margin_left_mm: f64,
    pub spacing_mm: f64,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            width_mm: 210.0,
            height_mm: 297.0,
            margin_top_mm: 10.0,
            margin_left_mm: 10.0,
            spacing_mm: 2.0,
        }
    }
}

/// Cell image encoding settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImagesConfig {
    /// JPEG encoding quality (1 = worst, 100 = best).
    pub quality: u8,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self { quality: 90 }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel image loading workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)`, never less than one
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

/// Load and validate a config file. Missing keys fall back to defaults.
pub fn load_config(path: &Path) -> Result<SheetConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: SheetConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// A documented config file with every option at its default value.
pub fn stock_config_toml() -> &'static str {
    r#"# bingo-sheets configuration
# All options are optional; the values below are the defaults.

[grid]
# Number of rows and columns on every page.
rows = 5
cols = 5
# Pixel size every image is resized to before it is embedded (square).
cell_pixels = 50

[page]
# Page size in millimetres (A4 portrait).
width_mm = 210.0
height_mm = 297.0
# The left margin is mirrored on the right; cells share the remaining width.
margin_top_mm = 10.0
margin_left_mm = 10.0
# Gap between neighbouring cells.
spacing_mm = 2.0

[images]
# JPEG quality of the embedded images (1-100).
quality = 90

[processing]
# Maximum parallel image loading workers. Omit to use all CPU cores.
# max_processes = 4
"#
}
