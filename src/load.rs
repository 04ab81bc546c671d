//! Image loading: scan the folder, prepare every candidate in parallel.
//!
//! ## Parallel Processing
//!
//! Candidates are prepared on rayon's global pool, which `main` sizes with
//! [`effective_threads`](crate::config::effective_threads). The parallel
//! `collect()` is the join point: this function returns only after every file
//! has either produced an asset or been skipped.
//!
//! ## Partial Failure
//!
//! A file that cannot be read, decoded or encoded is logged and skipped; the
//! batch continues. Only an unreadable folder or a folder with no usable image
//! is an error.

use crate::config::SheetConfig;
use crate::imaging::{CellParams, ImageBackend, Quality, RustBackend};
use crate::scan::{ScanError, scan};
use crate::types::{ImageAsset, ImageSet};
use log::{debug, info, warn};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error("No usable images found in {}", .0.display())]
    NoImagesFound(PathBuf),
}

/// Progress reported while loading. `done` counts both loaded and skipped files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadEvent {
    Started {
        total: usize,
    },
    Loaded {
        done: usize,
        total: usize,
        name: String,
    },
    Skipped {
        done: usize,
        total: usize,
        name: String,
        reason: String,
    },
}

/// How every candidate is prepared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadSettings {
    pub cell_pixels: u32,
    pub quality: Quality,
    pub overlay: bool,
}

impl LoadSettings {
    pub fn from_config(config: &SheetConfig, overlay: bool) -> Self {
        Self {
            cell_pixels: config.grid.cell_pixels,
            quality: Quality::new(config.images.quality),
            overlay,
        }
    }

    fn params_for(&self, source: &Path) -> CellParams {
        CellParams {
            source: source.to_path_buf(),
            size: self.cell_pixels,
            quality: self.quality,
            overlay: self.overlay,
        }
    }
}

/// Load every image in `dir` with the production backend.
pub fn load_images(
    dir: &Path,
    settings: &LoadSettings,
    progress: Option<Sender<LoadEvent>>,
) -> Result<ImageSet, LoadError> {
    load_images_with_backend(&RustBackend::new(), dir, settings, progress)
}

/// Load images using a specific backend (allows testing with mock).
///
/// The resulting set keeps scan order, whatever order workers finish in.
pub fn load_images_with_backend(
    backend: &impl ImageBackend,
    dir: &Path,
    settings: &LoadSettings,
    progress: Option<Sender<LoadEvent>>,
) -> Result<ImageSet, LoadError> {
    let candidates = scan(dir)?;
    let total = candidates.len();
    info!("Found {} candidate images in {}", total, dir.display());
    emit(&progress, LoadEvent::Started { total });

    let done = AtomicUsize::new(0);
    let assets: Vec<ImageAsset> = candidates
        .par_iter()
        .filter_map(|path| {
            let result = backend.prepare_cell(&settings.params_for(path));
            let done = done.fetch_add(1, Ordering::SeqCst) + 1;
            let name = display_name(path);
            match result {
                Ok(asset) => {
                    debug!("Prepared {} ({} bytes)", path.display(), asset.data().len());
                    emit(&progress, LoadEvent::Loaded { done, total, name });
                    Some(asset)
                }
                Err(e) => {
                    warn!("Skipping {}: {}", path.display(), e);
                    emit(
                        &progress,
                        LoadEvent::Skipped {
                            done,
                            total,
                            name,
                            reason: e.to_string(),
                        },
                    );
                    None
                }
            }
        })
        .collect();

    info!("Prepared {}/{} images", assets.len(), total);
    ImageSet::new(assets).ok_or_else(|| LoadError::NoImagesFound(dir.to_path_buf()))
}

/// Progress is best effort: a closed receiver is not an error.
fn emit(progress: &Option<Sender<LoadEvent>>, event: LoadEvent) {
    if let Some(tx) = progress {
        let _ = tx.send(event);
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::MockBackend;
    use crate::test_helpers::{create_corrupt_file, create_test_jpeg, create_test_png};
    use std::fs;
    use std::sync::mpsc;
    use tempfile::TempDir;

    fn settings() -> LoadSettings {
        LoadSettings::from_config(&SheetConfig::default(), false)
    }

    fn touch(dir: &Path, names: &[&str]) {
        for name in names {
            fs::write(dir.join(name), b"x").unwrap();
        }
    }

    fn names(set: &ImageSet) -> Vec<&str> {
        set.iter().map(|a| a.name()).collect()
    }

    #[test]
    fn settings_from_config() {
        let mut config = SheetConfig::default();
        config.grid.cell_pixels = 80;
        config.images.quality = 70;
        let s = LoadSettings::from_config(&config, true);
        assert_eq!(s.cell_pixels, 80);
        assert_eq!(s.quality, Quality::new(70));
        assert!(s.overlay);
    }

    #[test]
    fn mock_loads_candidates_in_scan_order() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), &["c.png", "a.jpg", "b.gif", "readme.md"]);

        let backend = MockBackend::new();
        let set = load_images_with_backend(&backend, tmp.path(), &settings(), None).unwrap();

        assert_eq!(names(&set), ["a.jpg", "b.gif", "c.png"]);
        assert_eq!(backend.get_calls().len(), 3);
    }

    #[test]
    fn mock_passes_settings_to_backend() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), &["a.jpg"]);

        let backend = MockBackend::new();
        let s = LoadSettings {
            cell_pixels: 64,
            quality: Quality::new(55),
            overlay: true,
        };
        load_images_with_backend(&backend, tmp.path(), &s, None).unwrap();

        let calls = backend.get_calls();
        assert_eq!(calls[0].size, 64);
        assert_eq!(calls[0].quality.value(), 55);
        assert!(calls[0].overlay);
        assert_eq!(calls[0].source, tmp.path().join("a.jpg"));
    }

    #[test]
    fn failed_files_are_skipped() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), &["good1.png", "bad.png", "good2.png"]);

        let backend = MockBackend::failing_on(&["bad.png"]);
        let set = load_images_with_backend(&backend, tmp.path(), &settings(), None).unwrap();

        assert_eq!(names(&set), ["good1.png", "good2.png"]);
    }

    #[test]
    fn all_files_failing_is_no_images_found() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), &["bad.png"]);

        let backend = MockBackend::failing_on(&["bad.png"]);
        let result = load_images_with_backend(&backend, tmp.path(), &settings(), None);
        assert!(matches!(result, Err(LoadError::NoImagesFound(_))));
    }

    #[test]
    fn empty_folder_is_no_images_found() {
        let tmp = TempDir::new().unwrap();
        let result = load_images_with_backend(&MockBackend::new(), tmp.path(), &settings(), None);
        assert!(matches!(result, Err(LoadError::NoImagesFound(ref p)) if p == tmp.path()));
    }

    #[test]
    fn missing_folder_is_directory_error() {
        let tmp = TempDir::new().unwrap();
        let result = load_images_with_backend(
            &MockBackend::new(),
            &tmp.path().join("missing"),
            &settings(),
            None,
        );
        assert!(matches!(
            result,
            Err(LoadError::Scan(ScanError::DirectoryRead { .. }))
        ));
    }

    #[test]
    fn progress_events_cover_every_candidate() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), &["a.png", "b.png", "c.png"]);

        let (tx, rx) = mpsc::channel();
        let backend = MockBackend::failing_on(&["b.png"]);
        load_images_with_backend(&backend, tmp.path(), &settings(), Some(tx)).unwrap();

        let events: Vec<LoadEvent> = rx.iter().collect();
        assert_eq!(events[0], LoadEvent::Started { total: 3 });
        assert_eq!(events.len(), 4);

        let mut done: Vec<usize> = events[1..]
            .iter()
            .map(|e| match e {
                LoadEvent::Loaded { done, total, .. } | LoadEvent::Skipped { done, total, .. } => {
                    assert_eq!(*total, 3);
                    *done
                }
                LoadEvent::Started { .. } => panic!("started twice"),
            })
            .collect();
        done.sort();
        assert_eq!(done, [1, 2, 3]);

        let skipped: Vec<&LoadEvent> = events
            .iter()
            .filter(|e| matches!(e, LoadEvent::Skipped { .. }))
            .collect();
        assert_eq!(skipped.len(), 1);
        assert!(matches!(skipped[0], LoadEvent::Skipped { name, .. } if name == "b.png"));
    }

    #[test]
    fn dropped_receiver_does_not_fail_loading() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), &["a.png"]);

        let (tx, rx) = mpsc::channel();
        drop(rx);
        let set = load_images_with_backend(&MockBackend::new(), tmp.path(), &settings(), Some(tx));
        assert!(set.is_ok());
    }

    #[test]
    fn real_backend_mixed_folder() {
        let tmp = TempDir::new().unwrap();
        create_test_jpeg(&tmp.path().join("one.jpg"), 120, 80);
        create_test_png(&tmp.path().join("two.png"), 60, 200, [10, 200, 10]);
        create_corrupt_file(&tmp.path().join("three.png"));
        fs::write(tmp.path().join("list.txt"), b"not a candidate").unwrap();

        let set = load_images(tmp.path(), &settings(), None).unwrap();
        assert_eq!(names(&set), ["one.jpg", "two.png"]);
        for asset in &set {
            assert_eq!((asset.width(), asset.height()), (50, 50));
        }
    }
}
