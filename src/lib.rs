//! # Bingo Sheets
//!
//! Generates printable bingo sheets from a folder of images: every page is a
//! randomized grid of the images, and all pages go into a single PDF.
//!
//! # Architecture: Linear Pipeline
//!
//! ```text
//! 1. Load      folder/   →  ImageSet     (scan, decode, resize, encode in parallel)
//! 2. Compose   ImageSet  →  Page × N     (per-page permutation + index formula)
//! 3. Write     Page × N  →  sheets.pdf   (one XObject per distinct image)
//! ```
//!
//! Only loading is parallel. Composition and writing run on one thread and
//! read the image set without changing it.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Lists candidate image files in the input folder |
//! | [`load`] | Prepares every candidate on the worker pool, skipping failures |
//! | [`imaging`] | Decode, resize, corner marker, JPEG encode |
//! | [`compose`] | Grid geometry, cell index formula, per-page permutations |
//! | [`document`] | `DocumentWriter` trait and the `lopdf` PDF writer |
//! | [`generate`] | Drives composer → writer and builds the layout summary |
//! | [`config`] | Optional `config.toml`: grid, page, images, processing |
//! | [`types`] | `ImageAsset`, `ImageSet`, `ContentHash` |
//! | [`output`] | Progress line formatting for the CLI |
//!
//! # Design Decisions
//!
//! ## Independent Permutation Per Page
//!
//! Each page draws a fresh permutation of indices instead of reshuffling a
//! shared list in place. Pages stay independent and the image set can be
//! shared immutably.
//!
//! ## Content-Hash Deduplication
//!
//! A 5×5 grid over a handful of images places the same bytes many times.
//! Assets carry a SHA-256 of their encoded bytes, and the PDF writer embeds
//! each hash once, so output size grows with distinct images, not cells.
//!
//! ## Bounded Loading
//!
//! Images are prepared on rayon's global pool, capped at the CPU count (or
//! lower via `[processing] max_processes`). A folder of thousands of images
//! never spawns thousands of threads.

pub mod compose;
pub mod config;
pub mod document;
pub mod generate;
pub mod imaging;
pub mod load;
pub mod output;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
