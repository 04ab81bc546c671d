//! CLI output formatting.
//!
//! Each event has a `format_*` function (pure, returns the line to print) so
//! the wording is unit-testable; `main` prints the lines from a separate
//! thread fed by a channel. Skipped files are reported through `log` on
//! stderr, not here.
//!
//! ```text
//! Loaded and resized 1/6 images
//! Loaded and resized 5/6 images
//! Generated page 1/2
//! Generated page 2/2
//! Wrote 2 pages (4 distinct images) to sheets.pdf
//! ```

use crate::generate::{PageEvent, SheetSummary};
use crate::load::LoadEvent;
use std::path::Path;

/// Line for a loading event; only successful loads print.
pub fn format_load_event(event: &LoadEvent) -> Option<String> {
    match event {
        LoadEvent::Loaded { done, total, .. } => {
            Some(format!("Loaded and resized {}/{} images", done, total))
        }
        LoadEvent::Started { .. } | LoadEvent::Skipped { .. } => None,
    }
}

pub fn format_page_event(event: &PageEvent) -> String {
    match event {
        PageEvent::Generated { page, total } => format!("Generated page {}/{}", page, total),
    }
}

/// Final line after the document has been written.
pub fn format_done(summary: &SheetSummary, output: &Path) -> String {
    let distinct = {
        let mut names: Vec<&str> = summary
            .pages
            .iter()
            .flat_map(|p| p.cells.iter().flatten())
            .map(String::as_str)
            .collect();
        names.sort_unstable();
        names.dedup();
        names.len()
    };
    format!(
        "Wrote {} {} ({} distinct images) to {}",
        summary.pages.len(),
        if summary.pages.len() == 1 { "page" } else { "pages" },
        distinct,
        output.display()
    )
}
