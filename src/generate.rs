//! Sheet generation: compose every page and hand it to a document writer.
//!
//! The writer is borrowed, not finalized, so the caller decides where the
//! document goes and a failed run leaves nothing half-closed behind an API.
//!
//! Alongside the document this produces a [`SheetSummary`]: the file name
//! shown in every cell of every page, suitable for writing out as JSON and
//! checking a called item against the printed sheets.

use crate::compose::{PageComposer, PageLayout};
use crate::document::{DocumentError, DocumentWriter};
use crate::types::ImageSet;
use log::info;
use rand::Rng;
use serde::Serialize;
use std::sync::mpsc::Sender;

/// Progress reported while writing pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    Generated { page: usize, total: usize },
}

/// What ended up on the sheets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetSummary {
    pub rows: usize,
    pub cols: usize,
    pub image_count: usize,
    pub pages: Vec<PageSummary>,
}

/// One page: cell file names in row-major order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageSummary {
    /// 1-based, as printed.
    pub number: usize,
    pub cells: Vec<Vec<String>>,
}

/// Compose `num_pages` pages from `images` and stream them into `writer`.
pub fn generate_sheets<R, W>(
    images: &ImageSet,
    layout: &PageLayout,
    num_pages: usize,
    rng: &mut R,
    writer: &mut W,
    progress: Option<Sender<PageEvent>>,
) -> Result<SheetSummary, DocumentError>
where
    R: Rng + ?Sized,
    W: DocumentWriter,
{
    let mut pages = Vec::with_capacity(num_pages);

    for page in PageComposer::new(layout, images.len(), num_pages, rng) {
        writer.add_page()?;

        let mut cells = vec![Vec::with_capacity(layout.cols); layout.rows];
        for placement in &page.placements {
            let asset = &images[placement.asset];
            writer.place_image(asset, &placement.rect)?;
            cells[placement.row].push(asset.name().to_string());
        }

        let number = page.index + 1;
        pages.push(PageSummary { number, cells });
        if let Some(tx) = &progress {
            let _ = tx.send(PageEvent::Generated {
                page: number,
                total: num_pages,
            });
        }
    }

    info!(
        "Composed {} pages of {}x{} from {} images",
        pages.len(),
        layout.rows,
        layout.cols,
        images.len()
    );
    Ok(SheetSummary {
        rows: layout.rows,
        cols: layout.cols,
        image_count: images.len(),
        pages,
    })
}
