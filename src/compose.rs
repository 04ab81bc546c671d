//! Page composition: which image goes in which cell, and where that cell is.
//!
//! Every page draws its own uniform permutation of the image indices. The
//! [`ImageSet`](crate::types::ImageSet) is never reordered, so pages cannot
//! alias each other's shuffle.
//!
//! ## Cell Selection
//!
//! For page `p` (0-based) and cell `(row, col)`:
//!
//! ```text
//! flat  = p*rows*cols + row*cols + col
//! image = order[flat mod len]
//! ```
//!
//! When the set is smaller than the grid, the modulo wraps and images repeat
//! on the same page. Nothing guarantees two pages differ.
//!
//! ## Geometry
//!
//! Cell size is derived from the page width so the grid spans exactly the
//! space between the left and right margins:
//!
//! ```text
//! cell = (page_width - 2*margin_left - (cols-1)*spacing) / cols
//! x    = margin_left + col*(cell + spacing)
//! y    = margin_top  + row*(cell + spacing)
//! ```
//!
//! All lengths are millimetres measured from the top-left page corner.

use crate::config::SheetConfig;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;

/// Square cell position on the page, in millimetres from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CellRect {
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

/// Immutable grid geometry for every page of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub rows: usize,
    pub cols: usize,
    pub page_width: f64,
    pub page_height: f64,
    pub margin_top: f64,
    pub margin_left: f64,
    pub spacing: f64,
    pub cell_size: f64,
}

impl PageLayout {
    pub fn from_config(config: &SheetConfig) -> Self {
        Self {
            rows: config.grid.rows,
            cols: config.grid.cols,
            page_width: config.page.width_mm,
            page_height: config.page.height_mm,
            margin_top: config.page.margin_top_mm,
            margin_left: config.page.margin_left_mm,
            spacing: config.page.spacing_mm,
            cell_size: config.cell_size_mm(),
        }
    }

    pub fn cells_per_page(&self) -> usize {
        self.rows * self.cols
    }

    pub fn cell_rect(&self, row: usize, col: usize) -> CellRect {
        let step = self.cell_size + self.spacing;
        CellRect {
            x: self.margin_left + col as f64 * step,
            y: self.margin_top + row as f64 * step,
            size: self.cell_size,
        }
    }
}

/// Flat position of a cell across the whole run, wrapped into `0..len`.
///
/// Pure: the same inputs always give the same index.
pub fn cell_index(page: usize, row: usize, col: usize, rows: usize, cols: usize, len: usize) -> usize {
    (page * rows * cols + row * cols + col) % len
}

/// One image placed on a page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placement {
    pub row: usize,
    pub col: usize,
    /// Index into the image set.
    pub asset: usize,
    pub rect: CellRect,
}

/// A composed page: exactly `rows × cols` placements in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub index: usize,
    pub placements: Vec<Placement>,
}

/// A fresh uniform permutation of `0..len` (Fisher–Yates).
pub fn permutation<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Vec<usize> {
    let mut order: Vec<usize> = (0..len).collect();
    order.shuffle(rng);
    order
}

/// Lay out page `index` given an already drawn image order.
///
/// `order` must be non-empty; its length is the image set size.
pub fn compose_page_with_order(layout: &PageLayout, order: &[usize], index: usize) -> Page {
    let mut placements = Vec::with_capacity(layout.cells_per_page());
    for row in 0..layout.rows {
        for col in 0..layout.cols {
            let flat = cell_index(index, row, col, layout.rows, layout.cols, order.len());
            placements.push(Placement {
                row,
                col,
                asset: order[flat],
                rect: layout.cell_rect(row, col),
            });
        }
    }
    Page { index, placements }
}

/// Draw a permutation of a `set_len`-image set and lay out page `index`.
pub fn compose_page<R: Rng + ?Sized>(
    layout: &PageLayout,
    set_len: usize,
    index: usize,
    rng: &mut R,
) -> Page {
    let order = permutation(set_len, rng);
    compose_page_with_order(layout, &order, index)
}

/// Iterator over the pages of a run.
pub struct PageComposer<'a, R: Rng + ?Sized> {
    layout: &'a PageLayout,
    set_len: usize,
    num_pages: usize,
    next: usize,
    rng: &'a mut R,
}

impl<'a, R: Rng + ?Sized> PageComposer<'a, R> {
    /// `set_len` must be at least one.
    pub fn new(layout: &'a PageLayout, set_len: usize, num_pages: usize, rng: &'a mut R) -> Self {
        Self {
            layout,
            set_len,
            num_pages,
            next: 0,
            rng,
        }
    }
}

impl<R: Rng + ?Sized> Iterator for PageComposer<'_, R> {
    type Item = Page;

    fn next(&mut self) -> Option<Page> {
        if self.next >= self.num_pages {
            return None;
        }
        let page = compose_page(self.layout, self.set_len, self.next, self.rng);
        self.next += 1;
        Some(page)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.num_pages - self.next;
        (remaining, Some(remaining))
    }
}
