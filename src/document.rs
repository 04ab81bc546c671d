//! Output document writer.
//!
//! [`DocumentWriter`] is the seam between page composition and the file
//! format. [`PdfWriter`] is the production implementation on top of `lopdf`:
//!
//! - each page is a `/Page` with one content stream of `q cm Do Q` blocks,
//! - each distinct image (by [`ContentHash`]) is embedded once as a
//!   `DCTDecode` XObject and referenced from every page that shows it,
//! - the page tree and catalog are only built in [`DocumentWriter::finalize`].
//!
//! Callers speak millimetres from the top-left corner; the PDF writer
//! converts to points and flips the y axis.

use crate::compose::CellRect;
use crate::types::{ContentHash, ImageAsset};
use log::debug;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const PT_PER_MM: f64 = 72.0 / 25.4;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Cannot place an image before the first page is added")]
    NoPage,
    #[error("Failed to encode document: {0}")]
    Encode(String),
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Paginated document sink.
pub trait DocumentWriter {
    /// Start a new blank page; later placements land on it.
    fn add_page(&mut self) -> Result<(), DocumentError>;

    /// Draw `asset` into `rect` on the current page.
    fn place_image(&mut self, asset: &ImageAsset, rect: &CellRect) -> Result<(), DocumentError>;

    /// Serialize everything to `path`. Consumes the writer: a document is
    /// finalized exactly once.
    fn finalize(self, path: &Path) -> Result<(), DocumentError>;
}

struct PageBuilder {
    operations: Vec<Operation>,
    xobjects: Dictionary,
}

/// `lopdf`-backed PDF writer.
pub struct PdfWriter {
    doc: Document,
    pages_id: ObjectId,
    page_ids: Vec<ObjectId>,
    current: Option<PageBuilder>,
    images: HashMap<ContentHash, (String, ObjectId)>,
    width_pt: f64,
    height_pt: f64,
}

impl PdfWriter {
    pub fn new(page_width_mm: f64, page_height_mm: f64) -> Self {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        Self {
            doc,
            pages_id,
            page_ids: Vec::new(),
            current: None,
            images: HashMap::new(),
            width_pt: page_width_mm * PT_PER_MM,
            height_pt: page_height_mm * PT_PER_MM,
        }
    }

    /// Pages started so far, including the one being filled.
    pub fn page_count(&self) -> usize {
        self.page_ids.len() + usize::from(self.current.is_some())
    }

    /// Distinct images embedded so far.
    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    /// Resource name of the XObject for `asset`, embedding it on first use.
    fn image_resource(&mut self, asset: &ImageAsset) -> (String, ObjectId) {
        if let Some(existing) = self.images.get(asset.hash()) {
            return existing.clone();
        }

        let mut dict = Dictionary::new();
        dict.set("Type", Object::Name(b"XObject".to_vec()));
        dict.set("Subtype", Object::Name(b"Image".to_vec()));
        dict.set("Width", Object::Integer(asset.width() as i64));
        dict.set("Height", Object::Integer(asset.height() as i64));
        dict.set("ColorSpace", Object::Name(b"DeviceRGB".to_vec()));
        dict.set("BitsPerComponent", Object::Integer(8));
        dict.set("Filter", Object::Name(b"DCTDecode".to_vec()));
        let id = self
            .doc
            .add_object(Object::Stream(Stream::new(dict, asset.data().to_vec())));

        let name = format!("Im{}", self.images.len() + 1);
        debug!("Embedded {} as /{} ({})", asset.name(), name, asset.hash());
        self.images
            .insert(asset.hash().clone(), (name.clone(), id));
        (name, id)
    }

    fn flush_page(&mut self, page: PageBuilder) -> Result<(), DocumentError> {
        let content = Content {
            operations: page.operations,
        };
        let encoded = content
            .encode()
            .map_err(|e| DocumentError::Encode(e.to_string()))?;
        let content_id = self
            .doc
            .add_object(Object::Stream(Stream::new(Dictionary::new(), encoded)));

        let mut resources = Dictionary::new();
        resources.set("XObject", Object::Dictionary(page.xobjects));

        let mut dict = Dictionary::new();
        dict.set("Type", Object::Name(b"Page".to_vec()));
        dict.set("Parent", Object::Reference(self.pages_id));
        dict.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                self.width_pt.into(),
                self.height_pt.into(),
            ]),
        );
        dict.set("Contents", Object::Reference(content_id));
        dict.set("Resources", Object::Dictionary(resources));
        let page_id = self.doc.add_object(Object::Dictionary(dict));
        self.page_ids.push(page_id);
        Ok(())
    }
}

impl DocumentWriter for PdfWriter {
    fn add_page(&mut self) -> Result<(), DocumentError> {
        if let Some(page) = self.current.take() {
            self.flush_page(page)?;
        }
        self.current = Some(PageBuilder {
            operations: Vec::new(),
            xobjects: Dictionary::new(),
        });
        Ok(())
    }

    fn place_image(&mut self, asset: &ImageAsset, rect: &CellRect) -> Result<(), DocumentError> {
        if self.current.is_none() {
            return Err(DocumentError::NoPage);
        }
        let (name, id) = self.image_resource(asset);

        let size = rect.size * PT_PER_MM;
        let x = rect.x * PT_PER_MM;
        let y = self.height_pt - (rect.y + rect.size) * PT_PER_MM;

        let page = self.current.as_mut().ok_or(DocumentError::NoPage)?;
        page.xobjects.set(name.as_bytes().to_vec(), Object::Reference(id));
        page.operations.push(Operation::new("q", vec![]));
        page.operations.push(Operation::new(
            "cm",
            vec![
                size.into(),
                Object::Integer(0),
                Object::Integer(0),
                size.into(),
                x.into(),
                y.into(),
            ],
        ));
        page.operations
            .push(Operation::new("Do", vec![Object::Name(name.into_bytes())]));
        page.operations.push(Operation::new("Q", vec![]));
        Ok(())
    }

    fn finalize(mut self, path: &Path) -> Result<(), DocumentError> {
        if let Some(page) = self.current.take() {
            self.flush_page(page)?;
        }

        let kids: Vec<Object> = self
            .page_ids
            .iter()
            .map(|id| Object::Reference(*id))
            .collect();
        let mut pages = Dictionary::new();
        pages.set("Type", Object::Name(b"Pages".to_vec()));
        pages.set("Kids", Object::Array(kids));
        pages.set("Count", Object::Integer(self.page_ids.len() as i64));
        self.doc
            .objects
            .insert(self.pages_id, Object::Dictionary(pages));

        let mut catalog = Dictionary::new();
        catalog.set("Type", Object::Name(b"Catalog".to_vec()));
        catalog.set("Pages", Object::Reference(self.pages_id));
        let catalog_id = self.doc.add_object(Object::Dictionary(catalog));
        self.doc.trailer.set("Root", Object::Reference(catalog_id));

        let mut bytes = Vec::new();
        self.doc
            .save_to(&mut bytes)
            .map_err(|e| DocumentError::Encode(e.to_string()))?;
        fs::write(path, bytes).map_err(|source| DocumentError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(
            "Wrote {} pages, {} distinct images to {}",
            self.page_ids.len(),
            self.images.len(),
            path.display()
        );
        Ok(())
    }
}
