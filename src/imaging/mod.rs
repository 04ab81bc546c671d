//! Image preparation: decode, resize, mark, encode.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` with content sniffing |
//! | **Resize** | `DynamicImage::resize_exact`, Lanczos3 |
//! | **Marker overlay** | [`overlay::stamp_marker`] |
//! | **Encode** | `image::codecs::jpeg::JpegEncoder` |
//!
//! The module is split into:
//! - **Calculations**: marker geometry (unit testable, no pixels)
//! - **Parameters**: what to prepare ([`CellParams`], [`Quality`])
//! - **Operations**: in-memory pixel steps (resize, overlay, encode)
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`] (file I/O on top of operations)

pub mod backend;
mod calculations;
pub mod operations;
pub mod overlay;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, ImageBackend};
pub use calculations::{MarkerRect, marker_rect};
pub use overlay::stamp_marker;
pub use params::{CellParams, Quality};
pub use rust_backend::RustBackend;
