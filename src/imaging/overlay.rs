//! Corner marker overlay.
//!
//! Burns a white square with a 1-pixel black outline into the bottom-right
//! corner of an image. Used when printed sheets need a visible spot to mark a
//! called item.

use super::calculations::marker_rect;
use image::{DynamicImage, Rgba, RgbaImage};

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Return a copy of `img` with the corner marker drawn on it.
///
/// The input is left untouched. Applying the stamp twice draws it twice;
/// on a square image the second pass covers the same pixels.
pub fn stamp_marker(img: &DynamicImage) -> DynamicImage {
    let mut canvas: RgbaImage = img.to_rgba8();
    let (width, height) = canvas.dimensions();
    let rect = marker_rect(width, height);
    if rect.side == 0 {
        return DynamicImage::ImageRgba8(canvas);
    }

    for y in rect.y0..rect.y1() {
        for x in rect.x0..rect.x1() {
            let color = if rect.on_border(x, y) { BLACK } else { WHITE };
            canvas.put_pixel(x, y, color);
        }
    }

    DynamicImage::ImageRgba8(canvas)
}
