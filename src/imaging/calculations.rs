//! Pure geometry for the corner marker.

/// Pixel rectangle of the corner marker, half-open on the right and bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerRect {
    pub x0: u32,
    pub y0: u32,
    /// Side length in pixels; zero means no marker is drawn.
    pub side: u32,
}

impl MarkerRect {
    pub fn x1(&self) -> u32 {
        self.x0 + self.side
    }

    pub fn y1(&self) -> u32 {
        self.y0 + self.side
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x0 && x < self.x1() && y >= self.y0 && y < self.y1()
    }

    /// True for the 1-pixel outline of the marker.
    pub fn on_border(&self, x: u32, y: u32) -> bool {
        self.contains(x, y)
            && (x == self.x0 || y == self.y0 || x == self.x1() - 1 || y == self.y1() - 1)
    }
}

/// Marker square for an image of the given size.
///
/// The side is 20% of the width, rounded down, clamped so it never exceeds
/// the height; the square sits flush against the bottom-right corner.
///
/// ```text
/// 50×50  → side 10 at (40, 40)
/// 100×80 → side 20 at (80, 60)
/// ```
pub fn marker_rect(width: u32, height: u32) -> MarkerRect {
    let side = ((width as f64 * 0.2) as u32).min(height);
    MarkerRect {
        x0: width - side,
        y0: height - side,
        side,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_image_marker() {
        let rect = marker_rect(50, 50);
        assert_eq!(rect, MarkerRect { x0: 40, y0: 40, side: 10 });
        assert_eq!((rect.x1(), rect.y1()), (50, 50));
    }

    #[test]
    fn side_rounds_down() {
        assert_eq!(marker_rect(52, 52).side, 10);
        assert_eq!(marker_rect(54, 54).side, 10);
        assert_eq!(marker_rect(55, 55).side, 11);
    }

    #[test]
    fn tiny_image_has_no_marker() {
        let rect = marker_rect(4, 4);
        assert_eq!(rect.side, 0);
        assert!(!rect.contains(3, 3));
    }

    #[test]
    fn side_uses_width_even_for_non_square() {
        let rect = marker_rect(100, 80);
        assert_eq!(rect, MarkerRect { x0: 80, y0: 60, side: 20 });
    }

    #[test]
    fn border_is_outline_only() {
        let rect = marker_rect(50, 50);
        assert!(rect.on_border(40, 45));
        assert!(rect.on_border(49, 45));
        assert!(rect.on_border(45, 40));
        assert!(rect.on_border(45, 49));
        assert!(!rect.on_border(45, 45));
        assert!(!rect.on_border(39, 45));
    }
}
