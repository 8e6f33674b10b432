//! Page geometry for the continuous-scroll preview.
//!
//! The preview stacks A4 pages vertically with a visible gap between them. Everything the
//! pagination pass needs is derived once from millimetre dimensions and kept in pixels:
//!
//! ```text
//!   page_height_px  = ceil(page_height_mm × px_per_mm)
//!   gap_px          = ceil(gap_mm × px_per_mm)
//!   stride_px       = page_height_px + gap_px
//!   top_margin_px   = ceil(top_margin_mm × px_per_mm)
//!   bottom_buffer_px  (fixed, absorbs sub-pixel rounding in PDF engines)
//! ```

use serde::Serialize;

/// CSS reference pixels per millimetre (96dpi / 25.4, rounded the way browsers report it).
pub const PIXELS_PER_MM: f64 = 3.78;
pub const A4_HEIGHT_MM: f64 = 297.0;
pub const PAGE_GAP_MM: f64 = 20.0;
pub const PAGE_MARGIN_TOP_MM: f64 = 15.0;
pub const PAGE_BOTTOM_BUFFER_PX: f64 = 80.0;

/// Physical inputs the pixel geometry is derived from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageDimensions {
    pub pixels_per_mm: f64,
    pub page_height_mm: f64,
    pub gap_mm: f64,
    pub top_margin_mm: f64,
    pub bottom_buffer_px: f64,
}

impl Default for PageDimensions {
    fn default() -> Self {
        PageDimensions {
            pixels_per_mm: PIXELS_PER_MM,
            page_height_mm: A4_HEIGHT_MM,
            gap_mm: PAGE_GAP_MM,
            top_margin_mm: PAGE_MARGIN_TOP_MM,
            bottom_buffer_px: PAGE_BOTTOM_BUFFER_PX,
        }
    }
}

/// Pixel geometry of the paged preview. Fields are private so the stride can never
/// disagree with page height + gap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageGeometry {
    page_height_px: f64,
    gap_px: f64,
    visual_page_stride_px: f64,
    top_margin_px: f64,
    bottom_buffer_px: f64,
}

impl PageGeometry {
    pub fn from_pixels(
        page_height_px: f64,
        gap_px: f64,
        top_margin_px: f64,
        bottom_buffer_px: f64,
    ) -> Self {
        PageGeometry {
            page_height_px,
            gap_px,
            visual_page_stride_px: page_height_px + gap_px,
            top_margin_px,
            bottom_buffer_px,
        }
    }

    pub fn from_millimetres(dims: PageDimensions) -> Self {
        let px = |mm: f64| (mm * dims.pixels_per_mm).ceil();
        Self::from_pixels(
            px(dims.page_height_mm),
            px(dims.gap_mm),
            px(dims.top_margin_mm),
            dims.bottom_buffer_px,
        )
    }

    /// A4 pages, 20mm gap, 15mm top margin, 80px bottom buffer.
    pub fn a4() -> Self {
        Self::from_millimetres(PageDimensions::default())
    }

    pub fn page_height_px(&self) -> f64 {
        self.page_height_px
    }

    pub fn gap_px(&self) -> f64 {
        self.gap_px
    }

    pub fn visual_page_stride_px(&self) -> f64 {
        self.visual_page_stride_px
    }

    pub fn top_margin_px(&self) -> f64 {
        self.top_margin_px
    }

    pub fn bottom_buffer_px(&self) -> f64 {
        self.bottom_buffer_px
    }

    /// Index of the visual page whose stride contains `offset_px`.
    pub fn page_index(&self, offset_px: f64) -> i64 {
        (offset_px / self.visual_page_stride_px).floor() as i64
    }

    /// Bottom edge of page `page` (the gap starts here).
    pub fn page_end(&self, page: i64) -> f64 {
        page as f64 * self.visual_page_stride_px + self.page_height_px
    }

    /// Content on page `page` must end at or above this offset.
    pub fn safe_limit(&self, page: i64) -> f64 {
        self.page_end(page) - self.bottom_buffer_px
    }

    /// Where content on page `page` starts, below its top margin.
    pub fn content_start(&self, page: i64) -> f64 {
        page as f64 * self.visual_page_stride_px + self.top_margin_px
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a4_pixel_values() {
        let geometry = PageGeometry::a4();
        assert_eq!(geometry.page_height_px(), 1123.0); // ceil(1122.66)
        assert_eq!(geometry.gap_px(), 76.0); // ceil(75.6)
        assert_eq!(geometry.visual_page_stride_px(), 1199.0);
        assert_eq!(geometry.top_margin_px(), 57.0); // ceil(56.7)
        assert_eq!(geometry.bottom_buffer_px(), 80.0);
    }

    #[test]
    fn test_stride_is_page_plus_gap() {
        let geometry = PageGeometry::from_millimetres(PageDimensions {
            pixels_per_mm: 2.5,
            page_height_mm: 279.4,
            gap_mm: 10.0,
            top_margin_mm: 12.7,
            bottom_buffer_px: 40.0,
        });
        assert_eq!(
            geometry.visual_page_stride_px(),
            geometry.page_height_px() + geometry.gap_px()
        );
        assert_eq!(geometry.page_height_px(), 699.0); // ceil(698.5)
    }

    #[test]
    fn test_page_landmarks() {
        let geometry = PageGeometry::from_pixels(1000.0, 50.0, 20.0, 80.0);
        assert_eq!(geometry.page_index(0.0), 0);
        assert_eq!(geometry.page_index(1049.9), 0);
        assert_eq!(geometry.page_index(1050.0), 1);
        assert_eq!(geometry.page_end(1), 2050.0);
        assert_eq!(geometry.safe_limit(0), 920.0);
        assert_eq!(geometry.content_start(1), 1070.0);
    }

    #[test]
    fn test_geometry_serializes_camel_case() {
        let value = serde_json::to_value(PageGeometry::a4()).unwrap();
        assert_eq!(value["visualPageStridePx"], 1199.0);
        assert_eq!(value["topMarginPx"], 57.0);
    }
}
