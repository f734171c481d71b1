//! Preview-to-page coordinate reconciliation
//!
//! Multi-page previews stack every page, rendered at `zoom`, into one tall
//! image. A rectangle drawn on that image maps back to exactly one page.

use crate::domain::{DocumentUnits, PixelRect, Rect, Region, RedlineError, Result, SurfaceId};

/// Vertical stacking of rendered pages
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewLayout {
    zoom: f64,
    /// `offsets[p]` is the preview y where page `p` starts; the last entry is the total height
    offsets: Vec<f64>,
}

impl PreviewLayout {
    /// Builds the layout from native page heights (points) and the render zoom
    pub fn from_page_heights(heights: &[f64], zoom: f64) -> Result<Self> {
        Self::validate_zoom(zoom)?;
        let rendered = heights
            .iter()
            .map(|h| {
                if h.is_finite() && *h >= 0.0 {
                    Ok(h * zoom)
                } else {
                    Err(RedlineError::Validation(format!("Invalid page height: {h}")))
                }
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::stack(rendered, zoom))
    }

    /// Builds the layout from the pixel heights of the rendered pages
    pub fn from_pixel_heights(heights: &[u32], zoom: f64) -> Result<Self> {
        Self::validate_zoom(zoom)?;
        Ok(Self::stack(heights.iter().map(|&h| h as f64).collect(), zoom))
    }

    fn validate_zoom(zoom: f64) -> Result<()> {
        if !zoom.is_finite() || zoom <= 0.0 {
            return Err(RedlineError::Validation(format!(
                "Zoom must be a positive number, got {zoom}"
            )));
        }
        Ok(())
    }

    fn stack(rendered: Vec<f64>, zoom: f64) -> Self {
        let mut offsets = Vec::with_capacity(rendered.len() + 1);
        let mut y = 0.0;
        offsets.push(y);
        for h in rendered {
            y += h;
            offsets.push(y);
        }
        Self { zoom, offsets }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn page_count(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Total preview height in pixels
    pub fn total_height(&self) -> f64 {
        self.offsets.last().copied().unwrap_or(0.0)
    }

    /// Preview y where `page` starts
    pub fn page_offset(&self, page: usize) -> Option<f64> {
        (page < self.page_count()).then(|| self.offsets[page])
    }

    /// Page under preview coordinate `y`
    pub fn page_at(&self, y: f64) -> Option<usize> {
        if !y.is_finite() || y < 0.0 || y >= self.total_height() {
            return None;
        }
        // First page whose end lies beyond y; empty pages are skipped
        let p = self.offsets[1..].partition_point(|&end| end <= y);
        (p < self.page_count()).then_some(p)
    }

    /// Maps a preview rectangle `[x, y, w, h]` to `(page, rect in points)`
    pub fn to_page(&self, rect: &PixelRect) -> Option<(usize, Rect)> {
        self.to_page_xywh(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64)
    }

    /// Float variant of [`to_page`](Self::to_page)
    pub fn to_page_xywh(&self, x: f64, y: f64, w: f64, h: f64) -> Option<(usize, Rect)> {
        if !(x.is_finite() && w.is_finite() && h.is_finite()) {
            return None;
        }
        let page = self.page_at(y)?;
        let z = self.zoom;
        let top = y - self.offsets[page];
        Some((page, Rect::new(x / z, top / z, (x + w) / z, (top + h) / z)))
    }

    /// Maps a preview rectangle to a page region
    pub fn to_region(&self, rect: &PixelRect) -> Option<Region> {
        self.to_page(rect)
            .map(|(page, r)| Region::new(SurfaceId::Page(page), r, DocumentUnits::Points))
    }

    /// Maps a page rectangle in points to preview coordinates
    pub fn to_preview(&self, page: usize, rect: &Rect) -> Option<Rect> {
        let offset = self.page_offset(page)?;
        let z = self.zoom;
        Some(Rect::new(
            rect.x0 * z,
            rect.y0 * z + offset,
            rect.x1 * z,
            rect.y1 * z + offset,
        ))
    }
}

/// Scale between a canvas drawn in the browser and the original image
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayScale {
    original_width: u32,
    original_height: u32,
    display_width: u32,
    display_height: u32,
}

/// Drags smaller than this (in canvas pixels) are ignored
pub const MIN_DRAG_PIXELS: i64 = 5;

impl DisplayScale {
    pub fn new(
        original_width: u32,
        original_height: u32,
        display_width: u32,
        display_height: u32,
    ) -> Self {
        Self {
            original_width,
            original_height,
            display_width,
            display_height,
        }
    }

    fn factors(&self) -> (f64, f64) {
        if self.original_width == 0 || self.display_width == 0 || self.display_height == 0 {
            return (1.0, 1.0);
        }
        (
            self.original_width as f64 / self.display_width as f64,
            self.original_height as f64 / self.display_height as f64,
        )
    }

    /// Canvas rectangle to original image pixels
    pub fn to_original(&self, rect: &PixelRect) -> PixelRect {
        let (sx, sy) = self.factors();
        scale(rect, sx, sy)
    }

    /// Original image pixels to canvas rectangle
    pub fn to_display(&self, rect: &PixelRect) -> PixelRect {
        let (sx, sy) = self.factors();
        scale(rect, 1.0 / sx, 1.0 / sy)
    }

    /// Reads `[x, y, w, h]`, or `[x0, y0, x1, y1]` when the third or fourth
    /// value exceeds the original image size
    pub fn interpret(&self, values: [i64; 4]) -> PixelRect {
        let [x, y, a, b] = values;
        if a > self.original_width as i64 || b > self.original_height as i64 {
            PixelRect::new(x, y, a - x, b - y)
        } else {
            PixelRect::new(x, y, a, b)
        }
    }

    /// Rectangle spanned by a drag from `start` to `end`, if large enough
    pub fn from_drag(start: (i64, i64), end: (i64, i64)) -> Option<PixelRect> {
        let x = start.0.min(end.0);
        let y = start.1.min(end.1);
        let w = (end.0 - start.0).abs();
        let h = (end.1 - start.1).abs();
        (w > MIN_DRAG_PIXELS && h > MIN_DRAG_PIXELS).then(|| PixelRect::new(x, y, w, h))
    }
}

fn scale(rect: &PixelRect, sx: f64, sy: f64) -> PixelRect {
    PixelRect::new(
        (rect.x as f64 * sx).round() as i64,
        (rect.y as f64 * sy).round() as i64,
        (rect.w as f64 * sx).round() as i64,
        (rect.h as f64 * sy).round() as i64,
    )
}
