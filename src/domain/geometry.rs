//! Geometry shared by the locator and the redaction applicator

use super::ids::SurfaceId;
use serde::{Deserialize, Serialize};

/// Coordinate space a region is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DocumentUnits {
    /// PDF user-space points (1/72 inch)
    #[default]
    Points,
    /// Raster pixels
    Pixels,
    /// Spreadsheet cells (column, row)
    Cells,
}

/// Axis-aligned rectangle `(x0, y0, x1, y1)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Rect {
    /// Creates a rectangle, normalizing the corner order
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            x0: x0.min(x1),
            y0: y0.min(y1),
            x1: x0.max(x1),
            y1: y0.max(y1),
        }
    }

    /// Creates a rectangle from an origin and a size
    pub fn from_xywh(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self::new(x, y, x + w, y + h)
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// All four coordinates are finite
    pub fn is_finite(&self) -> bool {
        self.x0.is_finite() && self.y0.is_finite() && self.x1.is_finite() && self.y1.is_finite()
    }

    /// Finite, ordered and with a positive area
    pub fn is_valid(&self) -> bool {
        self.is_finite() && self.x0 < self.x1 && self.y0 < self.y1
    }

    /// Smallest rectangle covering both
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Overlapping part of both rectangles, if any
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let clipped = Rect {
            x0: self.x0.max(other.x0),
            y0: self.y0.max(other.y0),
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
        };
        clipped.is_valid().then_some(clipped)
    }

    /// Whether `other` lies entirely inside this rectangle
    pub fn contains(&self, other: &Rect) -> bool {
        other.x0 >= self.x0 && other.y0 >= self.y0 && other.x1 <= self.x1 && other.y1 <= self.y1
    }
}

/// Rectangle in a surface's native coordinate space, targeted for redaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub surface: SurfaceId,
    pub rect: Rect,
    pub units: DocumentUnits,
}

impl Region {
    pub fn new(surface: SurfaceId, rect: Rect, units: DocumentUnits) -> Self {
        Self {
            surface,
            rect,
            units,
        }
    }
}

/// Atomic OCR/layout unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordBox {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl WordBox {
    pub fn new(text: impl Into<String>, x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            w,
            h,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_xywh(self.x, self.y, self.w, self.h)
    }
}

/// Integer pixel rectangle as collected on a preview or image `[x, y, w, h]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: i64,
    pub y: i64,
    pub w: i64,
    pub h: i64,
}

impl PixelRect {
    pub fn new(x: i64, y: i64, w: i64, h: i64) -> Self {
        Self { x, y, w, h }
    }

    /// Clips to an image of the given size; `None` when nothing remains
    pub fn clip(&self, width: u32, height: u32) -> Option<(usize, usize, usize, usize)> {
        if self.w <= 0 || self.h <= 0 {
            return None;
        }
        let x0 = self.x.max(0);
        let y0 = self.y.max(0);
        let x1 = self.x.saturating_add(self.w).min(width as i64);
        let y1 = self.y.saturating_add(self.h).min(height as i64);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as usize, y0 as usize, x1 as usize, y1 as usize))
    }

    pub fn to_rect(&self) -> Rect {
        Rect::from_xywh(self.x as f64, self.y as f64, self.w as f64, self.h as f64)
    }
}
