//! In-memory layout documents
//!
//! A layout document is the JSON an OCR or PDF text extractor produces:
//!
//! ```json
//! {
//!   "pages": [
//!     {
//!       "width": 612.0,
//!       "height": 792.0,
//!       "words": [{ "text": "Phone:", "x": 72.0, "y": 90.0, "w": 36.0, "h": 12.0 }]
//!     }
//!   ]
//! }
//! ```
//!
//! Each page is a [`Surface`], and the document as a whole is a
//! [`PagedDocument`] whose fills are recorded and written back on save.

use super::traits::{DocumentLoader, PagedDocument, Surface};
use crate::domain::{DocumentUnits, Rect, RedlineError, Result, SurfaceId, WordBox};
use crate::redaction::raster::Rgb;
use serde::{Deserialize, Serialize};

/// Words whose vertical centers differ by less than this share a line
const LINE_TOLERANCE: f64 = 0.5;

/// An opaque fill applied to a page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    pub rect: Rect,
    pub color: String,
}

/// One page of a layout document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutPage {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub words: Vec<WordBox>,
    /// Extracted text, when the producer supplies it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fills: Vec<Fill>,
}

impl LayoutPage {
    pub fn new(width: f64, height: f64, words: Vec<WordBox>) -> Self {
        Self {
            width,
            height,
            words,
            text: None,
            fills: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutDocument {
    pub pages: Vec<LayoutPage>,
}

impl LayoutDocument {
    pub fn new(pages: Vec<LayoutPage>) -> Self {
        Self { pages }
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| RedlineError::Decode(format!("Invalid layout document: {e}")))
    }

    pub fn to_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    /// One surface per page, in page order
    pub fn surfaces(&self) -> Vec<LayoutSurface<'_>> {
        self.pages
            .iter()
            .enumerate()
            .map(|(index, page)| LayoutSurface { index, page })
            .collect()
    }

    /// Page heights in points, for building a preview layout
    pub fn page_heights(&self) -> Vec<f64> {
        self.pages.iter().map(|p| p.height).collect()
    }
}

impl PagedDocument for LayoutDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_bounds(&self, page: usize) -> Option<Rect> {
        self.pages
            .get(page)
            .map(|p| Rect::new(0.0, 0.0, p.width, p.height))
    }

    fn fill_rect(&mut self, page: usize, rect: Rect, color: Rgb) -> Result<()> {
        let target = self
            .pages
            .get_mut(page)
            .ok_or_else(|| RedlineError::surface(SurfaceId::Page(page), "page does not exist"))?;
        target.fills.push(Fill {
            rect,
            color: color.to_string(),
        });
        Ok(())
    }

    fn save(&self) -> Result<Vec<u8>> {
        self.to_json()
    }
}

/// Loads [`LayoutDocument`]s from JSON bytes
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutLoader;

impl DocumentLoader for LayoutLoader {
    type Document = LayoutDocument;

    fn load(&self, bytes: &[u8]) -> Result<LayoutDocument> {
        LayoutDocument::from_json(bytes)
    }
}

/// A borrowed view of one layout page
#[derive(Debug, Clone, Copy)]
pub struct LayoutSurface<'a> {
    index: usize,
    page: &'a LayoutPage,
}

impl LayoutSurface<'_> {
    pub fn index(&self) -> usize {
        self.index
    }
}

fn same_line(a: &WordBox, b: &WordBox) -> bool {
    let ca = a.y + a.h / 2.0;
    let cb = b.y + b.h / 2.0;
    (ca - cb).abs() < (a.h.min(b.h) * LINE_TOLERANCE).max(f64::EPSILON)
}

impl Surface for LayoutSurface<'_> {
    fn id(&self) -> SurfaceId {
        SurfaceId::Page(self.index)
    }

    fn units(&self) -> DocumentUnits {
        DocumentUnits::Points
    }

    fn extract_text(&self) -> Result<String> {
        if let Some(text) = &self.page.text {
            return Ok(text.clone());
        }

        let mut text = String::new();
        let mut previous: Option<&WordBox> = None;
        for word in &self.page.words {
            if let Some(prev) = previous {
                text.push(if same_line(prev, word) { ' ' } else { '\n' });
            }
            text.push_str(&word.text);
            previous = Some(word);
        }
        Ok(text)
    }

    fn search_rects(&self, literal: &str) -> Vec<Rect> {
        let tokens: Vec<&str> = literal.split_whitespace().collect();
        if tokens.is_empty() {
            return Vec::new();
        }

        let words = &self.page.words;
        let mut rects = Vec::new();
        let mut start = 0;
        while start + tokens.len() <= words.len() {
            let run = &words[start..start + tokens.len()];
            if run.iter().zip(&tokens).all(|(w, t)| w.text == *t) {
                let rect = run
                    .iter()
                    .skip(1)
                    .fold(run[0].rect(), |acc, w| acc.union(&w.rect()));
                rects.push(rect);
                start += tokens.len();
            } else {
                start += 1;
            }
        }
        rects
    }

    fn word_boxes(&self) -> Vec<WordBox> {
        self.page.words.clone()
    }
}
