//! Collaborator traits for document backends
//!
//! The engine never parses PDF, OOXML or image formats itself. Backends
//! implement these traits and the engine works purely in terms of text,
//! word boxes, rectangles and pixel buffers.

use crate::domain::{CellRef, DocumentUnits, Rect, Result, SurfaceId, WordBox};
use crate::redaction::raster::{PixelBuffer, Rgb};
use serde::{Deserialize, Serialize};

/// One text-bearing unit: a PDF page, a sheet, an OCR'd image
pub trait Surface: Send + Sync {
    fn id(&self) -> SurfaceId;

    fn units(&self) -> DocumentUnits;

    /// Full text of the surface; failure is isolated to this surface
    fn extract_text(&self) -> Result<String>;

    /// Rectangles of every exact occurrence of `literal`
    fn search_rects(&self, literal: &str) -> Vec<Rect>;

    /// Word boxes, left to right and top to bottom
    fn word_boxes(&self) -> Vec<WordBox>;
}

/// A document made of fixed-size pages that can be painted over
pub trait PagedDocument {
    fn page_count(&self) -> usize;

    /// Page rectangle in points, if the page exists
    fn page_bounds(&self, page: usize) -> Option<Rect>;

    /// Draws an opaque filled rectangle on `page`
    fn fill_rect(&mut self, page: usize, rect: Rect, color: Rgb) -> Result<()>;

    /// Serializes the document
    fn save(&self) -> Result<Vec<u8>>;
}

/// Opens a paged document from bytes
pub trait DocumentLoader {
    type Document: PagedDocument;

    /// Fails with [`RedlineError::Decode`](crate::domain::RedlineError::Decode) on unreadable input
    fn load(&self, bytes: &[u8]) -> Result<Self::Document>;
}

/// A named entry of a zip-style package (OOXML parts)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageEntry {
    pub name: String,
    pub data: Vec<u8>,
}

impl PackageEntry {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Last path segment of the entry name
    pub fn base_name(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }

    pub fn is_directory(&self) -> bool {
        self.name.ends_with('/')
    }
}

/// Reads and writes package entries in order
pub trait PackageCodec {
    fn read_entries(&self, bytes: &[u8]) -> Result<Vec<PackageEntry>>;

    fn write_entries(&self, entries: &[PackageEntry]) -> Result<Vec<u8>>;
}

/// Encoded image format, preserved across a redaction round trip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Jpeg,
    Other(String),
}

impl ImageFormat {
    /// Guesses the format from a file name extension
    pub fn from_name(name: &str) -> Self {
        let ext = name.rsplit('.').next().unwrap_or_default().to_lowercase();
        match ext.as_str() {
            "png" => Self::Png,
            "jpg" | "jpeg" => Self::Jpeg,
            _ => Self::Other(ext),
        }
    }
}

/// A decoded image and the format it came from
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub buffer: PixelBuffer,
    pub format: ImageFormat,
}

pub trait ImageCodec {
    /// Fails with [`RedlineError::Decode`](crate::domain::RedlineError::Decode) on unreadable input
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage>;

    fn encode(&self, buffer: &PixelBuffer, format: &ImageFormat) -> Result<Vec<u8>>;
}

/// A document of independent text units (DOCX paragraphs and table cells)
pub trait TextContainer {
    fn unit_count(&self) -> usize;

    fn unit_text(&self, index: usize) -> Option<String>;

    /// Replaces the text of one unit, keeping unit boundaries
    fn replace_unit_text(&mut self, index: usize, text: &str) -> Result<()>;

    fn save(&self) -> Result<Vec<u8>>;
}

/// A workbook of sheets made of cells
pub trait CellGrid {
    fn sheet_count(&self) -> usize;

    /// `(columns, rows)` of the used range of `sheet`
    fn dimensions(&self, sheet: usize) -> Option<(usize, usize)>;

    fn cell_text(&self, sheet: usize, cell: CellRef) -> Option<String>;

    fn set_cell_text(&mut self, sheet: usize, cell: CellRef, text: &str) -> Result<()>;

    fn save(&self) -> Result<Vec<u8>>;
}
