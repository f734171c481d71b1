//! Document backends for Redline.
//!
//! The core works against the collaborator traits in [`traits`]. Format
//! parsers (PDF, OOXML, image codecs) plug in by implementing them.
//!
//! - [`layout`] - OCR/layout JSON documents, as pages with word boxes
//! - [`memory`] - plain-text line documents and JSON-backed workbooks
//!
//! # Example
//!
//! ```rust
//! use redline::adapters::layout::{LayoutDocument, LayoutPage};
//! use redline::adapters::traits::Surface;
//! use redline::domain::WordBox;
//!
//! let doc = LayoutDocument::new(vec![LayoutPage::new(
//!     612.0,
//!     792.0,
//!     vec![WordBox::new("hello", 72.0, 72.0, 30.0, 12.0)],
//! )]);
//! let surfaces = doc.surfaces();
//! assert_eq!(surfaces[0].extract_text().unwrap(), "hello");
//! ```

pub mod layout;
pub mod memory;
pub mod traits;

pub use layout::{LayoutDocument, LayoutLoader, LayoutPage, LayoutSurface};
pub use memory::{LineDocument, MemoryGrid};
