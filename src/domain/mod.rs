//! Domain types for Redline.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Identifiers** ([`SurfaceId`], [`CellRef`])
//! - **Geometry** ([`Rect`], [`Region`], [`WordBox`], [`PixelRect`])
//! - **Error types** ([`RedlineError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! Fallible core operations return [`Result<T, RedlineError>`]:
//!
//! ```rust
//! use redline::domain::{RedlineError, Result};
//!
//! fn decode(bytes: &[u8]) -> Result<()> {
//!     if bytes.is_empty() {
//!         return Err(RedlineError::Decode("empty input".to_string()));
//!     }
//!     Ok(())
//! }
//! # assert!(decode(&[]).is_err());
//! ```

pub mod errors;
pub mod geometry;
pub mod ids;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::RedlineError;
pub use geometry::{DocumentUnits, PixelRect, Rect, Region, WordBox};
pub use ids::{CellRef, SurfaceId};
pub use result::Result;
