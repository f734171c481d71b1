//! Spatial mapping from text to regions
//!
//! - [`locator`] places phrases on a surface using exact search, word boxes
//!   and single-box fallback
//! - [`preview`] converts between stacked preview pixels and page points
//! - [`normalize`] is the text normalization shared by the fuzzy strategies

pub mod locator;
pub mod normalize;
pub mod preview;

pub use locator::{LocateTarget, SoftMiss, SpatialLocator, DEFAULT_WINDOW_SLACK};
pub use preview::{DisplayScale, PreviewLayout};
