//! Redaction applicators
//!
//! Every applicator takes the original bytes plus its targets and returns a
//! [`RedactionOutcome`]. Targets that cannot be applied are reported as
//! [`SkippedRegion`]s instead of failing the whole document, and a pass that
//! applies nothing hands back the input unchanged.
//!
//! - [`paged`]: opaque fills on PDF-like pages
//! - [`raster`]: blackout or blur on decoded images
//! - [`text`]: character masking of text units
//! - [`grid`]: cell and column replacement
//! - [`package`]: blur of media embedded in OOXML packages

pub mod blur;
pub mod grid;
pub mod outcome;
pub mod package;
pub mod paged;
pub mod raster;
pub mod text;

pub use outcome::{RedactionOutcome, SkippedRegion};
pub use raster::{PixelBuffer, RasterMode, Rgb};
pub use text::{mask_text, MaskStyle, DEFAULT_MASK_CHAR};
