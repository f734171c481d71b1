//! Configuration management for Redline.
//!
//! # Overview
//!
//! Redline uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `REDLINE_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use redline::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("redline.toml")?;
//! println!("Mask character: {}", config.redaction.mask_char);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`DetectionConfig`] - Pattern library, context windows, entropy rule
//! - [`LocatorConfig`] - Fuzzy window slack
//! - [`RedactionConfig`] - Mask character, colours, zoom, media blur, cell text
//! - [`AuditConfig`] - Detection audit log
//! - [`LoggingConfig`] - Local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [detection]
//! pattern_library = "${REDLINE_PATTERNS}"
//! disabled_categories = ["health_info"]
//!
//! [detection.context_windows]
//! account = 60
//! digit_sequence = 80
//!
//! [redaction]
//! mask_char = "█"
//! preview_zoom = 2.0
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use crate::detection::config::{AuditConfig, DetectionConfig};
pub use loader::{load_config, load_config_from_str};
pub use schema::{ApplicationConfig, LocatorConfig, LoggingConfig, RedactionConfig, RedlineConfig};
