//! Configuration schema definitions
//!
//! Every section has defaults, so an empty file is a valid configuration.

use crate::detection::config::{AuditConfig, DetectionConfig};
use crate::redaction::grid::DEFAULT_CELL_REPLACEMENT;
use crate::redaction::package::DEFAULT_MEDIA_PREFIXES;
use crate::redaction::raster::Rgb;
use crate::redaction::text::DEFAULT_MASK_CHAR;
use crate::spatial::DEFAULT_WINDOW_SLACK;
use serde::{Deserialize, Serialize};

/// Main Redline configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RedlineConfig {
    /// Application settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Scanner and pattern catalog settings
    #[serde(default)]
    pub detection: DetectionConfig,

    /// Spatial locator settings
    #[serde(default)]
    pub locator: LocatorConfig,

    /// Redaction applicator settings
    #[serde(default)]
    pub redaction: RedactionConfig,

    /// Detection audit log
    #[serde(default)]
    pub audit: AuditConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl RedlineConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.detection.validate().map_err(|e| format!("{e:#}"))?;
        self.locator.validate()?;
        self.redaction.validate()?;
        self.audit.validate().map_err(|e| format!("{e:#}"))?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Spatial locator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocatorConfig {
    /// Word boxes a fuzzy window may span beyond the phrase token count
    #[serde(default = "default_window_slack")]
    pub window_slack: usize,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            window_slack: default_window_slack(),
        }
    }
}

impl LocatorConfig {
    fn validate(&self) -> Result<(), String> {
        if self.window_slack > 64 {
            return Err(format!(
                "locator.window_slack must be <= 64, got {}",
                self.window_slack
            ));
        }
        Ok(())
    }
}

/// Redaction applicator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedactionConfig {
    /// Character used for text masking
    #[serde(default = "default_mask_char")]
    pub mask_char: char,

    /// Fill colour for page and image blackout (#rrggbb)
    #[serde(default = "default_blackout_color")]
    pub blackout_color: String,

    /// Zoom the preview images were rendered at
    #[serde(default = "default_preview_zoom")]
    pub preview_zoom: f64,

    /// Gaussian sigma for embedded media blur
    #[serde(default = "default_media_blur_sigma")]
    pub media_blur_sigma: f64,

    /// Package folders holding embedded media
    #[serde(default = "default_media_prefixes")]
    pub media_prefixes: Vec<String>,

    /// Text written into redacted cells
    #[serde(default = "default_cell_replacement")]
    pub cell_replacement: String,
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            mask_char: default_mask_char(),
            blackout_color: default_blackout_color(),
            preview_zoom: default_preview_zoom(),
            media_blur_sigma: default_media_blur_sigma(),
            media_prefixes: default_media_prefixes(),
            cell_replacement: default_cell_replacement(),
        }
    }
}

impl RedactionConfig {
    /// Parsed blackout colour
    pub fn blackout_rgb(&self) -> Result<Rgb, String> {
        self.blackout_color
            .parse()
            .map_err(|e| format!("redaction.blackout_color: {e}"))
    }

    fn validate(&self) -> Result<(), String> {
        if self.mask_char.is_control() || self.mask_char.is_whitespace() {
            return Err("redaction.mask_char must be a visible character".to_string());
        }

        self.blackout_rgb()?;

        if !self.preview_zoom.is_finite() || self.preview_zoom <= 0.0 {
            return Err(format!(
                "redaction.preview_zoom must be a positive number, got {}",
                self.preview_zoom
            ));
        }

        if !self.media_blur_sigma.is_finite() || self.media_blur_sigma <= 0.0 {
            return Err(format!(
                "redaction.media_blur_sigma must be a positive number, got {}",
                self.media_blur_sigma
            ));
        }

        if let Some(prefix) = self.media_prefixes.iter().find(|p| !p.ends_with('/')) {
            return Err(format!(
                "redaction.media_prefixes entries must end with '/': '{prefix}'"
            ));
        }

        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,

    /// Maximum log file size in MB
    #[serde(default = "default_local_max_size_mb")]
    pub local_max_size_mb: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
            local_max_size_mb: default_local_max_size_mb(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_max_size_mb == 0 {
            return Err("logging.local_max_size_mb must be > 0".to_string());
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path must be set when local logging is enabled".to_string());
        }

        Ok(())
    }
}

// Default value functions

fn default_log_level() -> String {
    "info".to_string()
}

fn default_window_slack() -> usize {
    DEFAULT_WINDOW_SLACK
}

fn default_mask_char() -> char {
    DEFAULT_MASK_CHAR
}

fn default_blackout_color() -> String {
    Rgb::BLACK.to_string()
}

fn default_preview_zoom() -> f64 {
    2.0
}

fn default_media_blur_sigma() -> f64 {
    8.0
}

fn default_media_prefixes() -> Vec<String> {
    DEFAULT_MEDIA_PREFIXES.iter().map(|p| p.to_string()).collect()
}

fn default_cell_replacement() -> String {
    DEFAULT_CELL_REPLACEMENT.to_string()
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

fn default_local_max_size_mb() -> usize {
    100
}
