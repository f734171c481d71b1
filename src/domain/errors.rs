//! Domain error types
//!
//! This module defines the error hierarchy for Redline. Only two kinds of
//! failure abort an operation: input that cannot be decoded at all, and
//! output that cannot be encoded. Everything else (a page that fails to
//! extract, a region with bad coordinates, a phrase that cannot be located)
//! is reported alongside a best-effort result instead of as an error.

use thiserror::Error;

/// Main Redline error type
#[derive(Debug, Error)]
pub enum RedlineError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The input document or image could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// The redacted output could not be encoded
    #[error("Encode error: {0}")]
    Encode(String),

    /// A single surface (page, sheet, image) could not be read
    #[error("Surface error on {surface}: {message}")]
    Surface { surface: String, message: String },

    /// Pattern catalog errors (bad regex, unknown category)
    #[error("Pattern error: {0}")]
    Pattern(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl RedlineError {
    /// Builds a surface error for the given surface label
    pub fn surface(surface: impl ToString, message: impl Into<String>) -> Self {
        Self::Surface {
            surface: surface.to_string(),
            message: message.into(),
        }
    }

    /// Whether the error means no meaningful output can be produced
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Decode(_) | Self::Encode(_))
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for RedlineError {
    fn from(err: std::io::Error) -> Self {
        RedlineError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for RedlineError {
    fn from(err: serde_json::Error) -> Self {
        RedlineError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for RedlineError {
    fn from(err: toml::de::Error) -> Self {
        RedlineError::Configuration(format!("TOML parse error: {err}"))
    }
}
