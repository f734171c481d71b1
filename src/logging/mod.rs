//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Console output with configurable log levels
//! - JSON-formatted local file logs with daily rotation
//! - Field-consistent macros for the detection and redaction pipeline
//!
//! The core never logs matched text. Macros take categories, offsets,
//! surface identifiers and counts only.
//!
//! # Example
//!
//! ```no_run
//! use redline::logging::init_logging;
//! use redline::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log the completion of a scan over one text blob
///
/// # Example
///
/// ```no_run
/// use redline::log_scan_complete;
/// use std::time::Duration;
///
/// log_scan_complete!("page 0", 3, 1024, Duration::from_millis(4));
/// ```
#[macro_export]
macro_rules! log_scan_complete {
    ($surface:expr, $matches:expr, $text_len:expr, $duration:expr) => {
        tracing::debug!(
            surface = %$surface,
            matches = $matches,
            text_len = $text_len,
            duration_ms = $duration.as_millis(),
            "Scan completed"
        );
    };
}

/// Log a region that could not be applied
///
/// # Example
///
/// ```no_run
/// use redline::log_region_skipped;
///
/// log_region_skipped!("page 7", "page index out of range");
/// ```
#[macro_export]
macro_rules! log_region_skipped {
    ($target:expr, $reason:expr) => {
        tracing::warn!(
            target_region = %$target,
            reason = %$reason,
            "Region skipped"
        );
    };
}

/// Log a phrase that could not be located on a surface
///
/// # Example
///
/// ```no_run
/// use redline::log_locate_miss;
///
/// log_locate_miss!("page 2", Some("email"), 17);
/// ```
#[macro_export]
macro_rules! log_locate_miss {
    ($surface:expr, $category:expr, $phrase_chars:expr) => {
        tracing::debug!(
            surface = %$surface,
            category = ?$category,
            phrase_chars = $phrase_chars,
            "Phrase not located"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use redline::log_error_with_context;
/// use redline::domain::RedlineError;
///
/// let error = RedlineError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
