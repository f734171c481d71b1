//! CLI command implementations
//!
//! Every command returns its process exit code: 0 on success, 2 for
//! configuration errors and 5 for fatal errors.

pub mod cells;
pub mod init;
pub mod locate;
pub mod map_region;
pub mod mask;
pub mod scan;
pub mod validate;

use crate::config::{load_config, load_config_from_str, RedlineConfig};
use crate::detection::DetectionEngine;
use std::path::Path;

/// Exit code for configuration errors
pub const EXIT_CONFIG: i32 = 2;
/// Exit code for fatal errors
pub const EXIT_FATAL: i32 = 5;

/// Loads the configuration file, or the defaults when it does not exist
pub(crate) fn load_or_default(config_path: &str) -> crate::domain::Result<RedlineConfig> {
    if Path::new(config_path).exists() {
        load_config(config_path)
    } else {
        tracing::debug!(config_path = %config_path, "No configuration file, using defaults");
        load_config_from_str("")
    }
}

/// Loads the configuration, printing the error when it is invalid
pub(crate) fn load_or_report(config_path: &str) -> Option<RedlineConfig> {
    match load_or_default(config_path) {
        Ok(config) => Some(config),
        Err(e) => {
            eprintln!("❌ Configuration error: {e}");
            None
        }
    }
}

pub(crate) fn build_engine(config: &RedlineConfig) -> anyhow::Result<DetectionEngine> {
    DetectionEngine::new(&config.detection, config.locator.window_slack)?.with_audit(&config.audit)
}

/// Splits a comma-separated list of numbers
pub(crate) fn parse_number_list<T: std::str::FromStr>(value: &str) -> Result<Vec<T>, String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse().map_err(|_| format!("Invalid number '{s}'")))
        .collect()
}
