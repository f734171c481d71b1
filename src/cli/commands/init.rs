//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use super::{EXIT_CONFIG, EXIT_FATAL};
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "redline.toml")]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Redline configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Validate configuration: redline validate-config");
                println!("  3. Scan a file: redline scan notes.txt --report console");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(EXIT_FATAL)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r##"# Redline Configuration File
# PII detection and document redaction

[application]
log_level = "info"

[detection]
entropy_threshold = 4.0
entropy_min_length = 20
disabled_categories = []

[detection.context_windows]
account = 60
digit_sequence = 80

[locator]
window_slack = 6

[redaction]
mask_char = "█"
blackout_color = "#000000"
preview_zoom = 2.0
media_blur_sigma = 8.0
media_prefixes = ["word/media/", "xl/media/"]
cell_replacement = "REDACTED"

[audit]
enabled = false
log_path = "./audit/detections.log"
json_format = true

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "daily"
local_max_size_mb = 100
"##
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r##"# Redline Configuration File
# PII detection and document redaction
#
# This file contains all configuration options with examples and explanations.
# Every setting has a default, so any section may be left out.
#
# Values may reference environment variables with ${VAR_NAME}, and any
# setting can be overridden with REDLINE_<SECTION>_<KEY>, for example
# REDLINE_REDACTION_MASK_CHAR or REDLINE_LOCATOR_WINDOW_SLACK.

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# ============================================================================
# Detection
# ============================================================================
[detection]
# Optional: custom pattern catalog (TOML). The built-in catalog is used
# when this is not set.
# pattern_library = "${REDLINE_PATTERNS}"

# Minimum Shannon entropy (bits per char) for the high-entropy token rule
entropy_threshold = 4.0

# Minimum token length for the high-entropy token rule
entropy_min_length = 20

# Categories that are never reported, e.g. ["health_info", "otp"]
disabled_categories = []

# Characters searched for context keywords before a candidate
[detection.context_windows]
account = 60
digit_sequence = 80

# ============================================================================
# Spatial Locator
# ============================================================================
[locator]
# Word boxes a fuzzy match window may span beyond the phrase token count
window_slack = 6

# ============================================================================
# Redaction
# ============================================================================
[redaction]
# Character used for text masking
mask_char = "█"

# Fill colour for page and image blackout
blackout_color = "#000000"

# Zoom the multi-page previews were rendered at
preview_zoom = 2.0

# Gaussian sigma for embedded media blur
media_blur_sigma = 8.0

# Package folders holding embedded media (must end with '/')
media_prefixes = ["word/media/", "xl/media/"]

# Text written into redacted spreadsheet cells
cell_replacement = "REDACTED"

# ============================================================================
# Detection Audit Log
# ============================================================================
[audit]
# Write one entry per job; matched values are stored as SHA-256 hashes
enabled = false

# Audit log file
log_path = "./audit/detections.log"

# JSON lines (true) or plain text (false)
json_format = true

# ============================================================================
# Logging Configuration
# ============================================================================
[logging]
# Enable local file logging
local_enabled = false

# Local log directory
local_path = "./logs"

# Log rotation (daily, hourly, never)
local_rotation = "daily"

# Maximum log file size in MB
local_max_size_mb = 100
"##
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_from_str;

    #[test]
    fn test_init_args_defaults() {
        let args = InitArgs {
            output: "redline.toml".to_string(),
            with_examples: false,
            force: false,
        };

        assert_eq!(args.output, "redline.toml");
        assert!(!args.with_examples);
        assert!(!args.force);
    }

    #[test]
    fn test_generate_minimal_config() {
        let config = InitArgs::generate_minimal_config();
        assert!(config.contains("[application]"));
        assert!(config.contains("[detection]"));
        assert!(config.contains("[redaction]"));
    }

    #[test]
    fn test_generate_config_with_examples() {
        let config = InitArgs::generate_config_with_examples();
        assert!(config.contains("# Redline Configuration File"));
        assert!(config.contains("window_slack"));
        assert!(config.contains("media_prefixes"));
    }

    #[test]
    fn test_generated_configs_load() {
        let minimal = load_config_from_str(&InitArgs::generate_minimal_config()).unwrap();
        assert_eq!(minimal.redaction.cell_replacement, "REDACTED");

        let full = load_config_from_str(&InitArgs::generate_config_with_examples()).unwrap();
        assert_eq!(full.locator.window_slack, 6);
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("redline.toml");
        std::fs::write(&path, "# existing").unwrap();

        let args = InitArgs {
            output: path.to_string_lossy().to_string(),
            with_examples: false,
            force: false,
        };
        assert_eq!(args.execute().await.unwrap(), EXIT_CONFIG);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# existing");
    }
}
