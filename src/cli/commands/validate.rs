//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Redline configuration file.

use super::EXIT_CONFIG;
use crate::config::load_config;
use crate::detection::detector::patterns::PatternRegistry;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config also validates every section
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let registry = match PatternRegistry::from_config(&config.detection) {
            Ok(registry) => registry,
            Err(e) => {
                println!("❌ Pattern catalog failed to compile");
                println!("   Error: {e:#}");
                return Ok(EXIT_CONFIG);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        match &config.detection.pattern_library {
            Some(path) => println!("  Pattern Library: {}", path.display()),
            None => println!("  Pattern Library: built-in"),
        }
        println!("  Active Rules: {}", registry.len());
        println!(
            "  Disabled Categories: {:?}",
            config.detection.disabled_categories
        );
        println!(
            "  Entropy Rule: >= {} bits over {} chars",
            config.detection.entropy_threshold, config.detection.entropy_min_length
        );
        println!("  Window Slack: {}", config.locator.window_slack);
        println!("  Mask Character: {}", config.redaction.mask_char);
        println!("  Blackout Colour: {}", config.redaction.blackout_color);
        println!("  Preview Zoom: {}", config.redaction.preview_zoom);
        if config.audit.enabled {
            println!("  Audit Log: {}", config.audit.log_path.display());
        } else {
            println!("  Audit Log: disabled");
        }
        println!();
        Ok(0)
    }
}
