//! Detection configuration

use crate::detection::models::PiiCategory;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::PathBuf;

/// Scanner and pattern catalog settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Path to a pattern library TOML file (the built-in library when unset)
    #[serde(default)]
    pub pattern_library: Option<PathBuf>,

    /// Per-category context window overrides in characters
    #[serde(default = "default_context_windows")]
    pub context_windows: BTreeMap<String, usize>,

    /// Minimum Shannon entropy (bits/char) for an unlabelled token to count as a key
    #[serde(default = "default_entropy_threshold")]
    pub entropy_threshold: f64,

    /// Minimum token length for the entropy rule
    #[serde(default = "default_entropy_min_length")]
    pub entropy_min_length: usize,

    /// Categories whose rules are not compiled
    #[serde(default)]
    pub disabled_categories: Vec<String>,
}

fn default_context_windows() -> BTreeMap<String, usize> {
    BTreeMap::from([
        ("account".to_string(), 60),
        ("digit_sequence".to_string(), 80),
    ])
}

fn default_entropy_threshold() -> f64 {
    4.0
}

fn default_entropy_min_length() -> usize {
    20
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            pattern_library: None,
            context_windows: default_context_windows(),
            entropy_threshold: default_entropy_threshold(),
            entropy_min_length: default_entropy_min_length(),
            disabled_categories: Vec::new(),
        }
    }
}

/// Adjustments applied to catalog rules while they are compiled
#[derive(Debug, Clone, Default)]
pub struct RuleOverrides {
    pub context_windows: HashMap<PiiCategory, usize>,
    pub entropy_threshold: Option<f64>,
    pub entropy_min_length: Option<usize>,
    pub disabled: HashSet<PiiCategory>,
}

impl DetectionConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(ref path) = self.pattern_library {
            if !path.exists() {
                anyhow::bail!("Pattern library file not found: {}", path.display());
            }
            if path.extension().and_then(|s| s.to_str()) != Some("toml") {
                anyhow::bail!("Pattern library must be a TOML file: {}", path.display());
            }
        }

        if !self.entropy_threshold.is_finite() || self.entropy_threshold <= 0.0 {
            anyhow::bail!(
                "detection.entropy_threshold must be a positive number, got {}",
                self.entropy_threshold
            );
        }

        if self.entropy_min_length == 0 {
            anyhow::bail!("detection.entropy_min_length must be > 0");
        }

        self.rule_overrides()
            .context("Invalid detection category settings")?;

        Ok(())
    }

    /// Resolves category names into typed rule overrides
    pub fn rule_overrides(&self) -> Result<RuleOverrides> {
        let mut context_windows = HashMap::new();
        for (name, &window) in &self.context_windows {
            let category: PiiCategory = name
                .parse()
                .map_err(|e: String| anyhow::anyhow!(e))
                .with_context(|| format!("Invalid context_windows key '{name}'"))?;
            if window == 0 {
                anyhow::bail!("Context window for '{name}' must be > 0");
            }
            context_windows.insert(category, window);
        }

        let mut disabled = HashSet::new();
        for name in &self.disabled_categories {
            let category: PiiCategory = name
                .parse()
                .map_err(|e: String| anyhow::anyhow!(e))
                .with_context(|| format!("Invalid disabled_categories entry '{name}'"))?;
            disabled.insert(category);
        }

        Ok(RuleOverrides {
            context_windows,
            entropy_threshold: Some(self.entropy_threshold),
            entropy_min_length: Some(self.entropy_min_length),
            disabled,
        })
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("REDLINE_DETECTION_PATTERN_LIBRARY") {
            self.pattern_library = Some(PathBuf::from(val));
        }

        if let Ok(val) = std::env::var("REDLINE_DETECTION_ENTROPY_THRESHOLD") {
            self.entropy_threshold = val
                .parse()
                .context("Invalid REDLINE_DETECTION_ENTROPY_THRESHOLD value")?;
        }

        if let Ok(val) = std::env::var("REDLINE_DETECTION_ENTROPY_MIN_LENGTH") {
            self.entropy_min_length = val
                .parse()
                .context("Invalid REDLINE_DETECTION_ENTROPY_MIN_LENGTH value")?;
        }

        if let Ok(val) = std::env::var("REDLINE_DETECTION_DISABLED_CATEGORIES") {
            self.disabled_categories = val
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }

        // Format: "account=60,digit_sequence=80"
        if let Ok(val) = std::env::var("REDLINE_DETECTION_CONTEXT_WINDOWS") {
            for pair in val.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                let (name, window) = pair.split_once('=').with_context(|| {
                    format!("Invalid REDLINE_DETECTION_CONTEXT_WINDOWS entry '{pair}'")
                })?;
                let window = window.trim().parse().with_context(|| {
                    format!("Invalid REDLINE_DETECTION_CONTEXT_WINDOWS window '{pair}'")
                })?;
                self.context_windows.insert(name.trim().to_string(), window);
            }
        }

        Ok(())
    }
}

/// Audit logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Enable audit logging
    #[serde(default = "default_audit_enabled")]
    pub enabled: bool,

    /// Audit log file path
    #[serde(default = "default_audit_log_path")]
    pub log_path: PathBuf,

    /// Use JSON format for audit logs
    #[serde(default = "default_audit_json_format")]
    pub json_format: bool,
}

fn default_audit_enabled() -> bool {
    false
}

fn default_audit_log_path() -> PathBuf {
    PathBuf::from("./audit/detections.log")
}

fn default_audit_json_format() -> bool {
    true
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: default_audit_enabled(),
            log_path: default_audit_log_path(),
            json_format: default_audit_json_format(),
        }
    }
}

impl AuditConfig {
    /// Validate audit configuration
    pub fn validate(&self) -> Result<()> {
        if self.enabled && self.log_path.as_os_str().is_empty() {
            anyhow::bail!("audit.log_path must be set when audit logging is enabled");
        }
        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("REDLINE_AUDIT_ENABLED") {
            self.enabled = val.parse().context("Invalid REDLINE_AUDIT_ENABLED value")?;
        }

        if let Ok(val) = std::env::var("REDLINE_AUDIT_LOG_PATH") {
            self.log_path = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var("REDLINE_AUDIT_JSON_FORMAT") {
            self.json_format = val
                .parse()
                .context("Invalid REDLINE_AUDIT_JSON_FORMAT value")?;
        }

        Ok(())
    }
}
