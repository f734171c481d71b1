//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::RedlineConfig;
use crate::domain::errors::RedlineError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into RedlineConfig
/// 4. Applies environment variable overrides (REDLINE_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`RedlineError::Configuration`] if any step fails.
///
/// # Examples
///
/// ```no_run
/// use redline::config::loader::load_config;
///
/// let config = load_config("redline.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<RedlineConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(RedlineError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        RedlineError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    load_config_from_str(&contents)
}

/// Parses, overrides and validates configuration text
pub fn load_config_from_str(contents: &str) -> Result<RedlineConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: RedlineConfig = toml::from_str(&contents)
        .map_err(|e| RedlineError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        RedlineError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied through untouched.
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| RedlineError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        let trimmed = line.trim_start();

        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(RedlineError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| RedlineError::Configuration(format!("Invalid {name} value: '{value}'")))
}

/// Applies environment variable overrides using the REDLINE_* prefix
///
/// Environment variables follow the pattern REDLINE_<SECTION>_<KEY>, for
/// example REDLINE_APPLICATION_LOG_LEVEL or REDLINE_REDACTION_MASK_CHAR.
fn apply_env_overrides(config: &mut RedlineConfig) -> Result<()> {
    if let Ok(val) = std::env::var("REDLINE_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    config
        .detection
        .apply_env_overrides()
        .map_err(|e| RedlineError::Configuration(format!("{e:#}")))?;

    if let Ok(val) = std::env::var("REDLINE_LOCATOR_WINDOW_SLACK") {
        config.locator.window_slack = parse_env("REDLINE_LOCATOR_WINDOW_SLACK", &val)?;
    }

    // Redaction overrides
    if let Ok(val) = std::env::var("REDLINE_REDACTION_MASK_CHAR") {
        config.redaction.mask_char = parse_env("REDLINE_REDACTION_MASK_CHAR", &val)?;
    }
    if let Ok(val) = std::env::var("REDLINE_REDACTION_BLACKOUT_COLOR") {
        config.redaction.blackout_color = val;
    }
    if let Ok(val) = std::env::var("REDLINE_REDACTION_PREVIEW_ZOOM") {
        config.redaction.preview_zoom = parse_env("REDLINE_REDACTION_PREVIEW_ZOOM", &val)?;
    }
    if let Ok(val) = std::env::var("REDLINE_REDACTION_MEDIA_BLUR_SIGMA") {
        config.redaction.media_blur_sigma =
            parse_env("REDLINE_REDACTION_MEDIA_BLUR_SIGMA", &val)?;
    }
    if let Ok(val) = std::env::var("REDLINE_REDACTION_CELL_REPLACEMENT") {
        config.redaction.cell_replacement = val;
    }

    config
        .audit
        .apply_env_overrides()
        .map_err(|e| RedlineError::Configuration(format!("{e:#}")))?;

    // Logging overrides
    if let Ok(val) = std::env::var("REDLINE_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_env("REDLINE_LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Ok(val) = std::env::var("REDLINE_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("REDLINE_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}
