//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, validating all parameters,
//! and providing clear error messages for misconfiguration.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::AppConfig;

/// Load and validate configuration from a TOML file.
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: &Path) -> Result<AppConfig> {
  let content = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

  let config = parse_config(&content)
    .with_context(|| format!("Invalid config file: {}", path.display()))?;

  info!(
    path = %path.display(),
    orientation = ?config.input.orientation,
    model = %config.model.artifact_path.display(),
    "Configuration loaded"
  );

  Ok(config)
}

/// Load the file if it exists, otherwise fall back to defaults.
///
/// # Errors
/// Same as [`load_config`] when the file exists.
pub fn load_or_default(path: &Path) -> Result<AppConfig> {
  if path.exists() {
    return load_config(path);
  }
  let config = AppConfig::default();
  validate_config(&config)?;
  Ok(config)
}

/// Parse TOML text and validate it.
///
/// # Errors
/// TOML syntax errors and validation failures.
pub fn parse_config(content: &str) -> Result<AppConfig> {
  let config: AppConfig = toml::from_str(content).context("Failed to parse config TOML")?;
  validate_config(&config)?;
  Ok(config)
}

/// Validate all configuration parameters.
///
/// Checks for:
/// - A single-byte delimiter that can't collide with numbers
/// - Non-empty output names and prediction column
/// - A known log level
pub fn validate_config(config: &AppConfig) -> Result<()> {
  let delimiter = config.input.delimiter;
  anyhow::ensure!(
    delimiter.is_ascii() && !delimiter.is_ascii_alphanumeric() && delimiter != '.' && delimiter != '-',
    "input.delimiter must be an ASCII separator character, got {delimiter:?}"
  );

  anyhow::ensure!(
    !config.output.predictions_file.trim().is_empty(),
    "output.predictions_file must not be empty"
  );
  if config.output.write_features {
    anyhow::ensure!(
      !config.output.features_file.trim().is_empty(),
      "output.features_file must not be empty when write_features is on"
    );
    anyhow::ensure!(
      config.output.features_file != config.output.predictions_file,
      "output.features_file must differ from output.predictions_file"
    );
  }
  anyhow::ensure!(
    !config.output.prediction_column.trim().is_empty(),
    "output.prediction_column must not be empty"
  );

  anyhow::ensure!(
    !config.model.artifact_path.as_os_str().is_empty(),
    "model.artifact_path must not be empty"
  );

  let level = config.app.log_level.to_ascii_lowercase();
  anyhow::ensure!(
    matches!(level.as_str(), "trace" | "debug" | "info" | "warn" | "error"),
    "app.log_level must be one of trace, debug, info, warn, error; got {:?}",
    config.app.log_level
  );

  Ok(())
}
