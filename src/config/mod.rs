//! Configuration Module - TOML-based Analysis Configuration
//!
//! Loads and validates configuration from `config.toml`. Every section
//! has defaults, so an absent file or an empty table yields a working
//! setup. CLI flags override individual values after loading.
//! Field keys and feature names are NOT configurable: they are fixed by
//! the trained model and live in the domain layer.

pub mod loader;

use std::path::PathBuf;

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
  /// Application identity and logging.
  pub app: AppSection,
  /// Input sheet layout.
  pub input: InputConfig,
  /// Model artifact location.
  pub model: ModelConfig,
  /// Output files.
  pub output: OutputConfig,
}

/// Application identity and logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppSection {
  /// Human-readable name, logged at startup.
  pub name: String,
  /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins.
  pub log_level: String,
  /// Log output format.
  pub log_format: LogFormat,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
  /// Human-readable lines.
  #[default]
  Pretty,
  /// One JSON object per event.
  Json,
}

/// Orientation of the uploaded sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
  /// Field labels down the first column, one entity per further column.
  #[default]
  Vertical,
  /// Field labels in the header row, one entity per row.
  Horizontal,
}

/// Input sheet configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InputConfig {
  /// How field labels and entities are laid out.
  pub orientation: Orientation,
  /// Cell delimiter (single ASCII character).
  pub delimiter: char,
}

/// Model artifact configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
  /// Path of the JSON model bundle (model + label encoder).
  pub artifact_path: PathBuf,
}

/// Output configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
  /// Directory for every output file.
  pub dir: PathBuf,
  /// File name of the annotated sheet.
  pub predictions_file: String,
  /// File name of the feature sheet.
  pub features_file: String,
  /// Write the feature sheet of the surviving rows.
  pub write_features: bool,
  /// Header of the appended prediction column.
  pub prediction_column: String,
  /// Write a JSON run report next to the outputs.
  pub write_report: bool,
}

impl Default for AppSection {
  fn default() -> Self {
    Self {
      name: default_name(),
      log_level: "info".to_string(),
      log_format: LogFormat::default(),
    }
  }
}

impl Default for InputConfig {
  fn default() -> Self {
    Self {
      orientation: Orientation::default(),
      delimiter: ',',
    }
  }
}

impl Default for ModelConfig {
  fn default() -> Self {
    Self {
      artifact_path: PathBuf::from("model/opinion_model.json"),
    }
  }
}

impl Default for OutputConfig {
  fn default() -> Self {
    Self {
      dir: PathBuf::from("output"),
      predictions_file: "tahmin_sonuclari.csv".to_string(),
      features_file: "ozellikler.csv".to_string(),
      write_features: true,
      prediction_column: crate::domain::PREDICTION_COLUMN.to_string(),
      write_report: true,
    }
  }
}

impl OutputConfig {
  /// Full path of the annotated sheet.
  pub fn predictions_path(&self) -> PathBuf {
    self.dir.join(&self.predictions_file)
  }

  /// Full path of the feature sheet, if enabled.
  pub fn features_path(&self) -> Option<PathBuf> {
    self.write_features.then(|| self.dir.join(&self.features_file))
  }

  /// Full path of the run report.
  pub fn report_path(&self) -> PathBuf {
    self.dir.join("report.json")
  }
}

fn default_name() -> String {
  env!("CARGO_PKG_NAME").to_string()
}
