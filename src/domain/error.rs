//! Analysis errors - Fatal Conditions of a Sheet Analysis
//!
//! Each variant is a distinct, user-facing halt condition. Row-scoped
//! null propagation is NOT an error: it is counted and reported as
//! skipped rows by the feature selection step.

use thiserror::Error;

/// Fatal conditions that stop an analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// One or more required raw columns are absent from the sheet.
    #[error("required financial fields are missing from the sheet: {}", quoted(.fields))]
    MissingFields { fields: Vec<String> },

    /// Every row produced at least one null ratio.
    #[error("no analyzable rows: all {total_rows} rows have incomplete ratios")]
    NoAnalyzableRows { total_rows: usize },

    /// The pre-trained model artifact could not be loaded.
    #[error("model artifact unavailable at {path}: {reason}")]
    ModelUnavailable { path: String, reason: String },

    /// The model declares a feature set that differs from the ratio vocabulary.
    #[error(
        "model features do not match the ratio vocabulary (missing: {}; unexpected: {})",
        quoted(.missing),
        quoted(.unexpected)
    )]
    FeatureVocabularyMismatch {
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    /// The model returned a different number of predictions than rows.
    #[error("model returned {got} predictions for {expected} rows")]
    PredictionCountMismatch { expected: usize, got: usize },

    /// Predictions were joined onto a table other than the one they were
    /// computed from.
    #[error("predictions cover a table of {selected_from} rows but the output table has {table_rows}")]
    TableMismatch { selected_from: usize, table_rows: usize },

    /// The model emitted a class code the label encoder cannot map.
    #[error("model predicted class code {code} but the label encoder knows {known} classes")]
    UnknownClass { code: usize, known: usize },

    /// The model itself failed while scoring.
    #[error("model inference failed: {0}")]
    Inference(String),
}

impl AnalysisError {
    /// Process exit code for the CLI, one per error kind.
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::MissingFields { .. } => 10,
            Self::NoAnalyzableRows { .. } => 11,
            Self::ModelUnavailable { .. } => 12,
            Self::FeatureVocabularyMismatch { .. } => 13,
            Self::PredictionCountMismatch { .. }
            | Self::TableMismatch { .. }
            | Self::UnknownClass { .. } => 14,
            Self::Inference(_) => 15,
        }
    }
}

/// Render names quoted so trailing whitespace stays visible.
fn quoted(names: &[String]) -> String {
    if names.is_empty() {
        return "none".to_string();
    }
    names
        .iter()
        .map(|n| format!("{n:?}"))
        .collect::<Vec<_>>()
        .join(", ")
}
