//! Run Report - JSON Summary of One Analysis
//!
//! Records what a run consumed and produced: how many rows were read,
//! analysed and skipped for incomplete ratios, and how the predicted
//! labels are distributed. Written next to the output sheets.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use super::atomic::write_atomic;
use crate::domain::features::FeatureSelection;
use crate::domain::prediction::AnnotatedTable;

/// Summary of a completed analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Unique run identifier.
    pub run_id: Uuid,
    /// When the report was produced.
    pub generated_at: DateTime<Utc>,
    /// Input sheet path as given.
    pub input: String,
    /// Entity rows in the input sheet.
    pub rows_read: usize,
    /// Rows that reached the classifier.
    pub rows_analyzed: usize,
    /// Rows dropped for at least one null ratio.
    pub rows_skipped: usize,
    /// Predicted label → row count.
    pub label_counts: BTreeMap<String, usize>,
}

impl RunReport {
    /// Build a report from the annotated output and the feature selection
    /// it was predicted from.
    pub fn from_results(input: &Path, annotated: &AnnotatedTable, selection: &FeatureSelection) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            input: input.display().to_string(),
            rows_read: selection.total_rows(),
            rows_analyzed: annotated.len(),
            rows_skipped: selection.skipped_rows(),
            label_counts: annotated.label_counts(),
        }
    }

    /// Write the report as pretty JSON.
    ///
    /// # Errors
    /// Serialization or file write failures.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize run report")?;
        write_atomic(path, json.as_bytes())?;

        info!(
            path = %path.display(),
            run_id = %self.run_id,
            "Run report saved"
        );
        Ok(())
    }
}
