//! Sheet Writer - CSV Result Output
//!
//! Serializes the annotated table (surviving raw rows + prediction
//! column) and optionally the feature sheet. Each file is rendered in
//! memory and written atomically.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, instrument};

use super::delimiter_byte;
use crate::adapters::persistence::write_atomic;
use crate::domain::features::{FEATURE_NAMES, FeatureSelection};
use crate::domain::prediction::AnnotatedTable;
use crate::ports::sheet::ResultSink;

/// Header of the row-position column in the feature sheet.
const ROW_COLUMN: &str = "row";

/// CSV-backed `ResultSink`.
#[derive(Debug, Clone)]
pub struct CsvResultWriter {
    predictions_path: PathBuf,
    features_path: Option<PathBuf>,
    delimiter: u8,
}

impl CsvResultWriter {
    /// Create a writer. No feature sheet is written when `features_path`
    /// is `None`.
    ///
    /// # Errors
    /// `delimiter` is not usable as a CSV delimiter.
    pub fn new(
        predictions_path: impl Into<PathBuf>,
        features_path: Option<PathBuf>,
        delimiter: char,
    ) -> Result<Self> {
        Ok(Self {
            predictions_path: predictions_path.into(),
            features_path,
            delimiter: delimiter_byte(delimiter)?,
        })
    }

    fn writer(&self) -> csv::Writer<Vec<u8>> {
        csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(Vec::new())
    }

    /// Render the annotated table as CSV bytes.
    ///
    /// # Errors
    /// CSV serialization failures.
    pub fn render_predictions(&self, table: &AnnotatedTable) -> Result<Vec<u8>> {
        let mut w = self.writer();
        w.write_record(table.columns())?;
        for row in table.rows() {
            w.write_record(row.cells.iter().map(String::as_str).chain([row.label.as_str()]))?;
        }
        w.into_inner().context("Failed to flush predictions CSV")
    }

    /// Render the feature sheet as CSV bytes, columns in vocabulary order.
    ///
    /// # Errors
    /// CSV serialization failures.
    pub fn render_features(&self, selection: &FeatureSelection) -> Result<Vec<u8>> {
        let mut w = self.writer();
        w.write_record(std::iter::once(ROW_COLUMN).chain(FEATURE_NAMES))?;
        for row in selection.rows() {
            let mut record = Vec::with_capacity(FEATURE_NAMES.len() + 1);
            record.push(row.row_index.to_string());
            record.extend(row.values.iter().map(f64::to_string));
            w.write_record(&record)?;
        }
        w.into_inner().context("Failed to flush features CSV")
    }
}

impl ResultSink for CsvResultWriter {
    #[instrument(skip_all, fields(path = %self.predictions_path.display(), rows = table.len()))]
    fn write_predictions(&self, table: &AnnotatedTable) -> Result<()> {
        let bytes = self.render_predictions(table)?;
        write_atomic(&self.predictions_path, &bytes)?;
        info!("Predictions written");
        Ok(())
    }

    fn write_features(&self, selection: &FeatureSelection) -> Result<()> {
        let Some(path) = &self.features_path else {
            return Ok(());
        };
        let bytes = self.render_features(selection)?;
        write_atomic(path, &bytes)?;
        info!(path = %path.display(), rows = selection.len(), "Feature sheet written");
        Ok(())
    }
}
