//! Opinion Analysis - Sheet to Predicted Audit Opinions
//!
//! Pipeline (synchronous, one table per call):
//! 1. Ratio engine over the raw table (fails fast on missing fields)
//! 2. Select the 32 features, drop rows with any null ratio
//! 3. Load the model bundle (only once there is something to score)
//! 4. Verify the model's feature names against the vocabulary
//! 5. Predict class codes, decode labels, join back onto raw rows

use anyhow::Result;
use tracing::{info, instrument, warn};

use crate::domain::error::AnalysisError;
use crate::domain::features::{FeatureSelection, verify_vocabulary};
use crate::domain::prediction::AnnotatedTable;
use crate::domain::ratios::compute_ratios;
use crate::domain::statement::RawTable;
use crate::ports::model::ModelSource;
use crate::ports::sheet::{ResultSink, StatementSource};

/// Result of analysing one table.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOutcome {
    /// Surviving raw rows with their predicted label.
    pub annotated: AnnotatedTable,
    /// Features of the surviving rows, plus skip counts.
    pub selection: FeatureSelection,
}

/// Runs the ratio engine and the classifier over statement tables.
pub struct OpinionAnalyzer<S: ModelSource> {
    model_source: S,
    prediction_column: String,
}

impl<S: ModelSource> OpinionAnalyzer<S> {
    pub fn new(model_source: S, prediction_column: impl Into<String>) -> Self {
        Self {
            model_source,
            prediction_column: prediction_column.into(),
        }
    }

    /// Analyse one raw table.
    ///
    /// # Errors
    /// Any `AnalysisError`; each one halts the run before output is produced.
    #[instrument(skip_all, fields(rows = table.len()))]
    pub fn analyze(&self, table: &RawTable) -> Result<AnalysisOutcome, AnalysisError> {
        let enriched = compute_ratios(table)?;
        let selection = FeatureSelection::from_enriched(&enriched)?;

        let skipped = selection.skipped_rows();
        if skipped > 0 {
            warn!(
                skipped,
                total = selection.total_rows(),
                "Some ratios are incomplete, rows skipped"
            );
        }

        let bundle = self.model_source.load()?;
        let order = verify_vocabulary(&bundle.model.feature_names())?;
        let matrix = selection.to_matrix(&order);

        let codes = bundle
            .model
            .predict(&matrix)
            .map_err(|e| AnalysisError::Inference(format!("{e:#}")))?;
        if codes.len() != matrix.n_rows() {
            return Err(AnalysisError::PredictionCountMismatch {
                expected: matrix.n_rows(),
                got: codes.len(),
            });
        }

        let labels = bundle.encoder.inverse_transform(&codes)?;
        let annotated = AnnotatedTable::assemble(table, &selection, labels, &self.prediction_column)?;

        info!(predicted = annotated.len(), "Rows predicted successfully");
        Ok(AnalysisOutcome {
            annotated,
            selection,
        })
    }
}

/// Read the sheet, analyse it and hand the results to the sink.
///
/// # Errors
/// Sheet I/O failures (with context) or an `AnalysisError`, which can be
/// recovered from the returned error with `downcast_ref`.
pub fn run_analysis<S: ModelSource>(
    source: &dyn StatementSource,
    analyzer: &OpinionAnalyzer<S>,
    sink: &dyn ResultSink,
) -> Result<AnalysisOutcome> {
    let table = source.read_table()?;
    let outcome = analyzer.analyze(&table)?;

    sink.write_predictions(&outcome.annotated)?;
    sink.write_features(&outcome.selection)?;

    Ok(outcome)
}
