//! Sheet Ports - Statement Input and Annotated Output
//!
//! The uploaded spreadsheet and the downloadable result are thin I/O
//! concerns. The use case only sees `RawTable` in and `AnnotatedTable`
//! out; orientation handling and file formats live in adapters.

use crate::domain::features::FeatureSelection;
use crate::domain::prediction::AnnotatedTable;
use crate::domain::statement::RawTable;

/// Provides the already-oriented raw statement table (one entity per row).
pub trait StatementSource {
  fn read_table(&self) -> anyhow::Result<RawTable>;
}

/// Receives the analysis results.
pub trait ResultSink {
  /// Persist surviving raw rows with the appended prediction column.
  fn write_predictions(&self, table: &AnnotatedTable) -> anyhow::Result<()>;

  /// Persist the 32 features of the surviving rows.
  fn write_features(&self, selection: &FeatureSelection) -> anyhow::Result<()>;
}
