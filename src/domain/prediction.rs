//! Annotated output - surviving raw rows plus the predicted label.

use std::collections::BTreeMap;

use super::error::AnalysisError;
use super::features::FeatureSelection;
use super::statement::RawTable;

/// Default header of the appended prediction column.
pub const PREDICTION_COLUMN: &str = "Tahmin Görüş Tipi";

/// One surviving raw row and its prediction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedRow {
    /// Position of the row in the raw table.
    pub row_index: usize,
    /// Raw cells, in raw column order.
    pub cells: Vec<String>,
    /// Predicted opinion label.
    pub label: String,
}

/// Output table: raw columns followed by the prediction column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedTable {
    columns: Vec<String>,
    rows: Vec<AnnotatedRow>,
}

impl AnnotatedTable {
    /// Join predicted labels back onto the raw rows they were made for.
    ///
    /// # Errors
    /// `PredictionCountMismatch` if `labels` and the selection differ in
    /// length, `TableMismatch` if `raw` is not the table the selection was
    /// built from.
    pub fn assemble(
        raw: &RawTable,
        selection: &FeatureSelection,
        labels: Vec<String>,
        prediction_column: &str,
    ) -> Result<Self, AnalysisError> {
        if labels.len() != selection.len() {
            return Err(AnalysisError::PredictionCountMismatch {
                expected: selection.len(),
                got: labels.len(),
            });
        }

        let mismatch = AnalysisError::TableMismatch {
            selected_from: selection.total_rows(),
            table_rows: raw.len(),
        };
        if selection.total_rows() != raw.len() {
            return Err(mismatch);
        }

        let mut columns = raw.columns().to_vec();
        columns.push(prediction_column.to_string());

        let rows = selection
            .rows()
            .iter()
            .zip(labels)
            .map(|(feature_row, label)| {
                let raw_row = raw.rows().get(feature_row.row_index).ok_or_else(|| mismatch.clone())?;
                Ok(AnnotatedRow {
                    row_index: feature_row.row_index,
                    cells: raw_row.cells().to_vec(),
                    label,
                })
            })
            .collect::<Result<_, AnalysisError>>()?;

        Ok(Self { columns, rows })
    }

    /// Header including the prediction column.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[AnnotatedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows per predicted label.
    pub fn label_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for row in &self.rows {
            *counts.entry(row.label.clone()).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fields::RawField;
    use crate::domain::ratios::compute_ratios;

    /// Name column plus every field; the middle entity lacks net income.
    fn raw() -> RawTable {
        let mut columns = vec!["Şirket".to_string()];
        columns.extend(RawField::ALL.iter().map(|f| f.key().to_string()));
        let row = |name: &str, net_income: &str| {
            let mut cells = vec![name.to_string()];
            cells.extend(RawField::ALL.iter().map(|f| match f {
                RawField::NetIncome => net_income.to_string(),
                _ => "10".to_string(),
            }));
            cells
        };
        RawTable::new(columns, vec![row("A", "1"), row("B", ""), row("C", "2")])
    }

    fn selection(table: &RawTable) -> FeatureSelection {
        FeatureSelection::from_enriched(&compute_ratios(table).unwrap()).unwrap()
    }

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_assemble_joins_labels_to_surviving_rows() {
        let raw = raw();
        let table = AnnotatedTable::assemble(&raw, &selection(&raw), labels(&["X", "Y"]), PREDICTION_COLUMN).unwrap();

        assert_eq!(table.columns().len(), RawField::COUNT + 2);
        assert_eq!(table.columns().last().map(String::as_str), Some(PREDICTION_COLUMN));
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].cells[0], "A");
        assert_eq!(table.rows()[0].label, "X");
        assert_eq!(table.rows()[1].row_index, 2);
        assert_eq!(table.rows()[1].cells[0], "C");
        assert_eq!(table.rows()[1].label, "Y");
    }

    #[test]
    fn test_label_count_mismatch() {
        let raw = raw();
        let err = AnnotatedTable::assemble(&raw, &selection(&raw), labels(&["X"]), PREDICTION_COLUMN).unwrap_err();
        assert_eq!(err, AnalysisError::PredictionCountMismatch { expected: 2, got: 1 });
    }

    #[test]
    fn test_foreign_table_rejected() {
        let raw = raw();
        let sel = selection(&raw);
        let shorter = RawTable::new(raw.columns().to_vec(), vec![raw.rows()[0].cells().to_vec()]);

        let err = AnnotatedTable::assemble(&shorter, &sel, labels(&["X", "Y"]), PREDICTION_COLUMN).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::TableMismatch {
                selected_from: 3,
                table_rows: 1,
            }
        );
    }

    #[test]
    fn test_label_counts() {
        let raw = raw();
        let table = AnnotatedTable::assemble(&raw, &selection(&raw), labels(&["Olumlu", "Olumlu"]), "T").unwrap();
        let counts = table.label_counts();
        assert_eq!(counts.len(), 1);
        assert_eq!(counts.get("Olumlu"), Some(&2));
        assert!(!table.is_empty());
    }
}
