//! Raw statement table and per-row financial records.
//!
//! `RawTable` holds the sheet exactly as read (one entity per row, text
//! cells). `FieldIndex` resolves the required columns once per table
//! and `FinancialRecord` is the typed numeric view of a single row.

use super::error::AnalysisError;
use super::fields::RawField;
use super::figure::Figure;

// ────────────────────────────────────────────
// Raw table
// ────────────────────────────────────────────

/// One entity row of the raw sheet, aligned with the table columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    cells: Vec<String>,
}

impl RawRow {
    /// All cells in column order.
    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    /// Cell text at a column position.
    pub fn cell(&self, column: usize) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }

    /// Numeric value at a column position.
    pub fn figure(&self, column: usize) -> Figure {
        self.cell(column).map_or(Figure::NULL, parse_figure)
    }
}

/// Raw sheet: ordered column keys and one row per entity.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawTable {
    columns: Vec<String>,
    rows: Vec<RawRow>,
}

impl RawTable {
    /// Build a table. Rows shorter than the header are padded with empty
    /// cells, longer rows are truncated.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut cells| {
                cells.resize(width, String::new());
                RawRow { cells }
            })
            .collect();
        Self { columns, rows }
    }

    /// Column keys in sheet order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Entity rows in sheet order.
    pub fn rows(&self) -> &[RawRow] {
        &self.rows
    }

    /// Number of entity rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no entity rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by exact key.
    pub fn column_index(&self, key: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == key)
    }
}

/// Parse a sheet cell into a figure. Blank, non-numeric and non-finite
/// cells are null.
pub fn parse_figure(text: &str) -> Figure {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Figure::NULL;
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .into()
}

// ────────────────────────────────────────────
// Field resolution
// ────────────────────────────────────────────

/// Column positions of every required raw field in a given table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIndex {
    positions: [usize; RawField::COUNT],
}

impl FieldIndex {
    /// Resolve all required fields against the table header.
    ///
    /// # Errors
    /// `AnalysisError::MissingFields` naming every absent key.
    pub fn resolve(table: &RawTable) -> Result<Self, AnalysisError> {
        let mut positions = [0usize; RawField::COUNT];
        let mut missing = Vec::new();

        for field in RawField::ALL {
            match table.column_index(field.key()) {
                Some(pos) => positions[field.index()] = pos,
                None => missing.push(field.key().to_string()),
            }
        }

        if missing.is_empty() {
            Ok(Self { positions })
        } else {
            Err(AnalysisError::MissingFields { fields: missing })
        }
    }

    /// Column position of a field.
    pub const fn position(&self, field: RawField) -> usize {
        self.positions[field.index()]
    }
}

// ────────────────────────────────────────────
// Financial record
// ────────────────────────────────────────────

/// Typed numeric view of one entity row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinancialRecord {
    values: [Figure; RawField::COUNT],
}

impl FinancialRecord {
    /// A record with every field null.
    pub const fn empty() -> Self {
        Self {
            values: [Figure::NULL; RawField::COUNT],
        }
    }

    /// Read every required field out of a raw row.
    pub fn from_row(row: &RawRow, index: &FieldIndex) -> Self {
        let mut record = Self::empty();
        for field in RawField::ALL {
            record.values[field.index()] = row.figure(index.position(field));
        }
        record
    }

    /// Builder-style setter.
    #[must_use]
    pub fn with(mut self, field: RawField, value: impl Into<Figure>) -> Self {
        self.set(field, value);
        self
    }

    /// Set one field.
    pub fn set(&mut self, field: RawField, value: impl Into<Figure>) {
        self.values[field.index()] = value.into();
    }

    /// Value of one field.
    pub const fn get(&self, field: RawField) -> Figure {
        self.values[field.index()]
    }

    /// Whether every raw field is present.
    pub fn is_complete(&self) -> bool {
        self.values.iter().all(|v| !v.is_null())
    }

    /// Current assets + fixed assets.
    pub fn total_assets(&self) -> Figure {
        self.get(RawField::CurrentAssets) + self.get(RawField::FixedAssets)
    }

    /// Short-term + long-term liabilities.
    pub fn total_liabilities(&self) -> Figure {
        self.get(RawField::ShortTermLiabilities) + self.get(RawField::LongTermLiabilities)
    }
}

impl Default for FinancialRecord {
    fn default() -> Self {
        Self::empty()
    }
}
