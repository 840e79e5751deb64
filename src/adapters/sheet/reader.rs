//! Sheet Reader - CSV Statement Input
//!
//! Reads the uploaded statement sheet and turns it into a `RawTable`
//! with one entity per row. Uploads are usually *vertical*: the first
//! column carries the field labels and every further column is one
//! entity, so the grid is transposed on read. Header labels are
//! trimmed and repeated labels keep their first occurrence.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info, instrument, warn};

use super::delimiter_byte;
use crate::config::Orientation;
use crate::domain::statement::RawTable;
use crate::ports::sheet::StatementSource;

/// CSV-backed `StatementSource`.
#[derive(Debug, Clone)]
pub struct CsvSheetReader {
    path: PathBuf,
    orientation: Orientation,
    delimiter: u8,
}

impl CsvSheetReader {
    /// Create a reader.
    ///
    /// # Errors
    /// `delimiter` is not usable as a CSV delimiter.
    pub fn new(path: impl Into<PathBuf>, orientation: Orientation, delimiter: char) -> Result<Self> {
        Ok(Self {
            path: path.into(),
            orientation,
            delimiter: delimiter_byte(delimiter)?,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse a sheet from any reader.
    ///
    /// # Errors
    /// Malformed CSV.
    pub fn parse<R: Read>(&self, input: R) -> Result<RawTable> {
        let grid = read_grid(input, self.delimiter)?;
        let table = match self.orientation {
            Orientation::Vertical => transpose_vertical(grid),
            Orientation::Horizontal => from_horizontal(grid),
        };
        Ok(table)
    }
}

impl StatementSource for CsvSheetReader {
    #[instrument(skip(self), fields(path = %self.path.display(), orientation = ?self.orientation))]
    fn read_table(&self) -> Result<RawTable> {
        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open sheet: {}", self.path.display()))?;
        let table = self
            .parse(file)
            .with_context(|| format!("Failed to parse sheet: {}", self.path.display()))?;

        info!(
            columns = table.columns().len(),
            rows = table.len(),
            "Sheet loaded"
        );
        Ok(table)
    }
}

/// Read every record as raw text, without treating any row as a header.
fn read_grid<R: Read>(input: R, delimiter: u8) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(input);

    let mut grid = Vec::new();
    for record in reader.records() {
        let record = record.context("Failed to read sheet record")?;
        grid.push(record.iter().map(str::to_string).collect());
    }
    Ok(grid)
}

/// Vertical layout: `grid[r][0]` is a field label, `grid[r][1..]` its
/// value per entity. Rows with a blank label are ignored.
pub fn transpose_vertical(grid: Vec<Vec<String>>) -> RawTable {
    let entities = grid.iter().map(|r| r.len().saturating_sub(1)).max().unwrap_or(0);

    let mut columns = Vec::with_capacity(grid.len());
    let mut rows: Vec<Vec<String>> = vec![Vec::with_capacity(grid.len()); entities];

    for mut record in grid {
        let label = record.first().map(|l| l.trim().to_string()).unwrap_or_default();
        if label.is_empty() {
            debug!("Skipping sheet row without a field label");
            continue;
        }
        record.resize(entities + 1, String::new());
        columns.push(label);
        for (row, value) in rows.iter_mut().zip(record.into_iter().skip(1)) {
            row.push(value);
        }
    }

    finish_table(columns, rows)
}

/// Horizontal layout: first record is the header, one entity per record.
pub fn from_horizontal(mut grid: Vec<Vec<String>>) -> RawTable {
    if grid.is_empty() {
        return RawTable::default();
    }
    let header: Vec<String> = grid.remove(0).iter().map(|c| c.trim().to_string()).collect();
    let width = header.len();
    let rows = grid
        .into_iter()
        .map(|mut r| {
            r.resize(width, String::new());
            r
        })
        .collect();
    finish_table(header, rows)
}

/// Drop repeated column labels (keeping the first occurrence) and entity
/// rows whose cells are all blank.
fn finish_table(columns: Vec<String>, rows: Vec<Vec<String>>) -> RawTable {
    let mut seen = HashSet::new();
    let keep: Vec<bool> = columns.iter().map(|c| seen.insert(c.clone())).collect();
    let dropped = keep.iter().filter(|k| !**k).count();
    if dropped > 0 {
        warn!(dropped, "Duplicate field labels in sheet, keeping first occurrence");
    }

    let pick = |cells: Vec<String>| -> Vec<String> {
        cells
            .into_iter()
            .zip(&keep)
            .filter_map(|(cell, k)| k.then_some(cell))
            .collect()
    };

    let columns = pick(columns);
    let total = rows.len();
    let rows: Vec<Vec<String>> = rows
        .into_iter()
        .map(pick)
        .filter(|cells| cells.iter().any(|c| !c.trim().is_empty()))
        .collect();
    if rows.len() < total {
        debug!(blank = total - rows.len(), "Ignoring blank entities");
    }
    RawTable::new(columns, rows)
}
