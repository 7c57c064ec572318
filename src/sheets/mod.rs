//! Spreadsheet access.
//!
//! Thin wrapper around calamine that enumerates sheet names and
//! materializes one sheet as a header row plus data rows. Column
//! lookups are presence-checked by exact header match and return
//! `None` when the header is absent, so callers never guess at
//! schema.

use calamine::{open_workbook_auto, Data, DataType, Reader, Sheets};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error raised while opening a workbook or loading one of its sheets.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("file not found: {0}")]
    MissingFile(PathBuf),
    #[error("could not open workbook {path}: {source}")]
    Workbook {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },
    #[error("could not load sheet '{sheet}' from {path}: {source}")]
    Sheet {
        path: PathBuf,
        sheet: String,
        #[source]
        source: calamine::Error,
    },
}

/// An open spreadsheet file.
///
/// The underlying file handle is released when this value is dropped,
/// after all requested sheets have been materialized.
pub struct Workbook {
    path: PathBuf,
    inner: Sheets<BufReader<File>>,
}

impl Workbook {
    /// Open a workbook, failing with [`SourceError::MissingFile`] when
    /// the path does not exist.
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        if !path.exists() {
            return Err(SourceError::MissingFile(path.to_path_buf()));
        }
        let inner = open_workbook_auto(path).map_err(|source| SourceError::Workbook {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            inner,
        })
    }

    /// Names of all sheets present in the file.
    pub fn sheet_names(&self) -> Vec<String> {
        self.inner.sheet_names().to_vec()
    }

    /// Whether the file contains a sheet with this exact name.
    pub fn has_sheet(&self, name: &str) -> bool {
        self.inner.sheet_names().iter().any(|s| s == name)
    }

    /// Materialize a sheet. The first row of the used range becomes the
    /// header row; everything below it is data.
    pub fn load_sheet(&mut self, name: &str) -> Result<SheetTable, SourceError> {
        let range = self
            .inner
            .worksheet_range(name)
            .map_err(|source| SourceError::Sheet {
                path: self.path.clone(),
                sheet: name.to_string(),
                source,
            })?;

        let mut rows = range.rows();
        let headers = rows
            .next()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.as_string().unwrap_or_default())
                    .collect()
            })
            .unwrap_or_default();
        let data = rows
            .map(|row| row.iter().map(cell_value).collect())
            .collect();

        Ok(SheetTable::new(headers, data))
    }
}

/// String form of a cell, `None` for blank cells.
fn cell_value(cell: &Data) -> Option<String> {
    if cell.is_empty() {
        return None;
    }
    let value = cell.as_string().unwrap_or_else(|| cell.to_string());
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// One materialized sheet: a header row and data rows of optional cells.
#[derive(Debug, Clone, Default)]
pub struct SheetTable {
    headers: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl SheetTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        Self { headers, rows }
    }

    /// Number of data rows. The header row is not counted.
    pub fn row_count(&self) -> u64 {
        self.rows.len() as u64
    }

    /// Values of the column with this exact header, one entry per data
    /// row. `None` when no such header exists; blank cells stay `None`.
    pub fn column(&self, name: &str) -> Option<Vec<Option<&str>>> {
        let idx = self.headers.iter().position(|h| h == name)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.get(idx).and_then(|cell| cell.as_deref()))
                .collect(),
        )
    }
}
