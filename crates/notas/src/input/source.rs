//! Raw tabular data and metadata about where it came from.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Metadata about the loaded source file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Detected format (xlsx, csv, tsv, etc.).
    pub format: String,
    /// Sheet the rows were read from, for workbooks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sheet: Option<String>,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the file was read.
    pub loaded_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Describe a file whose contents have been read into `table`.
    pub fn describe(path: PathBuf, contents: &[u8], format: &str, table: &DataTable) -> Self {
        Self::from_parts(path, content_hash(contents), contents.len() as u64, format, table)
    }

    /// Describe a file from an already computed hash and size.
    pub fn from_parts(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        format: &str,
        table: &DataTable,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            format: format.to_string(),
            sheet: None,
            row_count: table.row_count(),
            column_count: table.column_count(),
            loaded_at: Utc::now(),
        }
    }

    pub fn with_sheet(mut self, sheet: impl Into<String>) -> Self {
        self.sheet = Some(sheet.into());
        self
    }
}

/// `sha256:<hex>` digest of raw file contents.
pub fn content_hash(contents: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(contents);
    format!("sha256:{:x}", hasher.finalize())
}

/// Parsed tabular data: every cell is a string.
#[derive(Debug, Clone)]
pub struct DataTable {
    /// Column headers, whitespace-trimmed.
    pub headers: Vec<String>,
    /// Row data as strings (row-major order).
    pub rows: Vec<Vec<String>>,
}

impl DataTable {
    /// Build a table, trimming headers and squaring rows to the header width.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let headers: Vec<String> = headers.into_iter().map(|h| h.trim().to_string()).collect();
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();

        Self { headers, rows }
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(col).map(|s| s.as_str()))
    }

    /// Trim every cell and replace blank ones with `placeholder`.
    pub fn fill_missing(&mut self, placeholder: &str) {
        for cell in self.rows.iter_mut().flatten() {
            let trimmed = cell.trim();
            if trimmed.is_empty() {
                *cell = placeholder.to_string();
            } else if trimmed.len() != cell.len() {
                *cell = trimmed.to_string();
            }
        }
    }

    /// Whether every cell in a row is blank.
    pub fn is_blank_row(row: &[String]) -> bool {
        row.iter().all(|cell| cell.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_new_trims_headers_and_pads_rows() {
        let table = DataTable::new(
            strings(&[" N° Carnet ", "Nota Final\t"]),
            vec![strings(&["25-0022-02"]), strings(&["25-0001-01", "70", "extra"])],
        );

        assert_eq!(table.headers, strings(&["N° Carnet", "Nota Final"]));
        assert_eq!(table.get(0, 1), Some(""));
        assert_eq!(table.rows[1].len(), 2);
    }

    #[test]
    fn test_fill_missing() {
        let mut table = DataTable::new(
            strings(&["a", "b"]),
            vec![strings(&["  x ", "   "]), strings(&["", "y"])],
        );
        table.fill_missing("-");

        assert_eq!(table.get(0, 0), Some("x"));
        assert_eq!(table.get(0, 1), Some("-"));
        assert_eq!(table.get(1, 0), Some("-"));
        assert_eq!(table.get(1, 1), Some("y"));
    }

    #[test]
    fn test_content_hash_is_stable() {
        let a = content_hash(b"N\xc2\xb0 Carnet\n");
        let b = content_hash(b"N\xc2\xb0 Carnet\n");
        assert_eq!(a, b);
        assert!(a.starts_with("sha256:"));
        assert_ne!(a, content_hash(b"other"));
    }
}
