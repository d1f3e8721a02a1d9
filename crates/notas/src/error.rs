//! Error types for the notas library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for grade lookup operations.
#[derive(Debug, Error)]
pub enum NotasError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The dataset file does not exist.
    #[error("Grade dataset not found: {0}")]
    DatasetNotFound(PathBuf),

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error opening or reading a spreadsheet workbook.
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    /// The configured worksheet is not present in the workbook.
    #[error("Sheet '{sheet}' not found (available: {})", .available.join(", "))]
    SheetNotFound {
        sheet: String,
        available: Vec<String>,
    },

    /// A required column header is missing from the dataset.
    #[error("Required column '{0}' not found in dataset headers")]
    MissingColumn(String),

    /// Empty file or no rows to search.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// The search query was rejected before any search ran.
    #[error(transparent)]
    Query(#[from] QueryError),

    /// A single-student operation matched several students.
    #[error("Query matches {count} students; refine it to a single student")]
    MultipleStudents { count: usize },

    /// No rows matched where a transcript was required.
    #[error("No records found for '{0}'")]
    NoRecords(String),

    /// Template rendering error.
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    /// PDF generation error.
    #[error("PDF error: {0}")]
    Pdf(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),
}

/// Reasons a query is refused before searching.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The query is blank after trimming.
    #[error("Please enter a student ID or name")]
    Empty,

    /// Strict mode only accepts identifiers shaped like `DD-DDDD-DD`.
    #[error("Invalid student ID '{0}': expected format DD-DDDD-DD (e.g. 25-0022-02)")]
    InvalidIdentifier(String),
}

/// Result type alias for notas operations.
pub type Result<T> = std::result::Result<T, NotasError>;
