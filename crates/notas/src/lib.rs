//! Notas: student grade lookup over an institutional spreadsheet.
//!
//! A student enters their identifier (`00-0000-00`) or name, and Notas
//! returns every matching course record with a pass/fail status, either as
//! an HTML page or as a downloadable PDF transcript.
//!
//! # Core Principles
//!
//! - **Read-only**: The spreadsheet is never modified
//! - **One classification**: Screen and PDF share the same per-row status
//! - **Load once**: The dataset is read on first use and reused afterwards
//!
//! # Example
//!
//! ```no_run
//! use notas::{GradeLookup, NotasConfig};
//!
//! let config = NotasConfig::load().unwrap();
//! let lookup = GradeLookup::new(&config);
//!
//! let transcript = lookup.transcript("25-0022-02", None).unwrap();
//! println!("{}: {} courses", transcript.student.student_name, transcript.rows.len());
//! ```

pub mod classify;
pub mod config;
pub mod dataset;
pub mod error;
pub mod input;
pub mod query;
pub mod render;
pub mod resolve;
pub mod transcript;

mod lookup;

pub use crate::lookup::{
    DATASET_INVALID, DATASET_UNAVAILABLE, DatasetSummary, ExportedPdf, GradeLookup,
    dataset_message,
};
pub use classify::{Classification, GradeClassifier, PASSING_GRADE, Status, classify};
pub use config::{ConfigError, NotasConfig};
pub use dataset::{DatasetHandle, GradeRecord, Gradebook};
pub use error::{NotasError, QueryError, Result};
pub use input::{DataTable, SourceMetadata};
pub use query::{MatchMode, Query, QueryKind};
pub use render::{Branding, HtmlRenderer, PdfExporter, SearchView};
pub use resolve::{Resolution, Resolver};
pub use transcript::{StudentInfo, Transcript, TranscriptRow};
