//! Main lookup service tying dataset, resolver, classifier and exporter.

use serde::Serialize;

use crate::classify::GradeClassifier;
use crate::config::{InstitutionConfig, NotasConfig};
use crate::dataset::DatasetHandle;
use crate::error::{NotasError, Result};
use crate::query::MatchMode;
use crate::render::{PdfExporter, SearchView};
use crate::resolve::{Resolution, Resolver};
use crate::transcript::Transcript;

/// User-facing message when the dataset cannot be read.
pub const DATASET_UNAVAILABLE: &str = "Error: No se encuentra la base de datos de notas.";

/// User-facing message when the dataset exists but is not a usable grade sheet.
pub const DATASET_INVALID: &str =
    "Error: La base de datos de notas no tiene el formato esperado.";

/// The message a page shows for a dataset load failure.
pub fn dataset_message(err: &NotasError) -> &'static str {
    match err {
        NotasError::DatasetNotFound(_) | NotasError::Io { .. } => DATASET_UNAVAILABLE,
        _ => DATASET_INVALID,
    }
}

/// A rendered PDF transcript ready to download.
#[derive(Debug, Clone)]
pub struct ExportedPdf {
    /// `Notas_<identifier>.pdf`.
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Summary of the loaded dataset.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetSummary {
    pub path: String,
    pub format: Option<String>,
    pub sheet: Option<String>,
    pub hash: Option<String>,
    pub records: usize,
    pub students: usize,
    pub headers: Vec<String>,
    pub match_mode: MatchMode,
}

/// Grade lookup over one lazily loaded dataset.
pub struct GradeLookup {
    dataset: DatasetHandle,
    resolver: Resolver,
    classifier: GradeClassifier,
    exporter: PdfExporter,
}

impl GradeLookup {
    /// Build a lookup from configuration. Nothing is read until first use.
    pub fn new(config: &NotasConfig) -> Self {
        let dataset = DatasetHandle::new(config.data.clone(), config.columns.clone());
        Self::with_dataset(dataset, config.search.mode, &config.institution)
    }

    /// Build a lookup around an existing dataset handle.
    pub fn with_dataset(
        dataset: DatasetHandle,
        mode: MatchMode,
        institution: &InstitutionConfig,
    ) -> Self {
        let classifier = GradeClassifier::new(dataset.placeholder());
        Self {
            dataset,
            resolver: Resolver::new(mode),
            classifier,
            exporter: PdfExporter::from_config(institution),
        }
    }

    pub fn dataset(&self) -> &DatasetHandle {
        &self.dataset
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    pub fn classifier(&self) -> &GradeClassifier {
        &self.classifier
    }

    /// Search and build the page view. Dataset failures become an error
    /// message on the view rather than an `Err`.
    pub fn search(&self, query: &str, name: Option<&str>) -> SearchView {
        let book = match self.dataset.get() {
            Ok(book) => book,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    path = %self.dataset.path().display(),
                    "grade dataset unavailable"
                );
                return SearchView::failure(query, dataset_message(&e));
            }
        };

        let outcome = self.resolver.resolve_as(&book, query, name);
        SearchView::from_resolution(query, outcome, &self.classifier)
    }

    /// The transcript of the single student `query` (and `name`) resolve to.
    pub fn transcript(&self, query: &str, name: Option<&str>) -> Result<Transcript> {
        let book = self.dataset.get()?;

        match self.resolver.resolve_as(&book, query, name)? {
            Resolution::NotFound => Err(NotasError::NoRecords(query.trim().to_string())),
            Resolution::Ambiguous { candidates, .. } => Err(NotasError::MultipleStudents {
                count: candidates.len(),
            }),
            Resolution::Matches { records } => Transcript::build(&records, &self.classifier),
        }
    }

    /// Render the transcript for `query` as a PDF.
    pub fn export_pdf(&self, query: &str, name: Option<&str>) -> Result<ExportedPdf> {
        let transcript = self.transcript(query, name)?;
        let bytes = self.exporter.render(&transcript)?;
        tracing::info!(
            student = %transcript.student.student_id,
            rows = transcript.rows.len(),
            "exported transcript"
        );

        Ok(ExportedPdf {
            file_name: transcript.file_name(),
            bytes,
        })
    }

    /// Load the dataset (if needed) and describe it.
    pub fn summary(&self) -> Result<DatasetSummary> {
        let book = self.dataset.get()?;
        let source = book.source.as_ref();

        Ok(DatasetSummary {
            path: self.dataset.path().display().to_string(),
            format: source.map(|s| s.format.clone()),
            sheet: source.and_then(|s| s.sheet.clone()),
            hash: source.map(|s| s.hash.clone()),
            records: book.len(),
            students: book.student_count(),
            headers: book.headers.clone(),
            match_mode: self.resolver.mode(),
        })
    }
}
