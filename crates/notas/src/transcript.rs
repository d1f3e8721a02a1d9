//! Per-student transcripts: resolved rows paired with their classification.
//!
//! A transcript is built once per lookup and handed to both the HTML
//! renderer and the PDF exporter.

use indexmap::IndexMap;
use serde::Serialize;

use crate::classify::{Classification, GradeClassifier, Status};
use crate::dataset::GradeRecord;
use crate::error::{NotasError, Result};
use crate::resolve::name_key;

/// Identity block of a transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentInfo {
    pub student_id: String,
    pub student_name: String,
    pub program: String,
    pub year: String,
    pub term: String,
    pub regime: String,
}

impl StudentInfo {
    fn from_record(record: &GradeRecord) -> Self {
        Self {
            student_id: record.student_id.clone(),
            student_name: record.student_name.clone(),
            program: record.program.clone(),
            year: record.year.clone(),
            term: record.term.clone(),
            regime: record.regime.clone(),
        }
    }
}

/// One subject line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptRow {
    pub record: GradeRecord,
    pub classification: Classification,
}

/// Count of rows per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusSummary {
    pub passed: usize,
    pub special_eligible: usize,
    pub failed: usize,
    pub no_rights: usize,
    pub undetermined: usize,
}

impl StatusSummary {
    fn add(&mut self, status: Status) {
        match status {
            Status::Passed => self.passed += 1,
            Status::SpecialEligible => self.special_eligible += 1,
            Status::Failed => self.failed += 1,
            Status::NoRights => self.no_rights += 1,
            Status::Undetermined => self.undetermined += 1,
        }
    }

    /// Rows counted across every status.
    pub fn total(&self) -> usize {
        self.passed + self.special_eligible + self.failed + self.no_rights + self.undetermined
    }

    /// One-line totals for printed transcripts.
    pub fn totals_line(&self) -> String {
        format!(
            "Aprobadas: {}   Examen especial: {}   Reprobadas: {}   Sin derecho: {}   Sin determinar: {}",
            self.passed, self.special_eligible, self.failed, self.no_rights, self.undetermined
        )
    }
}

/// A student's identity plus their classified subject rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transcript {
    pub student: StudentInfo,
    pub rows: Vec<TranscriptRow>,
    pub summary: StatusSummary,
}

impl Transcript {
    /// Build the transcript of exactly one student.
    ///
    /// Identity fields come from the first row. Fails when `records` is empty
    /// or spans several students.
    pub fn build(records: &[&GradeRecord], classifier: &GradeClassifier) -> Result<Self> {
        let mut transcripts = Self::group(records, classifier);
        match transcripts.len() {
            0 => Err(NotasError::NoRecords(String::new())),
            1 => Ok(transcripts.remove(0)),
            count => Err(NotasError::MultipleStudents { count }),
        }
    }

    /// Split rows into one transcript per student (id + name), ordered by
    /// first appearance; rows keep their dataset order within each group.
    pub fn group(records: &[&GradeRecord], classifier: &GradeClassifier) -> Vec<Self> {
        let mut transcripts: IndexMap<(&str, String), Self> = IndexMap::new();

        for record in records {
            let row = TranscriptRow {
                record: (*record).clone(),
                classification: classifier.classify_record(record),
            };

            transcripts
                .entry((record.student_id.as_str(), name_key(&record.student_name)))
                .or_insert_with(|| Self {
                    student: StudentInfo::from_record(record),
                    rows: Vec::new(),
                    summary: StatusSummary::default(),
                })
                .push(row);
        }

        transcripts.into_values().collect()
    }

    fn push(&mut self, row: TranscriptRow) {
        self.summary.add(row.classification.status);
        self.rows.push(row);
    }

    /// Download name for the PDF export: `Notas_<identifier>.pdf`.
    pub fn file_name(&self) -> String {
        export_file_name(&self.student.student_id)
    }
}

/// `Notas_<identifier>.pdf`, with anything outside `[A-Za-z0-9-]` replaced.
pub fn export_file_name(student_id: &str) -> String {
    let safe: String = student_id
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    format!("Notas_{safe}.pdf")
}
