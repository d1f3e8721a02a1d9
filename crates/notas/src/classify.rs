//! Grade status classification.
//!
//! The rule is evaluated in a fixed order:
//!
//! 1. A final grade that does not parse as a finite number is either
//!    [`Status::NoRights`] (the `SD`/`NSP` sentinels, any case) or
//!    [`Status::Undetermined`], in which case it is shown verbatim.
//! 2. A numeric final grade of at least [`PASSING_GRADE`] is
//!    [`Status::Passed`], whatever the special grade says.
//! 3. Below the threshold, a usable numeric special grade makes the row
//!    [`Status::SpecialEligible`]; anything else is [`Status::Failed`].
//!
//! Classification is pure. Both the HTML renderer and the PDF exporter read
//! the same [`Classification`] value, so they cannot disagree.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::dataset::GradeRecord;

/// Lowest passing final grade. Exactly 60 passes.
pub const PASSING_GRADE: f64 = 60.0;

/// Final-grade values meaning the student had no right to sit the exam.
pub const NO_RIGHTS_SENTINELS: &[&str] = &["SD", "NSP"];

static NUMERIC_GRADE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+(\.[0-9]+)?$").expect("valid numeric grade regex"));

/// Outcome of a single subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Passed,
    SpecialEligible,
    Failed,
    NoRights,
    Undetermined,
}

impl Status {
    /// Human-readable label shown on screen and in transcripts.
    pub fn label(self) -> &'static str {
        match self {
            Status::Passed => "Aprobado",
            Status::SpecialEligible => "Examen Especial",
            Status::Failed => "Reprobado",
            Status::NoRights => "Sin Derecho",
            Status::Undetermined => "Sin Determinar",
        }
    }

    /// Stable machine name, also used as a CSS class.
    pub fn key(self) -> &'static str {
        match self {
            Status::Passed => "passed",
            Status::SpecialEligible => "special_eligible",
            Status::Failed => "failed",
            Status::NoRights => "no_rights",
            Status::Undetermined => "undetermined",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The computed status of one row plus the values to display for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub status: Status,
    /// Final grade as it appeared in the dataset.
    pub final_grade: String,
    /// Special-exam grade to show; only set for [`Status::SpecialEligible`].
    pub special_grade: Option<String>,
}

/// Applies the grade rule, aware of the dataset's empty-cell placeholder.
#[derive(Debug, Clone, Default)]
pub struct GradeClassifier {
    placeholder: String,
}

impl GradeClassifier {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
        }
    }

    /// Classify a final grade and special grade pair.
    pub fn classify(&self, final_grade: &str, special_grade: &str) -> Classification {
        let status = match parse_grade(final_grade) {
            None if is_no_rights(final_grade) => Status::NoRights,
            None => Status::Undetermined,
            Some(value) if value >= PASSING_GRADE => Status::Passed,
            Some(_) if self.has_special_grade(special_grade) => Status::SpecialEligible,
            Some(_) => Status::Failed,
        };

        let special_grade = (status == Status::SpecialEligible)
            .then(|| special_grade.trim().to_string());

        Classification {
            status,
            final_grade: final_grade.to_string(),
            special_grade,
        }
    }

    /// Classify a dataset row.
    pub fn classify_record(&self, record: &GradeRecord) -> Classification {
        self.classify(&record.final_grade, &record.special_grade)
    }

    fn has_special_grade(&self, special_grade: &str) -> bool {
        let value = special_grade.trim();
        !value.is_empty()
            && value != self.placeholder.trim()
            && !value.eq_ignore_ascii_case("SD")
            && NUMERIC_GRADE.is_match(value)
    }
}

/// Classify with an empty-string placeholder.
pub fn classify(final_grade: &str, special_grade: &str) -> Classification {
    GradeClassifier::default().classify(final_grade, special_grade)
}

fn parse_grade(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

fn is_no_rights(value: &str) -> bool {
    let value = value.trim().to_uppercase();
    NO_RIGHTS_SENTINELS.contains(&value.as_str())
}
