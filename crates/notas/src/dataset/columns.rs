//! Mapping from logical grade fields to dataset headers.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{NotasError, Result};

/// Logical columns every grade dataset must provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    Name,
    Program,
    Subject,
    Instructor,
    FinalGrade,
    SpecialGrade,
    Year,
    Term,
    Regime,
}

impl Field {
    /// All fields, in canonical order.
    pub const ALL: [Field; 10] = [
        Field::Id,
        Field::Name,
        Field::Program,
        Field::Subject,
        Field::Instructor,
        Field::FinalGrade,
        Field::SpecialGrade,
        Field::Year,
        Field::Term,
        Field::Regime,
    ];

    /// Configuration key for this field.
    pub fn key(self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Name => "name",
            Field::Program => "program",
            Field::Subject => "subject",
            Field::Instructor => "instructor",
            Field::FinalGrade => "final_grade",
            Field::SpecialGrade => "special_grade",
            Field::Year => "year",
            Field::Term => "term",
            Field::Regime => "regime",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Header names for each logical field, as they appear in the source sheet.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ColumnNames {
    pub id: String,
    pub name: String,
    pub program: String,
    pub subject: String,
    pub instructor: String,
    pub final_grade: String,
    pub special_grade: String,
    pub year: String,
    pub term: String,
    pub regime: String,
}

impl ColumnNames {
    /// Header configured for `field`.
    pub fn header(&self, field: Field) -> &str {
        match field {
            Field::Id => &self.id,
            Field::Name => &self.name,
            Field::Program => &self.program,
            Field::Subject => &self.subject,
            Field::Instructor => &self.instructor,
            Field::FinalGrade => &self.final_grade,
            Field::SpecialGrade => &self.special_grade,
            Field::Year => &self.year,
            Field::Term => &self.term,
            Field::Regime => &self.regime,
        }
    }

    /// Every field paired with its configured header.
    pub fn entries(&self) -> impl Iterator<Item = (Field, &str)> {
        Field::ALL.into_iter().map(|f| (f, self.header(f)))
    }
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            id: "N° Carnet".to_string(),
            name: "Nombres y Apellidos".to_string(),
            program: "Carrera".to_string(),
            subject: "Asignatura".to_string(),
            instructor: "Docente".to_string(),
            final_grade: "Nota Final".to_string(),
            special_grade: "Nota de Especial".to_string(),
            year: "Año".to_string(),
            term: "Ciclo".to_string(),
            regime: "Régimen".to_string(),
        }
    }
}

/// Resolved positions of each logical field within a header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    positions: [usize; 10],
}

impl ColumnMap {
    /// Locate every configured header in `headers`.
    ///
    /// Exact matches (after trimming) win; otherwise the first
    /// case-insensitive match is used.
    pub fn resolve(headers: &[String], names: &ColumnNames) -> Result<Self> {
        let mut by_header: IndexMap<&str, usize> = IndexMap::with_capacity(headers.len());
        for (position, header) in headers.iter().enumerate() {
            by_header.entry(header.trim()).or_insert(position);
        }

        let mut positions = [0usize; 10];
        for (field, wanted) in names.entries() {
            let wanted = wanted.trim();
            let position = by_header.get(wanted).copied().or_else(|| {
                let lowered = wanted.to_lowercase();
                by_header
                    .iter()
                    .find(|(header, _)| header.to_lowercase() == lowered)
                    .map(|(_, &position)| position)
            });

            positions[field.index()] =
                position.ok_or_else(|| NotasError::MissingColumn(wanted.to_string()))?;
        }

        Ok(Self { positions })
    }

    /// Column position of `field`.
    pub fn position(&self, field: Field) -> usize {
        self.positions[field.index()]
    }
}
