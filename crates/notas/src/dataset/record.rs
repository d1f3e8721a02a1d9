//! Grade records and the loaded gradebook.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::input::{DataTable, SourceMetadata};
use super::columns::{ColumnMap, ColumnNames, Field};

/// One row of the grade dataset: one student in one subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeRecord {
    /// Zero-based data row index in the source (header excluded).
    pub row: usize,
    pub student_id: String,
    pub student_name: String,
    pub program: String,
    pub subject: String,
    pub instructor: String,
    /// Numeric text, or a sentinel such as `SD`/`NSP`.
    pub final_grade: String,
    pub special_grade: String,
    pub year: String,
    pub term: String,
    pub regime: String,
}

impl GradeRecord {
    fn from_row(row_index: usize, row: &[String], map: &ColumnMap) -> Self {
        let cell = |field: Field| {
            row.get(map.position(field))
                .map(|value| value.trim().to_string())
                .unwrap_or_default()
        };

        Self {
            row: row_index,
            student_id: cell(Field::Id),
            student_name: cell(Field::Name),
            program: cell(Field::Program),
            subject: cell(Field::Subject),
            instructor: cell(Field::Instructor),
            final_grade: cell(Field::FinalGrade),
            special_grade: cell(Field::SpecialGrade),
            year: cell(Field::Year),
            term: cell(Field::Term),
            regime: cell(Field::Regime),
        }
    }
}

/// The read-only grade dataset, in source row order.
#[derive(Debug, Clone)]
pub struct Gradebook {
    /// Where the rows came from; `None` for in-memory gradebooks.
    pub source: Option<SourceMetadata>,
    /// Normalized header row of the source.
    pub headers: Vec<String>,
    /// Records in original row order.
    pub records: Vec<GradeRecord>,
    /// Value that stands in for empty cells.
    pub placeholder: String,
}

impl Gradebook {
    /// Map a raw table onto grade records.
    ///
    /// Blank cells are replaced with `placeholder` and every cell is trimmed.
    pub fn from_table(
        mut table: DataTable,
        source: Option<SourceMetadata>,
        columns: &ColumnNames,
        placeholder: &str,
    ) -> Result<Self> {
        let map = ColumnMap::resolve(&table.headers, columns)?;
        table.fill_missing(placeholder);

        let records: Vec<GradeRecord> = table
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| GradeRecord::from_row(i, row, &map))
            .collect();

        Ok(Self {
            source,
            headers: table.headers,
            records,
            placeholder: placeholder.to_string(),
        })
    }

    /// Build a gradebook directly from records, with no backing file.
    pub fn from_records(records: Vec<GradeRecord>, placeholder: &str) -> Self {
        let headers = ColumnNames::default()
            .entries()
            .map(|(_, header)| header.to_string())
            .collect();

        Self {
            source: None,
            headers,
            records,
            placeholder: placeholder.to_string(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of distinct student identifiers.
    pub fn student_count(&self) -> usize {
        let mut ids: Vec<&str> = self.records.iter().map(|r| r.student_id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        ids.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NotasError;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn table() -> DataTable {
        let headers = ColumnNames::default()
            .entries()
            .map(|(_, h)| h.to_string())
            .collect();
        DataTable::new(
            headers,
            vec![
                strings(&[
                    "25-0022-02", "Juan Pérez", "Ingeniería", "Cálculo I", "M. López", "75", "",
                    "2025", "I", "Diurno",
                ]),
                strings(&[
                    "25-0022-02", "Juan Pérez", "Ingeniería", "Física I", "R. Díaz", " 45 ", "62",
                    "2025", "I", "Diurno",
                ]),
            ],
        )
    }

    #[test]
    fn test_from_table_maps_fields_and_fills_missing() {
        let book = Gradebook::from_table(table(), None, &ColumnNames::default(), "-").unwrap();

        assert_eq!(book.len(), 2);
        let first = &book.records[0];
        assert_eq!(first.row, 0);
        assert_eq!(first.student_name, "Juan Pérez");
        assert_eq!(first.subject, "Cálculo I");
        assert_eq!(first.special_grade, "-");

        let second = &book.records[1];
        assert_eq!(second.row, 1);
        assert_eq!(second.final_grade, "45");
        assert_eq!(second.special_grade, "62");
        assert_eq!(book.student_count(), 1);
    }

    #[test]
    fn test_from_table_accepts_header_only() {
        let empty = DataTable::new(table().headers, Vec::new());
        let book = Gradebook::from_table(empty, None, &ColumnNames::default(), "").unwrap();
        assert!(book.is_empty());
        assert_eq!(book.student_count(), 0);
    }

    #[test]
    fn test_from_table_requires_columns() {
        let table = DataTable::new(strings(&["N° Carnet"]), vec![strings(&["25-0022-02"])]);
        let err = Gradebook::from_table(table, None, &ColumnNames::default(), "").unwrap_err();
        assert!(matches!(err, NotasError::MissingColumn(_)));
    }
}
