//! Record resolution: from a raw query to the matching grade rows.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::dataset::{GradeRecord, Gradebook};
use crate::error::QueryError;
use crate::query::{MatchMode, Query, QueryKind};

/// Outcome of resolving a query against the gradebook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Resolution<'a> {
    /// Nothing matched.
    NotFound,
    /// Matching rows, in dataset order.
    Matches { records: Vec<&'a GradeRecord> },
    /// One identifier is shared by several student names; the caller must
    /// pick one of `candidates` and resolve again.
    Ambiguous {
        candidates: Vec<String>,
        records: Vec<&'a GradeRecord>,
    },
}

impl<'a> Resolution<'a> {
    /// All rows behind this resolution (empty for `NotFound`).
    pub fn records(&self) -> &[&'a GradeRecord] {
        match self {
            Resolution::NotFound => &[],
            Resolution::Matches { records } | Resolution::Ambiguous { records, .. } => records,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Resolution::NotFound)
    }

    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Resolution::Ambiguous { .. })
    }
}

/// Finds grade rows for identifier or name queries.
#[derive(Debug, Clone, Copy, Default)]
pub struct Resolver {
    mode: MatchMode,
}

impl Resolver {
    pub fn new(mode: MatchMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Resolve `raw` with no disambiguating name.
    pub fn resolve<'a>(
        &self,
        book: &'a Gradebook,
        raw: &str,
    ) -> Result<Resolution<'a>, QueryError> {
        self.resolve_as(book, raw, None)
    }

    /// Resolve `raw`, narrowing to the student called `name` when given.
    ///
    /// Blank names are treated as absent.
    pub fn resolve_as<'a>(
        &self,
        book: &'a Gradebook,
        raw: &str,
        name: Option<&str>,
    ) -> Result<Resolution<'a>, QueryError> {
        let query = Query::parse(raw, self.mode)?;
        let mut records = self.find(book, &query);

        if let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) {
            records = narrow(records, name);
        }

        debug!(
            query = %query.text,
            kind = ?query.kind,
            mode = %self.mode,
            matches = records.len(),
            "resolved query"
        );

        if records.is_empty() {
            return Ok(Resolution::NotFound);
        }

        if has_shared_identifier(&records) {
            return Ok(Resolution::Ambiguous {
                candidates: distinct_names(&records),
                records,
            });
        }

        Ok(Resolution::Matches { records })
    }

    /// Stable filter of the gradebook for an already classified query.
    pub fn find<'a>(&self, book: &'a Gradebook, query: &Query) -> Vec<&'a GradeRecord> {
        match (self.mode, query.kind) {
            (MatchMode::Strict, _) => book
                .records
                .iter()
                .filter(|r| r.student_id == query.text)
                .collect(),
            (MatchMode::Loose, kind) => {
                let needle = query.text.to_lowercase();
                book.records
                    .iter()
                    .filter(|r| {
                        let haystack = match kind {
                            QueryKind::Identifier => &r.student_id,
                            QueryKind::Name => &r.student_name,
                        };
                        haystack.to_lowercase().contains(&needle)
                    })
                    .collect()
            }
        }
    }
}

/// Comparison key for student names: trimmed and lowercased.
///
/// Every name comparison (ambiguity, candidates, narrowing, grouping) goes
/// through this, so two spellings that differ only in case or padding are
/// one student.
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Distinct student names, in order of first appearance.
///
/// Names equal under [`name_key`] collapse to the first spelling seen.
pub fn distinct_names(records: &[&GradeRecord]) -> Vec<String> {
    let mut names: IndexMap<String, &str> = IndexMap::new();
    for record in records {
        names
            .entry(name_key(&record.student_name))
            .or_insert(record.student_name.as_str());
    }
    names.into_values().map(str::to_string).collect()
}

/// Keep only the rows of the student called `name` (case-insensitive).
pub fn narrow<'a>(records: Vec<&'a GradeRecord>, name: &str) -> Vec<&'a GradeRecord> {
    let wanted = name_key(name);
    records
        .into_iter()
        .filter(|r| name_key(&r.student_name) == wanted)
        .collect()
}

/// Whether some identifier in `records` carries more than one name.
fn has_shared_identifier(records: &[&GradeRecord]) -> bool {
    let mut first_name: HashMap<&str, String> = HashMap::new();
    for record in records {
        let key = name_key(&record.student_name);
        match first_name.get(record.student_id.as_str()) {
            Some(seen) if *seen != key => return true,
            Some(_) => {}
            None => {
                first_name.insert(record.student_id.as_str(), key);
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(row: usize, id: &str, name: &str, subject: &str) -> GradeRecord {
        GradeRecord {
            row,
            student_id: id.to_string(),
            student_name: name.to_string(),
            program: "Ingeniería".to_string(),
            subject: subject.to_string(),
            instructor: "M. López".to_string(),
            final_grade: "70".to_string(),
            special_grade: String::new(),
            year: "2025".to_string(),
            term: "I".to_string(),
            regime: "Diurno".to_string(),
        }
    }

    fn book() -> Gradebook {
        Gradebook::from_records(
            vec![
                record(0, "25-0022-02", "Juan Pérez", "Cálculo I"),
                record(1, "25-0001-01", "Ana Ruiz", "Cálculo I"),
                record(2, "25-0022-02", "Juan Pérez", "Física I"),
                record(3, "25-0100-01", "Juana Paz", "Química"),
            ],
            "",
        )
    }

    fn rows(resolution: &Resolution<'_>) -> Vec<usize> {
        resolution.records().iter().map(|r| r.row).collect()
    }

    #[test]
    fn test_loose_identifier_substring() {
        let book = book();
        let resolver = Resolver::new(MatchMode::Loose);

        let res = resolver.resolve(&book, "25-0022").unwrap();
        assert_eq!(rows(&res), vec![0, 2]);

        let res = resolver.resolve(&book, "-01").unwrap();
        assert_eq!(rows(&res), vec![1, 3]);
    }

    #[test]
    fn test_loose_name_is_case_insensitive_substring() {
        let book = book();
        let resolver = Resolver::new(MatchMode::Loose);

        let res = resolver.resolve(&book, "JUAN").unwrap();
        assert_eq!(rows(&res), vec![0, 2, 3]);
        assert!(!res.is_ambiguous());

        let res = resolver.resolve(&book, "pérez").unwrap();
        assert_eq!(rows(&res), vec![0, 2]);
    }

    #[test]
    fn test_loose_name_is_literal_not_a_pattern() {
        let book = book();
        let res = Resolver::default().resolve(&book, "J.an").unwrap();
        assert!(res.is_not_found());
    }

    #[test]
    fn test_strict_is_exact() {
        let book = book();
        let resolver = Resolver::new(MatchMode::Strict);

        let res = resolver.resolve(&book, " 25-0022-02 ").unwrap();
        assert_eq!(rows(&res), vec![0, 2]);

        let res = resolver.resolve(&book, "25-0022-03").unwrap();
        assert!(res.is_not_found());

        assert_eq!(
            resolver.resolve(&book, "25-0022").unwrap_err(),
            QueryError::InvalidIdentifier("25-0022".to_string())
        );
    }

    #[test]
    fn test_empty_query() {
        let book = book();
        assert_eq!(Resolver::default().resolve(&book, "   ").unwrap_err(), QueryError::Empty);
    }

    #[test]
    fn test_shared_identifier_is_ambiguous_until_named() {
        let mut book = book();
        book.records.push(record(4, "25-0022-02", "Juan Pereira", "Historia"));
        book.records.push(record(5, "25-0022-02", "Juan Pérez", "Dibujo"));
        let resolver = Resolver::new(MatchMode::Strict);

        let res = resolver.resolve(&book, "25-0022-02").unwrap();
        match &res {
            Resolution::Ambiguous { candidates, .. } => {
                assert_eq!(candidates, &vec!["Juan Pérez".to_string(), "Juan Pereira".to_string()]);
            }
            other => panic!("expected ambiguity, got {other:?}"),
        }

        let res = resolver
            .resolve_as(&book, "25-0022-02", Some("juan pérez"))
            .unwrap();
        assert!(matches!(res, Resolution::Matches { .. }));
        assert_eq!(rows(&res), vec![0, 2, 5]);

        let res = resolver
            .resolve_as(&book, "25-0022-02", Some("Nadie"))
            .unwrap();
        assert!(res.is_not_found());
    }

    #[test]
    fn test_blank_name_is_ignored() {
        let book = book();
        let res = Resolver::default()
            .resolve_as(&book, "25-0001-01", Some("  "))
            .unwrap();
        assert_eq!(rows(&res), vec![1]);
    }

    #[test]
    fn test_name_casing_is_one_student() {
        let mut book = book();
        book.records.push(record(4, "25-0022-02", "JUAN PÉREZ", "Historia"));
        book.records.push(record(5, "25-0022-02", " juan pérez ", "Dibujo"));
        let resolver = Resolver::new(MatchMode::Strict);

        let res = resolver.resolve(&book, "25-0022-02").unwrap();
        assert!(matches!(res, Resolution::Matches { .. }));
        assert_eq!(rows(&res), vec![0, 2, 4, 5]);

        let res = resolver
            .resolve_as(&book, "25-0022-02", Some("Juan Pérez"))
            .unwrap();
        assert!(matches!(res, Resolution::Matches { .. }));
        assert_eq!(rows(&res), vec![0, 2, 4, 5]);
    }

    #[test]
    fn test_casing_variants_beside_another_name() {
        let mut book = book();
        book.records.push(record(4, "25-0022-02", "JUAN PÉREZ", "Historia"));
        book.records.push(record(5, "25-0022-02", "Juan Pereira", "Dibujo"));
        let resolver = Resolver::new(MatchMode::Strict);

        match resolver.resolve(&book, "25-0022-02").unwrap() {
            Resolution::Ambiguous { candidates, .. } => {
                assert_eq!(candidates, vec!["Juan Pérez".to_string(), "Juan Pereira".to_string()]);
            }
            other => panic!("expected ambiguity, got {other:?}"),
        }

        let res = resolver
            .resolve_as(&book, "25-0022-02", Some("Juan Pérez"))
            .unwrap();
        assert!(matches!(res, Resolution::Matches { .. }));
        assert_eq!(rows(&res), vec![0, 2, 4]);
    }

    #[test]
    fn test_full_table_loose_match_over_many_students() {
        let records = (0..3_000)
            .map(|i| {
                let id = format!("25-{:04}-01", i / 3);
                record(i, &id, &format!("Estudiante {}", i / 3), "Cálculo I")
            })
            .collect();
        let book = Gradebook::from_records(records, "");

        let res = Resolver::new(MatchMode::Loose).resolve(&book, "25-").unwrap();
        assert!(matches!(res, Resolution::Matches { .. }));
        assert_eq!(res.records().len(), 3_000);
    }

    #[test]
    fn test_distinct_names_keep_first_appearance() {
        let book = book();
        let all: Vec<&GradeRecord> = book.records.iter().collect();
        assert_eq!(distinct_names(&all), vec!["Juan Pérez", "Ana Ruiz", "Juana Paz"]);
    }
}
