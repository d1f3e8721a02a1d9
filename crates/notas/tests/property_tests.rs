//! Property-based tests for grade classification and query handling.
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p notas --test property_tests
//!
//! # Run with more cases
//! PROPTEST_CASES=10000 cargo test -p notas --test property_tests
//! ```

use proptest::prelude::*;

use notas::dataset::{GradeRecord, Gradebook};
use notas::query::is_student_id;
use notas::{GradeClassifier, MatchMode, PASSING_GRADE, Query, QueryKind, Resolver, Status, classify};

// =============================================================================
// Test Strategies
// =============================================================================

fn passing_grade() -> impl Strategy<Value = String> {
    prop_oneof![
        (60u32..=100).prop_map(|g| g.to_string()),
        (60u32..100, 0u32..100).prop_map(|(g, d)| format!("{g}.{d}")),
    ]
}

fn failing_grade() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u32..60).prop_map(|g| g.to_string()),
        (0u32..59, 0u32..100).prop_map(|(g, d)| format!("{g}.{d}")),
    ]
}

fn student_id() -> impl Strategy<Value = String> {
    "[0-9]{2}-[0-9]{4}-[0-9]{2}"
}

fn any_text() -> impl Strategy<Value = String> {
    "\\PC{0,30}"
}

fn record(row: usize, id: &str, name: &str) -> GradeRecord {
    GradeRecord {
        row,
        student_id: id.to_string(),
        student_name: name.to_string(),
        program: "Ingeniería".to_string(),
        subject: format!("Asignatura {row}"),
        instructor: "M. López".to_string(),
        final_grade: "70".to_string(),
        special_grade: String::new(),
        year: "2025".to_string(),
        term: "I".to_string(),
        regime: "Diurno".to_string(),
    }
}

// =============================================================================
// Classification Properties
// =============================================================================

proptest! {
    #[test]
    fn classify_never_panics(final_grade in any_text(), special in any_text()) {
        let _ = classify(&final_grade, &special);
    }

    #[test]
    fn classify_is_deterministic(final_grade in any_text(), special in any_text()) {
        prop_assert_eq!(classify(&final_grade, &special), classify(&final_grade, &special));
    }

    #[test]
    fn passing_grade_ignores_special(grade in passing_grade(), special in any_text()) {
        let result = classify(&grade, &special);
        prop_assert_eq!(result.status, Status::Passed);
        prop_assert!(result.special_grade.is_none());
    }

    #[test]
    fn failing_grade_with_numeric_special_is_eligible(
        grade in failing_grade(),
        special in 0u32..=100,
    ) {
        let special = special.to_string();
        let result = classify(&grade, &special);
        prop_assert_eq!(result.status, Status::SpecialEligible);
        prop_assert_eq!(result.special_grade, Some(special));
    }

    #[test]
    fn failing_grade_without_special_fails(grade in failing_grade()) {
        prop_assert_eq!(classify(&grade, "").status, Status::Failed);
        prop_assert_eq!(classify(&grade, "SD").status, Status::Failed);
    }

    #[test]
    fn numeric_status_follows_threshold(grade in 0.0f64..200.0) {
        let text = format!("{grade:.2}");
        let parsed: f64 = text.parse().unwrap();
        let status = classify(&text, "").status;
        if parsed >= PASSING_GRADE {
            prop_assert_eq!(status, Status::Passed);
        } else {
            prop_assert_eq!(status, Status::Failed);
        }
    }

    #[test]
    fn final_grade_is_kept_verbatim(final_grade in any_text()) {
        prop_assert_eq!(classify(&final_grade, "").final_grade, final_grade);
    }

    #[test]
    fn placeholder_never_counts_as_special(grade in failing_grade(), placeholder in "[0-9]{1,3}") {
        let classifier = GradeClassifier::new(placeholder.clone());
        prop_assert_eq!(classifier.classify(&grade, &placeholder).status, Status::Failed);
    }
}

// =============================================================================
// Query Properties
// =============================================================================

proptest! {
    #[test]
    fn well_formed_ids_parse_in_strict_mode(id in student_id(), pad in " {0,3}") {
        let raw = format!("{pad}{id}{pad}");
        let query = Query::parse(&raw, MatchMode::Strict).unwrap();
        prop_assert_eq!(query.kind, QueryKind::Identifier);
        prop_assert_eq!(query.text, id);
    }

    #[test]
    fn strict_mode_accepts_only_well_formed_ids(raw in any_text()) {
        if let Ok(query) = Query::parse(&raw, MatchMode::Strict) {
            prop_assert!(is_student_id(&query.text));
        }
    }

    #[test]
    fn query_parse_never_panics(raw in any_text()) {
        let _ = Query::parse(&raw, MatchMode::Loose);
        let _ = Query::parse(&raw, MatchMode::Strict);
    }

    #[test]
    fn strict_resolution_returns_only_that_id(
        ids in prop::collection::vec(student_id(), 1..20),
        pick in any::<prop::sample::Index>(),
    ) {
        let records: Vec<GradeRecord> = ids
            .iter()
            .enumerate()
            .map(|(i, id)| record(i, id, "Estudiante"))
            .collect();
        let book = Gradebook::from_records(records, "");
        let target = &ids[pick.index(ids.len())];

        let resolution = Resolver::new(MatchMode::Strict).resolve(&book, target).unwrap();
        let found = resolution.records();

        prop_assert_eq!(found.len(), ids.iter().filter(|id| *id == target).count());
        prop_assert!(found.iter().all(|r| &r.student_id == target));
        prop_assert!(found.windows(2).all(|w| w[0].row < w[1].row));
    }
}
