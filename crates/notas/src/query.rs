//! Query classification: identifier-shaped vs name-shaped searches.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::QueryError;

/// Student identifier format, e.g. `25-0022-02`.
static STUDENT_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{2}-[0-9]{4}-[0-9]{2}$").expect("valid student id regex"));

/// How a raw query is validated and matched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Digit + hyphen means identifier, anything else is a name; both are
    /// case-insensitive substring matches.
    #[default]
    Loose,
    /// Only full `DD-DDDD-DD` identifiers are accepted, matched exactly.
    Strict,
}

impl std::str::FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "loose" => Ok(MatchMode::Loose),
            "strict" => Ok(MatchMode::Strict),
            _ => Err(format!("Unknown match mode: {}. Use loose or strict.", s)),
        }
    }
}

impl std::fmt::Display for MatchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchMode::Loose => write!(f, "loose"),
            MatchMode::Strict => write!(f, "strict"),
        }
    }
}

/// Which column a query targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryKind {
    Identifier,
    Name,
}

/// A trimmed, classified search string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub text: String,
    pub kind: QueryKind,
}

impl Query {
    /// Trim and classify `raw` under `mode`.
    pub fn parse(raw: &str, mode: MatchMode) -> Result<Self, QueryError> {
        let text = raw.trim();
        if text.is_empty() {
            return Err(QueryError::Empty);
        }

        let kind = match mode {
            MatchMode::Loose if looks_like_identifier(text) => QueryKind::Identifier,
            MatchMode::Loose => QueryKind::Name,
            MatchMode::Strict if is_student_id(text) => QueryKind::Identifier,
            MatchMode::Strict => return Err(QueryError::InvalidIdentifier(text.to_string())),
        };

        Ok(Self {
            text: text.to_string(),
            kind,
        })
    }
}

/// Full match against the `DD-DDDD-DD` identifier format.
pub fn is_student_id(text: &str) -> bool {
    STUDENT_ID.is_match(text)
}

/// Loose heuristic: at least one digit and a hyphen.
pub fn looks_like_identifier(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_digit()) && text.contains('-')
}
