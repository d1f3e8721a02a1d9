//! Server-side HTML for the search and results pages.

use std::collections::BTreeMap;

use minijinja::{Environment, context};
use serde::Serialize;

use crate::classify::{GradeClassifier, Status};
use crate::config::NotasConfig;
use crate::error::{QueryError, Result};
use crate::resolve::Resolution;
use crate::transcript::Transcript;

const LAYOUT_TEMPLATE: &str = include_str!("../../templates/layout.html");
const SEARCH_TEMPLATE: &str = include_str!("../../templates/search.html");

/// Shown wherever a value is blank.
pub const BLANK: &str = "—";

/// Severity of an on-page message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub level: Level,
    pub text: String,
}

impl Message {
    pub fn new(level: Level, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }
}

/// Everything the search page shows for one request.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchView {
    pub query: String,
    pub message: Option<Message>,
    /// Names to choose from when an identifier is shared.
    pub candidates: Vec<String>,
    pub transcripts: Vec<Transcript>,
}

impl SearchView {
    /// The empty search page.
    pub fn blank() -> Self {
        Self::default()
    }

    /// View for a resolver outcome.
    pub fn from_resolution(
        query: &str,
        outcome: std::result::Result<Resolution<'_>, QueryError>,
        classifier: &GradeClassifier,
    ) -> Self {
        let query = query.trim().to_string();
        match outcome {
            Err(QueryError::Empty) => Self {
                query,
                message: Some(Message::new(
                    Level::Warning,
                    "Ingresa tu número de carnet o tu nombre completo.",
                )),
                ..Self::default()
            },
            Err(QueryError::InvalidIdentifier(_)) => Self {
                query,
                message: Some(Message::new(
                    Level::Warning,
                    "Formato de carnet inválido. Usa el formato 00-0000-00 (ej: 25-0022-02).",
                )),
                ..Self::default()
            },
            Ok(Resolution::NotFound) => Self {
                query,
                message: Some(Message::new(
                    Level::Info,
                    "⚠️ Ningún registro encontrado. Verifique sus datos.",
                )),
                ..Self::default()
            },
            Ok(Resolution::Ambiguous { candidates, .. }) => Self {
                message: Some(Message::new(
                    Level::Warning,
                    format!(
                        "El carnet {query} está asociado a varios estudiantes. Selecciona tu nombre:"
                    ),
                )),
                query,
                candidates,
                transcripts: Vec::new(),
            },
            Ok(Resolution::Matches { records }) => Self {
                query,
                message: Some(Message::new(
                    Level::Success,
                    format!("Se encontraron {} registros.", records.len()),
                )),
                candidates: Vec::new(),
                transcripts: Transcript::group(&records, classifier),
            },
        }
    }

    /// Pretty-printed JSON of the whole view.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// View for a request that could not run at all.
    pub fn failure(query: &str, text: impl Into<String>) -> Self {
        Self {
            query: query.trim().to_string(),
            message: Some(Message::new(Level::Error, text)),
            ..Self::default()
        }
    }
}

/// Page-wide branding flags.
#[derive(Debug, Clone, Serialize)]
pub struct Branding {
    pub institution: String,
    pub has_logo: bool,
    pub has_background: bool,
    pub strict: bool,
}

impl Branding {
    pub fn from_config(config: &NotasConfig) -> Self {
        Self {
            institution: config.institution.name.clone(),
            has_logo: config.institution.logo_if_present().is_some(),
            has_background: config.institution.background_if_present().is_some(),
            strict: config.search.mode == crate::query::MatchMode::Strict,
        }
    }
}

/// Renders [`SearchView`]s with the built-in templates.
pub struct HtmlRenderer {
    env: Environment<'static>,
    branding: Branding,
}

impl HtmlRenderer {
    pub fn new(branding: Branding) -> Result<Self> {
        let mut env = Environment::new();
        env.add_template("layout.html", LAYOUT_TEMPLATE)?;
        env.add_template("search.html", SEARCH_TEMPLATE)?;
        Ok(Self { env, branding })
    }

    pub fn branding(&self) -> &Branding {
        &self.branding
    }

    pub fn render(&self, view: &SearchView) -> Result<String> {
        let labels: BTreeMap<&str, &str> = [
            Status::Passed,
            Status::SpecialEligible,
            Status::Failed,
            Status::NoRights,
            Status::Undetermined,
        ]
        .into_iter()
        .map(|s| (s.key(), s.label()))
        .collect();

        let template = self.env.get_template("search.html")?;
        let html = template.render(context! {
            branding => &self.branding,
            view => view,
            labels => labels,
            blank => BLANK,
        })?;
        Ok(html)
    }
}
