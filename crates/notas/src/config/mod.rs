//! Layered configuration loading using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`NOTAS_*` prefix, `__` as separator)
//! 2. Project-level `notas.toml` (or an explicit file)
//! 3. User-level `~/.config/notas/config.toml`
//! 4. Built-in defaults
//!
//! Figment maps `NOTAS_DATA__PATH` -> `data.path`, `NOTAS_SEARCH__MODE` ->
//! `search.mode`, and so on.

mod data;
mod error;
mod institution;
mod server;

pub use data::DataConfig;
pub use error::ConfigError;
pub use institution::InstitutionConfig;
pub use server::ServerConfig;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::dataset::ColumnNames;
use crate::query::MatchMode;

/// Project-local configuration file name.
pub const PROJECT_CONFIG_FILE: &str = "notas.toml";

/// Search behaviour.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SearchConfig {
    /// How identifier queries are recognised and matched.
    #[serde(default)]
    pub mode: MatchMode,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct NotasConfig {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub columns: ColumnNames,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub institution: InstitutionConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

impl NotasConfig {
    /// Load configuration from all default sources.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, reading `file` instead of `./notas.toml` when given.
    ///
    /// A `.env` file in the working directory is applied first, so its
    /// `NOTAS_*` variables take part in the environment layer.
    pub fn load_from(file: Option<&Path>) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        let config: Self = Self::figment(file).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    pub fn figment(file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = file
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(PROJECT_CONFIG_FILE));
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("NOTAS_").split("__"))
    }

    /// Reject values that would make every lookup fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data.sheet.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "data.sheet".to_string(),
                reason: "sheet name must not be empty".to_string(),
            });
        }

        if let Some(delimiter) = self.data.delimiter {
            if !delimiter.is_ascii() || delimiter.is_ascii_alphanumeric() {
                return Err(ConfigError::InvalidValue {
                    field: "data.delimiter".to_string(),
                    reason: format!("'{delimiter}' cannot separate fields"),
                });
            }
        }

        let mut seen = HashSet::new();
        for (field, header) in self.columns.entries() {
            let header = header.trim();
            if header.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: format!("columns.{}", field.key()),
                    reason: "column header must not be empty".to_string(),
                });
            }
            if !seen.insert(header.to_lowercase()) {
                return Err(ConfigError::InvalidValue {
                    field: format!("columns.{}", field.key()),
                    reason: format!("header '{header}' is mapped more than once"),
                });
            }
        }

        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("notas").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn figment_builds_without_files() {
        Jail::expect_with(|_jail| {
            let config: NotasConfig = NotasConfig::figment(None).extract()?;
            assert_eq!(config.data.sheet, "Datos");
            assert_eq!(config.search.mode, MatchMode::Loose);
            assert_eq!(config.server.port, 8501);
            assert_eq!(config.columns.id, "N° Carnet");
            Ok(())
        });
    }

    #[test]
    fn project_file_and_env_are_layered() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "notas.toml",
                r#"
                [data]
                path = "grades.csv"
                placeholder = "-"

                [search]
                mode = "strict"

                [server]
                port = 9000
                "#,
            )?;
            jail.set_env("NOTAS_SERVER__PORT", "9100");
            jail.set_env("NOTAS_INSTITUTION__NAME", "Universidad Central");

            let config: NotasConfig = NotasConfig::figment(None).extract()?;
            assert_eq!(config.data.path, PathBuf::from("grades.csv"));
            assert_eq!(config.data.placeholder, "-");
            assert_eq!(config.search.mode, MatchMode::Strict);
            assert_eq!(config.server.port, 9100);
            assert_eq!(config.institution.name, "Universidad Central");
            Ok(())
        });
    }

    #[test]
    fn explicit_file_replaces_project_file() {
        Jail::expect_with(|jail| {
            jail.create_file("notas.toml", "[data]\nsheet = \"Ignorada\"\n")?;
            jail.create_file("custom.toml", "[data]\nsheet = \"Notas2024\"\n")?;

            let config: NotasConfig =
                NotasConfig::figment(Some(Path::new("custom.toml"))).extract()?;
            assert_eq!(config.data.sheet, "Notas2024");
            Ok(())
        });
    }

    #[test]
    fn validate_rejects_duplicate_headers() {
        let mut config = NotasConfig::default();
        config.columns.subject = config.columns.name.clone();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("columns.subject"));
    }

    #[test]
    fn validate_rejects_blank_sheet() {
        let mut config = NotasConfig::default();
        config.data.sheet = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_letter_delimiter() {
        let mut config = NotasConfig::default();
        config.data.delimiter = Some('x');
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("data.delimiter"));

        config.data.delimiter = Some(';');
        assert!(config.validate().is_ok());
    }
}
