//! CLI command implementations.

pub mod export;
pub mod lookup;
pub mod serve;
pub mod status;

use std::path::PathBuf;

use notas::{ConfigError, MatchMode, NotasConfig};

/// Load configuration and apply command-line overrides on top.
pub fn load_config(
    file: Option<PathBuf>,
    data: Option<PathBuf>,
    strict: bool,
) -> Result<NotasConfig, ConfigError> {
    let mut config = NotasConfig::load_from(file.as_deref())?;

    if let Some(path) = data {
        config.data.path = path;
    }
    if strict {
        config.search.mode = MatchMode::Strict;
    }

    tracing::debug!(
        data = %config.data.path.display(),
        sheet = %config.data.sheet,
        mode = %config.search.mode,
        "configuration loaded"
    );

    Ok(config)
}
