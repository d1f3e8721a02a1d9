//! Grade dataset loading and the process-wide read-only handle.

mod columns;
mod record;

pub use columns::{ColumnMap, ColumnNames, Field};
pub use record::{GradeRecord, Gradebook};

use std::path::Path;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use tracing::{debug, info};

use crate::config::DataConfig;
use crate::error::Result;
use crate::input;

/// Load a gradebook from the configured source.
pub fn load(config: &DataConfig, columns: &ColumnNames) -> Result<Gradebook> {
    debug!(path = %config.path.display(), sheet = %config.sheet, "reading grade dataset");

    let (table, metadata) = input::read_table(config)?;
    let gradebook = Gradebook::from_table(table, Some(metadata), columns, &config.placeholder)?;

    if let Some(source) = &gradebook.source {
        info!(
            path = %source.path.display(),
            format = %source.format,
            rows = gradebook.len(),
            hash = %source.hash,
            "loaded grade dataset"
        );
    }

    Ok(gradebook)
}

/// Lazily loaded, shared, read-only gradebook.
///
/// The first successful [`DatasetHandle::get`] reads the source; every later
/// call returns the same snapshot for the life of the handle, even if the file
/// changes on disk. Failed loads are not cached, so a missing file is retried
/// on the next request.
#[derive(Debug)]
pub struct DatasetHandle {
    config: DataConfig,
    columns: ColumnNames,
    cell: OnceCell<Arc<Gradebook>>,
}

impl DatasetHandle {
    /// Handle that will load from `config` on first use.
    pub fn new(config: DataConfig, columns: ColumnNames) -> Self {
        Self {
            config,
            columns,
            cell: OnceCell::new(),
        }
    }

    /// Handle around an already built gradebook.
    pub fn preloaded(gradebook: Gradebook) -> Self {
        let placeholder = gradebook.placeholder.clone();
        Self {
            config: DataConfig {
                placeholder,
                ..DataConfig::default()
            },
            columns: ColumnNames::default(),
            cell: OnceCell::with_value(Arc::new(gradebook)),
        }
    }

    /// The gradebook, loading it if this is the first call.
    pub fn get(&self) -> Result<Arc<Gradebook>> {
        self.cell
            .get_or_try_init(|| load(&self.config, &self.columns).map(Arc::new))
            .cloned()
    }

    /// Whether the snapshot has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }

    /// Configured source path.
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Placeholder substituted for empty cells.
    pub fn placeholder(&self) -> &str {
        &self.config.placeholder
    }
}
