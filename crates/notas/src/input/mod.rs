//! Input parsing and data source handling.

mod parser;
mod source;
mod spreadsheet;

pub use parser::{Parser, ParserConfig};
pub use source::{DataTable, SourceMetadata, content_hash};

use std::path::Path;

use crate::config::DataConfig;
use crate::error::{NotasError, Result};

/// Extensions read as spreadsheet workbooks; anything else is delimited text.
const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Read a grade source into a string table.
///
/// Workbooks are read from the configured sheet; delimited files use the
/// configured delimiter or detect one. Fails with
/// [`NotasError::DatasetNotFound`] when the path does not exist.
pub fn read_table(config: &DataConfig) -> Result<(DataTable, SourceMetadata)> {
    let path = config.path.as_path();
    let sheet = config.sheet.as_str();
    if !path.exists() {
        return Err(NotasError::DatasetNotFound(path.to_path_buf()));
    }

    let contents = std::fs::read(path).map_err(|e| NotasError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    match workbook_extension(path) {
        Some(ext) => {
            let hash = content_hash(&contents);
            let size_bytes = contents.len() as u64;
            let table = spreadsheet::read_sheet(contents, sheet)?;
            let metadata =
                SourceMetadata::from_parts(path.to_path_buf(), hash, size_bytes, &ext, &table)
                    .with_sheet(sheet);
            Ok((table, metadata))
        }
        None => {
            let parser = Parser::with_config(ParserConfig {
                delimiter: config.delimiter.and_then(|c| u8::try_from(c).ok()),
                ..ParserConfig::default()
            });
            let (table, format) = parser.parse(&contents)?;
            let metadata = SourceMetadata::describe(path.to_path_buf(), &contents, format, &table);
            Ok((table, metadata))
        }
    }
}

fn workbook_extension(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    WORKBOOK_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}
