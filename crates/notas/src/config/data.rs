//! Dataset source configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_path() -> PathBuf {
    PathBuf::from("Notas.xlsx")
}

fn default_sheet() -> String {
    "Datos".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataConfig {
    /// Path to the grade spreadsheet (xlsx/xls/ods) or delimited text file.
    #[serde(default = "default_path")]
    pub path: PathBuf,

    /// Worksheet to read from spreadsheet workbooks. Ignored for CSV/TSV.
    #[serde(default = "default_sheet")]
    pub sheet: String,

    /// Value substituted for empty cells at load time.
    #[serde(default)]
    pub placeholder: String,

    /// Field delimiter for delimited text files. Detected when unset.
    #[serde(default)]
    pub delimiter: Option<char>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            sheet: default_sheet(),
            placeholder: String::new(),
            delimiter: None,
        }
    }
}
