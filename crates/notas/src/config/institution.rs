//! Institution branding shown on the search page and transcripts.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_name() -> String {
    "Registro Académico".to_string()
}

fn default_logo() -> PathBuf {
    PathBuf::from("logo.png")
}

fn default_background() -> PathBuf {
    PathBuf::from("fondo.jpg")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InstitutionConfig {
    /// Institution name printed in page and transcript headers.
    #[serde(default = "default_name")]
    pub name: String,

    /// Logo image. A missing file falls back to a text placeholder.
    #[serde(default = "default_logo")]
    pub logo: PathBuf,

    /// Page background image. A missing file leaves the plain background.
    #[serde(default = "default_background")]
    pub background: PathBuf,
}

impl InstitutionConfig {
    /// Logo path if the file is actually present.
    pub fn logo_if_present(&self) -> Option<&PathBuf> {
        self.logo.is_file().then_some(&self.logo)
    }

    /// Background path if the file is actually present.
    pub fn background_if_present(&self) -> Option<&PathBuf> {
        self.background.is_file().then_some(&self.background)
    }
}

impl Default for InstitutionConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            logo: default_logo(),
            background: default_background(),
        }
    }
}
