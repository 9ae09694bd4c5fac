//! Bulk-import feed settings.

use serde::{Deserialize, Serialize};

use crate::delimiter::single_byte;
use crate::error::ConfigError;

fn default_csv_path() -> String {
    ".parrain/data/students.csv".into()
}

fn default_delimiter() -> String {
    ",".into()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ImportConfig {
    /// Student feed with columns `nom, prenom, promotion[, matricule]`.
    #[serde(default = "default_csv_path")]
    pub csv_path: String,

    #[serde(default = "default_delimiter")]
    pub delimiter: String,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            csv_path: default_csv_path(),
            delimiter: default_delimiter(),
        }
    }
}

impl ImportConfig {
    pub fn delimiter_byte(&self) -> Result<u8, ConfigError> {
        single_byte("import.delimiter", &self.delimiter)
    }
}
