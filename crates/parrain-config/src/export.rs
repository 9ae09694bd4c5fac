//! Ledger export settings.

use serde::{Deserialize, Serialize};

use crate::delimiter::single_byte;
use crate::error::ConfigError;

fn default_delimiter() -> String {
    ";".into()
}

fn default_file_name() -> String {
    "binomes.csv".into()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExportConfig {
    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    /// File name suggested in the HTTP `Content-Disposition` header.
    #[serde(default = "default_file_name")]
    pub file_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            file_name: default_file_name(),
        }
    }
}

impl ExportConfig {
    pub fn delimiter_byte(&self) -> Result<u8, ConfigError> {
        single_byte("export.delimiter", &self.delimiter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_delimiter_is_semicolon() {
        assert_eq!(ExportConfig::default().delimiter_byte().unwrap(), b';');
    }

    #[test]
    fn multi_char_delimiter_is_rejected() {
        let config = ExportConfig {
            delimiter: ";;".into(),
            ..Default::default()
        };
        assert!(matches!(
            config.delimiter_byte(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
