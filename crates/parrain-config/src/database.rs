//! libSQL database location.

use serde::{Deserialize, Serialize};

fn default_path() -> String {
    ".parrain/parrain.db".into()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Database file. Relative paths resolve against the project root.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

impl DatabaseConfig {
    /// True when the store lives only in memory (tests, dry runs).
    pub fn is_in_memory(&self) -> bool {
        self.path == ":memory:"
    }
}
