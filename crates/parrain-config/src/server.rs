//! HTTP server settings.

use serde::{Deserialize, Serialize};

fn default_bind() -> String {
    "127.0.0.1:5000".into()
}

fn default_cors_origin() -> String {
    "*".into()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Listen address for `parrain serve`.
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Value of `Access-Control-Allow-Origin` on `/api/*` responses.
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            cors_origin: default_cors_origin(),
        }
    }
}
