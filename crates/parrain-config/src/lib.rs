//! # parrain-config
//!
//! Layered configuration loading for Parrainage using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`PARRAIN_*` prefix, `__` as separator)
//! 2. Project-level `.parrain/config.toml`
//! 3. User-level `~/.config/parrain/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `PARRAIN_DATABASE__PATH` -> `database.path`,
//! `PARRAIN_DRAW__SEED` -> `draw.seed`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use parrain_config::ParrainConfig;
//!
//! let config = ParrainConfig::load_with_dotenv().expect("config");
//! let registry = config.sponsorship.registry().expect("valid rules");
//! println!("{} cohorts", registry.cohorts().len());
//! ```

mod database;
mod delimiter;
mod draw;
mod error;
mod export;
mod import;
mod server;
mod sponsorship;

pub use database::DatabaseConfig;
pub use draw::DrawConfig;
pub use error::ConfigError;
pub use export::ExportConfig;
pub use import::ImportConfig;
pub use server::ServerConfig;
pub use sponsorship::{RuleConfig, SponsorshipConfig};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project directory holding the database, config file, and default feed.
pub const PROJECT_DIR: &str = ".parrain";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ParrainConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub import: ImportConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub draw: DrawConfig,
    #[serde(default)]
    pub sponsorship: SponsorshipConfig,
}

impl ParrainConfig {
    /// Load configuration from all sources (TOML files + environment variables),
    /// looking for the project file in the current directory.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment(Path::new(".")).extract().map_err(ConfigError::from)
    }

    /// Load configuration for a specific project root.
    pub fn load_for_project(project_root: &Path) -> Result<Self, ConfigError> {
        Self::figment(project_root)
            .extract()
            .map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Calls `dotenvy` on the current directory's `.env` before building the
    /// figment.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    pub fn figment(project_root: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = project_root.join(PROJECT_DIR).join("config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("PARRAIN_").split("__"))
    }

    /// Resolve a configured path against the project root.
    ///
    /// Absolute paths and `":memory:"` are returned unchanged.
    #[must_use]
    pub fn resolve(project_root: &Path, configured: &str) -> PathBuf {
        let path = Path::new(configured);
        if configured == ":memory:" || path.is_absolute() {
            path.to_path_buf()
        } else {
            project_root.join(path)
        }
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("parrain").join("config.toml"))
    }
}
