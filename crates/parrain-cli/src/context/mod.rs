mod app_context;
mod project_root;

pub use app_context::AppContext;
pub use project_root::{explicit_project_root, find_project_root};

use std::path::Path;

use anyhow::Context;
use parrain_config::ParrainConfig;

/// Load `.env` from the project root (falling back to the current directory),
/// then the layered config for that root.
pub fn load_config(project_root: &Path) -> anyhow::Result<ParrainConfig> {
    let env_path = project_root.join(".env");
    if env_path.exists() {
        dotenvy::from_path(&env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
    } else {
        dotenvy::dotenv().ok();
    }

    ParrainConfig::load_for_project(project_root).context("failed to load parrain configuration")
}
