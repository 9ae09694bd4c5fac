use std::path::PathBuf;

use anyhow::Context;
use parrain_config::ParrainConfig;
use parrain_core::CohortRegistry;
use parrain_db::service::ParrainService;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: ParrainService,
    pub config: ParrainConfig,
    pub registry: CohortRegistry,
    pub project_root: PathBuf,
}

impl AppContext {
    /// Open the project database and validate the sponsorship rules.
    ///
    /// Cohorts named by the registry but missing from the store are seeded, so
    /// a rule set extended in config takes effect without a re-init.
    pub async fn init(project_root: PathBuf, config: ParrainConfig) -> anyhow::Result<Self> {
        let registry = config
            .sponsorship
            .registry()
            .context("invalid [sponsorship] configuration")?;

        let db_path = ParrainConfig::resolve(&project_root, &config.database.path);
        let service = ParrainService::new_local(&db_path.to_string_lossy())
            .await
            .with_context(|| format!("failed to open database at {}", db_path.display()))?;
        service
            .seed_cohorts(registry.cohorts())
            .await
            .context("failed to seed cohorts")?;

        Ok(Self {
            service,
            config,
            registry,
            project_root,
        })
    }

    /// Resolve a path from config against the project root.
    #[must_use]
    pub fn resolve(&self, configured: &str) -> PathBuf {
        ParrainConfig::resolve(&self.project_root, configured)
    }
}
