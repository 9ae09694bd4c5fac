use std::path::{Path, PathBuf};

use anyhow::Context;
use parrain_config::{PROJECT_DIR, ParrainConfig};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::InitArgs;
use crate::context::{self, AppContext, explicit_project_root};
use crate::output::output;
use crate::write_lock;

const CONFIG_FILE: &str = "config.toml";
const DATA_DIR: &str = "data";

#[derive(Debug, Serialize)]
struct InitResponse {
    project_root: PathBuf,
    database: PathBuf,
    cohorts: Vec<String>,
    config_written: bool,
    database_removed: bool,
}

/// Handle `parrain init`.
pub async fn handle(args: &InitArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let root = match flags.project.as_deref() {
        Some(path) => explicit_project_root(path)?,
        None => std::env::current_dir().context("failed to read current directory")?,
    };
    let response = initialize(&root, args.force).await?;
    output(&response, flags.format)
}

async fn initialize(root: &Path, force: bool) -> anyhow::Result<InitResponse> {
    let project_dir = root.join(PROJECT_DIR);
    std::fs::create_dir_all(project_dir.join(DATA_DIR))
        .with_context(|| format!("failed to create {}", project_dir.display()))?;
    let _lock = write_lock::acquire_for_project(root, "init").await?;

    let config_path = project_dir.join(CONFIG_FILE);
    let config_written = !config_path.exists();
    if config_written {
        let text = toml::to_string_pretty(&ParrainConfig::default())
            .context("failed to serialize default configuration")?;
        std::fs::write(&config_path, text)
            .with_context(|| format!("failed to write {}", config_path.display()))?;
    }

    let config = context::load_config(root)?;
    let database = ParrainConfig::resolve(root, &config.database.path);
    let database_removed = force && remove_database(&database)?;

    let ctx = AppContext::init(root.to_path_buf(), config)
        .await
        .context("failed to initialize the parrain database")?;
    let cohorts = ctx
        .service
        .list_cohorts()
        .await?
        .into_iter()
        .map(|cohort| cohort.code.to_string())
        .collect();

    tracing::info!(root = %root.display(), database_removed, "initialized project");
    Ok(InitResponse {
        project_root: root.to_path_buf(),
        database,
        cohorts,
        config_written,
        database_removed,
    })
}

/// Delete the database file and its WAL sidecars. Returns whether the main
/// file existed.
fn remove_database(path: &Path) -> anyhow::Result<bool> {
    if !path.is_file() {
        return Ok(false);
    }
    std::fs::remove_file(path)
        .with_context(|| format!("failed to remove {}", path.display()))?;
    for suffix in ["-wal", "-shm"] {
        let mut sidecar = path.as_os_str().to_owned();
        sidecar.push(suffix);
        let sidecar = PathBuf::from(sidecar);
        match std::fs::remove_file(&sidecar) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(e).with_context(|| format!("failed to remove {}", sidecar.display()));
            }
        }
    }
    Ok(true)
}
