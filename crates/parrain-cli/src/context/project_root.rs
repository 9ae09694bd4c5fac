use std::path::{Path, PathBuf};

use parrain_config::PROJECT_DIR;

/// Walk upwards from `start` until a `.parrain` directory is found.
#[must_use]
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(PROJECT_DIR).is_dir() {
            return Some(current);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Interpret a `--project` value: either the root itself or its `.parrain` directory.
pub fn explicit_project_root(path: &str) -> anyhow::Result<PathBuf> {
    let explicit = PathBuf::from(path);
    if explicit.file_name().is_some_and(|name| name == PROJECT_DIR) {
        return explicit
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| {
                anyhow::anyhow!("invalid --project path: '{PROJECT_DIR}' has no parent")
            });
    }
    if explicit.is_dir() {
        return Ok(explicit);
    }
    anyhow::bail!(
        "invalid --project '{}': directory does not exist",
        explicit.display()
    )
}
