//! `.parrain/write.lock`: one mutating `parrain` process per project.
//!
//! The lock file records which subcommand holds it, so a blocked command can
//! say what it is waiting on. `serve` keeps the lock for as long as it runs;
//! commands that meet a running server fail at once instead of waiting.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Context;
use parrain_config::PROJECT_DIR;
use serde::{Deserialize, Serialize};

const LOCK_FILE: &str = "write.lock";
const LOCK_WAIT_TIMEOUT: Duration = Duration::from_secs(30);
const LOCK_RETRY_DELAY: Duration = Duration::from_millis(250);
const LONG_RUNNING: &str = "serve";

/// Contents of the lock file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct LockHolder {
    pid: u32,
    command: String,
}

#[derive(Debug)]
pub struct WriteLockGuard {
    path: PathBuf,
}

impl Drop for WriteLockGuard {
    fn drop(&mut self) {
        if let Err(error) = std::fs::remove_file(&self.path) {
            tracing::warn!(%error, path = %self.path.display(), "failed to release write lock");
        }
    }
}

#[derive(Debug)]
enum Attempt {
    Acquired(WriteLockGuard),
    Held(LockHolder),
    Stale(LockHolder),
    /// Exists but cannot be parsed yet (possibly mid-write by its creator).
    Unreadable,
}

/// Take the project write lock on behalf of `parrain <command>`.
pub async fn acquire_for_project(
    project_root: &Path,
    command: &str,
) -> anyhow::Result<WriteLockGuard> {
    let lock_path = project_root.join(PROJECT_DIR).join(LOCK_FILE);
    let started = Instant::now();

    loop {
        match try_acquire(&lock_path, command)? {
            Attempt::Acquired(guard) => return Ok(guard),
            Attempt::Held(holder) if holder.command == LONG_RUNNING => {
                anyhow::bail!(
                    "`parrain serve` (pid {}) owns this project; \
                     stop it or use its HTTP API instead of `parrain {command}`",
                    holder.pid
                );
            }
            Attempt::Held(holder) => {
                if started.elapsed() >= LOCK_WAIT_TIMEOUT {
                    anyhow::bail!(
                        "`parrain {}` (pid {}) is still writing to this project; \
                         try again after it finishes",
                        holder.command,
                        holder.pid
                    );
                }
                tracing::debug!(
                    holder = %holder.command,
                    pid = holder.pid,
                    "waiting for write lock"
                );
                tokio::time::sleep(LOCK_RETRY_DELAY).await;
            }
            Attempt::Stale(holder) => {
                tracing::warn!(
                    holder = %holder.command,
                    pid = holder.pid,
                    "removing write lock left by a dead process"
                );
                remove_if_present(&lock_path)?;
            }
            Attempt::Unreadable => {
                if started.elapsed() >= LOCK_WAIT_TIMEOUT {
                    anyhow::bail!(
                        "unreadable write lock at {}; remove it if no parrain process is running",
                        lock_path.display()
                    );
                }
                tokio::time::sleep(LOCK_RETRY_DELAY).await;
            }
        }
    }
}

fn try_acquire(lock_path: &Path, command: &str) -> anyhow::Result<Attempt> {
    let created = OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(lock_path);

    match created {
        Ok(mut file) => {
            let guard = WriteLockGuard {
                path: lock_path.to_path_buf(),
            };
            let holder = LockHolder {
                pid: std::process::id(),
                command: command.to_string(),
            };
            serde_json::to_writer(&mut file, &holder)?;
            file.flush()
                .with_context(|| format!("failed to write {}", lock_path.display()))?;
            Ok(Attempt::Acquired(guard))
        }
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(read_holder(lock_path)),
        Err(e) => {
            Err(e).with_context(|| format!("failed to create write lock {}", lock_path.display()))
        }
    }
}

fn read_holder(lock_path: &Path) -> Attempt {
    let Ok(text) = std::fs::read_to_string(lock_path) else {
        return Attempt::Unreadable;
    };
    match serde_json::from_str::<LockHolder>(&text) {
        Ok(holder) if is_process_running(holder.pid) => Attempt::Held(holder),
        Ok(holder) => Attempt::Stale(holder),
        Err(_) => Attempt::Unreadable,
    }
}

fn remove_if_present(path: &Path) -> anyhow::Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("failed to remove {}", path.display())),
    }
}

fn is_process_running(pid: u32) -> bool {
    std::process::Command::new("kill")
        .arg("-0")
        .arg(pid.to_string())
        .stderr(std::process::Stdio::null())
        .status()
        .is_ok_and(|status| status.success())
}
