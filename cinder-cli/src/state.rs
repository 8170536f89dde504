use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$CINDER_HOME`, or `~/.cinder`.
pub fn cinder_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("CINDER_HOME") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".cinder"))
}

pub fn ensure_cinder_home() -> Result<PathBuf> {
    let dir = cinder_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

/// Roster used when `--file` is omitted.
pub fn default_roster_path() -> PathBuf {
    // Prefer the bundled roster when running from the workspace
    PathBuf::from("data").join("employees.json")
}

/// Activity log used when `--csv` is omitted.
pub fn default_activity_log_path() -> PathBuf {
    PathBuf::from("data").join("activity_log.csv")
}
