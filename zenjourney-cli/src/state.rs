use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

pub fn zenjourney_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".zenjourney"))
}

pub fn ensure_zenjourney_home() -> Result<PathBuf> {
    let dir = zenjourney_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

/// Task file picked up when no --tasks is given and it exists in the cwd.
pub fn default_tasks_file() -> PathBuf {
    PathBuf::from("tasks.json")
}
