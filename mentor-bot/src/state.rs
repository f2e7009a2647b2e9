use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

pub fn mentor_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".mentor"))
}

pub fn ensure_mentor_home() -> Result<PathBuf> {
    let dir = mentor_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn default_store_path() -> Result<PathBuf> {
    Ok(ensure_mentor_home()?.join("store.json"))
}
