use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

pub fn moodchat_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".moodchat"))
}

pub fn ensure_moodchat_home() -> Result<PathBuf> {
    let dir = moodchat_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn events_dir() -> Result<PathBuf> {
    Ok(ensure_moodchat_home()?.join("events"))
}

pub fn alerts_dir() -> Result<PathBuf> {
    Ok(ensure_moodchat_home()?.join("alerts"))
}
