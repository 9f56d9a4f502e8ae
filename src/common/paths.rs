use anyhow::{Context, Result};
use std::path::PathBuf;

/// Get the userdir config directory, creating it if needed
pub fn userdir_config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .context("Unable to determine user config directory")?
        .join("userdir");

    std::fs::create_dir_all(&config_dir)
        .with_context(|| format!("creating config directory at {}", config_dir.display()))?;

    Ok(config_dir)
}

/// Path of a file inside the userdir config directory
pub fn config_file(name: &str) -> Result<PathBuf> {
    Ok(userdir_config_dir()?.join(name))
}
