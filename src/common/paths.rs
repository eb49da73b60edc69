use anyhow::{Context, Result};
use std::path::PathBuf;

/// Get the yuki config directory (not created)
pub fn yuki_config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .context("Unable to determine user config directory")?
        .join("yuki");
    Ok(config_dir)
}

/// Default location of the config file
pub fn default_config_path() -> Result<PathBuf> {
    Ok(yuki_config_dir()?.join("config.toml"))
}
