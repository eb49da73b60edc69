//! User configuration.
//!
//! Stored as TOML, by default in `<config dir>/yuki/config.toml`. Every field
//! has a default, so a missing file or a partial file is fine.
//!
//! ```toml
//! failure_threshold = 3
//!
//! [executables]
//! scoop = "scoop"
//! chocolatey = "choco"
//! ```

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::engine::DEFAULT_FAILURE_THRESHOLD;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Consecutive failures per section before the rest is skipped
    pub failure_threshold: u32,
    pub executables: Executables,
}

/// Program names (or paths) of the package manager executables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Executables {
    pub scoop: String,
    pub chocolatey: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            failure_threshold: DEFAULT_FAILURE_THRESHOLD,
            executables: Executables::default(),
        }
    }
}

impl Default for Executables {
    fn default() -> Self {
        Self {
            scoop: "scoop".to_string(),
            chocolatey: "choco".to_string(),
        }
    }
}

impl Config {
    /// Load from `path`; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        Self::from_toml(&contents).with_context(|| format!("loading config {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).context("parsing config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.failure_threshold < 1 {
            bail!("failure_threshold must be at least 1");
        }
        if self.executables.scoop.trim().is_empty() || self.executables.chocolatey.trim().is_empty()
        {
            bail!("executable names must not be empty");
        }
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("serializing config")
    }
}
