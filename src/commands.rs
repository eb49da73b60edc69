//! Subcommand handlers.

use anyhow::{Context, Result, bail};
use serde_json::json;
use std::path::{Path, PathBuf};

use crate::backend::{Dispatch, Registry};
use crate::common::config::Config;
use crate::common::paths;
use crate::engine::{self, ApplyOptions};
use crate::manifest::Manifest;
use crate::ui::prelude::*;

fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => paths::default_config_path(),
    }
}

/// A missing file at the default location means defaults; a missing file
/// passed with `--config` is an error.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit.filter(|path| !path.exists()) {
        bail!("config file not found: {}", path.display());
    }

    let path = resolve_config_path(explicit)?;
    emit(
        Level::Debug,
        "config.path",
        &format!("Using config {}", path.display()),
        None,
    );
    Config::load_from(&path)
}

fn load_manifest(manifest_path: &Path) -> Result<Manifest> {
    emit(
        Level::Info,
        "manifest.load",
        &format!("Loading manifest: {}", manifest_path.display()),
        None,
    );
    let manifest = Manifest::load(manifest_path).context("failed to load manifest")?;
    Ok(manifest)
}

/// `yuki apply <manifest>`
pub fn handle_apply(manifest_path: &Path, dry_run: bool, config: &Config) -> Result<()> {
    let manifest = load_manifest(manifest_path)?;

    emit(
        Level::Info,
        "manifest.loaded",
        "Manifest loaded. Processing packages in manifest order...",
        Some(json!({
            "sections": manifest.sections.len(),
            "packages": manifest.package_count(),
            "dry_run": dry_run,
        })),
    );

    let registry = Registry::from_config(config);
    let options = ApplyOptions {
        failure_threshold: config.failure_threshold,
        dry_run,
    };

    let report = engine::aggregate(&manifest, &registry, &options);
    report.print_summary();

    emit(
        Level::Info,
        "apply.finished",
        "Finished processing manifest.",
        None,
    );
    Ok(())
}

/// `yuki validate <manifest>`
pub fn handle_validate(manifest_path: &Path, config: &Config) -> Result<()> {
    let manifest = load_manifest(manifest_path)?;
    let registry = Registry::from_config(config);

    for section in &manifest.sections {
        let handler = match registry.lookup(&section.backend_name) {
            Dispatch::Installer(backend) => format!("handled by {}", backend.display_name()),
            Dispatch::Unimplemented => "not implemented, reported only".to_string(),
        };
        emit(
            Level::Info,
            "validate.section",
            &format!(
                "  {}: {} package{} ({})",
                section.backend_name,
                section.packages.len(),
                if section.packages.len() == 1 { "" } else { "s" },
                handler
            ),
            serde_json::to_value(section).ok(),
        );
    }

    emit(
        Level::Success,
        "validate.ok",
        &format!(
            "Manifest is valid: {} section{}, {} package{}.",
            manifest.sections.len(),
            if manifest.sections.len() == 1 { "" } else { "s" },
            manifest.package_count(),
            if manifest.package_count() == 1 { "" } else { "s" },
        ),
        None,
    );
    Ok(())
}

/// `yuki config path`
pub fn handle_config_path(explicit: Option<&Path>) -> Result<()> {
    let path = resolve_config_path(explicit)?;
    emit(
        Level::Info,
        "config.path",
        &path.display().to_string(),
        Some(json!({ "exists": path.exists() })),
    );
    Ok(())
}

/// `yuki config show`
pub fn handle_config_show(config: &Config) -> Result<()> {
    match get_output_format() {
        OutputFormat::Text => print!("{}", config.to_toml()?),
        OutputFormat::Json => emit(
            Level::Info,
            "config.show",
            "Effective configuration",
            serde_json::to_value(config).ok(),
        ),
    }
    Ok(())
}
