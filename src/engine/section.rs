//! Running one manifest section through its backend.

use serde_json::json;

use super::ApplyOptions;
use super::breaker::{CircuitBreakerState, Gate};
use super::outcome::ExecutionOutcome;
use crate::backend::{PackageBackend, command_line};
use crate::common::progress::create_spinner;
use crate::manifest::{Package, Section};
use crate::ui::prelude::*;

pub const ALREADY_TRIPPED_MESSAGE: &str = "previous consecutive failures limit reached";
pub const TRIPPED_MESSAGE: &str = "consecutive failure limit reached";

pub fn unavailable_message(backend: &dyn PackageBackend) -> String {
    format!(
        "{} not installed or not found in search path",
        backend.display_name()
    )
}

fn announce_section(section: &Section) {
    emit(
        Level::Info,
        "section.start",
        &format!("Processing {} packages...", section.backend_name),
        Some(json!({
            "section": section.backend_name,
            "packages": section.packages.len(),
        })),
    );
}

/// Install every package of `section` with `backend`, in order.
///
/// A backend that fails the probe skips the whole section without touching
/// the breaker. Otherwise each package goes through [`install_step`] with a
/// breaker state that lives only for this call.
pub fn run_section(
    section: &Section,
    backend: &dyn PackageBackend,
    options: &ApplyOptions,
) -> Vec<ExecutionOutcome> {
    if section.packages.is_empty() {
        return Vec::new();
    }

    announce_section(section);

    if !backend.probe() {
        let message = unavailable_message(backend);
        emit(
            Level::Warn,
            "section.unavailable",
            &format!(
                "{}. Skipping {} packages.",
                message, section.backend_name
            ),
            None,
        );
        return section
            .packages
            .iter()
            .map(|pkg| ExecutionOutcome::skipped(&pkg.name, &section.backend_name, &message))
            .collect();
    }

    if options.dry_run {
        return section
            .packages
            .iter()
            .map(|pkg| dry_run_step(pkg, &section.backend_name, backend))
            .collect();
    }

    let mut state = CircuitBreakerState::new();
    let mut outcomes = Vec::with_capacity(section.packages.len());
    for package in &section.packages {
        let (outcome, next) = install_step(
            package,
            &section.backend_name,
            backend,
            state,
            options.failure_threshold,
        );
        outcomes.push(outcome);
        state = next;
    }
    outcomes
}

/// Handle one package: consult the breaker, maybe install, return the
/// outcome together with the breaker state for the next package.
pub fn install_step(
    package: &Package,
    section_name: &str,
    backend: &dyn PackageBackend,
    state: CircuitBreakerState,
    threshold: u32,
) -> (ExecutionOutcome, CircuitBreakerState) {
    let (gate, state) = state.gate(threshold);

    match gate {
        Gate::AlreadyTripped => {
            emit(
                Level::Info,
                "package.skipped",
                &format!(
                    "   Skipping {} package {} due to previous consecutive failures.",
                    backend.display_name(),
                    package.name
                ),
                None,
            );
            (
                ExecutionOutcome::skipped(&package.name, section_name, ALREADY_TRIPPED_MESSAGE),
                state,
            )
        }
        Gate::Trip => {
            emit(
                Level::Warn,
                "breaker.tripped",
                &format!(
                    "   Reached {} consecutive {} installation failures. Skipping remaining {} packages for this run.",
                    threshold,
                    backend.display_name(),
                    backend.display_name()
                ),
                Some(json!({ "section": section_name, "threshold": threshold })),
            );
            emit(
                Level::Info,
                "package.skipped",
                &format!(
                    "   Skipping {} package {} due to previous consecutive failures.",
                    backend.display_name(),
                    package.name
                ),
                None,
            );
            (
                ExecutionOutcome::skipped(&package.name, section_name, TRIPPED_MESSAGE),
                state,
            )
        }
        Gate::Attempt => attempt(package, section_name, backend, state),
    }
}

fn attempt(
    package: &Package,
    section_name: &str,
    backend: &dyn PackageBackend,
    state: CircuitBreakerState,
) -> (ExecutionOutcome, CircuitBreakerState) {
    let args = backend.build_invocation(&package.name, package.version());

    emit(
        Level::Info,
        "package.install",
        &format!(
            "  Attempting to install {} package: {} (Version: {}) using {}...",
            section_name,
            package.name,
            package.version().unwrap_or("latest"),
            backend.executable()
        ),
        Some(json!({ "package": package.name, "args": args })),
    );

    let spinner = create_spinner(format!("Installing {}...", package.name));
    let result = backend.execute(&args);
    spinner.finish_and_clear();

    match result {
        Ok(output) => {
            emit(
                Level::Success,
                "package.success",
                &format!("    SUCCESS installing {}.", package.name),
                None,
            );
            if !output.is_empty() {
                emit(
                    Level::Debug,
                    "package.output",
                    &format!("      {} Output: {}", backend.display_name(), output),
                    None,
                );
            }
            (
                ExecutionOutcome::success(&package.name, section_name),
                state.record_success(),
            )
        }
        Err(err) => {
            emit(
                Level::Error,
                "package.failure",
                &format!("    ERROR installing {}: {}", package.name, err),
                None,
            );
            let state = state.record_failure();
            emit(
                Level::Debug,
                "breaker.count",
                &format!(
                    "      {} consecutive failure(s) in {}",
                    state.consecutive_failures(),
                    section_name
                ),
                None,
            );
            (
                ExecutionOutcome::failure(&package.name, section_name, err.to_string()),
                state,
            )
        }
    }
}

fn dry_run_step(
    package: &Package,
    section_name: &str,
    backend: &dyn PackageBackend,
) -> ExecutionOutcome {
    let args = backend.build_invocation(&package.name, package.version());
    let message = format!("Would run: {}", command_line(backend.executable(), &args));
    emit(
        Level::Info,
        "package.dry_run",
        &format!("  - {}", message),
        None,
    );
    ExecutionOutcome::info(&package.name, section_name, message)
}

/// Packages of a section no backend is wired up for. Nothing is spawned.
pub fn run_unimplemented(section: &Section) -> Vec<ExecutionOutcome> {
    if section.packages.is_empty() {
        return Vec::new();
    }

    announce_section(section);

    section
        .packages
        .iter()
        .map(|pkg| {
            let version_msg = match pkg.version() {
                Some(version) => format!("Version: {}", version),
                None => "(latest)".to_string(),
            };
            emit(
                Level::Info,
                "package.unimplemented",
                &format!(
                    "  - Would process {} package: {} {}",
                    section.backend_name, pkg.name, version_msg
                ),
                None,
            );
            ExecutionOutcome::info(
                &pkg.name,
                &section.backend_name,
                format!(
                    "Processing not yet implemented for this package manager. {}",
                    version_msg
                ),
            )
        })
        .collect()
}
