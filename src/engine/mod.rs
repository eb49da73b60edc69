//! Manifest execution.
//!
//! Sections run one after another in manifest order and packages one after
//! another in list order; installers are never run concurrently. Every
//! package produces exactly one [`outcome::ExecutionOutcome`].

mod breaker;
mod outcome;
mod section;
mod summary;

pub use breaker::DEFAULT_FAILURE_THRESHOLD;
pub use summary::ApplyReport;

use section::{run_section, run_unimplemented};

use crate::backend::{Dispatch, Registry};
use crate::manifest::Manifest;

#[derive(Debug, Clone)]
pub struct ApplyOptions {
    /// Consecutive failures after which the rest of a section is skipped.
    pub failure_threshold: u32,
    /// Probe backends and report invocations without running them.
    pub dry_run: bool,
}

impl Default for ApplyOptions {
    fn default() -> Self {
        Self {
            failure_threshold: DEFAULT_FAILURE_THRESHOLD,
            dry_run: false,
        }
    }
}

/// Run every section of `manifest` and collect the outcomes in order.
pub fn aggregate(manifest: &Manifest, registry: &Registry, options: &ApplyOptions) -> ApplyReport {
    let mut outcomes = Vec::with_capacity(manifest.package_count());

    for section in &manifest.sections {
        let section_outcomes = match registry.lookup(&section.backend_name) {
            Dispatch::Installer(backend) => run_section(section, backend, options),
            Dispatch::Unimplemented => run_unimplemented(section),
        };
        outcomes.extend(section_outcomes);
    }

    ApplyReport::new(outcomes)
}
