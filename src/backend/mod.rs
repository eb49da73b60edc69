//! Package manager backends.
//!
//! - [`PackageBackend`]: probe / build invocation / execute contract
//! - [`Scoop`] and [`Chocolatey`]: the wired-up package managers
//! - [`Registry`]: looks up the backend for a manifest section name, falling
//!   back to [`Dispatch::Unimplemented`] for names nothing handles

mod chocolatey;
mod process;
mod scoop;

use std::collections::HashMap;

pub use chocolatey::Chocolatey;
pub use process::{InstallError, command_line};
use process::{resolve_executable, run_captured};
pub use scoop::Scoop;

use crate::common::config::Config;

pub trait PackageBackend {
    /// Human-readable name used in log lines and skip messages.
    fn display_name(&self) -> &str;

    /// Program name or path that gets spawned.
    fn executable(&self) -> &str;

    /// Whether the executable can be found on `PATH`.
    fn probe(&self) -> bool {
        resolve_executable(self.executable()).is_ok()
    }

    /// Arguments for installing `name`, pinned to `version` when given.
    fn build_invocation(&self, name: &str, version: Option<&str>) -> Vec<String>;

    /// Spawn the executable with `args` and wait for it. The program is
    /// resolved through `PATH` the same way [`probe`](Self::probe) finds it.
    fn execute(&self, args: &[String]) -> Result<String, InstallError> {
        let program = resolve_executable(self.executable())?;
        run_captured(&program, args)
    }
}

/// What a manifest section name resolves to.
pub enum Dispatch<'a> {
    Installer(&'a dyn PackageBackend),
    /// No backend is wired up for this name; packages are reported, not installed.
    Unimplemented,
}

/// The known backends keyed by manifest section name.
pub struct Registry {
    backends: HashMap<String, Box<dyn PackageBackend>>,
}

impl Registry {
    pub fn empty() -> Self {
        Self {
            backends: HashMap::new(),
        }
    }

    /// Scoop and Chocolatey, using the executables from `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::empty()
            .with_backend(
                "scoop",
                Box::new(Scoop::with_executable(&config.executables.scoop)),
            )
            .with_backend(
                "chocolatey",
                Box::new(Chocolatey::with_executable(&config.executables.chocolatey)),
            )
    }

    pub fn with_backend(mut self, name: &str, backend: Box<dyn PackageBackend>) -> Self {
        self.backends.insert(name.to_string(), backend);
        self
    }

    pub fn lookup(&self, section_name: &str) -> Dispatch<'_> {
        match self.backends.get(section_name) {
            Some(backend) => Dispatch::Installer(backend.as_ref()),
            None => Dispatch::Unimplemented,
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
