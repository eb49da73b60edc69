use super::PackageBackend;

/// Scoop: `scoop install <name>[@<version>]`.
#[derive(Debug, Clone)]
pub struct Scoop {
    executable: String,
}

impl Scoop {
    pub fn new() -> Self {
        Self::with_executable("scoop")
    }

    pub fn with_executable(executable: &str) -> Self {
        Self {
            executable: executable.to_string(),
        }
    }

    /// The install command as a single string, before tokenizing.
    pub fn install_command(name: &str, version: Option<&str>) -> String {
        match version.filter(|v| !v.is_empty()) {
            Some(version) => format!("install {}@{}", name, version),
            None => format!("install {}", name),
        }
    }
}

impl Default for Scoop {
    fn default() -> Self {
        Self::new()
    }
}

impl PackageBackend for Scoop {
    fn display_name(&self) -> &str {
        "Scoop"
    }

    fn executable(&self) -> &str {
        &self.executable
    }

    fn build_invocation(&self, name: &str, version: Option<&str>) -> Vec<String> {
        Self::install_command(name, version)
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }
}
