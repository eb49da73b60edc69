use super::PackageBackend;

/// Chocolatey: `choco install <name> -y --no-progress [--version <version>]`.
#[derive(Debug, Clone)]
pub struct Chocolatey {
    executable: String,
}

impl Chocolatey {
    pub fn new() -> Self {
        Self::with_executable("choco")
    }

    pub fn with_executable(executable: &str) -> Self {
        Self {
            executable: executable.to_string(),
        }
    }
}

impl Default for Chocolatey {
    fn default() -> Self {
        Self::new()
    }
}

impl PackageBackend for Chocolatey {
    fn display_name(&self) -> &str {
        "Chocolatey"
    }

    fn executable(&self) -> &str {
        &self.executable
    }

    fn build_invocation(&self, name: &str, version: Option<&str>) -> Vec<String> {
        let mut args: Vec<String> = ["install", name, "-y", "--no-progress"]
            .into_iter()
            .map(str::to_string)
            .collect();
        if let Some(version) = version.filter(|v| !v.is_empty()) {
            args.push("--version".to_string());
            args.push(version.to_string());
        }
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_invocation_with_version() {
        let args = Chocolatey::new().build_invocation("vlc", Some("1.2.3"));
        assert_eq!(
            args,
            vec!["install", "vlc", "-y", "--no-progress", "--version", "1.2.3"]
        );
    }

    #[test]
    fn test_build_invocation_without_version() {
        let choco = Chocolatey::new();
        let expected = vec!["install", "vlc", "-y", "--no-progress"];
        assert_eq!(choco.build_invocation("vlc", None), expected);
        assert_eq!(choco.build_invocation("vlc", Some("")), expected);
    }

    #[test]
    fn test_default_executable() {
        assert_eq!(Chocolatey::default().executable(), "choco");
    }
}
