use anyhow::Result;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

/// A scratch directory with a private `bin/` used as the whole `PATH`, so the
/// only package managers yuki can find are the fakes installed here.
pub struct TestEnvironment {
    temp_dir: TempDir,
}

impl TestEnvironment {
    /// Starts with an empty config file, which means all defaults.
    pub fn new() -> Result<Self> {
        let temp_dir = tempfile::tempdir()?;
        fs::create_dir_all(temp_dir.path().join("bin"))?;
        let env = Self { temp_dir };
        env.write_config("")?;
        Ok(env)
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn bin_dir(&self) -> PathBuf {
        self.path().join("bin")
    }

    /// Every invocation of a fake package manager is appended here.
    pub fn invocation_log(&self) -> PathBuf {
        self.path().join("invocations.log")
    }

    pub fn config_path(&self) -> PathBuf {
        self.path().join("config.toml")
    }

    pub fn write_config(&self, contents: &str) -> Result<()> {
        fs::write(self.config_path(), contents)?;
        Ok(())
    }

    pub fn remove_config(&self) -> Result<()> {
        fs::remove_file(self.config_path())?;
        Ok(())
    }

    pub fn write_manifest(&self, contents: &str) -> Result<PathBuf> {
        let path = self.path().join("manifest.yaml");
        fs::write(&path, contents)?;
        Ok(path)
    }

    /// Install a fake package manager that logs its arguments and fails for
    /// any package whose name starts with `bad`.
    pub fn install_fake_manager(&self, program: &str) -> Result<()> {
        let script = format!(
            r#"#!/bin/sh
echo "{program} $*" >> "{log}"
case "$2" in
  bad*)
    echo "cannot install $2" >&2
    exit 1
    ;;
esac
echo "installed $2"
"#,
            program = program,
            log = self.invocation_log().display()
        );
        let path = self.bin_dir().join(program);
        fs::write(&path, script)?;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))?;
        Ok(())
    }

    pub fn invocations(&self) -> Result<Vec<String>> {
        let log = self.invocation_log();
        if !log.exists() {
            return Ok(Vec::new());
        }
        Ok(fs::read_to_string(log)?
            .lines()
            .map(str::to_string)
            .collect())
    }

    pub fn run_yuki(&self, args: &[&str]) -> Result<CommandOutput> {
        let output = Command::new(env!("CARGO_BIN_EXE_yuki"))
            .arg("--no-color")
            .arg("--config")
            .arg(self.config_path())
            .args(args)
            .env("PATH", self.bin_dir())
            .env_remove("NO_COLOR")
            .output()?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code().unwrap_or(-1),
        })
    }
}

/// Lines of the summary section, in printed order.
pub fn summary_lines(stdout: &str) -> Vec<&str> {
    stdout
        .lines()
        .skip_while(|line| !line.contains("--- Apply Summary ---"))
        .skip(1)
        .filter(|line| line.contains(" - Status: "))
        .collect()
}
