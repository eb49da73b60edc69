//! Spawning package manager executables and capturing their output.

use std::path::{Path, PathBuf};

use duct::cmd;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InstallError {
    #[error("{program} not found in search path: {source}")]
    NotFound {
        program: String,
        #[source]
        source: which::Error,
    },

    #[error("error running command '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("error running command '{command}': {status}. Output: {output}")]
    Failed {
        command: String,
        status: String,
        output: String,
    },
}

/// Join trimmed stdout and stderr; stderr is prefixed with `Stderr: `.
pub fn combine_output(stdout: &str, stderr: &str) -> String {
    let stdout = stdout.trim();
    let stderr = stderr.trim();

    let mut output = stdout.to_string();
    if !stderr.is_empty() {
        if !output.is_empty() {
            output.push('\n');
        }
        output.push_str("Stderr: ");
        output.push_str(stderr);
    }
    output
}

pub fn command_line(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Full path of `program` on `PATH`. On Windows this also finds `.cmd`
/// shims, which spawning the bare name would miss.
pub fn resolve_executable(program: &str) -> Result<PathBuf, InstallError> {
    which::which(program).map_err(|source| InstallError::NotFound {
        program: program.to_string(),
        source,
    })
}

/// Run `program` with `args`, blocking until it exits.
///
/// Returns the combined output on exit status 0.
pub fn run_captured(program: &Path, args: &[String]) -> Result<String, InstallError> {
    let command = command_line(&program.display().to_string(), args);

    let output = cmd(program, args)
        .stdout_capture()
        .stderr_capture()
        .unchecked()
        .run()
        .map_err(|source| InstallError::Spawn {
            command: command.clone(),
            source,
        })?;

    let combined = combine_output(
        &String::from_utf8_lossy(&output.stdout),
        &String::from_utf8_lossy(&output.stderr),
    );

    if !output.status.success() {
        return Err(InstallError::Failed {
            command,
            status: output.status.to_string(),
            output: combined,
        });
    }

    Ok(combined)
}
