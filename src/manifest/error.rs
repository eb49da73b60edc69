use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("manifest file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("failed to read manifest file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed manifest: {0}")]
    MalformedDocument(String),

    #[error("manifest must contain at least one package manager section")]
    EmptySections,

    #[error("package manager section at position {0} has an empty name")]
    EmptySectionName(usize),

    #[error("package in section '{section}' at index {index} is missing required 'name' field")]
    MissingPackageName { section: String, index: usize },
}

impl From<serde_yaml::Error> for ManifestError {
    fn from(err: serde_yaml::Error) -> Self {
        ManifestError::MalformedDocument(err.to_string())
    }
}
