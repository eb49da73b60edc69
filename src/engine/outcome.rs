use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Success,
    Failure,
    Skipped,
    Info,
}

impl Status {
    pub const ALL: [Status; 4] = [Status::Success, Status::Failure, Status::Skipped, Status::Info];

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Success => "SUCCESS",
            Status::Failure => "FAILURE",
            Status::Skipped => "SKIPPED",
            Status::Info => "INFO",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The result of handling one package. Built once, never modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionOutcome {
    package_name: String,
    backend_name: String,
    status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl ExecutionOutcome {
    pub fn new(
        package_name: &str,
        backend_name: &str,
        status: Status,
        message: Option<String>,
    ) -> Self {
        Self {
            package_name: package_name.to_string(),
            backend_name: backend_name.to_string(),
            status,
            message: message.filter(|m| !m.is_empty()),
        }
    }

    pub fn success(package_name: &str, backend_name: &str) -> Self {
        Self::new(package_name, backend_name, Status::Success, None)
    }

    pub fn failure(package_name: &str, backend_name: &str, message: impl Into<String>) -> Self {
        Self::new(package_name, backend_name, Status::Failure, Some(message.into()))
    }

    pub fn skipped(package_name: &str, backend_name: &str, message: impl Into<String>) -> Self {
        Self::new(package_name, backend_name, Status::Skipped, Some(message.into()))
    }

    pub fn info(package_name: &str, backend_name: &str, message: impl Into<String>) -> Self {
        Self::new(package_name, backend_name, Status::Info, Some(message.into()))
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn backend_name(&self) -> &str {
        &self.backend_name
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl fmt::Display for ExecutionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) - Status: {}",
            self.package_name(),
            self.backend_name(),
            self.status()
        )?;
        if let Some(message) = self.message() {
            write!(f, " - Message: {}", message)?;
        }
        Ok(())
    }
}
