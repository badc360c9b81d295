//! Report error types

use std::fmt;
use std::path::PathBuf;

/// Errors that can occur while building or writing a report
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Malformed result for provider {provider}: {reason}")]
    MalformedResult { provider: String, reason: String },

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Render error: {0}")]
    Render(String),
}

impl ReportError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReportError::Io {
            path: path.into(),
            source,
        }
    }
}

/// The two artifacts written per run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    Json,
    Html,
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Artifact::Json => f.write_str("JSON"),
            Artifact::Html => f.write_str("HTML"),
        }
    }
}

/// Failure to produce one artifact
#[derive(Debug, thiserror::Error)]
#[error("{artifact} report {}: {source}", path.display())]
pub struct ArtifactError {
    pub artifact: Artifact,
    pub path: PathBuf,
    #[source]
    pub source: ReportError,
}

/// Every artifact that could not be written in one emission
#[derive(Debug)]
pub struct EmitError {
    pub failures: Vec<ArtifactError>,
}

impl EmitError {
    /// Whether the given artifact is among the failures
    pub fn failed(&self, artifact: Artifact) -> bool {
        self.failures.iter().any(|f| f.artifact == artifact)
    }
}

impl fmt::Display for EmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to write {} report artifact(s)", self.failures.len())?;
        for failure in &self.failures {
            write!(f, "; {}", failure)?;
        }
        Ok(())
    }
}

impl std::error::Error for EmitError {}
