//! Common error types for WQC

use std::path::PathBuf;
use thiserror::Error;

/// Common result type for WQC operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across WQC crates
#[derive(Error, Debug)]
pub enum Error {
    /// Artifact file does not exist at the expected path
    #[error("Artifact not found: {artifact} ({})", .path.display())]
    ArtifactNotFound { artifact: String, path: PathBuf },

    /// Artifact file exists but cannot be turned into a usable model object
    #[error("Artifact corrupt: {artifact} ({}): {reason}", .path.display())]
    ArtifactCorrupt {
        artifact: String,
        path: PathBuf,
        reason: String,
    },

    /// Scaling or regression failed for a single submission
    #[error("Prediction error: {0}")]
    Prediction(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Name of the artifact involved, if this is a startup artifact failure
    pub fn artifact(&self) -> Option<&str> {
        match self {
            Error::ArtifactNotFound { artifact, .. } | Error::ArtifactCorrupt { artifact, .. } => {
                Some(artifact)
            }
            _ => None,
        }
    }
}
