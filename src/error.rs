//! Typed errors: per-request classification failures and startup artifact failures.

use crate::model::ScoringError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Coarse error category, stable across versions and safe to put on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidInput,
    MissingFeature,
    ScoringFailure,
    ArtifactLoadFailure,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::MissingFeature => "missing_feature",
            ErrorKind::ScoringFailure => "scoring_failure",
            ErrorKind::ArtifactLoadFailure => "artifact_load_failure",
        }
    }
}

/// Failure of a single classification request. Never affects the shared artifact.
#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    #[error("invalid input for {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("feature {name} expected by the model artifact cannot be derived")]
    MissingFeature { name: String },

    #[error("scoring failed: {source}")]
    ScoringFailure {
        #[from]
        source: ScoringError,
    },
}

impl ClassifyError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ClassifyError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ClassifyError::InvalidInput { .. } => ErrorKind::InvalidInput,
            ClassifyError::MissingFeature { .. } => ErrorKind::MissingFeature,
            ClassifyError::ScoringFailure { .. } => ErrorKind::ScoringFailure,
        }
    }
}

/// Model artifact could not be loaded. Fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("cannot read model artifact {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed model artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("model artifact schema violation: {reason}")]
    Schema { reason: String },
}

impl ArtifactError {
    pub fn schema(reason: impl Into<String>) -> Self {
        ArtifactError::Schema {
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        ErrorKind::ArtifactLoadFailure
    }
}

pub type ClassifyResult<T> = std::result::Result<T, ClassifyError>;
