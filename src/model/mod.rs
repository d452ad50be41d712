//! Trained model artifact: scoring function, expected feature order, decision threshold.

mod artifact;
mod logistic;

pub use artifact::{ArtifactFile, LogisticParams, ModelArtifact, ScalerParams};
pub use logistic::{sigmoid, LogisticModel};

use std::fmt::Debug;

/// Failure inside a model's scoring function.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringError {
    #[error("expected {expected} features, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("feature at position {index} is not finite")]
    NonFiniteInput { index: usize },

    #[error("model produced a non-finite probability")]
    NonFiniteOutput,

    #[error("probability {0} outside [0, 1]")]
    OutOfRange(f64),

    #[error("feature order {got:?} does not match the model's {expected:?}")]
    FeatureOrderMismatch { expected: Vec<String>, got: Vec<String> },

    #[error("model backend error: {0}")]
    Backend(String),
}

/// Opaque scoring function: ordered feature values -> probability of the positive class.
pub trait ProbabilityModel: Debug + Send + Sync {
    fn predict_probability(&self, features: &[f64]) -> Result<f64, ScoringError>;

    /// Number of inputs the model expects, when known.
    fn input_dim(&self) -> Option<usize> {
        None
    }

    fn backend_type(&self) -> &str;
}
