//! Depression risk classifier for post-menopausal women.
//!
//! Modular structure:
//! - [`answers`] — Questionnaire wire record and label normalization
//! - [`features`] — Derived features and model-ordered feature vectors
//! - [`model`] — Model artifact loading and logistic-regression scoring
//! - [`risk`] — Threshold decision and caller-facing report
//! - [`classifier`] — End-to-end pipeline over a shared artifact
//! - [`logging`] — Structured logging and ndjson result lines

pub mod config;
pub mod error;
pub mod answers;
pub mod features;
pub mod model;
pub mod risk;
pub mod classifier;
pub mod logging;

pub use config::AppConfig;
pub use error::{ArtifactError, ClassifyError, ErrorKind};
pub use answers::{normalize, RawAnswerSet};
pub use features::{assemble, FeatureVector, FeaturePipeline};
pub use model::{ModelArtifact, ProbabilityModel};
pub use risk::{RiskEngine, RiskLabel, RiskReport};
pub use classifier::Classifier;
pub use logging::StructuredLogger;
