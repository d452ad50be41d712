//! Applies the artifact's scoring function and decision threshold to a feature vector.

use crate::error::ClassifyResult;
use crate::features::FeatureVector;
use crate::model::{ModelArtifact, ScoringError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLabel {
    NotAtRisk,
    AtRisk,
}

impl RiskLabel {
    /// Inclusive on the high side: `probability == threshold` is at risk.
    pub fn from_probability(probability: f64, threshold: f64) -> Self {
        if probability >= threshold {
            RiskLabel::AtRisk
        } else {
            RiskLabel::NotAtRisk
        }
    }

    pub fn value(self) -> u8 {
        match self {
            RiskLabel::NotAtRisk => 0,
            RiskLabel::AtRisk => 1,
        }
    }

    pub fn verdict(self) -> &'static str {
        match self {
            RiskLabel::NotAtRisk => "not at high risk for depression",
            RiskLabel::AtRisk => "at risk for depression",
        }
    }
}

/// Probability and label for one respondent, plus the threshold used.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub probability: f64,
    pub label: RiskLabel,
    pub threshold: f64,
}

/// Score `vector` with `artifact`. Scoring errors propagate; there is no default probability.
pub fn score(vector: &FeatureVector, artifact: &ModelArtifact) -> ClassifyResult<Prediction> {
    if vector.names.as_slice() != artifact.feature_order() {
        return Err(ScoringError::FeatureOrderMismatch {
            expected: artifact.feature_order().to_vec(),
            got: vector.names.clone(),
        }
        .into());
    }
    let probability = artifact.model().predict_probability(vector.as_slice())?;
    if probability.is_nan() {
        return Err(ScoringError::NonFiniteOutput.into());
    }
    if !(0.0..=1.0).contains(&probability) {
        return Err(ScoringError::OutOfRange(probability).into());
    }
    let threshold = artifact.threshold();
    Ok(Prediction {
        probability,
        label: RiskLabel::from_probability(probability, threshold),
        threshold,
    })
}

/// Scoring engine bound to one shared, read-only artifact.
#[derive(Debug, Clone)]
pub struct RiskEngine {
    artifact: Arc<ModelArtifact>,
}

impl RiskEngine {
    pub fn new(artifact: Arc<ModelArtifact>) -> Self {
        Self { artifact }
    }

    pub fn score(&self, vector: &FeatureVector) -> ClassifyResult<Prediction> {
        score(vector, &self.artifact)
    }

    pub fn artifact(&self) -> &ModelArtifact {
        &self.artifact
    }
}
