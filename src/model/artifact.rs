//! Model artifact loading. The artifact is read once at startup and never mutated.

use super::{LogisticModel, ProbabilityModel};
use crate::error::ArtifactError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::path::Path;

/// On-disk artifact layout (exported from the training notebook).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArtifactFile {
    /// Top features, in the order the model consumes them
    pub features: Vec<String>,
    pub threshold: f64,
    pub model: LogisticParams,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogisticParams {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scaler: Option<ScalerParams>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScalerParams {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

#[derive(Debug)]
pub struct ModelArtifact {
    model: Box<dyn ProbabilityModel>,
    feature_order: Vec<String>,
    threshold: f64,
    fingerprint: Option<String>,
}

impl ModelArtifact {
    /// Assemble an artifact from an already-built model.
    pub fn new(
        model: Box<dyn ProbabilityModel>,
        feature_order: Vec<String>,
        threshold: f64,
    ) -> Result<Self, ArtifactError> {
        if feature_order.is_empty() {
            return Err(ArtifactError::schema("feature list is empty"));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = feature_order.iter().find(|f| !seen.insert(f.as_str())) {
            return Err(ArtifactError::schema(format!("feature {dup} listed twice")));
        }
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ArtifactError::schema(format!("threshold {threshold} outside [0, 1]")));
        }
        if let Some(dim) = model.input_dim() {
            if dim != feature_order.len() {
                return Err(ArtifactError::schema(format!(
                    "model takes {dim} inputs but {} features are listed",
                    feature_order.len()
                )));
            }
        }
        Ok(Self {
            model,
            feature_order,
            threshold,
            fingerprint: None,
        })
    }

    pub fn from_file(file: ArtifactFile) -> Result<Self, ArtifactError> {
        let scaler = file.model.scaler.map(|s| (s.mean, s.scale));
        let model = LogisticModel::new(file.model.intercept, file.model.coefficients, scaler)?;
        Self::new(Box::new(model), file.features, file.threshold)
    }

    pub fn from_slice(data: &[u8]) -> Result<Self, ArtifactError> {
        let file: ArtifactFile = serde_json::from_slice(data)?;
        let mut artifact = Self::from_file(file)?;
        artifact.fingerprint = Some(format!("{:x}", Sha256::digest(data)));
        Ok(artifact)
    }

    /// Read and validate the artifact file. Any failure is fatal to startup.
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let data = std::fs::read(path).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let artifact = Self::from_slice(&data)?;
        tracing::info!(
            path = %path.display(),
            backend = artifact.model.backend_type(),
            features = artifact.feature_order.len(),
            threshold = artifact.threshold,
            sha256 = artifact.fingerprint.as_deref().unwrap_or_default(),
            "model artifact loaded"
        );
        Ok(artifact)
    }

    pub fn model(&self) -> &dyn ProbabilityModel {
        self.model.as_ref()
    }

    pub fn feature_order(&self) -> &[String] {
        &self.feature_order
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// SHA-256 of the artifact bytes, when loaded from bytes.
    pub fn fingerprint(&self) -> Option<&str> {
        self.fingerprint.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"{
        "features": ["TENSE", "P_STRESS"],
        "threshold": 0.4,
        "model": { "intercept": -1.0, "coefficients": [0.5, 0.1],
                   "scaler": { "mean": [1.5, 12.0], "scale": [0.5, 3.0] } }
    }"#;

    #[test]
    fn parses_valid_artifact() {
        let a = ModelArtifact::from_slice(VALID.as_bytes()).unwrap();
        assert_eq!(a.feature_order(), ["TENSE", "P_STRESS"]);
        assert_eq!(a.threshold(), 0.4);
        assert_eq!(a.fingerprint().map(str::len), Some(64));
    }

    #[test]
    fn schema_violations_rejected() {
        let dup = VALID.replace("\"P_STRESS\"]", "\"TENSE\"]");
        assert!(matches!(
            ModelArtifact::from_slice(dup.as_bytes()),
            Err(ArtifactError::Schema { .. })
        ));
        let bad_threshold = VALID.replace("0.4", "1.4");
        assert!(matches!(
            ModelArtifact::from_slice(bad_threshold.as_bytes()),
            Err(ArtifactError::Schema { .. })
        ));
        let short = VALID.replace("[0.5, 0.1]", "[0.5]");
        assert!(ModelArtifact::from_slice(short.as_bytes()).is_err());
        assert!(matches!(
            ModelArtifact::from_slice(b"{ not json"),
            Err(ArtifactError::Parse(_))
        ));
    }
}
