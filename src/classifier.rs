//! End-to-end classification: raw answers -> feature vector -> prediction.
//! One `Classifier` is built at startup and shared; each call owns its own vectors.

use crate::answers::RawAnswerSet;
use crate::config::AnswersConfig;
use crate::error::ClassifyResult;
use crate::features::{FeaturePipeline, FeatureVector};
use crate::model::ModelArtifact;
use crate::risk::{Prediction, RiskEngine, RiskReport};
use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use tracing::{debug, debug_span, warn};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Classifier {
    pipeline: FeaturePipeline,
    engine: RiskEngine,
}

impl Classifier {
    pub fn new(artifact: Arc<ModelArtifact>, config: AnswersConfig) -> Self {
        Self {
            pipeline: FeaturePipeline::new(config),
            engine: RiskEngine::new(artifact),
        }
    }

    pub fn artifact(&self) -> &ModelArtifact {
        self.engine.artifact()
    }

    /// Feature vector in the artifact's order, as of `today`.
    pub fn vectorize(&self, raw: &RawAnswerSet, today: NaiveDate) -> ClassifyResult<FeatureVector> {
        let record = self.pipeline.extract(raw, today)?;
        record.select(self.artifact().feature_order())
    }

    pub fn classify_on(&self, raw: &RawAnswerSet, today: NaiveDate) -> ClassifyResult<Prediction> {
        let vector = self.vectorize(raw, today)?;
        self.engine.score(&vector)
    }

    pub fn classify(&self, raw: &RawAnswerSet) -> ClassifyResult<Prediction> {
        self.classify_on(raw, Utc::now().date_naive())
    }

    /// Classify and wrap the result for the caller, logging the outcome (never the answers).
    pub fn report(&self, raw: &RawAnswerSet) -> ClassifyResult<RiskReport> {
        let request_id = Uuid::new_v4();
        let span = debug_span!("classify", request_id = %request_id);
        let _guard = span.enter();

        match self.classify(raw) {
            Ok(prediction) => {
                debug!(
                    probability = prediction.probability,
                    label = prediction.label.value(),
                    "classified"
                );
                Ok(RiskReport::new(request_id, &prediction))
            }
            Err(e) => {
                warn!(kind = e.kind().as_str(), error = %e, "classification failed");
                Err(e)
            }
        }
    }
}
