//! Feature pipeline: raw answers -> normalized -> derived -> full record -> ordered vector.

use super::{DerivedFeatures, FeatureName, FeatureVector};
use crate::answers::{normalize, validate_dates, NormalizedAnswers, RawAnswerSet};
use crate::config::AnswersConfig;
use crate::error::{ClassifyError, ClassifyResult};
use chrono::NaiveDate;

/// Every derivable feature with its numeric value, in `FeatureName::ALL` order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRecord {
    entries: [(FeatureName, f64); 10],
}

impl FeatureRecord {
    pub fn new(answers: &NormalizedAnswers, derived: &DerivedFeatures) -> Self {
        let value = |name: FeatureName| -> f64 {
            match name {
                FeatureName::Tense => answers.tense.code() as f64,
                FeatureName::Irritab => answers.irritable.code() as f64,
                FeatureName::Control => answers.control.code() as f64,
                FeatureName::PStress => derived.p_stress as f64,
                FeatureName::Yourway => answers.yourway.code() as f64,
                FeatureName::Nisweat => answers.night_sweats.code() as f64,
                FeatureName::AgeRLmp => derived.age_r_lmp as f64,
                FeatureName::SmokeR => answers.smoker.code() as f64,
                FeatureName::Diffislp => answers.sleep_difficulty.code() as f64,
                FeatureName::Health => answers.health.code() as f64,
            }
        };
        Self {
            entries: FeatureName::ALL.map(|name| (name, value(name))),
        }
    }

    pub fn entries(&self) -> &[(FeatureName, f64)] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        let name = FeatureName::from_name(name)?;
        self.entries.iter().find(|(n, _)| *n == name).map(|(_, v)| *v)
    }

    /// Project onto `order`, which may be any subset in any order. Unknown names
    /// fail with `MissingFeature`.
    pub fn select(&self, order: &[String]) -> ClassifyResult<FeatureVector> {
        let values = order
            .iter()
            .map(|name| {
                self.get(name)
                    .ok_or_else(|| ClassifyError::MissingFeature { name: name.clone() })
            })
            .collect::<ClassifyResult<Vec<f64>>>()?;
        Ok(FeatureVector {
            names: order.to_vec(),
            values,
        })
    }
}

/// Build the full record and project it onto the artifact's expected order.
pub fn assemble(
    answers: &NormalizedAnswers,
    derived: &DerivedFeatures,
    expected_order: &[String],
) -> ClassifyResult<FeatureVector> {
    FeatureRecord::new(answers, derived).select(expected_order)
}

/// Stateless answers -> features stage. Shareable across threads.
#[derive(Debug, Clone)]
pub struct FeaturePipeline {
    config: AnswersConfig,
}

impl FeaturePipeline {
    pub fn new(config: AnswersConfig) -> Self {
        Self { config }
    }

    /// Normalize, validate dates against `today`, and derive composites.
    pub fn extract(&self, raw: &RawAnswerSet, today: NaiveDate) -> ClassifyResult<FeatureRecord> {
        let answers = normalize(raw)?;
        validate_dates(&answers, self.config.earliest_date, today)?;
        let derived = DerivedFeatures::from_answers(&answers)?;
        Ok(FeatureRecord::new(&answers, &derived))
    }
}
