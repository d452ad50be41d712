//! Feature derivation from normalized answers and projection onto the model's inputs.

mod derived;
mod pipeline;

pub use derived::{age_at_reference, perceived_stress, DerivedFeatures};
pub use pipeline::{assemble, FeaturePipeline, FeatureRecord};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Names of every feature the calculator can produce, as used at training time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FeatureName {
    Tense,
    Irritab,
    Control,
    PStress,
    Yourway,
    Nisweat,
    AgeRLmp,
    SmokeR,
    Diffislp,
    Health,
}

impl FeatureName {
    pub const ALL: [FeatureName; 10] = [
        FeatureName::Tense,
        FeatureName::Irritab,
        FeatureName::Control,
        FeatureName::PStress,
        FeatureName::Yourway,
        FeatureName::Nisweat,
        FeatureName::AgeRLmp,
        FeatureName::SmokeR,
        FeatureName::Diffislp,
        FeatureName::Health,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureName::Tense => "TENSE",
            FeatureName::Irritab => "IRRITAB",
            FeatureName::Control => "CONTROL",
            FeatureName::PStress => "P_STRESS",
            FeatureName::Yourway => "YOURWAY",
            FeatureName::Nisweat => "NISWEAT",
            FeatureName::AgeRLmp => "AGE_R_LMP",
            FeatureName::SmokeR => "SMOKE_R",
            FeatureName::Diffislp => "DIFFISLP",
            FeatureName::Health => "HEALTH",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == name)
    }
}

impl fmt::Display for FeatureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered model input: `values[i]` is the value of feature `names[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub names: Vec<String>,
    pub values: Vec<f64>,
}

impl FeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.values[i])
    }
}
