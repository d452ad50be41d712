//! Questionnaire answers: the raw wire record and the fixed label vocabularies.
//! Label strings and numeric codes are the contract with the form layer and must
//! match what the model was trained on.

mod normalize;

pub use normalize::{normalize, validate_dates, NormalizedAnswers};

use crate::error::{ClassifyError, ClassifyResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One respondent's answers as collected by the form. Every field is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawAnswerSet {
    pub date_of_birth: NaiveDate,
    pub last_period_date: NaiveDate,
    // Symptoms over the past two weeks, "Yes"/"No"
    pub sleep_difficulty: String,
    pub night_sweats: String,
    pub tense: String,
    pub irritable: String,
    // Perceived stress items, Likert labels
    pub control: String,
    pub confidence: String,
    pub yourway: String,
    pub overcome: String,
    /// Currently smokes ("Yes"/"No")
    pub smoker: String,
    /// Self-rated general health label
    pub health: String,
}

impl RawAnswerSet {
    /// Parse one JSON answer set. Missing or mistyped fields are invalid input.
    pub fn from_json(data: &str) -> ClassifyResult<Self> {
        serde_json::from_str(data).map_err(|e| ClassifyError::invalid("answers", e.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum YesNo {
    No,
    Yes,
}

impl YesNo {
    pub const ALL: [YesNo; 2] = [YesNo::No, YesNo::Yes];

    pub fn label(self) -> &'static str {
        match self {
            YesNo::No => "No",
            YesNo::Yes => "Yes",
        }
    }

    pub fn code(self) -> u8 {
        match self {
            YesNo::No => 1,
            YesNo::Yes => 2,
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.label() == label)
    }
}

/// Five-point frequency scale used by the perceived stress items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Likert {
    Never,
    AlmostNever,
    Sometimes,
    FairlyOften,
    VeryOften,
}

impl Likert {
    pub const ALL: [Likert; 5] = [
        Likert::Never,
        Likert::AlmostNever,
        Likert::Sometimes,
        Likert::FairlyOften,
        Likert::VeryOften,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Likert::Never => "Never",
            Likert::AlmostNever => "Almost Never",
            Likert::Sometimes => "Sometimes",
            Likert::FairlyOften => "Fairly Often",
            Likert::VeryOften => "Very Often",
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Likert::Never => 1,
            Likert::AlmostNever => 2,
            Likert::Sometimes => 3,
            Likert::FairlyOften => 4,
            Likert::VeryOften => 5,
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.label() == label)
    }
}

/// Self-rated general health, 1 = best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthRating {
    Excellent,
    VeryGood,
    Good,
    Fair,
    Poor,
}

impl HealthRating {
    pub const ALL: [HealthRating; 5] = [
        HealthRating::Excellent,
        HealthRating::VeryGood,
        HealthRating::Good,
        HealthRating::Fair,
        HealthRating::Poor,
    ];

    pub fn label(self) -> &'static str {
        match self {
            HealthRating::Excellent => "Excellent",
            HealthRating::VeryGood => "Very Good",
            HealthRating::Good => "Good",
            HealthRating::Fair => "Fair",
            HealthRating::Poor => "Poor",
        }
    }

    pub fn code(self) -> u8 {
        match self {
            HealthRating::Excellent => 1,
            HealthRating::VeryGood => 2,
            HealthRating::Good => 3,
            HealthRating::Fair => 4,
            HealthRating::Poor => 5,
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.label() == label)
    }
}
