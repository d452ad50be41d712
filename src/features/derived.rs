//! Composite features computed from two or more answers.

use crate::answers::{Likert, NormalizedAnswers};
use crate::error::{ClassifyError, ClassifyResult};
use chrono::{Datelike, NaiveDate};

/// Whole completed years from `date_of_birth` to `reference_date` (calendar age,
/// not elapsed days / 365). A reference before birth is invalid.
pub fn age_at_reference(date_of_birth: NaiveDate, reference_date: NaiveDate) -> ClassifyResult<u32> {
    if reference_date < date_of_birth {
        return Err(ClassifyError::invalid(
            "reference_date",
            format!("{reference_date} precedes date of birth {date_of_birth}"),
        ));
    }
    let mut age = reference_date.year() - date_of_birth.year();
    if (reference_date.month(), reference_date.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    Ok(age as u32)
}

/// Unweighted sum of the four stress items, in `4..=20`. No item is reverse-scored.
pub fn perceived_stress(control: Likert, confidence: Likert, yourway: Likert, overcome: Likert) -> u8 {
    control.code() + confidence.code() + yourway.code() + overcome.code()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedFeatures {
    /// Age at last menstrual period
    pub age_r_lmp: u32,
    pub p_stress: u8,
}

impl DerivedFeatures {
    pub fn from_answers(answers: &NormalizedAnswers) -> ClassifyResult<Self> {
        let age_r_lmp = age_at_reference(answers.date_of_birth, answers.last_period_date)
            .map_err(|e| match e {
                ClassifyError::InvalidInput { reason, .. } => {
                    ClassifyError::invalid("last_period_date", reason)
                }
                other => other,
            })?;
        Ok(Self {
            age_r_lmp,
            p_stress: perceived_stress(
                answers.control,
                answers.confidence,
                answers.yourway,
                answers.overcome,
            ),
        })
    }
}
