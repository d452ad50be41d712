//! Answer normalization: human-facing labels -> typed answers carrying training codes.

use super::{HealthRating, Likert, RawAnswerSet, YesNo};
use crate::error::{ClassifyError, ClassifyResult};
use chrono::NaiveDate;

/// Answers after label validation. Every categorical field is a closed enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizedAnswers {
    pub date_of_birth: NaiveDate,
    pub last_period_date: NaiveDate,
    pub sleep_difficulty: YesNo,
    pub night_sweats: YesNo,
    pub tense: YesNo,
    pub irritable: YesNo,
    pub control: Likert,
    pub confidence: Likert,
    pub yourway: Likert,
    pub overcome: Likert,
    pub smoker: YesNo,
    pub health: HealthRating,
}

fn yes_no(field: &str, label: &str) -> ClassifyResult<YesNo> {
    YesNo::from_label(label)
        .ok_or_else(|| ClassifyError::invalid(field, format!("expected \"Yes\" or \"No\", got {label:?}")))
}

fn likert(field: &str, label: &str) -> ClassifyResult<Likert> {
    Likert::from_label(label)
        .ok_or_else(|| ClassifyError::invalid(field, format!("unknown frequency label {label:?}")))
}

fn health(field: &str, label: &str) -> ClassifyResult<HealthRating> {
    HealthRating::from_label(label)
        .ok_or_else(|| ClassifyError::invalid(field, format!("unknown health rating {label:?}")))
}

/// Map every label of `raw` onto its vocabulary. The first unknown label fails
/// with `InvalidInput` naming the field.
pub fn normalize(raw: &RawAnswerSet) -> ClassifyResult<NormalizedAnswers> {
    Ok(NormalizedAnswers {
        date_of_birth: raw.date_of_birth,
        last_period_date: raw.last_period_date,
        sleep_difficulty: yes_no("sleep_difficulty", &raw.sleep_difficulty)?,
        night_sweats: yes_no("night_sweats", &raw.night_sweats)?,
        tense: yes_no("tense", &raw.tense)?,
        irritable: yes_no("irritable", &raw.irritable)?,
        control: likert("control", &raw.control)?,
        confidence: likert("confidence", &raw.confidence)?,
        yourway: likert("yourway", &raw.yourway)?,
        overcome: likert("overcome", &raw.overcome)?,
        smoker: yes_no("smoker", &raw.smoker)?,
        health: health("health", &raw.health)?,
    })
}

/// Both dates must fall in `[earliest, today]`, the range the form accepts.
pub fn validate_dates(
    answers: &NormalizedAnswers,
    earliest: NaiveDate,
    today: NaiveDate,
) -> ClassifyResult<()> {
    for (field, date) in [
        ("date_of_birth", answers.date_of_birth),
        ("last_period_date", answers.last_period_date),
    ] {
        if date < earliest {
            return Err(ClassifyError::invalid(field, format!("{date} is before {earliest}")));
        }
        if date > today {
            return Err(ClassifyError::invalid(field, format!("{date} is in the future")));
        }
    }
    Ok(())
}
