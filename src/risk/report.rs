//! Output record for the form/visualization layer: verdict text and gauge bands.

use super::{Prediction, RiskLabel};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GaugeZone {
    Low,
    High,
}

/// Percent range of the risk gauge, split at the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaugeBand {
    pub from: f64,
    pub to: f64,
    pub zone: GaugeZone,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReport {
    pub request_id: Uuid,
    pub ts: DateTime<Utc>,
    pub probability: f64,
    pub risk_percent: f64,
    /// 1 = at risk, 0 = not at risk
    pub label: u8,
    pub verdict: String,
    pub threshold: f64,
    pub gauge: [GaugeBand; 2],
}

impl RiskReport {
    pub fn new(request_id: Uuid, prediction: &Prediction) -> Self {
        let split = prediction.threshold * 100.0;
        Self {
            request_id,
            ts: Utc::now(),
            probability: prediction.probability,
            risk_percent: prediction.probability * 100.0,
            label: prediction.label.value(),
            verdict: prediction.label.verdict().to_string(),
            threshold: prediction.threshold,
            gauge: [
                GaugeBand {
                    from: 0.0,
                    to: split,
                    zone: GaugeZone::Low,
                },
                GaugeBand {
                    from: split,
                    to: 100.0,
                    zone: GaugeZone::High,
                },
            ],
        }
    }

    pub fn at_risk(&self) -> bool {
        self.label == RiskLabel::AtRisk.value()
    }
}
