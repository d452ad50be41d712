//! Scoring engine and the caller-facing risk report.

mod engine;
mod report;

pub use engine::{score, Prediction, RiskEngine, RiskLabel};
pub use report::{GaugeBand, GaugeZone, RiskReport};
