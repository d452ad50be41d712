//! Integration test: artifact load, answers -> features -> prediction, error kinds, sharing.

use chrono::NaiveDate;
use menorisk::{
    answers::RawAnswerSet,
    classifier::Classifier,
    config::{AnswersConfig, AppConfig},
    error::{ArtifactError, ClassifyError, ErrorKind},
    model::{sigmoid, ModelArtifact, ProbabilityModel, ScoringError},
    risk::{GaugeZone, RiskLabel, RiskReport},
};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

const ALL_FEATURES: [&str; 10] = [
    "TENSE", "IRRITAB", "CONTROL", "P_STRESS", "YOURWAY", "NISWEAT", "AGE_R_LMP", "SMOKE_R",
    "DIFFISLP", "HEALTH",
];

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

fn scenario() -> RawAnswerSet {
    RawAnswerSet::from_json(
        r#"{
            "date_of_birth": "1970-01-01",
            "last_period_date": "2020-01-01",
            "sleep_difficulty": "Yes",
            "night_sweats": "No",
            "tense": "Yes",
            "irritable": "No",
            "control": "Sometimes",
            "confidence": "Fairly Often",
            "yourway": "Never",
            "overcome": "Very Often",
            "smoker": "No",
            "health": "Good"
        }"#,
    )
    .unwrap()
}

fn artifact_json(features: &[&str], threshold: f64) -> String {
    let coefficients: Vec<f64> = (0..features.len()).map(|i| 0.01 * (i as f64 + 1.0)).collect();
    serde_json::json!({
        "features": features,
        "threshold": threshold,
        "model": { "intercept": 0.0, "coefficients": coefficients }
    })
    .to_string()
}

fn classifier_with(artifact: ModelArtifact) -> Classifier {
    Classifier::new(Arc::new(artifact), AnswersConfig::default())
}

#[derive(Debug)]
struct FixedModel(f64);

impl ProbabilityModel for FixedModel {
    fn predict_probability(&self, _features: &[f64]) -> Result<f64, ScoringError> {
        Ok(self.0)
    }

    fn backend_type(&self) -> &str {
        "fixed"
    }
}

#[derive(Debug)]
struct FailingModel;

impl ProbabilityModel for FailingModel {
    fn predict_probability(&self, _features: &[f64]) -> Result<f64, ScoringError> {
        Err(ScoringError::Backend("solver exploded".into()))
    }

    fn backend_type(&self) -> &str {
        "failing"
    }
}

fn fixed(p: f64, threshold: f64) -> Classifier {
    let order = vec!["P_STRESS".to_string(), "AGE_R_LMP".to_string()];
    classifier_with(ModelArtifact::new(Box::new(FixedModel(p)), order, threshold).unwrap())
}

#[test]
fn config_load_default() {
    let c = AppConfig::load(Path::new("nonexistent.json"));
    assert_eq!(c.artifact_path, Path::new("log_reg_model.json"));
    assert_eq!(c.answers.earliest_date, NaiveDate::from_ymd_opt(1910, 1, 1).unwrap());
    assert_eq!(c.log.level, "info");
}

#[test]
fn config_partial_file_keeps_defaults() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    write!(f, r#"{{"artifact_path": "models/lr.json"}}"#).unwrap();
    let c = AppConfig::load(f.path());
    assert_eq!(c.artifact_path, Path::new("models/lr.json"));
    assert!(!c.log.json);
}

#[test]
fn scenario_end_to_end() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    f.write_all(artifact_json(&ALL_FEATURES, 0.5).as_bytes()).unwrap();
    let artifact = ModelArtifact::load(f.path()).unwrap();
    let classifier = classifier_with(artifact);
    let raw = scenario();

    let vector = classifier.vectorize(&raw, today()).unwrap();
    let expected = [2.0, 1.0, 3.0, 13.0, 1.0, 1.0, 50.0, 1.0, 2.0, 3.0];
    assert_eq!(vector.values, expected);
    assert_eq!(vector.get("AGE_R_LMP"), Some(50.0));

    let z: f64 = 0.0
        + expected
            .iter()
            .enumerate()
            .map(|(i, x)| 0.01 * (i as f64 + 1.0) * x)
            .sum::<f64>();
    let first = classifier.classify_on(&raw, today()).unwrap();
    assert!((first.probability - sigmoid(z)).abs() < 1e-12);
    assert_eq!(first.label, RiskLabel::AtRisk);
    assert_eq!(first.threshold, 0.5);

    for _ in 0..10 {
        let again = classifier.classify_on(&raw, today()).unwrap();
        assert_eq!(again.probability.to_bits(), first.probability.to_bits());
        assert_eq!(again.label, first.label);
    }
}

#[test]
fn artifact_order_drives_vector_order() {
    let reversed: Vec<&str> = ALL_FEATURES.iter().rev().copied().collect();
    let a = classifier_with(ModelArtifact::from_slice(artifact_json(&ALL_FEATURES, 0.5).as_bytes()).unwrap());
    let b = classifier_with(ModelArtifact::from_slice(artifact_json(&reversed, 0.5).as_bytes()).unwrap());
    let va = a.vectorize(&scenario(), today()).unwrap();
    let mut vb = b.vectorize(&scenario(), today()).unwrap();
    vb.values.reverse();
    assert_eq!(va.values, vb.values);
}

#[test]
fn unknown_artifact_feature_is_missing_feature() {
    let artifact =
        ModelArtifact::from_slice(artifact_json(&["TENSE", "UNKNOWN_FEATURE"], 0.5).as_bytes()).unwrap();
    let err = classifier_with(artifact).classify_on(&scenario(), today()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingFeature);
    match err {
        ClassifyError::MissingFeature { name } => assert_eq!(name, "UNKNOWN_FEATURE"),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn threshold_boundary_through_classifier() {
    let raw = scenario();
    assert_eq!(fixed(0.5, 0.5).classify_on(&raw, today()).unwrap().label, RiskLabel::AtRisk);
    assert_eq!(fixed(0.4999, 0.5).classify_on(&raw, today()).unwrap().label, RiskLabel::NotAtRisk);
    assert_eq!(fixed(0.5001, 0.5).classify_on(&raw, today()).unwrap().label, RiskLabel::AtRisk);
}

#[test]
fn scoring_failures_carry_cause() {
    let order = vec!["TENSE".to_string()];
    let failing = classifier_with(ModelArtifact::new(Box::new(FailingModel), order, 0.5).unwrap());
    match failing.classify_on(&scenario(), today()).unwrap_err() {
        ClassifyError::ScoringFailure { source } => {
            assert_eq!(source, ScoringError::Backend("solver exploded".into()))
        }
        other => panic!("unexpected error {other:?}"),
    }

    let err = fixed(1.5, 0.5).classify_on(&scenario(), today()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ScoringFailure);
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn invalid_answers_identify_field() {
    let mut raw = scenario();
    raw.irritable = "maybe".into();
    match fixed(0.1, 0.5).classify_on(&raw, today()).unwrap_err() {
        ClassifyError::InvalidInput { field, .. } => assert_eq!(field, "irritable"),
        other => panic!("unexpected error {other:?}"),
    }

    let mut raw = scenario();
    raw.last_period_date = NaiveDate::from_ymd_opt(1969, 12, 31).unwrap();
    match fixed(0.1, 0.5).classify_on(&raw, today()).unwrap_err() {
        ClassifyError::InvalidInput { field, .. } => assert_eq!(field, "last_period_date"),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn artifact_load_failures() {
    let err = ModelArtifact::load(Path::new("nonexistent_model.json")).unwrap_err();
    assert!(matches!(err, ArtifactError::Io { .. }));
    assert_eq!(err.kind(), ErrorKind::ArtifactLoadFailure);

    let mut f = tempfile::NamedTempFile::new().unwrap();
    f.write_all(br#"{"features": ["TENSE"], "threshold": 0.5}"#).unwrap();
    assert!(matches!(ModelArtifact::load(f.path()), Err(ArtifactError::Parse(_))));
}

#[test]
fn report_carries_verdict_and_gauge() {
    let prediction = fixed(0.25, 0.4).classify_on(&scenario(), today()).unwrap();
    let report = RiskReport::new(uuid::Uuid::new_v4(), &prediction);
    assert_eq!(report.label, 0);
    assert!(!report.at_risk());
    assert_eq!(report.verdict, "not at high risk for depression");
    assert_eq!(report.risk_percent, 25.0);
    assert_eq!(report.gauge[0].zone, GaugeZone::Low);
    assert_eq!(report.gauge[0].to, 40.0);
    assert_eq!(report.gauge[1].from, 40.0);
    assert_eq!(report.gauge[1].to, 100.0);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["threshold"], 0.4);
    assert_eq!(json["gauge"][1]["zone"], "high");
}

#[test]
fn shared_artifact_across_threads() {
    let artifact = Arc::new(ModelArtifact::from_slice(artifact_json(&ALL_FEATURES, 0.5).as_bytes()).unwrap());
    let classifier = Classifier::new(artifact.clone(), AnswersConfig::default());
    let expected = classifier.classify_on(&scenario(), today()).unwrap();

    std::thread::scope(|s| {
        for i in 0..8 {
            let classifier = &classifier;
            s.spawn(move || {
                let mut raw = scenario();
                if i % 2 == 1 {
                    raw.health = "Splendid".into();
                    assert!(classifier.classify_on(&raw, today()).is_err());
                } else {
                    let p = classifier.classify_on(&raw, today()).unwrap();
                    assert_eq!(p.probability.to_bits(), expected.probability.to_bits());
                }
            });
        }
    });
    assert_eq!(artifact.threshold(), 0.5);
}

const SCENARIO_LINE: &str = r#"{"date_of_birth": "1970-01-01", "last_period_date": "2020-01-01", "sleep_difficulty": "Yes", "night_sweats": "No", "tense": "Yes", "irritable": "No", "control": "Sometimes", "confidence": "Fairly Often", "yourway": "Never", "overcome": "Very Often", "smoker": "No", "health": "Good"}"#;

fn cli(artifact: &Path, args: &[&str], stdin: &[u8]) -> std::process::Output {
    use std::process::{Command, Stdio};

    let mut child = Command::new(env!("CARGO_BIN_EXE_menorisk"))
        .args(args)
        .env("MENORISK_CONFIG_PATH", "nonexistent_config.json")
        .env("MENORISK_ARTIFACT_PATH", artifact)
        .env("RUST_LOG", "warn")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    // The process may exit before reading stdin.
    let _ = child.stdin.take().unwrap().write_all(stdin);
    child.wait_with_output().unwrap()
}

fn stdout_lines(output: &std::process::Output) -> Vec<serde_json::Value> {
    String::from_utf8(output.stdout.clone())
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

fn artifact_file() -> tempfile::NamedTempFile {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    f.write_all(artifact_json(&ALL_FEATURES, 0.5).as_bytes()).unwrap();
    f
}

#[test]
fn cli_stdin_bad_lines_do_not_stop_the_run() {
    let artifact = artifact_file();
    let mut stdin = b"\xff\xfe garbage\n".to_vec();
    stdin.extend_from_slice(SCENARIO_LINE.as_bytes());
    stdin.extend_from_slice(b"\r\n\n{\"bad\": 1}\n");
    stdin.extend_from_slice(SCENARIO_LINE.as_bytes());

    let output = cli(artifact.path(), &[], &stdin);
    assert!(output.status.success());
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0]["error"], "invalid_input");
    assert_eq!(lines[1]["label"], 1);
    assert_eq!(lines[1]["threshold"], 0.5);
    assert_eq!(lines[2]["error"], "invalid_input");
    assert_eq!(lines[3]["label"], 1);
}

#[test]
fn cli_unreadable_file_gets_an_error_line() {
    let artifact = artifact_file();
    let mut answers = tempfile::NamedTempFile::new().unwrap();
    answers.write_all(SCENARIO_LINE.as_bytes()).unwrap();
    let answers_path = answers.path().to_str().unwrap().to_string();

    let output = cli(artifact.path(), &["does_not_exist.json", &answers_path], b"");
    assert!(output.status.success());
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["error"], "invalid_input");
    assert_eq!(lines[0]["source"], "does_not_exist.json");
    assert_eq!(lines[1]["verdict"], "at risk for depression");
}

#[test]
fn cli_exits_nonzero_when_artifact_missing() {
    let output = cli(Path::new("nonexistent_model.json"), &[], SCENARIO_LINE.as_bytes());
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}
