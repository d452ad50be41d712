//! Classifier entrypoint: loads the model artifact once, then classifies answer sets
//! given as file arguments, or newline-delimited JSON on stdin when no files are given.
//! One JSON line per input on stdout; logs on stderr.

use menorisk::{
    classifier::Classifier,
    config::AppConfig,
    error::ClassifyError,
    logging::{ErrorRecord, StructuredLogger},
    model::ModelArtifact,
    RawAnswerSet,
};
use std::io::{BufRead, Write};
use std::sync::Arc;
use tracing::{error, info, warn};

fn classify_one(
    classifier: &Classifier,
    input: &str,
    out: &mut impl Write,
    source: Option<&str>,
) -> std::io::Result<bool> {
    let result = match RawAnswerSet::from_json(input) {
        Ok(raw) => classifier.report(&raw),
        Err(e) => {
            warn!(kind = e.kind().as_str(), error = %e, "unreadable answer set");
            Err(e)
        }
    };
    match result {
        Ok(report) => {
            if report.at_risk() {
                info!(request_id = %report.request_id, "respondent classified at risk");
            }
            StructuredLogger::emit_json(&report, out)?;
            Ok(true)
        }
        Err(e) => {
            let mut record = ErrorRecord::from(&e);
            if let Some(s) = source {
                record = record.with_source(s);
            }
            StructuredLogger::emit_json(&record, out)?;
            Ok(false)
        }
    }
}

fn emit_unreadable(
    out: &mut impl Write,
    reason: String,
    source: Option<&str>,
) -> std::io::Result<()> {
    let e = ClassifyError::invalid("answers", reason);
    warn!(kind = e.kind().as_str(), error = %e, "unreadable answer set");
    let mut record = ErrorRecord::from(&e);
    if let Some(s) = source {
        record = record.with_source(s);
    }
    StructuredLogger::emit_json(&record, out)
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = AppConfig::from_env();

    StructuredLogger::init(config.log.json, &config.log.level);

    info!(artifact = ?config.artifact_path, "menorisk starting");

    let artifact = match ModelArtifact::load(&config.artifact_path) {
        Ok(a) => Arc::new(a),
        Err(e) => {
            error!(kind = e.kind().as_str(), error = %e, "model artifact load failed");
            std::process::exit(1);
        }
    };
    let classifier = Classifier::new(artifact, config.answers.clone());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let (mut ok, mut failed) = (0u64, 0u64);
    let mut tally = |classified: bool| {
        if classified {
            ok += 1;
        } else {
            failed += 1;
        }
    };

    let files: Vec<String> = std::env::args().skip(1).collect();
    if files.is_empty() {
        for line in std::io::stdin().lock().split(b'\n') {
            let mut line = match line {
                Ok(l) => l,
                Err(e) => {
                    emit_unreadable(&mut out, format!("cannot read stdin: {e}"), None)?;
                    tally(false);
                    break;
                }
            };
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            let line = match String::from_utf8(line) {
                Ok(l) => l,
                Err(e) => {
                    emit_unreadable(&mut out, format!("line is not valid UTF-8: {e}"), None)?;
                    tally(false);
                    continue;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            tally(classify_one(&classifier, &line, &mut out, None)?);
        }
    } else {
        for path in &files {
            let input = match std::fs::read_to_string(path) {
                Ok(s) => s,
                Err(e) => {
                    emit_unreadable(&mut out, format!("cannot read {path}: {e}"), Some(path))?;
                    tally(false);
                    continue;
                }
            };
            tally(classify_one(&classifier, &input, &mut out, Some(path))?);
        }
    }
    out.flush()?;

    info!(ok, failed, "menorisk done");
    Ok(())
}
