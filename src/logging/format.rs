//! Log and result line formatting: one JSON object per line (ndjson).

use crate::error::{ClassifyError, ErrorKind};
use serde::Serialize;
use std::io::Write;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Error line written in place of a report when a request fails.
#[derive(Debug, Serialize)]
pub struct ErrorRecord {
    pub error: ErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl From<&ClassifyError> for ErrorRecord {
    fn from(e: &ClassifyError) -> Self {
        Self {
            error: e.kind(),
            message: e.to_string(),
            field: match e {
                ClassifyError::InvalidInput { field, .. } => Some(field.clone()),
                _ => None,
            },
            source: None,
        }
    }
}

impl ErrorRecord {
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

pub struct StructuredLogger;

impl StructuredLogger {
    /// Install global subscriber writing to stderr, level from RUST_LOG or `default_level`.
    pub fn init(json: bool, default_level: &str) {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
        if json {
            let fmt = tracing_subscriber::fmt::layer()
                .json()
                .with_span_events(FmtSpan::NONE)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry().with(filter).with(fmt).init();
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    /// Emit a single result line without going through tracing.
    pub fn emit_json(event: &impl Serialize, w: &mut impl Write) -> std::io::Result<()> {
        let line = serde_json::to_string(event)?;
        writeln!(w, "{}", line)
    }
}
