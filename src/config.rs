//! Classifier configuration (JSON file, every field optional).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_PATH_ENV: &str = "MENORISK_CONFIG_PATH";
pub const ARTIFACT_PATH_ENV: &str = "MENORISK_ARTIFACT_PATH";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Path to the exported model artifact (JSON)
    pub artifact_path: PathBuf,
    /// Answer validation
    pub answers: AnswersConfig,
    /// Logging
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnswersConfig {
    /// Oldest date accepted for birth and last period
    pub earliest_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            artifact_path: PathBuf::from("log_reg_model.json"),
            answers: AnswersConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for AnswersConfig {
    fn default() -> Self {
        Self {
            earliest_date: NaiveDate::from_ymd_opt(1910, 1, 1).unwrap_or(NaiveDate::MIN),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load from JSON file if present; otherwise return default
    pub fn load(path: &Path) -> Self {
        if path.exists() {
            if let Ok(data) = std::fs::read_to_string(path) {
                if let Ok(c) = serde_json::from_str::<AppConfig>(&data) {
                    return c;
                }
            }
        }
        Self::default()
    }

    /// Load from `MENORISK_CONFIG_PATH` (default `config.json`), then apply
    /// `MENORISK_ARTIFACT_PATH` if set.
    pub fn from_env() -> Self {
        let path = std::env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config.json"));
        let mut config = Self::load(&path);
        if let Ok(artifact) = std::env::var(ARTIFACT_PATH_ENV) {
            config.artifact_path = PathBuf::from(artifact);
        }
        config
    }
}
