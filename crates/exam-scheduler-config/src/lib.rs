//! Process configuration for the exam scheduler, loaded from environment
//! variables. Distinct from the domain-level `ExamWindow`, which is read
//! through the repository port rather than the process environment.

use serde::Deserialize;
use std::env;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    MissingVar(String),
    #[error("invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Path to the SQLite database file.
    pub database_path: String,
    /// Tracing filter directive, e.g. "info" or "exam_scheduler_core=debug".
    pub log_level: String,
    /// Department to restrict a scheduling run to, if any.
    pub department_id: Option<i64>,
}

impl AppConfig {
    /// Loads configuration from environment variables, falling back to a
    /// `.env` file in the current directory if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            database_path: env_var("EXAM_SCHEDULER_DB_PATH")?,
            log_level: env_var_or("EXAM_SCHEDULER_LOG", "info"),
            department_id: optional_i64("EXAM_SCHEDULER_DEPARTMENT_ID")?,
        })
    }
}

fn env_var(name: &str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::MissingVar(name.to_string()))
}

fn env_var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn optional_i64(name: &str) -> Result<Option<i64>, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .parse::<i64>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue(name.to_string(), raw)),
        Err(_) => Ok(None),
    }
}
