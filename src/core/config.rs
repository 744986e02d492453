//! # Configuration
//!
//! Environment-driven settings for the assistant. Values are read after
//! `dotenvy::dotenv()` so a local `.env` file can override defaults.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Added study timer durations and currency symbol
//! - 1.0.0: Initial release with database, model and threshold settings

use anyhow::{anyhow, Result};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Classifier output below this confidence triggers a clarification
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.35;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: PathBuf,
    pub model_path: PathBuf,
    pub confidence_threshold: f64,
    pub reminder_poll_interval: Duration,
    pub study_minutes: u64,
    pub break_minutes: u64,
    pub progress_minutes: u64,
    pub currency: String,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_path: PathBuf::from("database/assistant.db"),
            model_path: PathBuf::from("model/intent_model.json"),
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            reminder_poll_interval: Duration::from_secs(5),
            study_minutes: 25,
            break_minutes: 5,
            progress_minutes: 5,
            currency: "₹".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let defaults = Config::default();

        let confidence_threshold =
            parse_var("AIDE_CONFIDENCE_THRESHOLD", defaults.confidence_threshold)?;
        if !(0.0..=1.0).contains(&confidence_threshold) {
            return Err(anyhow!(
                "AIDE_CONFIDENCE_THRESHOLD must be between 0 and 1, got {confidence_threshold}"
            ));
        }

        let poll_seconds: u64 = parse_var("AIDE_REMINDER_POLL_SECONDS", 5)?;
        if poll_seconds == 0 {
            return Err(anyhow!("AIDE_REMINDER_POLL_SECONDS must be greater than 0"));
        }

        let progress_minutes = parse_var("AIDE_PROGRESS_MINUTES", defaults.progress_minutes)?;
        if progress_minutes == 0 {
            return Err(anyhow!("AIDE_PROGRESS_MINUTES must be greater than 0"));
        }

        Ok(Config {
            database_path: env::var("AIDE_DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),
            model_path: env::var("AIDE_MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.model_path),
            confidence_threshold,
            reminder_poll_interval: Duration::from_secs(poll_seconds),
            study_minutes: parse_var("AIDE_STUDY_MINUTES", defaults.study_minutes)?,
            break_minutes: parse_var("AIDE_BREAK_MINUTES", defaults.break_minutes)?,
            progress_minutes,
            currency: env::var("AIDE_CURRENCY").unwrap_or(defaults.currency),
            log_level: env::var("RUST_LOG").unwrap_or(defaults.log_level),
        })
    }
}

/// Read an optional variable, falling back to `default` when unset
fn parse_var<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow!("Invalid value for {key} ({raw:?}): {e}")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.confidence_threshold, 0.35);
        assert_eq!(config.reminder_poll_interval, Duration::from_secs(5));
        assert_eq!(config.study_minutes, 25);
        assert_eq!(config.break_minutes, 5);
        assert_eq!(config.progress_minutes, 5);
        assert_eq!(config.currency, "₹");
    }

    #[test]
    fn test_parse_var_falls_back_when_unset() {
        let value: u64 = parse_var("AIDE_TEST_UNSET_VARIABLE_FOR_CONFIG", 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_parse_var_rejects_garbage() {
        env::set_var("AIDE_TEST_GARBAGE_VARIABLE_FOR_CONFIG", "not-a-number");
        let result: Result<u64> = parse_var("AIDE_TEST_GARBAGE_VARIABLE_FOR_CONFIG", 1);
        assert!(result.is_err());
        env::remove_var("AIDE_TEST_GARBAGE_VARIABLE_FOR_CONFIG");
    }
}
