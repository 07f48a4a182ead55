//! Runtime configuration from `JENDO_*` environment variables.

use std::path::PathBuf;

use crate::adapters::sanitize::DEFAULT_SANITIZE_MAX_BYTES;
use crate::domain::ScoringPolicy;
use crate::JendoError;

pub const DB_PATH_ENV: &str = "JENDO_DB_PATH";
pub const LOG_MODE_ENV: &str = "JENDO_LOG_MODE";
pub const LOG_FILE_ENV: &str = "JENDO_LOG_FILE";
pub const SCORING_POLICY_ENV: &str = "JENDO_SCORING_POLICY";
pub const SANITIZE_MAX_BYTES_ENV: &str = "JENDO_SANITIZE_MAX_BYTES";

const DEFAULT_DB_PATH: &str = "jendo.db";
const DEFAULT_LOG_FILE: &str = "jendo.log";

/// Where log output goes. Stdout is reserved for command output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    File,
    Stderr,
}

impl LogMode {
    /// Colour escapes are only written to a terminal stream, never to the log file.
    #[must_use]
    pub fn ansi(self) -> bool {
        self == Self::Stderr
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_mode: LogMode,
    pub log_file: PathBuf,
    pub scoring_policy: ScoringPolicy,
    pub sanitize_max_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            log_mode: LogMode::Stderr,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            scoring_policy: ScoringPolicy::default(),
            sanitize_max_bytes: DEFAULT_SANITIZE_MAX_BYTES,
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    ///
    /// # Errors
    /// Returns `JendoError::Config` for unparseable values.
    pub fn from_env() -> Result<Self, JendoError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    ///
    /// Unset or blank keys fall back to defaults. `JENDO_LOG_MODE=auto`
    /// selects stderr.
    ///
    /// # Errors
    /// Returns `JendoError::Config` for unparseable values.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, JendoError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Self::default();

        if let Some(path) = get(DB_PATH_ENV) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(path) = get(LOG_FILE_ENV) {
            config.log_file = PathBuf::from(path);
        }
        if let Some(mode) = get(LOG_MODE_ENV) {
            config.log_mode = match mode.to_ascii_lowercase().as_str() {
                "file" => LogMode::File,
                "stderr" | "auto" => LogMode::Stderr,
                other => {
                    return Err(JendoError::Config(format!(
                        "{LOG_MODE_ENV}={other} (expected file, stderr or auto)"
                    )))
                }
            };
        }
        if let Some(policy) = get(SCORING_POLICY_ENV) {
            config.scoring_policy = policy
                .parse()
                .map_err(|e| JendoError::Config(format!("{SCORING_POLICY_ENV}: {e}")))?;
        }
        if let Some(bytes) = get(SANITIZE_MAX_BYTES_ENV) {
            config.sanitize_max_bytes = bytes
                .parse::<usize>()
                .ok()
                .filter(|&v| v > 0)
                .ok_or_else(|| {
                    JendoError::Config(format!(
                        "{SANITIZE_MAX_BYTES_ENV}={bytes} (expected a positive integer)"
                    ))
                })?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[])).expect("Should load");
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.scoring_policy, ScoringPolicy::RequireVitals);
        assert_eq!(config.log_mode, LogMode::Stderr);
        assert!(config.log_mode.ansi());
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (DB_PATH_ENV, "/data/profiles.db"),
            (LOG_MODE_ENV, "FILE"),
            (LOG_FILE_ENV, "/data/jendo.log"),
            (SCORING_POLICY_ENV, "missing-as-zero"),
            (SANITIZE_MAX_BYTES_ENV, "4096"),
        ]))
        .expect("Should load");

        assert_eq!(config.db_path, PathBuf::from("/data/profiles.db"));
        assert_eq!(config.log_mode, LogMode::File);
        assert!(!config.log_mode.ansi());
        assert_eq!(config.log_file, PathBuf::from("/data/jendo.log"));
        assert_eq!(config.scoring_policy, ScoringPolicy::MissingAsZero);
        assert_eq!(config.sanitize_max_bytes, 4096);
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config =
            AppConfig::from_lookup(lookup_from(&[(DB_PATH_ENV, "  "), (LOG_MODE_ENV, "auto")]))
                .expect("Should load");
        assert_eq!(config.db_path, PathBuf::from(DEFAULT_DB_PATH));
        assert_eq!(config.log_mode, LogMode::Stderr);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            AppConfig::from_lookup(lookup_from(&[(LOG_MODE_ENV, "syslog")])),
            Err(JendoError::Config(_))
        ));
        assert!(matches!(
            AppConfig::from_lookup(lookup_from(&[(SCORING_POLICY_ENV, "strict")])),
            Err(JendoError::Config(_))
        ));
        assert!(matches!(
            AppConfig::from_lookup(lookup_from(&[(SANITIZE_MAX_BYTES_ENV, "0")])),
            Err(JendoError::Config(_))
        ));
    }
}
