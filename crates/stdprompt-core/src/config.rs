//! Session configuration.
//!
//! The process-wide configuration is read from the environment once and
//! cached:
//! - `STDPROMPT_LOG`: where structured log records go. `off` (default),
//!   `stderr`, or any other value taken as a file path to append to.
//! - `STDPROMPT_LOG_LEVEL`: `trace`, `debug`, `info` (default), `warn` or
//!   `error`. Unknown values fall back to the default.
//!
//! Embedders and tests can build a [`SessionConfig`] directly instead.

use std::path::PathBuf;
use std::sync::OnceLock;

use crate::structured_log::{LogEmitter, LogLevel};

pub const LOG_ENV: &str = "STDPROMPT_LOG";
pub const LOG_LEVEL_ENV: &str = "STDPROMPT_LOG_LEVEL";

/// Destination for structured log records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LogTarget {
    #[default]
    Off,
    Stderr,
    File(PathBuf),
}

impl LogTarget {
    /// Parse from string. Case-insensitive for the keywords.
    #[must_use]
    pub fn from_str_loose(s: &str) -> Self {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "" | "off" | "none" | "0" | "false" => Self::Off,
            "stderr" | "2" => Self::Stderr,
            _ => Self::File(PathBuf::from(trimmed)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionConfig {
    pub log_target: LogTarget,
    pub log_level: LogLevel,
}

impl SessionConfig {
    /// Build from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let log_target = lookup(LOG_ENV)
            .map(|v| LogTarget::from_str_loose(&v))
            .unwrap_or_default();
        let log_level = lookup(LOG_LEVEL_ENV)
            .and_then(|v| LogLevel::from_str_loose(&v))
            .unwrap_or_default();
        Self {
            log_target,
            log_level,
        }
    }

    /// Open the configured log sink, if any.
    pub fn open_log(&self) -> std::io::Result<Option<LogEmitter>> {
        match &self.log_target {
            LogTarget::Off => Ok(None),
            LogTarget::Stderr => Ok(Some(LogEmitter::to_stderr(self.log_level))),
            LogTarget::File(path) => LogEmitter::to_file(path, self.log_level).map(Some),
        }
    }
}

static PROCESS_CONFIG: OnceLock<SessionConfig> = OnceLock::new();

/// Process-wide configuration (reads the environment on first call).
#[must_use]
pub fn process_config() -> &'static SessionConfig {
    PROCESS_CONFIG.get_or_init(SessionConfig::from_env)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn parse_log_targets() {
        assert_eq!(LogTarget::from_str_loose("off"), LogTarget::Off);
        assert_eq!(LogTarget::from_str_loose("OFF"), LogTarget::Off);
        assert_eq!(LogTarget::from_str_loose(""), LogTarget::Off);
        assert_eq!(LogTarget::from_str_loose("stderr"), LogTarget::Stderr);
        assert_eq!(LogTarget::from_str_loose("Stderr"), LogTarget::Stderr);
        assert_eq!(
            LogTarget::from_str_loose(" /tmp/prompt.jsonl "),
            LogTarget::File(PathBuf::from("/tmp/prompt.jsonl"))
        );
    }

    #[test]
    fn defaults_when_unset() {
        let config = SessionConfig::from_lookup(|_| None);
        assert_eq!(config, SessionConfig::default());
        assert_eq!(config.log_target, LogTarget::Off);
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(config.open_log().unwrap().is_none());
    }

    #[test]
    fn reads_both_variables() {
        let config = SessionConfig::from_lookup(lookup_from(&[
            (LOG_ENV, "stderr"),
            (LOG_LEVEL_ENV, "debug"),
        ]));
        assert_eq!(config.log_target, LogTarget::Stderr);
        assert_eq!(config.log_level, LogLevel::Debug);
        let emitter = config.open_log().unwrap().unwrap();
        assert_eq!(emitter.threshold(), LogLevel::Debug);
    }

    #[test]
    fn unknown_level_falls_back_to_default() {
        let config = SessionConfig::from_lookup(lookup_from(&[(LOG_LEVEL_ENV, "chatty")]));
        assert_eq!(config.log_level, LogLevel::Info);
    }
}
