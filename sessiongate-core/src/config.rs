//! Configuration management

use crate::error::{ErrorContext, SessionGateError, SessionGateResult};
use crate::logging::LoggingConfig;
use crate::validation_error;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Session store policy, fixed for the lifetime of a store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Time-to-live added to "now" on creation and refresh, in milliseconds
    pub ttl_ms: u64,
    /// Extend a live session's expiry every time it is resolved
    pub refresh_on_access: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_ms: 5_000,
            refresh_on_access: true,
        }
    }
}

impl SessionConfig {
    pub fn new(ttl: Duration, refresh_on_access: bool) -> Self {
        Self {
            ttl_ms: u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX),
            refresh_on_access,
        }
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }

    pub fn validate(&self) -> SessionGateResult<()> {
        if self.ttl_ms == 0 {
            return Err(validation_error!(
                "Session ttl_ms must be greater than 0",
                "session.ttl_ms",
                "config"
            ));
        }
        Ok(())
    }
}

/// File-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionGateConfig {
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}

impl SessionGateConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> SessionGateResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| SessionGateError::Config {
            message: format!("Failed to read config file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("read_file")
                .with_suggestion("Check if the config file exists and is readable"),
        })?;

        let config: SessionGateConfig =
            toml::from_str(&content).map_err(|e| SessionGateError::Config {
                message: format!("Failed to parse config: {}", e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("config")
                    .with_operation("parse_toml")
                    .with_suggestion("Check TOML syntax in config file"),
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> SessionGateResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| SessionGateError::Config {
            message: format!("Failed to serialize config: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config").with_operation("serialize_toml"),
        })?;

        std::fs::write(path, content).map_err(|e| SessionGateError::Config {
            message: format!("Failed to write config file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("write_file")
                .with_suggestion("Check if the directory exists and is writable"),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> SessionGateResult<()> {
        self.session.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.ttl(), Duration::from_secs(5));
        assert!(config.refresh_on_access);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_ttl_rejected() {
        let config = SessionConfig::new(Duration::ZERO, true);
        match config.validate() {
            Err(SessionGateError::Validation { field, .. }) => {
                assert_eq!(field.as_deref(), Some("session.ttl_ms"));
            }
            other => panic!("Expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sessiongate.toml");

        let mut config = SessionGateConfig::default();
        config.session = SessionConfig::new(Duration::from_millis(1500), false);
        config.save_to_file(&path).unwrap();

        let loaded = SessionGateConfig::from_file(&path).unwrap();
        assert_eq!(loaded.session, config.session);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.toml");
        std::fs::write(&path, "[session]\nrefresh_on_access = false\n").unwrap();

        let loaded = SessionGateConfig::from_file(&path).unwrap();
        assert_eq!(loaded.session.ttl_ms, 5_000);
        assert!(!loaded.session.refresh_on_access);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[session\nttl_ms = ").unwrap();

        let error = SessionGateConfig::from_file(&path).unwrap_err();
        assert!(matches!(error, SessionGateError::Config { .. }));
        assert_eq!(error.context().operation.as_deref(), Some("parse_toml"));
    }
}
