//! Configuration types for pm-access
//!
//! This module defines the configuration structure that can be loaded from
//! TOML files and/or environment variables.

use crate::error::ConfigError;
use serde::Deserialize;
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Logging configuration
    pub logging: LoggingConfig,

    /// Preference storage
    pub preferences: PreferencesConfig,
}

/// Preference store configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PreferencesConfig {
    /// Storage backend
    pub backend: PreferencesBackend,

    /// Directory for the file backend (defaults to the platform data directory)
    pub directory: Option<String>,
}

impl PreferencesConfig {
    /// Directory the file backend writes to, with `~` expanded
    pub fn resolve_directory(&self) -> Result<PathBuf, ConfigError> {
        if let Some(dir) = &self.directory {
            return Ok(PathBuf::from(shellexpand::tilde(dir).as_ref()));
        }

        dirs::data_dir()
            .map(|base| base.join("pm-access").join("preferences"))
            .ok_or_else(|| ConfigError::Missing {
                field: "preferences.directory (no platform data directory available)".to_string(),
            })
    }
}

/// Preference storage backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreferencesBackend {
    /// Kept in process memory, lost on exit
    #[default]
    Memory,
    /// One JSON file per user
    File,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Output format (pretty, json)
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable output
    #[default]
    Pretty,
    /// JSON structured output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(config.preferences.backend, PreferencesBackend::Memory);
        assert!(config.preferences.directory.is_none());
    }

    #[test]
    fn test_deserialize_backend() {
        let backend: PreferencesBackend = serde_json::from_str(r#""file""#).unwrap();
        assert_eq!(backend, PreferencesBackend::File);

        let backend: PreferencesBackend = serde_json::from_str(r#""memory""#).unwrap();
        assert_eq!(backend, PreferencesBackend::Memory);
    }

    #[test]
    fn test_explicit_directory_is_used() {
        let config = PreferencesConfig {
            backend: PreferencesBackend::File,
            directory: Some("/var/lib/pm-access".to_string()),
        };
        assert_eq!(
            config.resolve_directory().unwrap(),
            PathBuf::from("/var/lib/pm-access")
        );
    }

    #[test]
    fn test_tilde_directory_resolves() {
        let config = PreferencesConfig {
            backend: PreferencesBackend::File,
            directory: Some("~/prefs".to_string()),
        };
        let resolved = config.resolve_directory().unwrap();
        assert!(resolved.ends_with("prefs"));
    }
}
