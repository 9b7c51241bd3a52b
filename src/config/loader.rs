//! Configuration loader with layered sources
//!
//! Loads configuration from multiple sources with the following precedence
//! (highest to lowest):
//! 1. Environment variables (PM_ACCESS_*)
//! 2. Configuration file (TOML)
//! 3. Default values

use crate::config::types::{AppConfig, PreferencesBackend};
use crate::error::ConfigError;
use config::{Config, Environment, File, FileFormat};
use std::path::Path;

/// Default configuration file paths to check (in order)
const DEFAULT_CONFIG_PATHS: &[&str] = &[
    "pm-access.toml",
    ".pm-access.toml",
    "~/.config/pm-access/config.toml",
    "/etc/pm-access/config.toml",
];

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Load configuration from a TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from_str(toml_str, FileFormat::Toml))
        .build()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// Load configuration from files and environment
pub fn load_config(config_path: Option<&str>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. Start with defaults (handled by serde defaults on AppConfig)

    // 2. Add configuration file
    if let Some(path) = config_path {
        // Explicit path provided - must exist
        let expanded = shellexpand::tilde(path);
        if !Path::new(expanded.as_ref()).exists() {
            return Err(ConfigError::Load(format!(
                "Configuration file not found: {}",
                path
            )));
        }
        builder = builder.add_source(File::new(&expanded, FileFormat::Toml));
    } else {
        // Try default paths (first existing one wins)
        for path in DEFAULT_CONFIG_PATHS {
            let expanded = shellexpand::tilde(path);
            if Path::new(expanded.as_ref()).exists() {
                builder = builder.add_source(File::new(&expanded, FileFormat::Toml));
                break;
            }
        }
    }

    // 3. Add environment variables with PM_ACCESS_ prefix
    // e.g., PM_ACCESS_LOGGING__LEVEL, PM_ACCESS_PREFERENCES__BACKEND
    // Double underscore (__) maps to nested keys (logging.level)
    builder = builder.add_source(
        Environment::with_prefix("PM_ACCESS")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder
        .build()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// Validate configuration values
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    let level = config.logging.level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        return Err(ConfigError::Invalid {
            message: format!(
                "logging.level must be one of {}, got: {}",
                LOG_LEVELS.join(", "),
                config.logging.level
            ),
        });
    }

    if config.preferences.backend == PreferencesBackend::File {
        if let Some(dir) = &config.preferences.directory
            && dir.trim().is_empty()
        {
            return Err(ConfigError::Invalid {
                message: "preferences.directory must not be empty".to_string(),
            });
        }
        config.preferences.resolve_directory()?;
    }

    Ok(())
}
