//! Error types for pm-access
//!
//! This module defines the error hierarchy used throughout the crate.
//! Access resolution itself never fails; errors arise only at the guard boundary
//! (a route rejecting a request), in configuration loading, and in preference storage.

use serde_json::{Value, json};
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Access denied: {0}")]
    Access(#[from] AccessError),

    #[error("Preferences error: {0}")]
    Preferences(#[from] PreferencesError),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(String),

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    #[error("Missing required configuration: {field}")]
    Missing { field: String },
}

/// Guard rejections, carrying the HTTP status a route handler should answer with
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Project ID required")]
    ProjectRequired,

    #[error("{reason}")]
    Forbidden {
        /// Requirement that was not met (`view`, `edit`, `executive_leader`, ...)
        required: String,
        reason: String,
    },
}

impl AccessError {
    pub fn forbidden(required: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Forbidden {
            required: required.into(),
            reason: reason.into(),
        }
    }

    /// Standard rejection for an unmet project requirement
    pub fn insufficient(required: impl Into<String>) -> Self {
        let required = required.into();
        let reason = format!("Insufficient permissions for {}", required);
        Self::Forbidden { required, reason }
    }

    pub const fn status_code(&self) -> u16 {
        match self {
            AccessError::Unauthenticated => 401,
            AccessError::ProjectRequired => 400,
            AccessError::Forbidden { .. } => 403,
        }
    }

    /// JSON body returned alongside [`status_code`](Self::status_code)
    pub fn to_response_body(&self) -> Value {
        match self {
            AccessError::Forbidden { required, reason } => json!({
                "success": false,
                "error": reason,
                "requiredLevel": required,
            }),
            other => json!({
                "success": false,
                "error": other.to_string(),
            }),
        }
    }
}

/// Preference store errors
#[derive(Error, Debug)]
pub enum PreferencesError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Preference store lock poisoned")]
    Poisoned,
}

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, AppError>;

/// Result type alias for guard checks
pub type AccessResult<T> = std::result::Result<T, AccessError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AccessError::Unauthenticated.status_code(), 401);
        assert_eq!(AccessError::ProjectRequired.status_code(), 400);
        assert_eq!(AccessError::insufficient("edit").status_code(), 403);
    }

    #[test]
    fn test_insufficient_reason() {
        let err = AccessError::insufficient("manage_team");
        assert_eq!(err.to_string(), "Insufficient permissions for manage_team");
    }

    #[test]
    fn test_response_body() {
        let body = AccessError::insufficient("edit").to_response_body();
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["requiredLevel"], json!("edit"));

        let body = AccessError::Unauthenticated.to_response_body();
        assert_eq!(body["error"], json!("Authentication required"));
        assert!(body.get("requiredLevel").is_none());
    }

    #[test]
    fn test_concern_errors_convert_into_app_error() {
        fn guarded() -> Result<()> {
            Err(AccessError::ProjectRequired)?
        }
        fn stored() -> Result<()> {
            Err(PreferencesError::Poisoned)?
        }
        fn configured() -> Result<()> {
            Err(ConfigError::Missing {
                field: "preferences.directory".to_string(),
            })?
        }

        assert!(matches!(
            guarded(),
            Err(AppError::Access(AccessError::ProjectRequired))
        ));
        assert!(matches!(stored(), Err(AppError::Preferences(_))));
        let err = configured().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: Missing required configuration: preferences.directory"
        );
    }
}
