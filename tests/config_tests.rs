//! Configuration loading tests

use pm_access::config::{LogFormat, PreferencesBackend, load_config, load_config_from_str};
use serial_test::serial;
use std::io::Write;

const MINIMAL_CONFIG: &str = r#"
[logging]
level = "warn"
"#;

const FULL_CONFIG: &str = r#"
[logging]
level = "debug"
format = "json"

[preferences]
backend = "file"
directory = "/tmp/pm-access-prefs"
"#;

#[test]
fn test_minimal_config() {
    let config = load_config_from_str(MINIMAL_CONFIG).unwrap();

    assert_eq!(config.logging.level, "warn");
    assert_eq!(config.logging.format, LogFormat::Pretty);
    assert_eq!(config.preferences.backend, PreferencesBackend::Memory);
}

#[test]
fn test_full_config() {
    let config = load_config_from_str(FULL_CONFIG).unwrap();

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, LogFormat::Json);
    assert_eq!(config.preferences.backend, PreferencesBackend::File);
    assert_eq!(
        config.preferences.directory.as_deref(),
        Some("/tmp/pm-access-prefs")
    );
}

#[test]
fn test_unknown_backend_is_rejected() {
    let toml = r#"
[preferences]
backend = "redis"
"#;
    assert!(load_config_from_str(toml).is_err());
}

#[test]
fn test_uppercase_log_level_is_accepted() {
    let toml = r#"
[logging]
level = "INFO"
"#;
    assert!(load_config_from_str(toml).is_ok());
}

#[test]
#[serial]
fn test_load_from_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(FULL_CONFIG.as_bytes()).unwrap();

    let config = load_config(file.path().to_str()).unwrap();
    assert_eq!(config.preferences.backend, PreferencesBackend::File);
    assert_eq!(config.logging.format, LogFormat::Json);
}

#[test]
#[serial]
fn test_environment_overrides_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(FULL_CONFIG.as_bytes()).unwrap();

    // SAFETY: serialised with every other test that touches the environment
    unsafe {
        std::env::set_var("PM_ACCESS_LOGGING__LEVEL", "trace");
    }
    let result = load_config(file.path().to_str());
    unsafe {
        std::env::remove_var("PM_ACCESS_LOGGING__LEVEL");
    }

    let config = result.unwrap();
    assert_eq!(config.logging.level, "trace");
    assert_eq!(config.logging.format, LogFormat::Json);
}

#[test]
#[serial]
fn test_invalid_environment_value_is_rejected() {
    // SAFETY: serialised with every other test that touches the environment
    unsafe {
        std::env::set_var("PM_ACCESS_LOGGING__LEVEL", "loud");
    }
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(MINIMAL_CONFIG.as_bytes()).unwrap();
    let result = load_config(file.path().to_str());
    unsafe {
        std::env::remove_var("PM_ACCESS_LOGGING__LEVEL");
    }

    assert!(result.is_err());
}
