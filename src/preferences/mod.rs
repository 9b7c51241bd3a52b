//! Notification preferences
//!
//! Per-user settings kept behind the [`PreferenceStore`] trait, so callers choose the
//! backend through configuration instead of reaching for ambient storage.

pub mod store;
pub mod types;

pub use store::{
    BoxedPreferenceStore, FilePreferenceStore, MemoryPreferenceStore, PreferenceStore,
};
pub use types::{NotificationPreferences, PreferencesUpdate};

use crate::config::{PreferencesBackend, PreferencesConfig};
use crate::error::ConfigError;
use tracing::info;

/// Create a preference store from configuration
pub fn create_preference_store(
    config: &PreferencesConfig,
) -> Result<BoxedPreferenceStore, ConfigError> {
    match config.backend {
        PreferencesBackend::Memory => {
            info!(backend = "memory", "Using in-memory preference store");
            Ok(Box::new(MemoryPreferenceStore::new()))
        }
        PreferencesBackend::File => {
            let directory = config.resolve_directory()?;
            info!(backend = "file", directory = %directory.display(), "Using file preference store");
            Ok(Box::new(FilePreferenceStore::new(directory)))
        }
    }
}
