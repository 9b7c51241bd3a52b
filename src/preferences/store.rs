//! Preference store trait and backends

use crate::error::PreferencesError;
use crate::preferences::types::{NotificationPreferences, PreferencesUpdate};
use crate::project::UserId;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};
use tracing::{debug, warn};

/// Storage for per-user notification preferences
///
/// Users with nothing stored get [`NotificationPreferences::default`].
pub trait PreferenceStore: Send + Sync {
    /// Load a user's preferences
    fn load(&self, user: &UserId) -> Result<NotificationPreferences, PreferencesError>;

    /// Replace a user's preferences
    fn save(
        &self,
        user: &UserId,
        prefs: &NotificationPreferences,
    ) -> Result<(), PreferencesError>;

    /// Merge a partial update into the stored preferences and persist the result
    ///
    /// Concurrent updates through one store never lose each other's fields.
    fn update(
        &self,
        user: &UserId,
        update: &PreferencesUpdate,
    ) -> Result<NotificationPreferences, PreferencesError> {
        let merged = self.load(user)?.merge(update);
        self.save(user, &merged)?;
        debug!(user = %user, "Preferences updated");
        Ok(merged)
    }

    /// Backend name (for logging)
    fn backend(&self) -> &'static str;
}

/// Box type alias for preference stores
pub type BoxedPreferenceStore = Box<dyn PreferenceStore>;

/// Process-local store
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    records: RwLock<HashMap<UserId, NotificationPreferences>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load(&self, user: &UserId) -> Result<NotificationPreferences, PreferencesError> {
        let records = self.records.read().map_err(|_| PreferencesError::Poisoned)?;
        Ok(records.get(user).copied().unwrap_or_default())
    }

    fn save(
        &self,
        user: &UserId,
        prefs: &NotificationPreferences,
    ) -> Result<(), PreferencesError> {
        let mut records = self.records.write().map_err(|_| PreferencesError::Poisoned)?;
        records.insert(user.clone(), *prefs);
        Ok(())
    }

    fn update(
        &self,
        user: &UserId,
        update: &PreferencesUpdate,
    ) -> Result<NotificationPreferences, PreferencesError> {
        let mut records = self.records.write().map_err(|_| PreferencesError::Poisoned)?;
        let merged = records.get(user).copied().unwrap_or_default().merge(update);
        records.insert(user.clone(), merged);
        debug!(user = %user, "Preferences updated");
        Ok(merged)
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

/// One JSON file per user under a directory
///
/// Files are named `userPreferences_<id>.json`. An unreadable record is logged and
/// treated as absent; write failures are errors. Updates are serialised within one
/// store instance only; separate processes sharing a directory are not coordinated.
#[derive(Debug)]
pub struct FilePreferenceStore {
    directory: PathBuf,
    update_lock: Mutex<()>,
}

impl FilePreferenceStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            update_lock: Mutex::new(()),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path of a user's record
    pub fn path_for(&self, user: &UserId) -> PathBuf {
        self.directory
            .join(format!("userPreferences_{}.json", file_key(user)))
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn load(&self, user: &UserId) -> Result<NotificationPreferences, PreferencesError> {
        let path = self.path_for(user);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Default::default()),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&contents) {
            Ok(prefs) => Ok(prefs),
            Err(e) => {
                warn!(
                    user = %user,
                    path = %path.display(),
                    error = %e,
                    "Ignoring unreadable preference record"
                );
                Ok(Default::default())
            }
        }
    }

    fn save(
        &self,
        user: &UserId,
        prefs: &NotificationPreferences,
    ) -> Result<(), PreferencesError> {
        fs::create_dir_all(&self.directory)?;

        let path = self.path_for(user);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(prefs)?)?;
        fs::rename(&tmp, &path)?;

        debug!(user = %user, path = %path.display(), "Preferences saved");
        Ok(())
    }

    fn update(
        &self,
        user: &UserId,
        update: &PreferencesUpdate,
    ) -> Result<NotificationPreferences, PreferencesError> {
        let _guard = self
            .update_lock
            .lock()
            .map_err(|_| PreferencesError::Poisoned)?;
        let merged = self.load(user)?.merge(update);
        self.save(user, &merged)?;
        debug!(user = %user, "Preferences updated");
        Ok(merged)
    }

    fn backend(&self) -> &'static str {
        "file"
    }
}

/// Filesystem-safe encoding of a user id; bytes outside `[A-Za-z0-9_-]` become `%XX`
fn file_key(user: &UserId) -> String {
    let mut key = String::with_capacity(user.as_str().len());
    for byte in user.as_str().bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
            key.push(byte as char);
        } else {
            key.push_str(&format!("%{:02X}", byte));
        }
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_key_escapes_separators() {
        assert_eq!(file_key(&UserId::from("u1")), "u1");
        assert_eq!(file_key(&UserId::from("a.b@x")), "a%2Eb%40x");
        assert_eq!(file_key(&UserId::from("../etc")), "%2E%2E%2Fetc");
    }

    #[test]
    fn test_memory_store_defaults_and_save() {
        let store = MemoryPreferenceStore::new();
        let user = UserId::from("u1");

        assert_eq!(store.load(&user).unwrap(), NotificationPreferences::default());

        let prefs = NotificationPreferences {
            weekly_digest: true,
            ..Default::default()
        };
        store.save(&user, &prefs).unwrap();
        assert_eq!(store.load(&user).unwrap(), prefs);
        assert_eq!(store.backend(), "memory");
    }
}
