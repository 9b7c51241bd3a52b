//! Preference record types

use serde::{Deserialize, Serialize};

/// Notification settings for one user
///
/// Stored records may be partial; missing fields take the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NotificationPreferences {
    pub email_notifications: bool,
    pub push_notifications: bool,
    pub project_updates: bool,
    pub weekly_digest: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            email_notifications: true,
            push_notifications: true,
            project_updates: true,
            weekly_digest: false,
        }
    }
}

impl NotificationPreferences {
    /// Apply the fields set in an update
    pub fn merge(mut self, update: &PreferencesUpdate) -> Self {
        if let Some(v) = update.email_notifications {
            self.email_notifications = v;
        }
        if let Some(v) = update.push_notifications {
            self.push_notifications = v;
        }
        if let Some(v) = update.project_updates {
            self.project_updates = v;
        }
        if let Some(v) = update.weekly_digest {
            self.weekly_digest = v;
        }
        self
    }
}

/// Partial change to a user's preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PreferencesUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_notifications: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub push_notifications: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_updates: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekly_digest: Option<bool>,
}

impl PreferencesUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
