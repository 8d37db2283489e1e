//! Application configuration value object

use serde::{Deserialize, Serialize};

use crate::domain::alert::{NotificationRequest, Sound};

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub alerter_path: Option<String>,
    pub title: Option<String>,
    pub sound: Option<String>,
    pub timeout: Option<u32>,
    pub sender: Option<String>,
    pub group: Option<String>,
    pub app_icon: Option<String>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            alerter_path: None,
            title: None,
            sound: None,
            timeout: Some(0),
            sender: None,
            group: None,
            app_icon: None,
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            alerter_path: other.alerter_path.or(self.alerter_path),
            title: other.title.or(self.title),
            sound: other.sound.or(self.sound),
            timeout: other.timeout.or(self.timeout),
            sender: other.sender.or(self.sender),
            group: other.group.or(self.group),
            app_icon: other.app_icon.or(self.app_icon),
        }
    }

    /// Get sound as parsed Sound, or None (silent) if not set/invalid
    pub fn parsed_sound(&self) -> Option<Sound> {
        self.sound.as_ref().and_then(|s| s.parse().ok())
    }

    /// Get timeout in seconds, or 0 (no auto-close) if not set
    pub fn timeout_or_default(&self) -> u32 {
        self.timeout.unwrap_or(0)
    }

    /// Fill request fields the caller left unset with configured values
    pub fn apply_to(&self, request: &mut NotificationRequest) {
        if request.title.is_none() {
            request.title = self.title.clone();
        }
        if request.sound.is_none() {
            request.sound = self.parsed_sound();
        }
        if request.timeout == 0 {
            request.timeout = self.timeout_or_default();
        }
        if request.sender.is_none() {
            request.sender = self.sender.clone();
        }
        if request.group.is_none() {
            request.group = self.group.clone();
        }
        if request.app_icon.is_none() {
            request.app_icon = self.app_icon.clone();
        }
    }
}
