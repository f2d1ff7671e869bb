//! Configuration schema for MedSched.

use serde::{Deserialize, Serialize};

/// Root config for the scheduler.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct MedschedConfig {
    #[serde(default, rename = "$schema")]
    pub schema: Option<String>,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub reminders: ReminderConfig,
}

impl MedschedConfig {
    /// Start building a config programmatically with defaults applied.
    pub fn builder() -> MedschedConfigBuilder {
        MedschedConfigBuilder::new()
    }
}

/// Builder for assembling a `MedschedConfig` in code.
#[derive(Debug, Default, Clone)]
pub struct MedschedConfigBuilder {
    config: MedschedConfig,
}

impl MedschedConfigBuilder {
    /// Create a new builder seeded with default config values.
    pub fn new() -> Self {
        Self {
            config: MedschedConfig::default(),
        }
    }

    /// Replace the terminal UI configuration.
    pub fn ui(mut self, ui: UiConfig) -> Self {
        self.config.ui = ui;
        self
    }

    /// Replace the reminder configuration.
    pub fn reminders(mut self, reminders: ReminderConfig) -> Self {
        self.config.reminders = reminders;
        self
    }

    /// Finalize and return the built `MedschedConfig`.
    pub fn build(self) -> MedschedConfig {
        self.config
    }
}

/// Terminal UI settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UiConfig {
    /// Title shown in the header.
    #[serde(default = "default_ui_title")]
    pub title: String,
    /// Number of diagnostics retained for the status history.
    #[serde(default = "default_status_history")]
    pub status_history: usize,
    /// Input poll interval in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            title: default_ui_title(),
            status_history: default_status_history(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

fn default_ui_title() -> String {
    "Medical Appointment Scheduler".to_string()
}

fn default_status_history() -> usize {
    50
}

fn default_poll_interval_ms() -> u64 {
    100
}

/// Reminder pop-up settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReminderConfig {
    /// Title of the reminder pop-up.
    #[serde(default = "default_reminder_title")]
    pub title: String,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            title: default_reminder_title(),
        }
    }
}

fn default_reminder_title() -> String {
    "Reminder".to_string()
}
