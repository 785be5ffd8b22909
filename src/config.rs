// Wi-Fi Reminder - Configuration
// Copyright (C) 2026 Wi-Fi Reminder Developers
// SPDX-License-Identifier: MIT

//! Application settings management using a local JSON file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::monitor::MonitorPolicy;

/// How connectivity is detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConnectivityBackend {
    /// NetworkManager, falling back to sysfs when it is unreachable.
    Auto,
    NetworkManager,
    Sysfs,
}

/// How the session lock state is detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LockBackend {
    Logind,
    /// Assume the session is never locked.
    None,
}

/// Application settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Interval of the installed systemd timer.
    #[serde(default = "default_check_interval")]
    pub check_interval_secs: u64,
    /// Gap after which a check does not judge usage.
    #[serde(default = "default_stale_window")]
    pub stale_window_secs: u64,
    /// Duration of the mute action.
    #[serde(default = "default_mute_minutes")]
    pub mute_minutes: u64,
    /// Show the periodic prompt every Nth notification.
    #[serde(default = "default_prompt_every")]
    pub prompt_every: u32,
    /// Stop periodic prompts once this many notifications were shown.
    #[serde(default = "default_prompt_cap")]
    pub prompt_cap: u32,
    #[serde(default = "default_connectivity_backend")]
    pub connectivity_backend: ConnectivityBackend,
    #[serde(default = "default_lock_backend")]
    pub lock_backend: LockBackend,
    /// Interface name prefixes counted as cellular.
    #[serde(default = "default_cellular_prefixes")]
    pub cellular_interface_prefixes: Vec<String>,
    /// Interface name prefixes counted as Wi-Fi.
    #[serde(default = "default_wifi_prefixes")]
    pub wifi_interface_prefixes: Vec<String>,
    /// Send notifications to the desktop notification daemon.
    #[serde(default = "default_desktop_notifications")]
    pub desktop_notifications: bool,
}

fn default_check_interval() -> u64 { 120 }
fn default_stale_window() -> u64 { 600 }
fn default_mute_minutes() -> u64 { 60 }
fn default_prompt_every() -> u32 { 10 }
fn default_prompt_cap() -> u32 { 31 }
fn default_connectivity_backend() -> ConnectivityBackend { ConnectivityBackend::Auto }
fn default_lock_backend() -> LockBackend { LockBackend::Logind }
fn default_cellular_prefixes() -> Vec<String> {
    ["wwan", "ww", "rmnet", "ppp"].iter().map(|s| s.to_string()).collect()
}
fn default_wifi_prefixes() -> Vec<String> { vec!["wl".to_string()] }
fn default_desktop_notifications() -> bool { true }

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            check_interval_secs: default_check_interval(),
            stale_window_secs: default_stale_window(),
            mute_minutes: default_mute_minutes(),
            prompt_every: default_prompt_every(),
            prompt_cap: default_prompt_cap(),
            connectivity_backend: default_connectivity_backend(),
            lock_backend: default_lock_backend(),
            cellular_interface_prefixes: default_cellular_prefixes(),
            wifi_interface_prefixes: default_wifi_prefixes(),
            desktop_notifications: default_desktop_notifications(),
        }
    }
}

impl AppSettings {
    /// Decision tunables for the usage monitor.
    pub fn policy(&self) -> MonitorPolicy {
        MonitorPolicy {
            stale_window_millis: i64::try_from(self.stale_window_secs.saturating_mul(1000))
                .unwrap_or(i64::MAX),
            prompt_every: self.prompt_every,
            prompt_cap: self.prompt_cap,
        }
    }
}

/// Clamp a minute count into a `chrono::Duration`.
pub fn minutes(count: u64) -> chrono::Duration {
    let count = i64::try_from(count).unwrap_or(i64::MAX).min(i64::MAX / 60_000);
    chrono::Duration::minutes(count)
}

/// Settings manager that persists to a JSON file.
#[derive(Debug)]
pub struct Settings {
    settings: AppSettings,
    path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

impl Settings {
    /// Load settings from the default per-user location.
    pub fn new() -> Self {
        let path = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wifi-reminder")
            .join("settings.json");

        Self::load(path)
    }

    /// Load settings from an explicit path.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let settings = if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => {
                    match serde_json::from_str(&content) {
                        Ok(s) => s,
                        Err(e) => {
                            warn!("Failed to parse settings: {}", e);
                            AppSettings::default()
                        }
                    }
                }
                Err(e) => {
                    warn!("Failed to read settings: {}", e);
                    AppSettings::default()
                }
            }
        } else {
            AppSettings::default()
        };

        Self { settings, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self) -> &AppSettings {
        &self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(dir.path().join("settings.json"));
        assert_eq!(settings.get(), &AppSettings::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(
            &path,
            r#"{ "mute_minutes": 15, "connectivity_backend": "sysfs", "lock_backend": "none" }"#,
        )
        .unwrap();

        let settings = Settings::load(&path);
        let app = settings.get();
        assert_eq!(app.mute_minutes, 15);
        assert_eq!(app.connectivity_backend, ConnectivityBackend::Sysfs);
        assert_eq!(app.lock_backend, LockBackend::None);
        assert_eq!(app.check_interval_secs, 120);
        assert_eq!(app.cellular_interface_prefixes, default_cellular_prefixes());
    }

    #[test]
    fn test_invalid_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "mute_minutes = 15").unwrap();

        assert_eq!(Settings::load(&path).get(), &AppSettings::default());
    }

    #[test]
    fn test_policy_from_settings() {
        let app = AppSettings {
            stale_window_secs: 300,
            prompt_every: 5,
            prompt_cap: 21,
            ..Default::default()
        };

        let policy = app.policy();
        assert_eq!(policy.stale_window_millis, 300_000);
        assert_eq!(policy.prompt_every, 5);
        assert_eq!(policy.prompt_cap, 21);
        assert_eq!(AppSettings::default().policy(), MonitorPolicy::default());
    }

    #[test]
    fn test_mute_duration() {
        assert_eq!(minutes(AppSettings::default().mute_minutes), chrono::Duration::hours(1));
        assert_eq!(minutes(u64::MAX), chrono::Duration::minutes(i64::MAX / 60_000));
    }
}
