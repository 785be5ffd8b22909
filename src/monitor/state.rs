// Wi-Fi Reminder - Monitor State
// Copyright (C) 2026 Wi-Fi Reminder Developers
// SPDX-License-Identifier: MIT

//! Persisted baseline and the per-cycle inputs of the usage monitor.

use std::fmt;

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Users configure the threshold in megabytes of 1,000,000 bytes.
pub const BYTES_PER_MEGABYTE: u64 = 1_000_000;

/// Persisted monitor state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorState {
    /// Cellular bytes (tx + rx) recorded at the last baseline reset.
    #[serde(default)]
    pub total_mobile_usage_bytes: u64,
    /// Epoch milliseconds of the last baseline reset.
    #[serde(default)]
    pub last_verified_time_millis: i64,
    /// Notifications are suppressed until this epoch millisecond.
    #[serde(default)]
    pub mute_until_millis: i64,
    /// Usage since the last check above this value triggers a notification.
    #[serde(default = "default_threshold")]
    pub notify_threshold_bytes: u64,
    /// Number of usage notifications shown so far.
    #[serde(default)]
    pub notify_counter: u32,
}

fn default_threshold() -> u64 { 10 * BYTES_PER_MEGABYTE }

impl Default for MonitorState {
    fn default() -> Self {
        Self {
            total_mobile_usage_bytes: 0,
            last_verified_time_millis: 0,
            mute_until_millis: 0,
            notify_threshold_bytes: default_threshold(),
            notify_counter: 0,
        }
    }
}

impl MonitorState {
    /// Move the baseline to the current counter and time.
    pub fn reset_baseline(&mut self, current_mobile_bytes: u64, now_millis: i64) {
        self.total_mobile_usage_bytes = current_mobile_bytes;
        self.last_verified_time_millis = now_millis;
    }

    /// Whether notifications are muted at `now_millis`.
    pub fn is_muted(&self, now_millis: i64) -> bool {
        now_millis < self.mute_until_millis
    }

    /// Suppress notifications for `duration` starting at `now_millis`.
    pub fn mute_for(&mut self, now_millis: i64, duration: Duration) {
        self.mute_until_millis = now_millis.saturating_add(duration.num_milliseconds());
    }

    /// Lift any active mute.
    pub fn unmute(&mut self) {
        self.mute_until_millis = 0;
    }

    /// Set the notification threshold in megabytes.
    pub fn set_threshold_megabytes(&mut self, megabytes: u64) {
        self.notify_threshold_bytes = megabytes.saturating_mul(BYTES_PER_MEGABYTE);
    }
}

/// Which transports currently have a connected network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NetworkState {
    WifiOnly,
    MobileOnly,
    Both,
    Neither,
}

impl NetworkState {
    /// Combine per-transport connectivity into a network state.
    pub fn from_transports(wifi_connected: bool, mobile_connected: bool) -> Self {
        match (wifi_connected, mobile_connected) {
            (true, false) => Self::WifiOnly,
            (false, true) => Self::MobileOnly,
            (true, true) => Self::Both,
            (false, false) => Self::Neither,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WifiOnly => "Wi-Fi only",
            Self::MobileOnly => "mobile only",
            Self::Both => "Wi-Fi and mobile",
            Self::Neither => "offline",
        }
    }
}

impl fmt::Display for NetworkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything one evaluation cycle reads from the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reading {
    /// Cumulative cellular tx + rx bytes.
    pub current_mobile_bytes: u64,
    pub device_locked: bool,
    pub network: NetworkState,
    pub now_millis: i64,
}
