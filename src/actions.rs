// Wi-Fi Reminder - User Actions
// Copyright (C) 2026 Wi-Fi Reminder Developers
// SPDX-License-Identifier: MIT

//! User-triggered actions offered next to a notification.
//!
//! - Mute for a while, or lift the mute
//! - Change the notification threshold
//! - Turn the Wi-Fi radio on through NetworkManager

use anyhow::Result;
use tracing::info;

use crate::clock::{format_millis, Clock};
use crate::config::minutes;
use crate::network::NetworkManagerClient;
use crate::notify::format_bytes;
use crate::storage::StateStore;

/// An action the user can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    Mute { minutes: u64 },
    Unmute,
    SetThreshold { megabytes: u64 },
    TurnOnWifi,
}

impl UserAction {
    pub fn id(&self) -> &'static str {
        match self {
            Self::Mute { .. } => "mute",
            Self::Unmute => "unmute",
            Self::SetThreshold { .. } => "set_threshold",
            Self::TurnOnWifi => "turn_on_wifi",
        }
    }
}

/// Result of an action execution.
#[derive(Debug)]
pub struct ActionResult {
    pub success: bool,
    pub message: String,
}

impl ActionResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Executes user actions against the persisted state and the system.
pub struct ActionsManager<'a> {
    store: &'a mut dyn StateStore,
    clock: &'a dyn Clock,
    network: NetworkManagerClient,
}

impl<'a> ActionsManager<'a> {
    pub fn new(store: &'a mut dyn StateStore, clock: &'a dyn Clock) -> Self {
        Self {
            store,
            clock,
            network: NetworkManagerClient::new(),
        }
    }

    /// Execute an action.
    pub fn execute(&mut self, action: UserAction) -> ActionResult {
        let result = match action {
            UserAction::Mute { minutes } => self.mute(minutes),
            UserAction::Unmute => self.unmute(),
            UserAction::SetThreshold { megabytes } => self.set_threshold(megabytes),
            UserAction::TurnOnWifi => self.turn_on_wifi(),
        };

        match result {
            Ok(msg) => {
                info!("Action {} completed successfully", action.id());
                ActionResult::success(msg)
            }
            Err(e) => {
                info!("Action {} failed: {}", action.id(), e);
                ActionResult::failure(format!("{:#}", e))
            }
        }
    }

    fn mute(&mut self, count: u64) -> Result<String> {
        let now = self.clock.now_millis();
        let mut state = self.store.load();
        state.mute_for(now, minutes(count));
        self.store.save(&state)?;

        Ok(format!("Muted until {}", format_millis(state.mute_until_millis)))
    }

    fn unmute(&mut self) -> Result<String> {
        let mut state = self.store.load();
        state.unmute();
        self.store.save(&state)?;

        Ok("Notifications unmuted".to_string())
    }

    fn set_threshold(&mut self, megabytes: u64) -> Result<String> {
        let mut state = self.store.load();
        state.set_threshold_megabytes(megabytes);
        self.store.save(&state)?;

        Ok(format!(
            "Notifying when mobile usage exceeds {} between checks",
            format_bytes(state.notify_threshold_bytes)
        ))
    }

    fn turn_on_wifi(&mut self) -> Result<String> {
        if self.network.wireless_enabled()? {
            return Ok("Wi-Fi is already enabled".to_string());
        }
        self.network.enable_wireless()?;
        Ok("Wi-Fi enabled".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::storage::MemoryStateStore;

    const NOW: i64 = 1_700_000_000_000;

    #[test]
    fn test_mute_sets_future_timestamp() {
        let mut store = MemoryStateStore::default();
        let clock = FixedClock(NOW);

        let result = ActionsManager::new(&mut store, &clock).execute(UserAction::Mute { minutes: 60 });

        assert!(result.success);
        assert_eq!(store.state.mute_until_millis, NOW + 3_600_000);
        assert!(store.state.is_muted(NOW + 3_599_999));
    }

    #[test]
    fn test_unmute_clears_mute() {
        let mut store = MemoryStateStore::default();
        store.state.mute_until_millis = NOW + 1_000;
        let clock = FixedClock(NOW);

        let result = ActionsManager::new(&mut store, &clock).execute(UserAction::Unmute);

        assert!(result.success);
        assert!(!store.state.is_muted(NOW));
    }

    #[test]
    fn test_set_threshold() {
        let mut store = MemoryStateStore::default();
        let clock = FixedClock(NOW);

        let result = ActionsManager::new(&mut store, &clock)
            .execute(UserAction::SetThreshold { megabytes: 50 });

        assert!(result.success);
        assert_eq!(store.state.notify_threshold_bytes, 50_000_000);
        assert!(result.message.contains("50 MB"));
    }

    #[test]
    fn test_mute_keeps_baseline() {
        let mut store = MemoryStateStore::default();
        store.state.total_mobile_usage_bytes = 1234;
        store.state.notify_counter = 5;
        let clock = FixedClock(NOW);

        ActionsManager::new(&mut store, &clock).execute(UserAction::Mute { minutes: 5 });

        assert_eq!(store.state.total_mobile_usage_bytes, 1234);
        assert_eq!(store.state.notify_counter, 5);
    }
}
