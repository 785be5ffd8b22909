// Wi-Fi Reminder - Usage Monitor
// Copyright (C) 2026 Wi-Fi Reminder Developers
// SPDX-License-Identifier: MIT

//! Threshold decision over the persisted baseline.
//!
//! One call to [`UsageMonitor::evaluate`] is one cycle. The order of checks:
//!
//! ```text
//! locked? → mobile only? → counter available? → stale window? → muted? → diff > threshold?
//! ```
//!
//! The first three checks leave the state untouched. Every later exit moves
//! the baseline to the current counter, so the next cycle only measures
//! usage that happened after this one.

use std::fmt;

use tracing::debug;

use super::state::{MonitorState, NetworkState, Reading};

/// Something the notification layer should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Mobile usage since the last check went over the threshold.
    UsageExceeded { diff_bytes: u64 },
    /// Occasional prompt to rate or support the project.
    PeriodicPrompt { counter: u32 },
}

/// Why a cycle did not judge usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    DeviceLocked,
    NotMobileOnly(NetworkState),
    /// The cellular byte counter reads zero.
    CounterUnavailable,
    /// Too much time passed since the last check.
    StaleWindow,
    Muted,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeviceLocked => f.write_str("device is locked"),
            Self::NotMobileOnly(network) => write!(f, "network is {}", network),
            Self::CounterUnavailable => f.write_str("mobile byte counter unavailable"),
            Self::StaleWindow => f.write_str("last check is too old"),
            Self::Muted => f.write_str("notifications are muted"),
        }
    }
}

/// Outcome of one evaluation cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evaluation {
    Skipped(SkipReason),
    /// Usage was judged; the list is empty when it stayed under the threshold.
    Evaluated(Vec<Event>),
}

impl Evaluation {
    /// Events to dispatch, empty for skipped cycles.
    pub fn events(&self) -> &[Event] {
        match self {
            Self::Skipped(_) => &[],
            Self::Evaluated(events) => events,
        }
    }
}

/// Tunables of the decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorPolicy {
    /// Gap after which usage is not judged.
    pub stale_window_millis: i64,
    /// A periodic prompt accompanies every Nth notification.
    pub prompt_every: u32,
    /// No periodic prompt once the counter reaches this value.
    pub prompt_cap: u32,
}

impl Default for MonitorPolicy {
    fn default() -> Self {
        Self {
            stale_window_millis: 10 * 60 * 1000,
            prompt_every: 10,
            prompt_cap: 31,
        }
    }
}

/// The usage-threshold monitor.
#[derive(Debug, Clone, Default)]
pub struct UsageMonitor {
    policy: MonitorPolicy,
}

impl UsageMonitor {
    pub fn new(policy: MonitorPolicy) -> Self {
        Self { policy }
    }

    /// Run one cycle against `state`, mutating it in place.
    pub fn evaluate(&self, reading: &Reading, state: &mut MonitorState) -> Evaluation {
        if reading.device_locked {
            return Evaluation::Skipped(SkipReason::DeviceLocked);
        }

        if reading.network != NetworkState::MobileOnly {
            return Evaluation::Skipped(SkipReason::NotMobileOnly(reading.network));
        }

        if reading.current_mobile_bytes == 0 {
            return Evaluation::Skipped(SkipReason::CounterUnavailable);
        }

        let elapsed = reading
            .now_millis
            .saturating_sub(state.last_verified_time_millis);
        if elapsed > self.policy.stale_window_millis {
            debug!("Last check was {} ms ago, resetting baseline", elapsed);
            state.reset_baseline(reading.current_mobile_bytes, reading.now_millis);
            return Evaluation::Skipped(SkipReason::StaleWindow);
        }

        if state.is_muted(reading.now_millis) {
            state.reset_baseline(reading.current_mobile_bytes, reading.now_millis);
            return Evaluation::Skipped(SkipReason::Muted);
        }

        // Counters restart from zero after a reboot; that reads as no usage.
        let diff = reading
            .current_mobile_bytes
            .saturating_sub(state.total_mobile_usage_bytes);

        let mut events = Vec::new();
        if diff > state.notify_threshold_bytes {
            events.push(Event::UsageExceeded { diff_bytes: diff });

            state.notify_counter = state.notify_counter.saturating_add(1);
            if self.is_prompt_due(state.notify_counter) {
                events.push(Event::PeriodicPrompt {
                    counter: state.notify_counter,
                });
            }
        }

        state.reset_baseline(reading.current_mobile_bytes, reading.now_millis);
        Evaluation::Evaluated(events)
    }

    /// Periodic prompts use the counter after it was incremented.
    fn is_prompt_due(&self, counter: u32) -> bool {
        self.policy.prompt_every != 0
            && counter < self.policy.prompt_cap
            && counter % self.policy.prompt_every == 0
    }
}
