// Wi-Fi Reminder - Clock
// Copyright (C) 2026 Wi-Fi Reminder Developers
// SPDX-License-Identifier: MIT

//! Wall clock source for evaluation cycles.

use chrono::Utc;

/// Source of the current epoch time.
pub trait Clock {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;
}

/// The system wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// A clock frozen at a given instant.
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

#[cfg(test)]
impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}

/// Render epoch milliseconds as local time.
pub fn format_millis(millis: i64) -> String {
    match chrono::DateTime::<Utc>::from_timestamp_millis(millis) {
        Some(utc) => utc
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        None => "invalid time".to_string(),
    }
}
