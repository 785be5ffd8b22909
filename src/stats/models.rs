// Wi-Fi Reminder - Statistics Models
// Copyright (C) 2026 Wi-Fi Reminder Developers
// SPDX-License-Identifier: MIT

//! Data structures for traffic statistics.

/// Cumulative byte counters of one interface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrafficCounters {
    pub interface: String,
    pub rx_bytes: u64,
    pub tx_bytes: u64,
}

impl TrafficCounters {
    /// Total bytes in both directions.
    pub fn total(&self) -> u64 {
        self.rx_bytes.saturating_add(self.tx_bytes)
    }
}
