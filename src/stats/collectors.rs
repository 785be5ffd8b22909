// Wi-Fi Reminder - Statistics Collectors
// Copyright (C) 2026 Wi-Fi Reminder Developers
// SPDX-License-Identifier: MIT

//! Data collectors for cellular traffic counters.

use tracing::{debug, warn};

use super::models::TrafficCounters;
use crate::network::SysfsNet;

/// Source of the cumulative cellular byte counter.
pub trait TrafficSource {
    /// Cellular tx + rx bytes, zero when no counter is available.
    fn mobile_bytes(&self) -> u64;
}

/// Collector for cellular counters from sysfs.
#[derive(Debug, Clone)]
pub struct CellularTrafficCollector {
    net: SysfsNet,
}

impl CellularTrafficCollector {
    /// Create a new traffic collector.
    pub fn new(net: SysfsNet) -> Self {
        Self { net }
    }

    /// Per-interface counters of every cellular interface.
    pub fn snapshot(&self) -> Vec<TrafficCounters> {
        match self.net.cellular_counters() {
            Ok(counters) => counters,
            Err(e) => {
                warn!("Failed to read cellular counters: {:#}", e);
                Vec::new()
            }
        }
    }
}

impl TrafficSource for CellularTrafficCollector {
    fn mobile_bytes(&self) -> u64 {
        let counters = self.snapshot();
        let total = counters
            .iter()
            .map(TrafficCounters::total)
            .fold(0u64, u64::saturating_add);

        debug!("Cellular counters: {} interfaces, {} bytes", counters.len(), total);
        total
    }
}
