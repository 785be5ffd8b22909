// Wi-Fi Reminder - Usage Monitor Module
// Copyright (C) 2026 Wi-Fi Reminder Developers
// SPDX-License-Identifier: MIT

//! Decision core: given a fresh reading of the device, decide whether mobile
//! data usage since the last check deserves a notification.

mod state;
mod usage;

pub use state::{MonitorState, NetworkState, Reading};
pub use usage::{Evaluation, Event, MonitorPolicy, SkipReason, UsageMonitor};
