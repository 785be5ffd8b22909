// Wi-Fi Reminder - Statistics Module
// Copyright (C) 2026 Wi-Fi Reminder Developers
// SPDX-License-Identifier: MIT

//! Cellular traffic counter collection.

mod collectors;
pub mod models;

pub use collectors::{CellularTrafficCollector, TrafficSource};
