// Wi-Fi Reminder - Logind Module
// Copyright (C) 2026 Wi-Fi Reminder Developers
// SPDX-License-Identifier: MIT

//! Session lock state from systemd-logind.

mod client;

pub use client::{lock_probe_from_settings, LockProbe};
