// Wi-Fi Reminder - About
// Copyright (C) 2026 Wi-Fi Reminder Developers
// SPDX-License-Identifier: MIT

//! Project metadata shown to users.

pub const APP_NAME: &str = "Wi-Fi Reminder";
pub const APP_ID: &str = "com.douglaspac.wifireminder";
pub const BINARY_NAME: &str = "wifi-reminder";
pub const REPOSITORY: &str = "https://github.com/pacdouglas/WiFiReminder";
pub const CONTACT_EMAIL: &str = "douglas.pac@gmail.com";
pub const DONATION_URL: &str = "https://app.picpay.com/user/douglas.martins.pac";
pub const BITCOIN_WALLET: &str = "3KbNqQ127uWWVs3eD6oD5apkuZPpjk1fCF";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
