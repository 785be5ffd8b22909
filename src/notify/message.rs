// Wi-Fi Reminder - Notification Messages
// Copyright (C) 2026 Wi-Fi Reminder Developers
// SPDX-License-Identifier: MIT

//! Text of the notifications shown for each event.

use crate::about;
use crate::monitor::Event;

/// Notification urgency levels of the freedesktop notification spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    Normal,
    Critical,
}

impl Urgency {
    /// Value of the `urgency` hint.
    pub fn as_byte(&self) -> u8 {
        match self {
            Self::Normal => 1,
            Self::Critical => 2,
        }
    }
}

/// A rendered notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub summary: String,
    pub body: String,
    pub icon: &'static str,
    pub urgency: Urgency,
}

impl Notification {
    pub fn from_event(event: &Event) -> Self {
        match event {
            Event::UsageExceeded { diff_bytes } => Self {
                summary: "Are you using mobile data?".to_string(),
                body: format!(
                    "You used {} of mobile data since the last check. \
                     Turn on Wi-Fi with `{} wifi-on` or silence this for an hour with `{} mute`.",
                    format_bytes(*diff_bytes),
                    about::BINARY_NAME,
                    about::BINARY_NAME,
                ),
                icon: "network-cellular-signal-excellent-symbolic",
                urgency: Urgency::Critical,
            },
            Event::PeriodicPrompt { counter } => Self {
                summary: format!("Enjoying {}?", about::APP_NAME),
                body: format!(
                    "{} has warned you about mobile data {} times. \
                     Star it at {}, donate at {} or with Bitcoin to {}. \
                     Feedback: {}",
                    about::APP_NAME,
                    counter,
                    about::REPOSITORY,
                    about::DONATION_URL,
                    about::BITCOIN_WALLET,
                    about::CONTACT_EMAIL,
                ),
                icon: "emblem-favorite-symbolic",
                urgency: Urgency::Normal,
            },
        }
    }
}

/// Format a byte count with 1000-based units, e.g. `4.2 MB`.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["kB", "MB", "GB", "TB", "PB"];

    if bytes < 1000 {
        return format!("{} B", bytes);
    }

    // Units and precision follow the rounded value, so 999_999 B is 1.0 MB.
    let mut value = bytes as f64 / 1000.0;
    let mut unit = 0;
    loop {
        let tenths = (value * 10.0).round() / 10.0;
        let (shown, decimals) = if tenths < 10.0 {
            (tenths, 1)
        } else {
            (value.round(), 0)
        };

        if shown >= 1000.0 && unit < UNITS.len() - 1 {
            value /= 1000.0;
            unit += 1;
            continue;
        }

        return format!("{:.*} {}", decimals, shown, UNITS[unit]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(999), "999 B");
        assert_eq!(format_bytes(1_000), "1.0 kB");
        assert_eq!(format_bytes(4_000), "4.0 kB");
        assert_eq!(format_bytes(12_600_000), "13 MB");
        assert_eq!(format_bytes(4_200_000), "4.2 MB");
        assert_eq!(format_bytes(3_000_000_000), "3.0 GB");
    }

    #[test]
    fn test_format_bytes_rounds_into_next_unit() {
        assert_eq!(format_bytes(999_499), "999 kB");
        assert_eq!(format_bytes(999_999), "1.0 MB");
        assert_eq!(format_bytes(9_940_000), "9.9 MB");
        assert_eq!(format_bytes(9_999_999), "10 MB");
        assert_eq!(format_bytes(999_999_999), "1.0 GB");
    }

    #[test]
    fn test_usage_notification() {
        let n = Notification::from_event(&Event::UsageExceeded { diff_bytes: 15_000_000 });
        assert_eq!(n.urgency, Urgency::Critical);
        assert!(n.body.contains("15 MB"));
        assert!(n.body.contains("wifi-reminder mute"));
    }

    #[test]
    fn test_prompt_notification() {
        let n = Notification::from_event(&Event::PeriodicPrompt { counter: 20 });
        assert_eq!(n.urgency, Urgency::Normal);
        assert!(n.body.contains("20 times"));
        assert!(n.body.contains(about::REPOSITORY));
        assert!(n.body.contains(about::DONATION_URL));
        assert!(n.body.contains(about::BITCOIN_WALLET));
        assert!(n.body.contains(about::CONTACT_EMAIL));
    }
}
