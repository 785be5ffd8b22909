// Wi-Fi Reminder - Notification Module
// Copyright (C) 2026 Wi-Fi Reminder Developers
// SPDX-License-Identifier: MIT

//! Maps monitor events to user-visible notifications.

mod desktop;
mod message;

use anyhow::Result;
use tracing::info;

pub use desktop::DesktopNotifier;
pub use message::{format_bytes, Notification};

use crate::config::AppSettings;
use crate::monitor::Event;

/// Consumer of monitor events.
pub trait Notifier {
    fn notify(&self, event: &Event) -> Result<()>;
}

/// Writes notifications to the log only.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, event: &Event) -> Result<()> {
        let notification = Notification::from_event(event);
        info!("{}: {}", notification.summary, notification.body);
        Ok(())
    }
}

/// Build the notifier selected in the settings.
pub fn notifier_from_settings(settings: &AppSettings) -> Box<dyn Notifier> {
    if settings.desktop_notifications {
        Box::new(DesktopNotifier::new())
    } else {
        Box::new(LogNotifier)
    }
}
