// Wi-Fi Reminder - Desktop Notifications
// Copyright (C) 2026 Wi-Fi Reminder Developers
// SPDX-License-Identifier: MIT

//! freedesktop.org notification client over the session bus.

use std::collections::HashMap;

use anyhow::{Context, Result};
use tracing::{debug, warn};
use zbus::blocking::Connection;
use zbus::zvariant::Value;

use super::message::Notification;
use super::{LogNotifier, Notifier};
use crate::about;
use crate::monitor::Event;

const NOTIFICATIONS_BUS: &str = "org.freedesktop.Notifications";
const NOTIFICATIONS_PATH: &str = "/org/freedesktop/Notifications";
const NOTIFICATIONS_INTERFACE: &str = "org.freedesktop.Notifications";

/// Let the notification daemon pick the timeout.
const DEFAULT_TIMEOUT: i32 = -1;

/// Sends notifications to the desktop notification daemon.
///
/// When the daemon cannot be reached the notification is logged instead and
/// the error is returned to the caller.
#[derive(Debug, Default)]
pub struct DesktopNotifier {
    fallback: LogNotifier,
}

impl DesktopNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    fn send(&self, notification: &Notification) -> Result<u32> {
        let conn = Connection::session().context("Failed to connect to session D-Bus")?;

        let actions: Vec<&str> = Vec::new();
        let mut hints: HashMap<&str, Value> = HashMap::new();
        hints.insert("urgency", Value::from(notification.urgency.as_byte()));
        hints.insert("desktop-entry", Value::from(about::APP_ID));

        let id: u32 = conn
            .call_method(
                Some(NOTIFICATIONS_BUS),
                NOTIFICATIONS_PATH,
                Some(NOTIFICATIONS_INTERFACE),
                "Notify",
                &(
                    about::APP_NAME,
                    0u32,
                    notification.icon,
                    notification.summary.as_str(),
                    notification.body.as_str(),
                    actions,
                    hints,
                    DEFAULT_TIMEOUT,
                ),
            )
            .context("Failed to send desktop notification")?
            .body()
            .deserialize()?;

        Ok(id)
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&self, event: &Event) -> Result<()> {
        let notification = Notification::from_event(event);
        match self.send(&notification) {
            Ok(id) => {
                debug!("Desktop notification {} shown: {}", id, notification.summary);
                Ok(())
            }
            Err(e) => {
                warn!("Desktop notifications unavailable, logging instead");
                self.fallback.notify(event)?;
                Err(e)
            }
        }
    }
}
