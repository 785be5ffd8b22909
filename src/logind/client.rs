// Wi-Fi Reminder - Logind D-Bus Client
// Copyright (C) 2026 Wi-Fi Reminder Developers
// SPDX-License-Identifier: MIT

//! systemd-logind D-Bus client for the session lock state.

use anyhow::{anyhow, Context, Result};
use tracing::{debug, warn};
use zbus::blocking::Connection;
use zbus::zvariant::{OwnedObjectPath, OwnedValue};

use crate::config::{AppSettings, LockBackend};

const LOGIND_BUS: &str = "org.freedesktop.login1";
const LOGIND_PATH: &str = "/org/freedesktop/login1";
const MANAGER_INTERFACE: &str = "org.freedesktop.login1.Manager";
const SESSION_INTERFACE: &str = "org.freedesktop.login1.Session";
/// Resolves to the session of the calling process.
const AUTO_SESSION_PATH: &str = "/org/freedesktop/login1/session/auto";

/// Source of the device lock state.
pub trait LockProbe {
    fn is_locked(&self) -> Result<bool>;

    /// Backend name for logs.
    fn name(&self) -> &'static str;

    /// Lock state, treating a failed probe as locked.
    fn device_locked(&self) -> bool {
        match self.is_locked() {
            Ok(locked) => locked,
            Err(e) => {
                warn!("Lock state via {} unavailable, assuming locked: {:#}", self.name(), e);
                true
            }
        }
    }
}

/// Probe for systems without a lock screen.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoLockProbe;

impl LockProbe for NoLockProbe {
    fn is_locked(&self) -> Result<bool> {
        Ok(false)
    }

    fn name(&self) -> &'static str {
        "none"
    }
}

/// A logind session owned by the current user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    pub id: String,
    pub active: bool,
    pub locked: bool,
}

/// The user counts as locked unless one of their active sessions is unlocked.
///
/// Returns `None` when the user has no sessions at all.
pub fn locked_from_sessions(sessions: &[SessionInfo]) -> Option<bool> {
    if sessions.is_empty() {
        return None;
    }
    Some(!sessions.iter().any(|s| s.active && !s.locked))
}

/// Client for interacting with systemd-logind via D-Bus.
#[derive(Debug, Default)]
pub struct LogindClient;

impl LogindClient {
    pub fn new() -> Self {
        Self
    }

    fn connect(&self) -> Result<Connection> {
        Connection::system().context("Failed to connect to system D-Bus")
    }

    /// Sessions of the current user with their lock state.
    pub fn user_sessions(&self) -> Result<Vec<SessionInfo>> {
        let conn = self.connect()?;
        let uid = current_uid();

        let listed: Vec<(String, u32, String, String, OwnedObjectPath)> = conn
            .call_method(Some(LOGIND_BUS), LOGIND_PATH, Some(MANAGER_INTERFACE), "ListSessions", &())
            .context("Failed to list logind sessions")?
            .body()
            .deserialize()?;

        let mut sessions = Vec::new();
        for (id, session_uid, _user, _seat, path) in listed {
            if session_uid != uid {
                continue;
            }
            let session = SessionInfo {
                id,
                active: get_session_bool(&conn, path.as_str(), "Active")?,
                locked: get_session_bool(&conn, path.as_str(), "LockedHint")?,
            };
            debug!("Session {}: active {}, locked {}", session.id, session.active, session.locked);
            sessions.push(session);
        }

        Ok(sessions)
    }
}

impl LockProbe for LogindClient {
    fn is_locked(&self) -> Result<bool> {
        let conn = self.connect()?;

        // A user service is usually not part of a session, so "auto" may not resolve.
        match get_session_bool(&conn, AUTO_SESSION_PATH, "LockedHint") {
            Ok(locked) => return Ok(locked),
            Err(e) => debug!("No caller session, checking user sessions: {:#}", e),
        }

        let sessions = self.user_sessions()?;
        locked_from_sessions(&sessions).ok_or_else(|| anyhow!("No logind session for current user"))
    }

    fn name(&self) -> &'static str {
        "logind"
    }
}

/// Build the lock probe selected in the settings.
pub fn lock_probe_from_settings(settings: &AppSettings) -> Box<dyn LockProbe> {
    match settings.lock_backend {
        LockBackend::Logind => Box::new(LogindClient::new()),
        LockBackend::None => Box::new(NoLockProbe),
    }
}

fn get_session_bool(conn: &Connection, path: &str, property: &str) -> Result<bool> {
    let value: OwnedValue = conn
        .call_method(
            Some(LOGIND_BUS),
            path,
            Some("org.freedesktop.DBus.Properties"),
            "Get",
            &(SESSION_INTERFACE, property),
        )?
        .body()
        .deserialize()?;

    let v: bool = value
        .try_into()
        .map_err(|_| anyhow!("Property {} is not a boolean", property))?;
    Ok(v)
}

fn current_uid() -> u32 {
    nix::unistd::getuid().as_raw()
}
