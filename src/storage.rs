// Wi-Fi Reminder - Storage
// Copyright (C) 2026 Wi-Fi Reminder Developers
// SPDX-License-Identifier: MIT

//! Persistent storage for the monitor baseline, counters and mute state.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::monitor::MonitorState;

/// Typed store for [`MonitorState`].
///
/// Loading never fails: a missing or unreadable store yields the defaults.
pub trait StateStore {
    fn load(&mut self) -> MonitorState;
    fn save(&mut self, state: &MonitorState) -> Result<()>;
}

/// Monitor state kept in a JSON file.
#[derive(Debug)]
pub struct JsonStateStore {
    path: PathBuf,
}

impl Default for JsonStateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonStateStore {
    /// Store at the default per-user state location.
    pub fn new() -> Self {
        let path = dirs::state_dir()
            .or_else(dirs::data_local_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wifi-reminder")
            .join("state.json");

        Self { path }
    }

    /// Store at an explicit path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl StateStore for JsonStateStore {
    fn load(&mut self) -> MonitorState {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!("Failed to read monitor state: {}", e);
                }
                return MonitorState::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(state) => state,
            Err(e) => {
                warn!("Failed to parse monitor state: {}", e);
                MonitorState::default()
            }
        }
    }

    fn save(&mut self, state: &MonitorState) -> Result<()> {
        #[cfg(unix)]
        use std::os::unix::fs::PermissionsExt;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let content = serde_json::to_string_pretty(state)
            .context("Failed to serialize monitor state")?;

        // Readers only ever see a complete file.
        let tmp = self.temp_path();
        let mut file = fs::File::create(&tmp)
            .with_context(|| format!("Failed to create {}", tmp.display()))?;
        #[cfg(unix)]
        {
            if let Err(e) = file.set_permissions(fs::Permissions::from_mode(0o600)) {
                warn!("Failed to set file permissions: {}", e);
            }
        }
        file.write_all(content.as_bytes())
            .and_then(|_| file.sync_all())
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        drop(file);

        fs::rename(&tmp, &self.path)
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;

        debug!("Saved monitor state to {}", self.path.display());
        Ok(())
    }
}

/// In-memory store, used by tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    pub state: MonitorState,
    pub saves: usize,
}

#[cfg(test)]
impl StateStore for MemoryStateStore {
    fn load(&mut self) -> MonitorState {
        self.state.clone()
    }

    fn save(&mut self, state: &MonitorState) -> Result<()> {
        self.state = state.clone();
        self.saves += 1;
        Ok(())
    }
}
