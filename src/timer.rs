// Wi-Fi Reminder - Timer Management
// Copyright (C) 2026 Wi-Fi Reminder Developers
// SPDX-License-Identifier: MIT

//! Manages the systemd user timer that runs a check periodically.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{anyhow, Context, Result};
use tracing::info;

use crate::about;

const SERVICE_NAME: &str = "wifi-reminder.service";
const TIMER_NAME: &str = "wifi-reminder.timer";

/// Get the path to the systemd user unit directory.
fn unit_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("systemd").join("user"))
}

/// Content of the oneshot service running a single check.
pub fn service_unit(exe: &Path) -> String {
    format!(
        r#"[Unit]
Description={} mobile data check
Documentation={}

[Service]
Type=oneshot
ExecStart="{}" check
"#,
        about::APP_NAME,
        about::REPOSITORY,
        exe.display()
    )
}

/// Content of the timer triggering the service every `interval_secs`.
pub fn timer_unit(interval_secs: u64) -> String {
    let interval = interval_secs.max(1);
    format!(
        r#"[Unit]
Description=Run {} every {} seconds

[Timer]
OnBootSec=2min
OnUnitActiveSec={}s
AccuracySec=10s

[Install]
WantedBy=timers.target
"#,
        about::APP_NAME,
        interval,
        interval
    )
}

/// Check if the timer unit is installed.
pub fn is_timer_installed() -> bool {
    unit_dir()
        .map(|dir| dir.join(TIMER_NAME).exists())
        .unwrap_or(false)
}

/// Install and start the timer.
pub fn install_timer(interval_secs: u64) -> Result<()> {
    let dir = unit_dir().ok_or_else(|| anyhow!("Could not determine systemd user unit directory"))?;
    let exe = std::env::current_exe().context("Failed to locate the current executable")?;

    write_units(&dir, &exe, interval_secs)?;

    run_systemctl_user(&["daemon-reload"])?;
    run_systemctl_user(&["enable", "--now", TIMER_NAME])?;

    info!("Timer installed in {}", dir.display());
    Ok(())
}

/// Stop the timer and remove its units.
pub fn remove_timer() -> Result<()> {
    let Some(dir) = unit_dir() else {
        return Ok(());
    };

    if dir.join(TIMER_NAME).exists() {
        // The timer may already be stopped; removal continues regardless.
        if let Err(e) = run_systemctl_user(&["disable", "--now", TIMER_NAME]) {
            info!("Could not disable timer: {:#}", e);
        }
    }

    let removed = remove_units(&dir)?;
    if removed {
        run_systemctl_user(&["daemon-reload"])?;
        info!("Timer removed from {}", dir.display());
    }
    Ok(())
}

fn write_units(dir: &Path, exe: &Path, interval_secs: u64) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    for (name, content) in [
        (SERVICE_NAME, service_unit(exe)),
        (TIMER_NAME, timer_unit(interval_secs)),
    ] {
        let path = dir.join(name);
        let mut file = fs::File::create(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        file.write_all(content.as_bytes())
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }
    Ok(())
}

fn remove_units(dir: &Path) -> Result<bool> {
    let mut removed = false;
    for name in [TIMER_NAME, SERVICE_NAME] {
        let path = dir.join(name);
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove {}", path.display()))?;
            removed = true;
        }
    }
    Ok(removed)
}

/// Run a `systemctl --user` command.
fn run_systemctl_user(args: &[&str]) -> Result<()> {
    let output = Command::new("systemctl")
        .arg("--user")
        .args(args)
        .output()
        .with_context(|| format!("Failed to execute systemctl --user {}", args.join(" ")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(anyhow!("systemctl --user {} failed: {}", args.join(" "), stderr.trim()));
    }

    Ok(())
}
