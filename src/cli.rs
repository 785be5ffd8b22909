// Wi-Fi Reminder - Command Line
// Copyright (C) 2026 Wi-Fi Reminder Developers
// SPDX-License-Identifier: MIT

//! Command line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "Reminds you to switch to Wi-Fi when mobile data usage grows")]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Path to the settings file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the state file
    #[arg(short, long, global = true)]
    pub state: Option<PathBuf>,

    /// Subcommand, `check` when omitted
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run one check and notify if mobile usage exceeded the threshold
    Check,
    /// Show the stored state and what the probes currently see
    Status,
    /// Silence notifications for a while
    Mute {
        /// Minutes to stay silent, defaults to the configured mute duration
        #[arg(short, long)]
        minutes: Option<u64>,
    },
    /// Lift an active mute
    Unmute,
    /// Set the usage between checks that triggers a notification
    Threshold {
        /// Threshold in megabytes
        megabytes: u64,
    },
    /// Turn the Wi-Fi radio on
    WifiOn,
    /// Install a systemd user timer that runs `check` periodically
    InstallTimer,
    /// Remove the systemd user timer
    RemoveTimer,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// The subcommand to run.
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Check)
    }
}
