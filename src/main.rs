// Wi-Fi Reminder - Main Entry Point
// Copyright (C) 2026 Wi-Fi Reminder Developers
// SPDX-License-Identifier: MIT

//! Wi-Fi Reminder - notifies when mobile data keeps flowing while Wi-Fi could be used.

use anyhow::{anyhow, Result};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod about;
mod actions;
mod checker;
mod cli;
mod clock;
mod config;
mod logind;
mod monitor;
mod network;
mod notify;
mod stats;
mod storage;
mod timer;

use actions::{ActionsManager, UserAction};
use checker::Checker;
use cli::{Cli, Command};
use clock::{format_millis, Clock, SystemClock};
use config::{AppSettings, Settings};
use monitor::UsageMonitor;
use network::{classifier_from_settings, SysfsNet};
use stats::{CellularTrafficCollector, TrafficSource};
use storage::{JsonStateStore, StateStore};

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // Initialize logging
    let default_level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = match &cli.config {
        Some(path) => Settings::load(path),
        None => Settings::new(),
    };
    debug!("Settings loaded from {}", settings.path().display());
    let app = settings.get();

    let mut store = match &cli.state {
        Some(path) => JsonStateStore::with_path(path),
        None => JsonStateStore::new(),
    };

    match cli.command() {
        Command::Check => {
            let mut checker = build_checker(app, store);
            checker.run_once()?;
            Ok(())
        }
        Command::Status => print_status(app, &mut store),
        Command::Mute { minutes } => {
            let minutes = minutes.unwrap_or(app.mute_minutes);
            run_action(&mut store, UserAction::Mute { minutes })
        }
        Command::Unmute => run_action(&mut store, UserAction::Unmute),
        Command::Threshold { megabytes } => {
            run_action(&mut store, UserAction::SetThreshold { megabytes })
        }
        Command::WifiOn => run_action(&mut store, UserAction::TurnOnWifi),
        Command::InstallTimer => {
            timer::install_timer(app.check_interval_secs)?;
            println!("Checking every {} seconds", app.check_interval_secs);
            Ok(())
        }
        Command::RemoveTimer => {
            timer::remove_timer()?;
            println!("Timer removed");
            Ok(())
        }
    }
}

fn build_checker(app: &AppSettings, store: JsonStateStore) -> Checker {
    let net = SysfsNet::new(classifier_from_settings(app));
    Checker::new(
        UsageMonitor::new(app.policy()),
        Box::new(CellularTrafficCollector::new(net)),
        network::probe_from_settings(app),
        logind::lock_probe_from_settings(app),
        Box::new(SystemClock),
        Box::new(store),
        notify::notifier_from_settings(app),
    )
}

fn run_action(store: &mut JsonStateStore, action: UserAction) -> Result<()> {
    let clock = SystemClock;
    let result = ActionsManager::new(store, &clock).execute(action);
    if result.success {
        println!("{}", result.message);
        Ok(())
    } else {
        Err(anyhow!(result.message))
    }
}

fn print_status(app: &AppSettings, store: &mut JsonStateStore) -> Result<()> {
    let state = store.load();
    let now = SystemClock.now_millis();

    let collector = CellularTrafficCollector::new(SysfsNet::new(classifier_from_settings(app)));
    let network = network::probe_from_settings(app).network_state();
    let locked = logind::lock_probe_from_settings(app).device_locked();

    println!("{} {}", about::APP_NAME, about::VERSION);
    println!("State file:      {}", store.path().display());
    println!("Threshold:       {}", notify::format_bytes(state.notify_threshold_bytes));
    println!("Notifications:   {}", state.notify_counter);
    if state.last_verified_time_millis > 0 {
        println!("Last check:      {}", format_millis(state.last_verified_time_millis));
    } else {
        println!("Last check:      never");
    }
    if state.is_muted(now) {
        println!("Muted until:     {}", format_millis(state.mute_until_millis));
    }
    println!("Timer installed: {}", if timer::is_timer_installed() { "yes" } else { "no" });
    println!();
    println!("Network:         {}", network);
    println!("Session locked:  {}", if locked { "yes" } else { "no" });

    let counters = collector.snapshot();
    if counters.is_empty() {
        println!("Cellular:        no cellular interface found");
    }
    for c in &counters {
        println!(
            "Cellular:        {} rx {} tx {}",
            c.interface,
            notify::format_bytes(c.rx_bytes),
            notify::format_bytes(c.tx_bytes)
        );
    }
    let current = collector.mobile_bytes();
    println!(
        "Since baseline:  {}",
        notify::format_bytes(current.saturating_sub(state.total_mobile_usage_bytes))
    );

    Ok(())
}
