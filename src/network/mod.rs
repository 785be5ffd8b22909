// Wi-Fi Reminder - Network Module
// Copyright (C) 2026 Wi-Fi Reminder Developers
// SPDX-License-Identifier: MIT

//! Connectivity detection: which transports currently carry traffic.
//!
//! ```text
//! NetworkManager (D-Bus) ─┐
//!                         ├→ TransportFlags → NetworkState
//! sysfs link state ───────┘
//! ```
//!
//! Any probe failure degrades to [`NetworkState::Neither`], which
//! suppresses notifications.

mod interface;
mod networkmanager;
mod sysfs;

use anyhow::Result;
use tracing::{debug, warn};

pub use interface::InterfaceClassifier;
pub use networkmanager::NetworkManagerClient;
pub use sysfs::{SysfsNet, SysfsProbe};

#[cfg(test)]
pub(crate) use sysfs::fixture;

use crate::config::{AppSettings, ConnectivityBackend};
use crate::monitor::NetworkState;

/// Connected state per transport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransportFlags {
    pub wifi: bool,
    pub mobile: bool,
}

impl TransportFlags {
    pub fn network_state(&self) -> NetworkState {
        NetworkState::from_transports(self.wifi, self.mobile)
    }
}

/// Source of connectivity information.
pub trait ConnectivityProbe {
    /// Raw per-transport connectivity.
    fn transports(&self) -> Result<TransportFlags>;

    /// Backend name for logs.
    fn name(&self) -> &'static str;

    /// Connectivity as a [`NetworkState`], `Neither` when detection fails.
    fn network_state(&self) -> NetworkState {
        match self.transports() {
            Ok(flags) => {
                let state = flags.network_state();
                debug!("Network state from {}: {}", self.name(), state);
                state
            }
            Err(e) => {
                warn!("Connectivity detection via {} failed: {:#}", self.name(), e);
                NetworkState::Neither
            }
        }
    }
}

/// Tries each probe in order until one succeeds.
pub struct FallbackProbe {
    probes: Vec<Box<dyn ConnectivityProbe>>,
}

impl FallbackProbe {
    pub fn new(probes: Vec<Box<dyn ConnectivityProbe>>) -> Self {
        Self { probes }
    }
}

impl ConnectivityProbe for FallbackProbe {
    fn transports(&self) -> Result<TransportFlags> {
        let mut last_error = anyhow::anyhow!("No connectivity probe configured");
        for probe in &self.probes {
            match probe.transports() {
                Ok(flags) => return Ok(flags),
                Err(e) => {
                    debug!("{} probe failed, trying next: {:#}", probe.name(), e);
                    last_error = e;
                }
            }
        }
        Err(last_error)
    }

    fn name(&self) -> &'static str {
        "auto"
    }
}

/// Interface classifier from the configured name prefixes.
pub fn classifier_from_settings(settings: &AppSettings) -> InterfaceClassifier {
    InterfaceClassifier::new(
        settings.cellular_interface_prefixes.clone(),
        settings.wifi_interface_prefixes.clone(),
    )
}

/// Build the connectivity probe selected in the settings.
pub fn probe_from_settings(settings: &AppSettings) -> Box<dyn ConnectivityProbe> {
    let sysfs = SysfsProbe::new(SysfsNet::new(classifier_from_settings(settings)));
    match settings.connectivity_backend {
        ConnectivityBackend::Sysfs => Box::new(sysfs),
        ConnectivityBackend::NetworkManager => Box::new(NetworkManagerClient::new()),
        ConnectivityBackend::Auto => Box::new(FallbackProbe::new(vec![
            Box::new(NetworkManagerClient::new()),
            Box::new(sysfs),
        ])),
    }
}
