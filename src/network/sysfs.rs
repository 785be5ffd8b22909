// Wi-Fi Reminder - Sysfs Network Introspection
// Copyright (C) 2026 Wi-Fi Reminder Developers
// SPDX-License-Identifier: MIT

//! Network interface introspection via sysfs.
//!
//! # Data Sources
//!
//! - `/sys/class/net/{iface}/operstate` - link state
//! - `/sys/class/net/{iface}/carrier` - carrier for point-to-point links
//! - `/sys/class/net/{iface}/uevent` - `DEVTYPE=wlan|wwan`
//! - `/sys/class/net/{iface}/wireless`, `phy80211` - 802.11 devices
//! - `/sys/class/net/{iface}/statistics/{rx,tx}_bytes` - traffic counters

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::interface::{Interface, InterfaceClassifier, InterfaceKind, KernelHints};
use super::{ConnectivityProbe, TransportFlags};
use crate::stats::models::TrafficCounters;

const SYS_CLASS_NET: &str = "/sys/class/net";

/// Reader for `/sys/class/net`.
#[derive(Debug, Clone)]
pub struct SysfsNet {
    root: PathBuf,
    classifier: InterfaceClassifier,
}

impl SysfsNet {
    pub fn new(classifier: InterfaceClassifier) -> Self {
        Self::with_root(SYS_CLASS_NET, classifier)
    }

    /// Read from a different root, e.g. a fixture directory.
    pub fn with_root(root: impl Into<PathBuf>, classifier: InterfaceClassifier) -> Self {
        Self {
            root: root.into(),
            classifier,
        }
    }

    /// All interfaces with their transport and link state.
    pub fn interfaces(&self) -> Result<Vec<Interface>> {
        let entries = fs::read_dir(&self.root)
            .with_context(|| format!("Failed to list {}", self.root.display()))?;

        let mut interfaces = Vec::new();
        for entry in entries.flatten() {
            let name = entry.file_name().to_string_lossy().into_owned();
            let dir = self.root.join(&name);

            let hints = read_hints(&dir);
            let mut iface = Interface::new(&name, self.classifier.classify(&name, &hints));
            iface.is_connected = is_link_up(&dir);
            interfaces.push(iface);
        }

        interfaces.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(interfaces)
    }

    /// Counters of every cellular interface.
    ///
    /// Counters that cannot be read count as zero.
    pub fn cellular_counters(&self) -> Result<Vec<TrafficCounters>> {
        Ok(self
            .interfaces()?
            .iter()
            .filter(|iface| iface.kind == InterfaceKind::Cellular)
            .map(|iface| self.interface_counters(&iface.name))
            .collect())
    }

    /// rx and tx bytes of one interface.
    pub fn interface_counters(&self, name: &str) -> TrafficCounters {
        let stats = self.root.join(name).join("statistics");
        TrafficCounters {
            interface: name.to_string(),
            rx_bytes: read_counter(&stats.join("rx_bytes")),
            tx_bytes: read_counter(&stats.join("tx_bytes")),
        }
    }
}

fn read_hints(dir: &Path) -> KernelHints {
    let devtype = fs::read_to_string(dir.join("uevent"))
        .ok()
        .and_then(|content| {
            content
                .lines()
                .find_map(|line| line.strip_prefix("DEVTYPE=").map(|v| v.trim().to_string()))
        });

    KernelHints {
        devtype,
        has_wireless_dir: dir.join("wireless").exists() || dir.join("phy80211").exists(),
    }
}

fn is_link_up(dir: &Path) -> bool {
    let operstate = fs::read_to_string(dir.join("operstate")).unwrap_or_default();
    match operstate.trim() {
        "up" => true,
        // Point-to-point links (ppp, some modems) report "unknown" while carrying traffic.
        "unknown" => fs::read_to_string(dir.join("carrier"))
            .map(|c| c.trim() == "1")
            .unwrap_or(false),
        _ => false,
    }
}

fn read_counter(path: &Path) -> u64 {
    fs::read_to_string(path)
        .ok()
        .and_then(|content| content.trim().parse::<u64>().ok())
        .unwrap_or(0)
}

/// Connectivity probe backed by sysfs link state.
#[derive(Debug, Clone)]
pub struct SysfsProbe {
    net: SysfsNet,
}

impl SysfsProbe {
    pub fn new(net: SysfsNet) -> Self {
        Self { net }
    }
}

impl ConnectivityProbe for SysfsProbe {
    fn transports(&self) -> Result<TransportFlags> {
        let mut flags = TransportFlags::default();
        for iface in self.net.interfaces()? {
            if !iface.is_connected {
                continue;
            }
            match iface.kind {
                InterfaceKind::Wifi => flags.wifi = true,
                InterfaceKind::Cellular => flags.mobile = true,
                InterfaceKind::Loopback | InterfaceKind::Other => {}
            }
        }
        Ok(flags)
    }

    fn name(&self) -> &'static str {
        "sysfs"
    }
}


#[cfg(test)]
mod tests {
    use super::fixture::add_interface;
    use super::*;
    use crate::monitor::NetworkState;

    fn classifier() -> InterfaceClassifier {
        InterfaceClassifier::new(vec!["wwan".into(), "ppp".into()], vec!["wl".into()])
    }

    #[test]
    fn test_mobile_only() {
        let dir = tempfile::tempdir().unwrap();
        add_interface(dir.path(), "lo", "unknown", 10, 10);
        add_interface(dir.path(), "wlan0", "down", 0, 0);
        add_interface(dir.path(), "wwan0", "up", 1000, 500);

        let probe = SysfsProbe::new(SysfsNet::with_root(dir.path(), classifier()));
        assert_eq!(probe.network_state(), NetworkState::MobileOnly);
    }

    #[test]
    fn test_wifi_and_mobile() {
        let dir = tempfile::tempdir().unwrap();
        add_interface(dir.path(), "wlan0", "up", 0, 0);
        add_interface(dir.path(), "wwan0", "up", 0, 0);

        let probe = SysfsProbe::new(SysfsNet::with_root(dir.path(), classifier()));
        assert_eq!(probe.network_state(), NetworkState::Both);
    }

    #[test]
    fn test_ppp_with_carrier_is_connected() {
        let dir = tempfile::tempdir().unwrap();
        add_interface(dir.path(), "ppp0", "unknown", 0, 0);
        fs::write(dir.path().join("ppp0").join("carrier"), "1\n").unwrap();

        let net = SysfsNet::with_root(dir.path(), classifier());
        let ifaces = net.interfaces().unwrap();
        assert_eq!(ifaces.len(), 1);
        assert!(ifaces[0].is_connected);
        assert_eq!(ifaces[0].kind, InterfaceKind::Cellular);
    }

    #[test]
    fn test_wireless_dir_marks_wifi() {
        let dir = tempfile::tempdir().unwrap();
        add_interface(dir.path(), "ath0", "up", 0, 0);
        fs::create_dir_all(dir.path().join("ath0").join("wireless")).unwrap();

        let probe = SysfsProbe::new(SysfsNet::with_root(dir.path(), classifier()));
        assert_eq!(probe.network_state(), NetworkState::WifiOnly);
    }

    #[test]
    fn test_cellular_counters_skip_other_interfaces() {
        let dir = tempfile::tempdir().unwrap();
        add_interface(dir.path(), "wlan0", "up", 9_000, 9_000);
        add_interface(dir.path(), "wwan0", "up", 1_000, 500);
        add_interface(dir.path(), "ppp0", "down", 200, 100);

        let net = SysfsNet::with_root(dir.path(), classifier());
        let counters = net.cellular_counters().unwrap();
        let names: Vec<&str> = counters.iter().map(|c| c.interface.as_str()).collect();
        assert_eq!(names, vec!["ppp0", "wwan0"]);
        assert_eq!(counters.iter().map(TrafficCounters::total).sum::<u64>(), 1_800);
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let net = SysfsNet::with_root(dir.path().join("missing"), classifier());
        assert!(net.interfaces().is_err());

        let probe = SysfsProbe::new(net);
        assert_eq!(probe.network_state(), NetworkState::Neither);
    }
}
