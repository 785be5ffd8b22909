// Wi-Fi Reminder - Interface Model
// Copyright (C) 2026 Wi-Fi Reminder Developers
// SPDX-License-Identifier: MIT

//! Network interface model and transport classification.

/// Transport behind a network interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterfaceKind {
    Wifi,
    Cellular,
    Loopback,
    #[default]
    Other,
}

/// A network interface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Interface {
    pub name: String,
    pub kind: InterfaceKind,
    pub is_connected: bool,
}

impl Interface {
    /// Create a new interface.
    pub fn new(name: &str, kind: InterfaceKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            ..Default::default()
        }
    }
}

/// Hints the kernel exposes about an interface.
#[derive(Debug, Clone, Default)]
pub struct KernelHints {
    /// `DEVTYPE` from the interface uevent, if any.
    pub devtype: Option<String>,
    /// The interface has a `wireless` or `phy80211` entry.
    pub has_wireless_dir: bool,
}

/// Classifies interfaces by kernel hints, then by name prefix.
#[derive(Debug, Clone)]
pub struct InterfaceClassifier {
    cellular_prefixes: Vec<String>,
    wifi_prefixes: Vec<String>,
}

impl InterfaceClassifier {
    pub fn new(cellular_prefixes: Vec<String>, wifi_prefixes: Vec<String>) -> Self {
        Self { cellular_prefixes, wifi_prefixes }
    }

    pub fn classify(&self, name: &str, hints: &KernelHints) -> InterfaceKind {
        if name == "lo" {
            return InterfaceKind::Loopback;
        }

        match hints.devtype.as_deref() {
            Some("wlan") => return InterfaceKind::Wifi,
            Some("wwan") => return InterfaceKind::Cellular,
            _ => {}
        }

        if hints.has_wireless_dir {
            return InterfaceKind::Wifi;
        }

        if self.wifi_prefixes.iter().any(|p| name.starts_with(p.as_str())) {
            InterfaceKind::Wifi
        } else if self.cellular_prefixes.iter().any(|p| name.starts_with(p.as_str())) {
            InterfaceKind::Cellular
        } else {
            InterfaceKind::Other
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> InterfaceClassifier {
        InterfaceClassifier::new(
            vec!["wwan".into(), "ww".into(), "rmnet".into(), "ppp".into()],
            vec!["wl".into()],
        )
    }

    #[test]
    fn test_classify_by_prefix() {
        let c = classifier();
        let none = KernelHints::default();
        assert_eq!(c.classify("wlp2s0", &none), InterfaceKind::Wifi);
        assert_eq!(c.classify("wwan0", &none), InterfaceKind::Cellular);
        assert_eq!(c.classify("wwp0s20f0u6", &none), InterfaceKind::Cellular);
        assert_eq!(c.classify("rmnet_data0", &none), InterfaceKind::Cellular);
        assert_eq!(c.classify("ppp0", &none), InterfaceKind::Cellular);
        assert_eq!(c.classify("enp3s0", &none), InterfaceKind::Other);
        assert_eq!(c.classify("lo", &none), InterfaceKind::Loopback);
    }

    #[test]
    fn test_kernel_hints_win_over_names() {
        let c = classifier();
        let wwan = KernelHints { devtype: Some("wwan".into()), has_wireless_dir: false };
        assert_eq!(c.classify("usb0", &wwan), InterfaceKind::Cellular);

        let wireless = KernelHints { devtype: None, has_wireless_dir: true };
        assert_eq!(c.classify("ath0", &wireless), InterfaceKind::Wifi);
    }
}
