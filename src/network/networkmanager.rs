// Wi-Fi Reminder - NetworkManager D-Bus Client
// Copyright (C) 2026 Wi-Fi Reminder Developers
// SPDX-License-Identifier: MIT

//! NetworkManager D-Bus client for connectivity and the Wi-Fi radio.

use anyhow::{anyhow, Context, Result};
use tracing::{debug, info};
use zbus::blocking::Connection;
use zbus::zvariant::{OwnedObjectPath, OwnedValue, Value};

use super::{ConnectivityProbe, TransportFlags};

const NM_BUS: &str = "org.freedesktop.NetworkManager";
const NM_PATH: &str = "/org/freedesktop/NetworkManager";
const NM_INTERFACE: &str = "org.freedesktop.NetworkManager";
const DEVICE_INTERFACE: &str = "org.freedesktop.NetworkManager.Device";
const PROPERTIES_INTERFACE: &str = "org.freedesktop.DBus.Properties";

/// `NM_DEVICE_TYPE_WIFI`.
const DEVICE_TYPE_WIFI: u32 = 2;
/// `NM_DEVICE_TYPE_MODEM`, used for WWAN modems managed by ModemManager.
const DEVICE_TYPE_MODEM: u32 = 8;
/// `NM_DEVICE_STATE_ACTIVATED`.
const DEVICE_STATE_ACTIVATED: u32 = 100;

/// A device as reported by NetworkManager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub device_type: u32,
    pub state: u32,
}

impl DeviceInfo {
    pub fn is_activated(&self) -> bool {
        self.state == DEVICE_STATE_ACTIVATED
    }
}

/// Fold activated devices into per-transport connectivity.
pub fn transports_from_devices(devices: &[DeviceInfo]) -> TransportFlags {
    let mut flags = TransportFlags::default();
    for device in devices.iter().filter(|d| d.is_activated()) {
        match device.device_type {
            DEVICE_TYPE_WIFI => flags.wifi = true,
            DEVICE_TYPE_MODEM => flags.mobile = true,
            _ => {}
        }
    }
    flags
}

/// Client for interacting with NetworkManager via the system bus.
#[derive(Debug, Default)]
pub struct NetworkManagerClient;

impl NetworkManagerClient {
    pub fn new() -> Self {
        Self
    }

    fn connect(&self) -> Result<Connection> {
        Connection::system().context("Failed to connect to system D-Bus")
    }

    /// List all devices with their type and state.
    pub fn devices(&self) -> Result<Vec<DeviceInfo>> {
        let conn = self.connect()?;

        let paths: Vec<OwnedObjectPath> = conn
            .call_method(Some(NM_BUS), NM_PATH, Some(NM_INTERFACE), "GetDevices", &())
            .context("Failed to list devices. Is NetworkManager running?")?
            .body()
            .deserialize()?;

        let mut devices = Vec::with_capacity(paths.len());
        for path in paths {
            let device_type = get_device_u32(&conn, &path, "DeviceType")?;
            let state = get_device_u32(&conn, &path, "State")?;
            debug!("Device {}: type {}, state {}", path.as_str(), device_type, state);
            devices.push(DeviceInfo { device_type, state });
        }

        Ok(devices)
    }

    /// Whether the Wi-Fi radio is enabled.
    pub fn wireless_enabled(&self) -> Result<bool> {
        let conn = self.connect()?;

        let value: OwnedValue = conn
            .call_method(
                Some(NM_BUS),
                NM_PATH,
                Some(PROPERTIES_INTERFACE),
                "Get",
                &(NM_INTERFACE, "WirelessEnabled"),
            )?
            .body()
            .deserialize()?;

        let enabled: bool = value
            .try_into()
            .map_err(|_| anyhow!("WirelessEnabled is not a boolean"))?;
        Ok(enabled)
    }

    /// Turn the Wi-Fi radio on.
    pub fn enable_wireless(&self) -> Result<()> {
        let conn = self.connect()?;

        conn.call_method(
            Some(NM_BUS),
            NM_PATH,
            Some(PROPERTIES_INTERFACE),
            "Set",
            &(NM_INTERFACE, "WirelessEnabled", Value::from(true)),
        )
        .context("Failed to enable Wi-Fi")?;

        info!("Wi-Fi radio enabled");
        Ok(())
    }
}

impl ConnectivityProbe for NetworkManagerClient {
    fn transports(&self) -> Result<TransportFlags> {
        Ok(transports_from_devices(&self.devices()?))
    }

    fn name(&self) -> &'static str {
        "NetworkManager"
    }
}

fn get_device_u32(conn: &Connection, path: &OwnedObjectPath, property: &str) -> Result<u32> {
    let value: OwnedValue = conn
        .call_method(
            Some(NM_BUS),
            path.as_ref(),
            Some(PROPERTIES_INTERFACE),
            "Get",
            &(DEVICE_INTERFACE, property),
        )?
        .body()
        .deserialize()?;

    let v: u32 = value
        .try_into()
        .map_err(|_| anyhow!("Property {} is not a u32", property))?;
    Ok(v)
}
