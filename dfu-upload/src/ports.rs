// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Serial port discovery.

use std::path::Path;

use anyhow::{Context, Result};
use serialport::{SerialPortInfo, SerialPortType};

fn describe(info: &SerialPortInfo) -> String {
    match &info.port_type {
        SerialPortType::UsbPort(usb) => format!(
            "USB {:04x}:{:04x} {} {}",
            usb.vid,
            usb.pid,
            usb.manufacturer.as_deref().unwrap_or(""),
            usb.product.as_deref().unwrap_or("")
        )
        .trim_end()
        .to_string(),
        SerialPortType::PciPort => "PCI".to_string(),
        SerialPortType::BluetoothPort => "Bluetooth".to_string(),
        SerialPortType::Unknown => "unknown".to_string(),
    }
}

/// Print all serial ports visible to the host.
pub fn list() -> Result<()> {
    let ports = serialport::available_ports().context("Failed to enumerate serial ports")?;

    if ports.is_empty() {
        println!("No serial ports found.");
        return Ok(());
    }

    for info in &ports {
        println!("{:<20} {}", info.port_name, describe(info));
    }
    Ok(())
}

/// Warn when `port` is neither a device node nor an enumerated port.
pub fn warn_if_missing(port: &str) {
    if Path::new(port).exists() {
        return;
    }

    match serialport::available_ports() {
        Ok(ports) if ports.iter().any(|p| p.port_name == port) => {}
        Ok(_) => log::warn!("serial port {} not found, is the bootloader running?", port),
        Err(e) => log::debug!("could not enumerate serial ports: {}", e),
    }
}
