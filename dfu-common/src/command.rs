// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! `nrfutil` command lines for the packaging and flashing stages.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::DfuConfig;

/// A program plus its arguments, passed to the OS as an argv vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl ToolCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Base filename of a firmware artifact (`/a/b/firmware.bin` -> `firmware.bin`).
pub fn firmware_name(firmware: &Path) -> Option<&str> {
    firmware.file_name().and_then(|name| name.to_str())
}

/// `nrfutil pkg generate ...` producing the DFU package from `firmware`.
pub fn package_command(config: &DfuConfig, firmware: &Path) -> ToolCommand {
    ToolCommand::new(&config.nrfutil)
        .arg("pkg")
        .arg("generate")
        .arg("--hw-version")
        .arg(config.hw_version.to_string())
        .arg(format!("--sd-req={}", config.sd_req))
        .arg("--application")
        .arg(firmware.display().to_string())
        .arg("--application-version")
        .arg(config.application_version.to_string())
        .arg(config.package.display().to_string())
}

/// `nrfutil dfu usb-serial ...` sending the package to `config.port`.
pub fn flash_command(config: &DfuConfig) -> ToolCommand {
    ToolCommand::new(&config.nrfutil)
        .arg("dfu")
        .arg("usb-serial")
        .arg("-pkg")
        .arg(config.package.display().to_string())
        .arg("-p")
        .arg(config.port.clone())
}
