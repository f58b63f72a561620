// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Upload configuration and its defaults.

use std::path::PathBuf;

// --- Defaults for the nRF52840 dongle setup ---

pub const DEFAULT_NRFUTIL: &str = "/opt/01.Develop/NRF/nrfutil-linux";
pub const DEFAULT_HW_VERSION: u32 = 52;
pub const DEFAULT_SD_REQ: &str = "0x00"; // no SoftDevice required
pub const DEFAULT_APPLICATION_VERSION: u32 = 1;
pub const DEFAULT_PACKAGE: &str = "firmware.zip";
pub const DEFAULT_PORT: &str = "/dev/ttyACM0";

/// Program name registered on the build environment.
pub const PROGRAM_NAME: &str = "firmware";

/// What the hook does when a tool exits with a non-zero status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExitPolicy {
    /// Abort on the first failing stage and return an error.
    #[default]
    Strict,
    /// Record the failure, run the remaining stages and return normally.
    KeepGoing,
}

/// Everything needed to build the `nrfutil` command lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DfuConfig {
    pub nrfutil: PathBuf,
    pub hw_version: u32,
    pub sd_req: String,
    pub application_version: u32,
    pub package: PathBuf,
    pub port: String,
    pub exit_policy: ExitPolicy,
}

impl Default for DfuConfig {
    fn default() -> Self {
        Self {
            nrfutil: PathBuf::from(DEFAULT_NRFUTIL),
            hw_version: DEFAULT_HW_VERSION,
            sd_req: DEFAULT_SD_REQ.to_string(),
            application_version: DEFAULT_APPLICATION_VERSION,
            package: PathBuf::from(DEFAULT_PACKAGE),
            port: DEFAULT_PORT.to_string(),
            exit_policy: ExitPolicy::default(),
        }
    }
}

impl DfuConfig {
    pub fn with_nrfutil(mut self, nrfutil: impl Into<PathBuf>) -> Self {
        self.nrfutil = nrfutil.into();
        self
    }

    pub fn with_hw_version(mut self, hw_version: u32) -> Self {
        self.hw_version = hw_version;
        self
    }

    pub fn with_sd_req(mut self, sd_req: impl Into<String>) -> Self {
        self.sd_req = sd_req.into();
        self
    }

    pub fn with_application_version(mut self, version: u32) -> Self {
        self.application_version = version;
        self
    }

    pub fn with_package(mut self, package: impl Into<PathBuf>) -> Self {
        self.package = package.into();
        self
    }

    pub fn with_port(mut self, port: impl Into<String>) -> Self {
        self.port = port.into();
        self
    }

    pub fn with_exit_policy(mut self, policy: ExitPolicy) -> Self {
        self.exit_policy = policy;
        self
    }
}
