// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Shared pieces of the nRF52 DFU upload hook.
//!
//! The hook replaces a build system's upload step with two invocations of
//! `nrfutil`:
//! - `pkg generate` bundles the firmware image into a DFU package
//! - `dfu usb-serial` sends that package to the device's bootloader
//!
//! Process execution sits behind the [`Runner`] trait so the host tool can use
//! [`SystemRunner`] while tests substitute a recording fake.

pub mod command;
pub mod config;
pub mod env;
pub mod error;
pub mod hook;
pub mod runner;

// Re-export commonly used types
pub use command::{firmware_name, flash_command, package_command, ToolCommand};
pub use config::{DfuConfig, ExitPolicy};
pub use config::{DEFAULT_APPLICATION_VERSION, DEFAULT_HW_VERSION, DEFAULT_NRFUTIL};
pub use config::{DEFAULT_PACKAGE, DEFAULT_PORT, DEFAULT_SD_REQ, PROGRAM_NAME};
pub use env::{BuildEnvironment, BuildOverrides, UploadHandler};
pub use error::{Error, Stage};
pub use hook::{StageOutcome, UploadHook, UploadReport, UploadRequest, SPAWN_FAILURE_CODE};
pub use runner::{Runner, SystemRunner, ToolOutput};
