// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Command-line interface definitions.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use dfu_common::{
    DfuConfig, ExitPolicy, DEFAULT_APPLICATION_VERSION, DEFAULT_HW_VERSION, DEFAULT_NRFUTIL,
    DEFAULT_PACKAGE, DEFAULT_PORT, DEFAULT_SD_REQ,
};

use crate::commands;
use crate::ports;

/// Command-line arguments.
#[derive(Parser)]
#[command(name = "dfu-upload")]
#[command(about = "Package and flash nRF52 firmware over USB serial DFU")]
pub struct Cli {
    #[command(flatten)]
    pub dfu: DfuArgs,

    /// Capture tool output and show a spinner instead
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options forwarded to nrfutil.
#[derive(Args)]
pub struct DfuArgs {
    /// Path to the nrfutil executable
    #[arg(long, env = "NRFUTIL", default_value = DEFAULT_NRFUTIL)]
    pub nrfutil: PathBuf,

    /// Serial port of the DFU bootloader (e.g., /dev/ttyACM0)
    #[arg(short, long, env = "DFU_PORT", default_value = DEFAULT_PORT)]
    pub port: String,

    /// Hardware version written into the package
    #[arg(long, default_value_t = DEFAULT_HW_VERSION)]
    pub hw_version: u32,

    /// Required SoftDevice firmware ID
    #[arg(long, default_value = DEFAULT_SD_REQ)]
    pub sd_req: String,

    /// Application version written into the package
    #[arg(long, default_value_t = DEFAULT_APPLICATION_VERSION)]
    pub application_version: u32,

    /// DFU package produced by packaging and consumed by flashing
    #[arg(long, default_value = DEFAULT_PACKAGE)]
    pub package: PathBuf,

    /// Continue after a tool fails instead of stopping
    #[arg(long)]
    pub keep_going: bool,
}

impl DfuArgs {
    pub fn to_config(&self) -> DfuConfig {
        let policy = if self.keep_going {
            ExitPolicy::KeepGoing
        } else {
            ExitPolicy::Strict
        };

        DfuConfig::default()
            .with_nrfutil(&self.nrfutil)
            .with_port(&self.port)
            .with_hw_version(self.hw_version)
            .with_sd_req(&self.sd_req)
            .with_application_version(self.application_version)
            .with_package(&self.package)
            .with_exit_policy(policy)
    }
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Package the firmware and flash it to the device
    Upload {
        /// Firmware artifacts; only the first one is used
        #[arg(value_name = "FILE", required_unless_present = "build_dir")]
        sources: Vec<PathBuf>,

        /// Build directory holding firmware.hex
        #[arg(long, value_name = "DIR")]
        build_dir: Option<PathBuf>,
    },

    /// Only generate the DFU package
    Package {
        /// Firmware file (.hex or .bin)
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Only flash an existing DFU package
    Flash,

    /// List serial ports
    Ports,
}

/// Execute the parsed CLI command.
pub fn run(cli: Cli) -> Result<()> {
    let config = cli.dfu.to_config();

    match cli.command {
        Commands::Upload { sources, build_dir } => {
            commands::upload(config, sources, build_dir, cli.quiet)
        }
        Commands::Package { file } => commands::package(config, &file, cli.quiet),
        Commands::Flash => commands::flash(config, cli.quiet),
        Commands::Ports => ports::list(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_library_config() {
        let cli = Cli::try_parse_from(["dfu-upload", "flash"]).unwrap();
        assert_eq!(cli.dfu.to_config(), DfuConfig::default());
        assert!(!cli.quiet);
    }

    #[test]
    fn test_upload_with_sources() {
        let cli = Cli::try_parse_from(["dfu-upload", "upload", "a.hex", "b.hex"]).unwrap();
        match cli.command {
            Commands::Upload { sources, build_dir } => {
                assert_eq!(sources, vec![PathBuf::from("a.hex"), PathBuf::from("b.hex")]);
                assert!(build_dir.is_none());
            }
            _ => panic!("expected upload"),
        }
    }

    #[test]
    fn test_upload_requires_source_or_build_dir() {
        assert!(Cli::try_parse_from(["dfu-upload", "upload"]).is_err());
        assert!(Cli::try_parse_from(["dfu-upload", "upload", "--build-dir", "out"]).is_ok());
    }

    #[test]
    fn test_overrides_flow_into_config() {
        let cli = Cli::try_parse_from([
            "dfu-upload",
            "--nrfutil",
            "nrfutil",
            "-p",
            "/dev/ttyACM2",
            "--hw-version",
            "53",
            "--application-version",
            "4",
            "--package",
            "app.zip",
            "--keep-going",
            "upload",
            "app.hex",
        ])
        .unwrap();

        let config = cli.dfu.to_config();
        assert_eq!(config.nrfutil, PathBuf::from("nrfutil"));
        assert_eq!(config.port, "/dev/ttyACM2");
        assert_eq!(config.hw_version, 53);
        assert_eq!(config.application_version, 4);
        assert_eq!(config.package, PathBuf::from("app.zip"));
        assert_eq!(config.exit_policy, ExitPolicy::KeepGoing);
    }

    #[test]
    fn test_quiet_is_global() {
        let cli = Cli::try_parse_from(["dfu-upload", "package", "app.hex", "--quiet"]).unwrap();
        assert!(cli.quiet);
    }
}
