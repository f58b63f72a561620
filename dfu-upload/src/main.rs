// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Package and flash nRF52 firmware over USB serial DFU.
//!
//! Usage:
//!   dfu-upload upload .pio/build/nrf52840/firmware.hex
//!   dfu-upload --port /dev/ttyACM1 upload --build-dir .pio/build/nrf52840
//!   dfu-upload ports

mod cli;
mod commands;
mod ports;

use anyhow::Result;
use clap::Parser;
use env_logger::Env;

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("dfu=info"))
        .format_timestamp(None)
        .init();

    let args = cli::Cli::parse();
    cli::run(args)
}
