// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Command implementations for packaging and flashing.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use crc::{Crc, CRC_32_ISO_HDLC};
use indicatif::{ProgressBar, ProgressStyle};

use dfu_common::{
    BuildEnvironment, BuildOverrides, DfuConfig, Error, Runner, StageOutcome, SystemRunner,
    ToolCommand, ToolOutput, UploadHook, UploadRequest,
};

use crate::ports;

const CRC32: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);

/// Runs tools with captured output behind a spinner.
struct SpinnerRunner {
    inner: SystemRunner,
}

impl Runner for SpinnerRunner {
    fn run(&mut self, command: &ToolCommand) -> Result<ToolOutput, Error> {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .map_err(|e| io::Error::other(e.to_string()))?,
        );
        pb.set_message(command.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        let result = self.inner.run(command);
        pb.finish_and_clear();
        result
    }
}

fn runner(quiet: bool) -> Box<dyn Runner> {
    if quiet {
        Box::new(SpinnerRunner {
            inner: SystemRunner::captured(),
        })
    } else {
        Box::new(SystemRunner::inherit())
    }
}

/// Size and CRC32 of the firmware image.
fn describe_firmware(file: &Path) -> Result<String> {
    let firmware = fs::read(file).with_context(|| format!("Failed to read {}", file.display()))?;
    Ok(format!(
        "Firmware: {} ({} bytes, CRC32: 0x{:08x})",
        file.display(),
        firmware.len(),
        CRC32.checksum(&firmware)
    ))
}

/// Explicit sources win; otherwise upload the environment's hex artifact.
fn upload_request(sources: Vec<PathBuf>, env: &BuildEnvironment) -> UploadRequest {
    if sources.is_empty() {
        UploadRequest::single(env.artifact("hex"))
    } else {
        UploadRequest::new(sources)
    }
}

/// Turn a hook error into an anyhow error, surfacing captured stderr.
fn hook_error(err: Error) -> anyhow::Error {
    if let Error::ToolFailed { stderr, .. } = &err {
        if !stderr.trim().is_empty() {
            eprintln!("{}", stderr.trim_end());
        }
    }
    anyhow::Error::new(err)
}

fn report_stage(outcome: &StageOutcome) {
    if outcome.success() {
        return;
    }
    println!("  {} failed: {}", outcome.stage, outcome.command);
    if !outcome.output.stderr.trim().is_empty() {
        println!("  {}", outcome.output.stderr.trim_end());
    }
}

/// Package the first source and flash it.
pub fn upload(
    config: DfuConfig,
    sources: Vec<PathBuf>,
    build_dir: Option<PathBuf>,
    quiet: bool,
) -> Result<()> {
    let port = config.port.clone();
    let env = BuildEnvironment::new(build_dir.unwrap_or_else(|| PathBuf::from(".")))
        .configure(BuildOverrides::dfu(config));

    let request = upload_request(sources, &env);

    println!("{}", describe_firmware(request.firmware()?)?);
    println!("Port:     {}", port);
    println!();
    ports::warn_if_missing(&port);

    let mut runner = runner(quiet);
    let report = env
        .upload(&request, runner.as_mut(), &mut io::stdout())
        .map_err(hook_error)
        .context("Upload failed")?;

    println!();
    if report.all_succeeded() {
        println!("Firmware uploaded successfully!");
    } else {
        println!("Upload finished with errors:");
        report_stage(&report.package);
        if let Some(flash) = &report.flash {
            report_stage(flash);
        }
    }

    Ok(())
}

/// Generate the DFU package only.
pub fn package(config: DfuConfig, file: &Path, quiet: bool) -> Result<()> {
    println!("{}", describe_firmware(file)?);

    let hook = UploadHook::new(config);
    let mut runner = runner(quiet);
    let outcome = hook
        .package(file, runner.as_mut(), &mut io::stdout())
        .map_err(hook_error)?;

    if !outcome.success() {
        report_stage(&outcome);
        bail!("Packaging failed");
    }

    println!("Package written to {}", hook.config().package.display());
    Ok(())
}

/// Flash an existing DFU package only.
pub fn flash(config: DfuConfig, quiet: bool) -> Result<()> {
    if !config.package.exists() {
        bail!(
            "Package {} not found, run 'dfu-upload package' first",
            config.package.display()
        );
    }
    ports::warn_if_missing(&config.port);

    let hook = UploadHook::new(config);
    let mut runner = runner(quiet);
    let outcome = hook
        .flash(runner.as_mut(), &mut io::stdout())
        .map_err(hook_error)?;

    if !outcome.success() {
        report_stage(&outcome);
        bail!("Flashing failed");
    }

    println!("Uploading done.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dfu_env(build_dir: &str) -> BuildEnvironment {
        BuildEnvironment::new(build_dir).configure(BuildOverrides::dfu(DfuConfig::default()))
    }

    #[test]
    fn test_upload_request_defaults_to_build_dir_hex() {
        let request = upload_request(Vec::new(), &dfu_env(".pio/build/nrf52840"));
        assert_eq!(
            request.firmware().unwrap(),
            Path::new(".pio/build/nrf52840/firmware.hex")
        );
    }

    #[test]
    fn test_upload_request_prefers_explicit_sources() {
        let sources = vec![PathBuf::from("app.bin"), PathBuf::from("other.hex")];
        let request = upload_request(sources.clone(), &dfu_env("build"));
        assert_eq!(request.sources, sources);
    }

    #[test]
    fn test_describe_firmware_size_and_crc() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("app.bin");
        fs::write(&file, b"123456789").unwrap();

        let line = describe_firmware(&file).unwrap();
        assert_eq!(
            line,
            format!("Firmware: {} (9 bytes, CRC32: 0xcbf43926)", file.display())
        );
    }

    #[test]
    fn test_describe_firmware_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = describe_firmware(&dir.path().join("missing.hex")).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read"));
    }
}
