// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! The upload hook: package the firmware, then flash it over USB serial DFU.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::command::{firmware_name, flash_command, package_command, ToolCommand};
use crate::config::{DfuConfig, ExitPolicy};
use crate::error::{Error, Stage};
use crate::runner::{Runner, ToolOutput};

/// Exit code recorded for a tool that could not be started.
pub const SPAWN_FAILURE_CODE: i32 = 127;

/// Artifacts handed over by the build system for one upload.
///
/// Only the first source is used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub sources: Vec<PathBuf>,
}

impl UploadRequest {
    pub fn new(sources: Vec<PathBuf>) -> Self {
        Self { sources }
    }

    pub fn single(source: impl Into<PathBuf>) -> Self {
        Self {
            sources: vec![source.into()],
        }
    }

    pub fn firmware(&self) -> Result<&Path, Error> {
        self.sources
            .first()
            .map(PathBuf::as_path)
            .ok_or(Error::NoSource)
    }
}

/// Result of one executed stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageOutcome {
    pub stage: Stage,
    pub command: String,
    pub output: ToolOutput,
}

impl StageOutcome {
    pub fn success(&self) -> bool {
        self.output.success()
    }
}

/// What happened during [`UploadHook::upload`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReport {
    pub firmware: PathBuf,
    pub package: StageOutcome,
    /// `None` when packaging failed under [`ExitPolicy::Strict`].
    pub flash: Option<StageOutcome>,
}

impl UploadReport {
    pub fn all_succeeded(&self) -> bool {
        self.package.success() && self.flash.as_ref().is_some_and(StageOutcome::success)
    }
}

/// Replacement for the build system's default upload step.
#[derive(Debug, Clone, Default)]
pub struct UploadHook {
    config: DfuConfig,
}

impl UploadHook {
    pub fn new(config: DfuConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DfuConfig {
        &self.config
    }

    /// Package `request`'s first source and flash the result.
    ///
    /// Progress lines go to `progress`; tool output goes wherever `runner` sends it.
    pub fn upload(
        &self,
        request: &UploadRequest,
        runner: &mut dyn Runner,
        progress: &mut dyn Write,
    ) -> Result<UploadReport, Error> {
        let firmware = request.firmware()?;
        log::debug!(
            "firmware artifact: {}",
            firmware_name(firmware).unwrap_or("?")
        );

        let package = self.package(firmware, runner, progress)?;

        if !package.success() && self.config.exit_policy == ExitPolicy::Strict {
            return Err(stage_error(&package));
        }

        let flash = self.flash(runner, progress)?;

        if !flash.success() && self.config.exit_policy == ExitPolicy::Strict {
            return Err(stage_error(&flash));
        }

        writeln!(progress, "Uploading done.")?;

        Ok(UploadReport {
            firmware: firmware.to_path_buf(),
            package,
            flash: Some(flash),
        })
    }

    /// Run only `nrfutil pkg generate` for `firmware`.
    pub fn package(
        &self,
        firmware: &Path,
        runner: &mut dyn Runner,
        progress: &mut dyn Write,
    ) -> Result<StageOutcome, Error> {
        let command = package_command(&self.config, firmware);
        writeln!(progress, "{}", command)?;
        self.run_stage(Stage::Package, &command, runner)
    }

    /// Run only `nrfutil dfu usb-serial` with the configured package.
    pub fn flash(
        &self,
        runner: &mut dyn Runner,
        progress: &mut dyn Write,
    ) -> Result<StageOutcome, Error> {
        let command = flash_command(&self.config);
        writeln!(progress, "Uploading package through DFU...")?;
        self.run_stage(Stage::Flash, &command, runner)
    }

    fn run_stage(
        &self,
        stage: Stage,
        command: &ToolCommand,
        runner: &mut dyn Runner,
    ) -> Result<StageOutcome, Error> {
        let output = match runner.run(command) {
            Ok(output) => output,
            Err(Error::Spawn { program, source })
                if self.config.exit_policy == ExitPolicy::KeepGoing =>
            {
                spawn_failure(&program, &source)
            }
            Err(e) => return Err(e),
        };
        if !output.success() {
            log::warn!("{} exited with {:?}", stage, output.code);
        }

        Ok(StageOutcome {
            stage,
            command: command.to_string(),
            output,
        })
    }
}

/// A tool that could not be started counts as exiting with 127, like a shell would.
fn spawn_failure(program: &Path, source: &std::io::Error) -> ToolOutput {
    ToolOutput {
        code: Some(SPAWN_FAILURE_CODE),
        stdout: String::new(),
        stderr: format!("failed to start {}: {}", program.display(), source),
    }
}

fn stage_error(outcome: &StageOutcome) -> Error {
    Error::ToolFailed {
        stage: outcome.stage,
        code: outcome.output.code,
        stderr: outcome.output.stderr.clone(),
    }
}
