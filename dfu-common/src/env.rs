// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Build-environment registration.
//!
//! Instead of patching a shared environment object in place, the overrides
//! are built up front and handed to [`BuildEnvironment::configure`] once.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::{DfuConfig, PROGRAM_NAME};
use crate::error::Error;
use crate::hook::{UploadHook, UploadReport, UploadRequest};
use crate::runner::Runner;

/// Program name a build environment uses until it is overridden.
pub const DEFAULT_PROGRAM_NAME: &str = "program";

/// Something that can stand in for the build system's upload step.
pub trait UploadHandler {
    fn upload(
        &self,
        request: &UploadRequest,
        runner: &mut dyn Runner,
        progress: &mut dyn Write,
    ) -> Result<UploadReport, Error>;
}

impl UploadHandler for UploadHook {
    fn upload(
        &self,
        request: &UploadRequest,
        runner: &mut dyn Runner,
        progress: &mut dyn Write,
    ) -> Result<UploadReport, Error> {
        UploadHook::upload(self, request, runner, progress)
    }
}

/// Settings that replace the environment's defaults.
pub struct BuildOverrides {
    pub program_name: String,
    pub upload: Box<dyn UploadHandler>,
}

impl BuildOverrides {
    /// Program name `firmware` with the DFU upload hook.
    pub fn dfu(config: DfuConfig) -> Self {
        Self {
            program_name: PROGRAM_NAME.to_string(),
            upload: Box::new(UploadHook::new(config)),
        }
    }
}

/// Per-target build settings relevant to uploading.
pub struct BuildEnvironment {
    build_dir: PathBuf,
    program_name: String,
    upload: Option<Box<dyn UploadHandler>>,
}

impl BuildEnvironment {
    pub fn new(build_dir: impl Into<PathBuf>) -> Self {
        Self {
            build_dir: build_dir.into(),
            program_name: DEFAULT_PROGRAM_NAME.to_string(),
            upload: None,
        }
    }

    pub fn configure(mut self, overrides: BuildOverrides) -> Self {
        self.program_name = overrides.program_name;
        self.upload = Some(overrides.upload);
        self
    }

    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    pub fn program_name(&self) -> &str {
        &self.program_name
    }

    /// `<build_dir>/<program_name>.<extension>`
    pub fn artifact(&self, extension: &str) -> PathBuf {
        self.build_dir
            .join(&self.program_name)
            .with_extension(extension)
    }

    pub fn upload(
        &self,
        request: &UploadRequest,
        runner: &mut dyn Runner,
        progress: &mut dyn Write,
    ) -> Result<UploadReport, Error> {
        let handler = self.upload.as_ref().ok_or(Error::NoUploadHandler)?;
        handler.upload(request, runner, progress)
    }
}
