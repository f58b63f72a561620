// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Blocking execution of external tools.

use std::process::{Command, Stdio};

use crate::command::ToolCommand;
use crate::error::Error;

/// Exit status and (optionally captured) output of a finished tool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// `None` when the process was killed by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    pub fn with_code(code: i32) -> Self {
        Self {
            code: Some(code),
            ..Self::default()
        }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs a command to completion.
pub trait Runner {
    fn run(&mut self, command: &ToolCommand) -> Result<ToolOutput, Error>;
}

/// Runs commands as child processes of the current one.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner {
    /// Collect stdout/stderr instead of inheriting the console.
    pub capture: bool,
}

impl SystemRunner {
    pub fn inherit() -> Self {
        Self { capture: false }
    }

    pub fn captured() -> Self {
        Self { capture: true }
    }
}

impl Runner for SystemRunner {
    fn run(&mut self, command: &ToolCommand) -> Result<ToolOutput, Error> {
        log::debug!("exec: {}", command);

        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args).stdin(Stdio::null());

        let spawn_err = |source| Error::Spawn {
            program: command.program.clone(),
            source,
        };

        if self.capture {
            let output = cmd.output().map_err(spawn_err)?;
            Ok(ToolOutput {
                code: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            })
        } else {
            let status = cmd
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit())
                .status()
                .map_err(spawn_err)?;
            Ok(ToolOutput {
                code: status.code(),
                ..ToolOutput::default()
            })
        }
    }
}
