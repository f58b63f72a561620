// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// The two steps of an upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Package,
    Flash,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Package => f.write_str("packaging"),
            Stage::Flash => f.write_str("flashing"),
        }
    }
}

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("upload request has no source artifact")]
    NoSource,
    #[error("no upload handler registered on the build environment")]
    NoUploadHandler,
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{stage} failed ({})", exit_description(.code))]
    ToolFailed {
        stage: Stage,
        code: Option<i32>,
        stderr: String,
    },
    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),
}

fn exit_description(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}
