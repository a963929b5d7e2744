//! Error types for the command-line front end.

use std::path::PathBuf;
use tp_process::ProcessError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Failed to read request file: {path}")]
    RequestRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse request file {path}: {message}")]
    RequestParse { path: PathBuf, message: String },

    #[error("Failed to write {path}")]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Simulation error: {0}")]
    Process(#[from] ProcessError),
}

pub type CliResult<T> = Result<T, CliError>;
