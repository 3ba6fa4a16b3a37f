use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, BatchError>;

/// Failures the driver itself detects.
///     Worker crashes, malformed tokens and missing output directories are
///     not in here: they belong to the fan-out utility and the workers.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("invalid config: {0}")]
    Config(String),

    #[error("config {}: {source}", path.display())]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("list file {}: {source}", path.display())]
    ListFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to launch `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("build `{command}` failed ({})", describe_code(.code))]
    BuildFailed { command: String, code: Option<i32> },
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("exit code {c}"),
        None => "terminated by signal".to_string(),
    }
}
