use std::io;
use std::process::ExitStatus;
use thiserror::Error;

/// Everything that can go wrong between building an emulator command and reading its counters
#[derive(Error, Debug)]
pub enum StatsError {
    #[error("couldn't start the emulator at {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("the emulator exited with {status}: {stderr}")]
    ExitStatus { status: ExitStatus, stderr: String },

    #[error("the emulator output isn't valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("the emulator output has no '{0}' counter")]
    MissingCounter(&'static str),

    #[error("the '{label}' counter has an unparseable value '{value}'")]
    InvalidCounter { label: &'static str, value: String },

    #[error("invalid emulator parameters: {0}")]
    InvalidParams(String),

    #[error("couldn't access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("couldn't parse the batch configuration: {0}")]
    Config(#[from] serde_json::Error),
}
