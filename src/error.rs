use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Coarse classification of every failure the roulette can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Transport,
    DataShape,
    Selection,
    Unknown,
}

impl ErrorKind {
    /// Process exit code used by the binary for this kind of failure.
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorKind::Unknown => 1,
            ErrorKind::Configuration => 2,
            ErrorKind::Transport => 3,
            ErrorKind::DataShape => 4,
            ErrorKind::Selection => 5,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    EnvVarMissing(String),

    #[error("environment variable {0} is empty")]
    EnvVarEmpty(String),

    #[error("environment variable {0} is not valid unicode")]
    EnvVarNotUnicode(String),

    #[error("token file {} does not exist", .0.display())]
    FileMissing(PathBuf),

    #[error("could not read token file {}: {source}", path.display())]
    FileUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("key {key} not found in {}", path.display())]
    KeyMissing { key: String, path: PathBuf },

    #[error("key {key} in {} has an empty value", path.display())]
    KeyEmpty { key: String, path: PathBuf },
}

#[derive(Error, Debug)]
pub enum RouletteError {
    #[error("GitHub token is not available: {0}")]
    Configuration(#[from] ConfigError),

    #[error("An error occurred while fetching data from GitHub: {0}")]
    Network(#[from] reqwest::Error),

    #[error("An error occurred while fetching data from GitHub: {status}{detail}")]
    Status { status: StatusCode, detail: String },

    #[error("Unexpected data format in GitHub response: {0}")]
    DataShape(String),

    #[error("Could not pick a repository: {0}")]
    Selection(String),

    #[error("Could not write output: {0}")]
    Output(#[from] std::io::Error),

    /// Failures outside the request/response path, such as an HTTP client
    /// that cannot be built from the given settings.
    #[error("An unexpected error occurred: {0}")]
    Unknown(String),
}

impl RouletteError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RouletteError::Configuration(_) => ErrorKind::Configuration,
            RouletteError::Network(_) | RouletteError::Status { .. } => ErrorKind::Transport,
            RouletteError::DataShape(_) => ErrorKind::DataShape,
            RouletteError::Selection(_) => ErrorKind::Selection,
            RouletteError::Output(_) | RouletteError::Unknown(_) => ErrorKind::Unknown,
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.kind().exit_code()
    }
}

pub type Result<T> = std::result::Result<T, RouletteError>;
