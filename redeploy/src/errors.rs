//! Error types for the redeploy trigger

use thiserror::Error;

/// Process exit code for a successful redeploy
pub const EXIT_OK: i32 = 0;

/// Process exit code for an unrecognized chain selector
pub const EXIT_INVALID_CHAIN: i32 = 1;

/// Process exit code for a non-200 answer from Portainer
pub const EXIT_REJECTED: i32 = 2;

/// Process exit code for everything else (network, missing variables, ...)
pub const EXIT_FAILURE: i32 = 3;

/// Main error type for the redeploy trigger
#[derive(Error, Debug)]
pub enum RedeployError {
    #[error("Invalid NODE_CHAIN value: {0:?} (expected pooltest, testnet or mainnet)")]
    InvalidChain(String),

    #[error("Redeploy rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Missing environment variable: {0}")]
    MissingVariable(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl RedeployError {
    /// Exit code the process terminates with for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            RedeployError::InvalidChain(_) => EXIT_INVALID_CHAIN,
            RedeployError::Rejected { .. } => EXIT_REJECTED,
            RedeployError::MissingVariable(_)
            | RedeployError::ConfigError(_)
            | RedeployError::IoError(_)
            | RedeployError::HttpError(_)
            | RedeployError::JsonError(_) => EXIT_FAILURE,
        }
    }
}
