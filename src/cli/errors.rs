//! CLI-specific error types
//!
//! Every CLI error is fatal: `main` prints it and exits non-zero.

use thiserror::Error;

use crate::store::StoreError;

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file or environment error
    #[error("Config error: {0}")]
    Config(String),

    /// Store could not be reached or prepared
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Runtime or server failed to start
    #[error("Boot failed: {0}")]
    Boot(String),
}

impl CliError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn boot_failed(msg: impl Into<String>) -> Self {
        Self::Boot(msg.into())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::config_error(format!("Invalid config JSON: {}", e))
    }
}
