use std::{path::PathBuf, result::Result as StdResult};

use thiserror::Error;

/// Unified error type for the store, config and forecast layers.
#[derive(Debug, Error)]
pub enum CashError {
    #[error("Ledger store not found at {}", .0.display())]
    StoreNotFound(PathBuf),
    #[error("Failed to save observation: {0}")]
    WriteFailure(String),
    #[error("Persistence error: {0}")]
    StorageError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = StdResult<T, CashError>;

impl CashError {
    /// Setup instruction shown next to the error, when one applies.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            CashError::StoreNotFound(_) => {
                Some("create the ledger first with `cashcast init`, then log some amounts")
            }
            _ => None,
        }
    }
}

/// User-facing CLI error wrapper.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] CashError),
    #[error("{0}")]
    Usage(String),
}

impl From<std::io::Error> for CashError {
    fn from(err: std::io::Error) -> Self {
        CashError::StorageError(err.to_string())
    }
}

impl From<csv::Error> for CashError {
    fn from(err: csv::Error) -> Self {
        CashError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for CashError {
    fn from(err: serde_json::Error) -> Self {
        CashError::ConfigError(err.to_string())
    }
}
