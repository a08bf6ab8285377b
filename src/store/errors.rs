//! # Store Errors
//!
//! Failures raised by the data store adapters. These never reach HTTP
//! clients directly; the API layer maps them onto its own taxonomy.

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Could not obtain a connection
    #[error("Connection failed: {0}")]
    Pool(String),

    /// A statement failed to execute
    #[error("Query failed: {0}")]
    Query(String),

    /// Store returned data that violates the record model
    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

impl From<deadpool_postgres::PoolError> for StoreError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        StoreError::Pool(err.to_string())
    }
}

impl From<tokio_postgres::Error> for StoreError {
    fn from(err: tokio_postgres::Error) -> Self {
        StoreError::Query(err.to_string())
    }
}
