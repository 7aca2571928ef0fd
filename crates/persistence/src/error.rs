//! Persistence layer errors.

use thiserror::Error;

/// Persistence layer errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
