//! Error types for itemshelf.

use thiserror::Error;

/// Common error type for itemshelf.
#[derive(Error, Debug)]
pub enum ShelfError {
    /// Database error.
    ///
    /// Errors from sqlx are automatically converted.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation error for client input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// A record exists but its blob is gone from storage.
    #[error("{0} not found on server")]
    BlobMissing(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for ShelfError {
    fn from(e: sqlx::Error) -> Self {
        ShelfError::Database(e.to_string())
    }
}

/// Result type alias for itemshelf operations.
pub type Result<T> = std::result::Result<T, ShelfError>;
