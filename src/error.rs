//! Error types for the tattoo API.

use thiserror::Error;

/// Common error type for the tattoo API.
#[derive(Error, Debug)]
pub enum TattooError {
    /// Database error.
    ///
    /// Errors from sqlx are converted automatically, except unique
    /// constraint violations which become [`TattooError::Conflict`].
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Resource already exists.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for TattooError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation() {
                return TattooError::Conflict(db_err.message().to_string());
            }
        }
        TattooError::Database(e.to_string())
    }
}

/// Result type alias for tattoo API operations.
pub type Result<T> = std::result::Result<T, TattooError>;
