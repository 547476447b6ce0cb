//! Store error types.
//!
//! Every variant means the same thing to callers: a remote read failed.
//! The variants only record where it failed.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend answered with a non-2xx status code.
    #[error("Backend error {status}: {message}")]
    Api { status: u16, message: String },

    /// The API key or session token cannot be sent as a header.
    #[error("Invalid backend credentials: {0}")]
    Credentials(String),

    /// An error from the underlying HTTP client (connect, timeout, body).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// An error from the direct Postgres connection.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A row came back in a shape we cannot read.
    #[error("Malformed row: {0}")]
    Decode(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
