//! Unified error types for gist.
//!
//! Every variant carries a stable code prefix; the MCP mapping below keeps
//! the numeric codes in one place.

use rmcp::model::{ErrorCode, ErrorData as McpError};
use tokio_rusqlite::rusqlite;

/// Unified error types for the gist core and server.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., empty text).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// Invalid URL.
    #[error("INVALID_URL: {0}")]
    InvalidUrl(String),

    /// No cache entry found for the given fingerprint.
    #[error("CACHE_MISS: {0}")]
    CacheMiss(String),

    /// The key-value store rejected a read or write.
    #[error("PERSISTENCE_FAILURE: {0}")]
    Persistence(String),

    /// Database operation failed.
    #[error("PERSISTENCE_FAILURE: {0}")]
    Database(tokio_rusqlite::Error),

    /// A stored record could not be decoded.
    #[error("PERSISTENCE_FAILURE: record {key} is corrupt: {reason}")]
    Corrupt { key: String, reason: String },
}

impl Error {
    /// Whether this error came from the durable store.
    pub fn is_persistence(&self) -> bool {
        matches!(self, Error::Persistence(_) | Error::Database(_) | Error::Corrupt { .. })
    }
}

impl From<tokio_rusqlite::Error<Error>> for Error {
    fn from(err: tokio_rusqlite::Error<Error>) -> Self {
        match err {
            tokio_rusqlite::Error::Error(e) => e,
            tokio_rusqlite::Error::ConnectionClosed => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
            tokio_rusqlite::Error::Close(c) => Error::Database(tokio_rusqlite::Error::Close(c)),
            _ => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
        }
    }
}

impl From<tokio_rusqlite::Error<rusqlite::Error>> for Error {
    fn from(err: tokio_rusqlite::Error<rusqlite::Error>) -> Self {
        Error::Database(err)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(tokio_rusqlite::Error::Error(err))
    }
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let message = err.to_string();
        let code = match &err {
            Error::InvalidInput(_) => -32602,
            Error::InvalidUrl(_) => -32003,
            Error::CacheMiss(_) => -32001,
            Error::Persistence(_) | Error::Database(_) | Error::Corrupt { .. } => -32002,
        };

        McpError { code: ErrorCode(code), message: message.into(), data: None }
    }
}
