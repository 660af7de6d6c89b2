//! Client Errors
//!
//! One error type for every read and mutation the client performs.

use thiserror::Error;

/// Message used when a failed envelope carries no usable text
pub const DEFAULT_FAILURE_MESSAGE: &str = "Something went wrong";

/// Common result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Client-side checks that stop a mutation before any request is sent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("un-completing a task requires confirmation")]
    ConfirmationRequired,
    #[error("confirmation declined")]
    ConfirmationDeclined,
}

/// Failures surfaced by the data access layer and the query cache.
///
/// Kept `Clone` so a failed fetch can live in a cache entry and travel through signals.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Transport or connection failure
    #[error("network error: {0}")]
    Network(String),
    /// Body was not a well-formed response envelope
    #[error("protocol error: {0}")]
    Protocol(String),
    /// Envelope reported `success=false` or the status was not 2xx
    #[error("{0}")]
    Remote(String),
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Protocol(err.to_string())
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Protocol(err.to_string())
    }
}
