//! Error types for session operations.

use std::time::Duration;

/// Errors produced by identity provider calls and controller validation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The request never produced a response (network failure, CORS, etc.).
    #[error("identity provider request failed: {0}")]
    Provider(String),

    /// The provider answered with a non-success status.
    #[error("identity provider rejected the request (status {status}): {message}")]
    Rejected { status: u16, message: String },

    /// The auth probe did not finish before the configured deadline.
    #[error("auth check timed out after {0:?}")]
    Timeout(Duration),

    /// Form input failed local validation before any request was sent.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Errors produced by browser storage and cookie access.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// The storage area is not reachable (no window, disabled storage, SSR).
    #[error("storage unavailable")]
    Unavailable,

    /// Removing a single key or cookie failed.
    #[error("failed to remove {key}: {reason}")]
    Remove { key: String, reason: String },

    /// Writing a single key failed.
    #[error("failed to write {key}: {reason}")]
    Write { key: String, reason: String },
}

/// Error returned when a role string does not name a known role.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RoleError {
    #[error("unknown role: {0:?}")]
    Unknown(String),
}
