//! Unified error types for Funnelbase Core.

use thiserror::Error;

use crate::export::status::BatchError;

/// Errors surfaced by the export engine.
///
/// Every component-level failure is wrapped into this one type before it
/// reaches the orchestrator or the HTTP boundary; distinct remote-failure
/// kinds are never collapsed into a generic error.
#[derive(Error, Debug)]
pub enum SyncError {
    /// No CRM integration exists on the remote system when one was required.
    #[error("no CRM integration is registered")]
    NotConfigured,

    /// The remote system answered a well-formed request with a non-success
    /// status. Carries the status code and response body for diagnostics.
    #[error("remote rejected request ({status}): {body}")]
    RemoteRejected {
        /// HTTP status code returned by the remote system.
        status: u16,
        /// Response body text.
        body: String,
    },

    /// Transport-level failure: timeout, connection refused, DNS.
    #[error("remote unreachable: {0}")]
    RemoteUnreachable(String),

    /// A previously submitted batch failed for some of its records.
    /// Only ever constructed from a polled outcome, never from a submit call.
    #[error("batch partially failed ({} line errors)", .0.len())]
    PartialBatchFailure(Vec<BatchError>),

    /// The remote system returned a success status with a body we could not
    /// decode.
    #[error("invalid remote response: {0}")]
    InvalidResponse(String),

    /// Reading the local entity snapshot failed.
    #[error("snapshot read failed: {0}")]
    Snapshot(String),

    /// Encoding a batch payload failed before anything was sent.
    #[error("batch encode failed: {0}")]
    Encode(#[from] serde_json::Error),
}

impl SyncError {
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        Self::RemoteUnreachable(err.to_string())
    }
}

/// Result type alias for export operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors surfaced by the embedded store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database operation failed (SQLite).
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A row referenced by id does not exist.
    #[error("{entity} {id} not found")]
    NotFound {
        /// Entity table name.
        entity: &'static str,
        /// Requested primary key.
        id: i64,
    },

    /// A stored value no longer parses (enum name or timestamp); the
    /// database predates the current variant set or was edited out-of-band.
    #[error("corrupt {column} value: {value}")]
    Corrupt {
        /// Column holding the value.
        column: &'static str,
        /// The unparseable value.
        value: String,
    },
}
