//! Error types for the sync layer.

use thiserror::Error;
use till_model::ModelError;

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors that can occur while reconciling snapshots.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Model error (unknown entity kind, malformed record).
    #[error(transparent)]
    Model(#[from] ModelError),

    /// A manual-required field was finalized without a human choice.
    #[error("no choice supplied for conflicting field: {0}")]
    UnresolvedField(String),

    /// A choice names a field that was not awaiting manual resolution.
    #[error("field is not awaiting manual resolution: {0}")]
    UnknownField(String),
}
