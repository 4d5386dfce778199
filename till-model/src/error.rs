//! Error types for the model layer.

use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised when boundary data cannot be turned into model types.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The entity kind string does not name a declared kind.
    #[error("unknown entity kind: {0}")]
    UnknownKind(String),

    /// A record must be a JSON object.
    #[error("record must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
