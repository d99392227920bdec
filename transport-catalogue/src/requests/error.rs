//! Request processing error types.

use crate::routing::InvalidSettings;
use crate::snapshot::SnapshotError;

/// Errors that abort processing of a whole document.
///
/// Per-query misses are not errors; they become `error_message` responses.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// Input was not valid JSON or did not match the expected shape
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading input or writing output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Saving or loading the snapshot failed
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    /// Routing settings were present but out of range
    #[error(transparent)]
    Settings(#[from] InvalidSettings),
}
