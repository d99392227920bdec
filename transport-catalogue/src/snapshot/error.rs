//! Snapshot error types.

use crate::graph::GraphError;

/// Errors from saving or loading a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// Reading or writing the file failed
    #[error("snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Binary encoding or decoding failed (truncated or mistyped payload)
    #[error("snapshot codec error: {0}")]
    Codec(#[from] bincode::Error),

    /// The file does not start with the snapshot magic bytes
    #[error("not a transport catalogue snapshot")]
    BadMagic,

    /// The file was written by an incompatible format version
    #[error("unsupported snapshot version {found} (expected {expected})")]
    VersionMismatch { found: u32, expected: u32 },

    /// The payload decoded but references something that does not exist
    #[error("corrupt snapshot: {0}")]
    Corrupt(String),

    /// The stored graph or path table is inconsistent
    #[error("corrupt snapshot graph: {0}")]
    Graph(#[from] GraphError),
}
