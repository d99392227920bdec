//! Graph consistency errors.

use super::{EdgeId, VertexId};

/// Raised when reassembling a graph or path table from stored parts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// An edge endpoint is not a vertex of the graph
    #[error("edge {edge} references vertex {vertex} but the graph has {vertex_count} vertices")]
    VertexOutOfRange {
        edge: EdgeId,
        vertex: VertexId,
        vertex_count: usize,
    },

    /// An incidence list or predecessor refers to a missing edge
    #[error("edge id {edge} is out of range ({edge_count} edges)")]
    EdgeOutOfRange { edge: EdgeId, edge_count: usize },

    /// An incidence list entry does not start at its vertex
    #[error("edge {edge} is listed under vertex {vertex} but starts elsewhere")]
    MisplacedEdge { edge: EdgeId, vertex: VertexId },

    /// Table or list length does not match the vertex count
    #[error("expected {expected} {what}, found {found}")]
    SizeMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
}
