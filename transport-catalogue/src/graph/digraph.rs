//! Append-only directed weighted graph.

use serde::{Deserialize, Serialize};

use super::GraphError;

/// Dense vertex id, `0..vertex_count`.
pub type VertexId = usize;

/// Dense edge id in insertion order.
pub type EdgeId = usize;

/// A directed, weighted edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge<W> {
    pub from: VertexId,
    pub to: VertexId,
    pub weight: W,
}

/// Directed graph over a fixed number of vertices.
///
/// Edges are stored in one append-only list; each vertex keeps the ids of
/// its outgoing edges in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectedWeightedGraph<W> {
    edges: Vec<Edge<W>>,
    incidence_lists: Vec<Vec<EdgeId>>,
}

impl<W> DirectedWeightedGraph<W> {
    /// Create a graph with `vertex_count` vertices and no edges.
    pub fn new(vertex_count: usize) -> Self {
        Self {
            edges: Vec::new(),
            incidence_lists: vec![Vec::new(); vertex_count],
        }
    }

    /// Append an edge and return its id.
    ///
    /// # Panics
    ///
    /// Panics if either endpoint is not a vertex of this graph.
    pub fn add_edge(&mut self, edge: Edge<W>) -> EdgeId {
        assert!(
            edge.to < self.incidence_lists.len(),
            "edge target {} out of range",
            edge.to
        );
        let id = self.edges.len();
        self.incidence_lists[edge.from].push(id);
        self.edges.push(edge);
        id
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.incidence_lists.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Get an edge by id.
    pub fn edge(&self, id: EdgeId) -> &Edge<W> {
        &self.edges[id]
    }

    /// Outgoing edge ids of a vertex, in insertion order.
    pub fn incident_edges(&self, vertex: VertexId) -> &[EdgeId] {
        &self.incidence_lists[vertex]
    }

    /// All edges in id order.
    pub fn edges(&self) -> &[Edge<W>] {
        &self.edges
    }

    /// All incidence lists in vertex order.
    pub fn incidence_lists(&self) -> &[Vec<EdgeId>] {
        &self.incidence_lists
    }

    /// Reassemble a graph from stored edges and incidence lists.
    ///
    /// Every endpoint and edge id is checked, and every edge must appear in
    /// the incidence list of its source vertex.
    pub fn from_parts(
        edges: Vec<Edge<W>>,
        incidence_lists: Vec<Vec<EdgeId>>,
    ) -> Result<Self, GraphError> {
        let vertex_count = incidence_lists.len();

        for (id, edge) in edges.iter().enumerate() {
            for vertex in [edge.from, edge.to] {
                if vertex >= vertex_count {
                    return Err(GraphError::VertexOutOfRange {
                        edge: id,
                        vertex,
                        vertex_count,
                    });
                }
            }
        }

        let mut listed = 0;
        for (vertex, list) in incidence_lists.iter().enumerate() {
            for &edge in list {
                let Some(stored) = edges.get(edge) else {
                    return Err(GraphError::EdgeOutOfRange {
                        edge,
                        edge_count: edges.len(),
                    });
                };
                if stored.from != vertex {
                    return Err(GraphError::MisplacedEdge { edge, vertex });
                }
                listed += 1;
            }
        }
        if listed != edges.len() {
            return Err(GraphError::SizeMismatch {
                what: "incidence entries",
                expected: edges.len(),
                found: listed,
            });
        }

        Ok(Self {
            edges,
            incidence_lists,
        })
    }
}
