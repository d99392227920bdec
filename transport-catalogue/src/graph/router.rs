//! All-pairs shortest paths with a precomputed predecessor table.
//!
//! Dijkstra is run once from every vertex. For each ordered pair the table
//! keeps the optimal total weight and the last edge on one optimal path, so
//! a query only has to walk predecessor edges back to the source.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{DirectedWeightedGraph, EdgeId, GraphError, VertexId, Weight};

/// Table entry for one reachable (source, target) pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteInternalData<W> {
    /// Total weight of the best known path
    pub weight: W,
    /// Last edge on that path; `None` only when source == target
    pub prev_edge: Option<EdgeId>,
}

/// A reconstructed path.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteInfo<W> {
    pub weight: W,
    /// Edge ids from source to target
    pub edges: Vec<EdgeId>,
}

/// Heap entry ordered so that `BinaryHeap` pops the lightest weight first.
#[derive(Debug, Clone, Copy)]
struct Candidate<W> {
    weight: W,
    vertex: VertexId,
}

impl<W: PartialOrd> PartialEq for Candidate<W> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<W: PartialOrd> Eq for Candidate<W> {}

impl<W: PartialOrd> PartialOrd for Candidate<W> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<W: PartialOrd> Ord for Candidate<W> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .partial_cmp(&self.weight)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

/// Precomputed shortest paths between every ordered pair of vertices.
///
/// The table is a flat `vertex_count * vertex_count` array indexed by
/// `source * vertex_count + target`; `None` marks an unreachable pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Router<W> {
    vertex_count: usize,
    routes: Vec<Option<RouteInternalData<W>>>,
}

impl<W: Weight> Router<W> {
    /// Compute the full table for `graph`.
    ///
    /// Cost is one Dijkstra pass per vertex. Edge weights must be
    /// non-negative.
    pub fn new(graph: &DirectedWeightedGraph<W>) -> Self {
        let started = Instant::now();
        let vertex_count = graph.vertex_count();
        let mut router = Self {
            vertex_count,
            routes: vec![None; vertex_count * vertex_count],
        };

        for source in 0..vertex_count {
            router.relax_from(graph, source);
        }

        debug!(
            vertices = vertex_count,
            edges = graph.edge_count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "all-pairs shortest paths computed"
        );
        router
    }

    fn relax_from(&mut self, graph: &DirectedWeightedGraph<W>, source: VertexId) {
        let row = source * self.vertex_count;
        self.routes[row + source] = Some(RouteInternalData {
            weight: W::ZERO,
            prev_edge: None,
        });

        let mut queue = BinaryHeap::new();
        queue.push(Candidate {
            weight: W::ZERO,
            vertex: source,
        });

        while let Some(Candidate { weight, vertex }) = queue.pop() {
            // Stale entry: a lighter path to `vertex` was settled already.
            if let Some(best) = self.routes[row + vertex]
                && weight > best.weight
            {
                continue;
            }

            for &edge_id in graph.incident_edges(vertex) {
                let edge = graph.edge(edge_id);
                let candidate = weight + edge.weight;
                let slot = &mut self.routes[row + edge.to];
                let improves = match slot {
                    Some(known) => candidate < known.weight,
                    None => true,
                };
                if improves {
                    *slot = Some(RouteInternalData {
                        weight: candidate,
                        prev_edge: Some(edge_id),
                    });
                    queue.push(Candidate {
                        weight: candidate,
                        vertex: edge.to,
                    });
                }
            }
        }
    }

    /// Shortest path from `from` to `to`, or `None` if unreachable.
    ///
    /// A vertex always reaches itself with weight zero and no edges.
    /// `graph` must be the graph the table was computed for.
    pub fn build_route(
        &self,
        graph: &DirectedWeightedGraph<W>,
        from: VertexId,
        to: VertexId,
    ) -> Option<RouteInfo<W>> {
        if from >= self.vertex_count || to >= self.vertex_count {
            return None;
        }
        let row = from * self.vertex_count;
        let data = self.routes[row + to]?;

        let mut edges = Vec::new();
        let mut prev_edge = data.prev_edge;
        while let Some(edge_id) = prev_edge {
            // Optimal paths never revisit a vertex.
            if edges.len() >= self.vertex_count {
                return None;
            }
            edges.push(edge_id);
            let vertex = graph.edge(edge_id).from;
            prev_edge = self.routes[row + vertex].and_then(|d| d.prev_edge);
        }
        edges.reverse();

        Some(RouteInfo {
            weight: data.weight,
            edges,
        })
    }

    /// Number of vertices the table covers.
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// The raw table in `source * vertex_count + target` order.
    pub fn table(&self) -> &[Option<RouteInternalData<W>>] {
        &self.routes
    }

    /// Reassemble a router from a stored table.
    ///
    /// The table must match `graph`: one entry per ordered vertex pair, and
    /// every predecessor edge must exist and end at its entry's target.
    pub fn from_table(
        graph: &DirectedWeightedGraph<W>,
        routes: Vec<Option<RouteInternalData<W>>>,
    ) -> Result<Self, GraphError> {
        let vertex_count = graph.vertex_count();
        if routes.len() != vertex_count * vertex_count {
            return Err(GraphError::SizeMismatch {
                what: "path table entries",
                expected: vertex_count * vertex_count,
                found: routes.len(),
            });
        }

        for (index, data) in routes.iter().enumerate() {
            let Some(edge) = data.and_then(|d| d.prev_edge) else {
                continue;
            };
            if edge >= graph.edge_count() {
                return Err(GraphError::EdgeOutOfRange {
                    edge,
                    edge_count: graph.edge_count(),
                });
            }
            let target = index % vertex_count;
            if graph.edge(edge).to != target {
                return Err(GraphError::MisplacedEdge {
                    edge,
                    vertex: target,
                });
            }
        }

        Ok(Self {
            vertex_count,
            routes,
        })
    }
}
