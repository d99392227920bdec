//! Generic directed weighted graph and all-pairs shortest paths.
//!
//! Nothing here knows about stops or buses: vertices are dense integer ids
//! and edges carry an abstract non-negative [`Weight`].

mod digraph;
mod error;
mod router;

use std::fmt::Debug;
use std::ops::Add;

pub use digraph::{DirectedWeightedGraph, Edge, EdgeId, VertexId};
pub use error::GraphError;
pub use router::{RouteInfo, RouteInternalData, Router};

/// Edge weight usable by the shortest-path engine.
///
/// Weights must be non-negative; `ZERO` is the weight of the empty path.
pub trait Weight: Copy + PartialOrd + Add<Output = Self> + Debug {
    /// Additive identity.
    const ZERO: Self;
}

impl Weight for f64 {
    const ZERO: Self = 0.0;
}

impl Weight for u32 {
    const ZERO: Self = 0;
}

impl Weight for u64 {
    const ZERO: Self = 0;
}
