//! Bus route types and aggregate statistics.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::StopId;

/// Dense index of a bus in the catalogue's bus arena.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BusId(pub usize);

impl BusId {
    /// Returns the arena index.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Debug for BusId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BusId({})", self.0)
    }
}

/// A named route over stops.
///
/// A round-trip bus stores its whole loop in `stops` (the first stop is
/// usually repeated at the end). A linear bus stores only the outbound
/// direction and remembers its final outbound stop in `last_stop`; the
/// return leg is derived by [`Bus::full_route`].
#[derive(Debug, Clone, PartialEq)]
pub struct Bus {
    /// Bus name, unique within a well-formed catalogue
    pub name: String,
    /// Stops as supplied: the full loop or the outbound direction
    pub stops: Vec<StopId>,
    /// Final outbound stop of a linear bus; `None` for round trips
    pub last_stop: Option<StopId>,
}

impl Bus {
    /// Creates a round-trip bus from its full stop loop.
    pub fn round_trip(name: impl Into<String>, stops: Vec<StopId>) -> Self {
        Self {
            name: name.into(),
            stops,
            last_stop: None,
        }
    }

    /// Creates a linear (out-and-back) bus from its outbound stops.
    pub fn linear(name: impl Into<String>, stops: Vec<StopId>) -> Self {
        let last_stop = stops.last().copied();
        Self {
            name: name.into(),
            stops,
            last_stop,
        }
    }

    /// Returns true if the stop list already contains the whole loop.
    pub fn is_roundtrip(&self) -> bool {
        self.last_stop.is_none()
    }

    /// The stop sequence a passenger actually travels.
    ///
    /// For a linear bus `A, B, C` this is `A, B, C, B, A`.
    pub fn full_route(&self) -> Vec<StopId> {
        let mut route = self.stops.clone();
        if !self.is_roundtrip() {
            route.extend(self.stops.iter().rev().skip(1));
        }
        route
    }
}

/// Aggregate statistics for one bus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BusStat {
    /// Length of the full route, counting repeated stops
    pub stop_count: usize,
    /// Number of distinct stops on the route
    pub unique_stop_count: usize,
    /// Sum of road distances along the route, in meters
    pub route_length: u64,
    /// Road length divided by great-circle length.
    /// NaN when the great-circle length is 0.
    pub curvature: f64,
}
