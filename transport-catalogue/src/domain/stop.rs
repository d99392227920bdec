//! Stop types.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Coordinates;

/// Dense index of a stop in the catalogue's stop arena.
///
/// Ids are handed out in insertion order starting from 0 and are never
/// reused, so they stay valid for the lifetime of the catalogue.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StopId(pub usize);

impl StopId {
    /// Returns the arena index.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.0)
    }
}

/// A named geographic point in the network.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    /// Stop name, unique within a well-formed catalogue
    pub name: String,
    /// Location
    pub coordinates: Coordinates,
}

impl Stop {
    /// Creates a new stop.
    pub fn new(name: impl Into<String>, coordinates: Coordinates) -> Self {
        Self {
            name: name.into(),
            coordinates,
        }
    }
}
