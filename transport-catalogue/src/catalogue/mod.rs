//! In-memory transport catalogue.
//!
//! Owns every stop and bus, indexes them by name, stores directed road
//! distances between stops and tracks which buses call at each stop.
//! Entities are append-only: nothing is mutated or removed once added.

use std::collections::{BTreeSet, HashMap, HashSet};

use tracing::warn;

use crate::domain::{Bus, BusId, BusStat, Coordinates, Stop, StopId, great_circle_distance};

/// The transit data store.
#[derive(Debug, Clone, Default)]
pub struct TransportCatalogue {
    stops: Vec<Stop>,
    stop_index: HashMap<String, StopId>,

    /// Directed road distances in meters, keyed by (from, to).
    distances: HashMap<(StopId, StopId), u32>,

    buses: Vec<Bus>,
    bus_index: HashMap<String, BusId>,

    /// Buses calling at each stop. Stops without buses have no entry.
    stop_buses: HashMap<StopId, BTreeSet<BusId>>,
}

impl TransportCatalogue {
    /// Create an empty catalogue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stop and index it by name.
    ///
    /// Names are not validated: adding a second stop with an existing name
    /// points the name index at the new stop, and the old one stays
    /// reachable only through its id.
    pub fn add_stop(&mut self, name: impl Into<String>, coordinates: Coordinates) -> StopId {
        let id = StopId(self.stops.len());
        let stop = Stop::new(name, coordinates);
        if self.stop_index.insert(stop.name.clone(), id).is_some() {
            warn!(stop = %stop.name, "duplicate stop name, index now points at the newest stop");
        }
        self.stops.push(stop);
        id
    }

    /// Look up a stop by name.
    pub fn find_stop(&self, name: &str) -> Option<StopId> {
        self.stop_index.get(name).copied()
    }

    /// Get a stop by id.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this catalogue.
    pub fn stop(&self, id: StopId) -> &Stop {
        &self.stops[id.index()]
    }

    /// All stops in insertion (id) order.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Number of stops.
    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    /// Insert or overwrite the directed distance `from -> to`.
    ///
    /// The reverse direction is left untouched.
    pub fn set_distance(&mut self, from: StopId, to: StopId, meters: u32) {
        self.distances.insert((from, to), meters);
    }

    /// Road distance between two stops in meters.
    ///
    /// Tries `from -> to` first and falls back to `to -> from`. Returns 0
    /// when neither direction is known.
    pub fn distance(&self, from: StopId, to: StopId) -> u32 {
        self.distances
            .get(&(from, to))
            .or_else(|| self.distances.get(&(to, from)))
            .copied()
            .unwrap_or(0)
    }

    /// All directed distances, in no particular order.
    pub fn distances(&self) -> impl Iterator<Item = (StopId, StopId, u32)> + '_ {
        self.distances
            .iter()
            .map(|(&(from, to), &meters)| (from, to, meters))
    }

    /// Append a bus, index it by name and register it at each of its stops.
    ///
    /// Duplicate names behave as for [`add_stop`](Self::add_stop).
    pub fn add_bus(&mut self, bus: Bus) -> BusId {
        let id = BusId(self.buses.len());
        for stop in &bus.stops {
            self.stop_buses.entry(*stop).or_default().insert(id);
        }
        if self.bus_index.insert(bus.name.clone(), id).is_some() {
            warn!(bus = %bus.name, "duplicate bus name, index now points at the newest bus");
        }
        self.buses.push(bus);
        id
    }

    /// Look up a bus by name.
    pub fn find_bus(&self, name: &str) -> Option<BusId> {
        self.bus_index.get(name).copied()
    }

    /// Get a bus by id.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this catalogue.
    pub fn bus(&self, id: BusId) -> &Bus {
        &self.buses[id.index()]
    }

    /// All buses in insertion (id) order.
    pub fn buses(&self) -> &[Bus] {
        &self.buses
    }

    /// Number of buses.
    pub fn bus_count(&self) -> usize {
        self.buses.len()
    }

    /// Bus ids registered at a stop. Empty when no bus calls there.
    pub fn buses_at(&self, stop: StopId) -> impl Iterator<Item = BusId> + '_ {
        self.stop_buses.get(&stop).into_iter().flatten().copied()
    }

    /// The raw stop -> buses index, in no particular order.
    pub fn stop_buses(&self) -> impl Iterator<Item = (StopId, &BTreeSet<BusId>)> + '_ {
        self.stop_buses.iter().map(|(stop, buses)| (*stop, buses))
    }

    /// Aggregate statistics for a bus, or `None` if the name is unknown.
    pub fn bus_stat(&self, name: &str) -> Option<BusStat> {
        let bus = self.bus(self.find_bus(name)?);
        let route = bus.full_route();

        let unique_stop_count = route.iter().collect::<HashSet<_>>().len();

        let mut route_length: u64 = 0;
        let mut geo_length = 0.0;
        for pair in route.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            route_length += u64::from(self.distance(from, to));
            geo_length += great_circle_distance(
                self.stop(from).coordinates,
                self.stop(to).coordinates,
            );
        }

        Some(BusStat {
            stop_count: route.len(),
            unique_stop_count,
            route_length,
            curvature: route_length as f64 / geo_length,
        })
    }

    /// Names of the buses calling at a stop, sorted.
    ///
    /// `None` means the stop is unknown; an empty set means the stop exists
    /// but no bus calls there.
    pub fn buses_for_stop(&self, name: &str) -> Option<BTreeSet<&str>> {
        let stop = self.find_stop(name)?;
        Some(
            self.buses_at(stop)
                .map(|bus| self.bus(bus).name.as_str())
                .collect(),
        )
    }

    /// Reassemble a catalogue from its arenas and indices.
    ///
    /// Name indices are rebuilt from the arenas; the stop -> buses index is
    /// taken as given. Callers must have checked every id against the arena
    /// sizes.
    pub(crate) fn from_parts(
        stops: Vec<Stop>,
        distances: HashMap<(StopId, StopId), u32>,
        buses: Vec<Bus>,
        stop_buses: HashMap<StopId, BTreeSet<BusId>>,
    ) -> Self {
        let stop_index = stops
            .iter()
            .enumerate()
            .map(|(i, stop)| (stop.name.clone(), StopId(i)))
            .collect();
        let bus_index = buses
            .iter()
            .enumerate()
            .map(|(i, bus)| (bus.name.clone(), BusId(i)))
            .collect();

        Self {
            stops,
            stop_index,
            distances,
            buses,
            bus_index,
            stop_buses,
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// A distance set in one direction only reads the same both ways.
        #[test]
        fn one_way_distance_is_symmetric(meters in 0u32..1_000_000) {
            let mut catalogue = TransportCatalogue::new();
            let a = catalogue.add_stop("a", Coordinates::new(0.0, 0.0));
            let b = catalogue.add_stop("b", Coordinates::new(0.0, 0.1));
            catalogue.set_distance(a, b, meters);
            prop_assert_eq!(catalogue.distance(a, b), meters);
            prop_assert_eq!(catalogue.distance(b, a), meters);
        }

        /// stop_count follows the full route; unique_stop_count counts ids.
        #[test]
        fn stop_counts_match_route(
            raw in proptest::collection::vec(0usize..6, 1..20),
            roundtrip in any::<bool>(),
        ) {
            let mut catalogue = TransportCatalogue::new();
            for i in 0..6 {
                catalogue.add_stop(format!("s{i}"), Coordinates::new(i as f64, 0.0));
            }
            let stops: Vec<StopId> = raw.iter().copied().map(StopId).collect();
            let bus = if roundtrip {
                Bus::round_trip("b", stops.clone())
            } else {
                Bus::linear("b", stops.clone())
            };
            let expected_len = if roundtrip { stops.len() } else { stops.len() * 2 - 1 };
            let expected_unique = stops.iter().collect::<HashSet<_>>().len();
            catalogue.add_bus(bus);

            let stat = catalogue.bus_stat("b").unwrap();
            prop_assert_eq!(stat.stop_count, expected_len);
            prop_assert_eq!(stat.unique_stop_count, expected_unique);
        }
    }
}
