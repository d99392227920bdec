//! The assembled transport system.
//!
//! [`TransportSystemBuilder`] collects stops, distances, buses and
//! settings. [`TransportSystemBuilder::build`] freezes them into a
//! [`TransportSystem`], which only answers queries. Routing is available
//! only when routing settings were supplied before building.

use std::collections::BTreeSet;
use std::path::Path;

use tracing::{debug, warn};

use crate::catalogue::TransportCatalogue;
use crate::domain::{Bus, BusId, BusStat, Coordinates, StopId};
use crate::routing::{Route, RouteError, RoutingSettings, TransportRouter};
use crate::snapshot::{self, SnapshotError};

/// Map rendering settings.
///
/// Not interpreted here; the JSON text is stored and restored verbatim for
/// whichever renderer consumes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSettings(String);

impl RenderSettings {
    /// Wrap raw settings text.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw settings text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Mutable stage: populate the catalogue and choose settings.
#[derive(Debug, Default)]
pub struct TransportSystemBuilder {
    catalogue: TransportCatalogue,
    routing_settings: Option<RoutingSettings>,
    render_settings: Option<RenderSettings>,
}

impl TransportSystemBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a stop.
    pub fn add_stop(&mut self, name: impl Into<String>, lat: f64, lng: f64) -> StopId {
        self.catalogue.add_stop(name, Coordinates::new(lat, lng))
    }

    /// Set the directed road distance between two named stops.
    ///
    /// Returns false, and changes nothing, if either stop is unknown.
    pub fn set_distance(&mut self, from: &str, to: &str, meters: u32) -> bool {
        match (self.catalogue.find_stop(from), self.catalogue.find_stop(to)) {
            (Some(from), Some(to)) => {
                self.catalogue.set_distance(from, to, meters);
                true
            }
            _ => {
                debug!(from, to, "distance between unknown stops ignored");
                false
            }
        }
    }

    /// Add a bus over named stops.
    ///
    /// Names that do not resolve to a stop are skipped. A linear bus is
    /// given only its outbound stops; the return leg is implied.
    pub fn add_bus<S: AsRef<str>>(
        &mut self,
        name: impl Into<String>,
        stops: &[S],
        is_roundtrip: bool,
    ) -> BusId {
        let name = name.into();
        let stop_ids: Vec<StopId> = stops
            .iter()
            .filter_map(|stop| {
                let found = self.catalogue.find_stop(stop.as_ref());
                if found.is_none() {
                    warn!(bus = %name, stop = stop.as_ref(), "bus references unknown stop, skipped");
                }
                found
            })
            .collect();

        let bus = if is_roundtrip {
            Bus::round_trip(name, stop_ids)
        } else {
            Bus::linear(name, stop_ids)
        };
        self.catalogue.add_bus(bus)
    }

    /// Enable routing with the given settings.
    pub fn routing_settings(&mut self, settings: RoutingSettings) -> &mut Self {
        self.routing_settings = Some(settings);
        self
    }

    /// Attach opaque render settings.
    pub fn render_settings(&mut self, settings: RenderSettings) -> &mut Self {
        self.render_settings = Some(settings);
        self
    }

    /// Read access to the catalogue being populated.
    pub fn catalogue(&self) -> &TransportCatalogue {
        &self.catalogue
    }

    /// Freeze the catalogue and, if routing is configured, build the
    /// routing graph and its path table.
    pub fn build(self) -> TransportSystem {
        let router = self
            .routing_settings
            .map(|settings| TransportRouter::new(&self.catalogue, settings));
        if router.is_none() {
            debug!("no routing settings, route queries disabled");
        }

        TransportSystem {
            catalogue: self.catalogue,
            router,
            render_settings: self.render_settings,
        }
    }
}

/// Immutable, fully built system answering queries.
#[derive(Debug, Clone)]
pub struct TransportSystem {
    catalogue: TransportCatalogue,
    router: Option<TransportRouter>,
    render_settings: Option<RenderSettings>,
}

impl TransportSystem {
    /// Statistics for a bus, or `None` if the bus is unknown.
    pub fn bus_stat(&self, name: &str) -> Option<BusStat> {
        self.catalogue.bus_stat(name)
    }

    /// Sorted names of buses at a stop.
    ///
    /// `None` if the stop is unknown, an empty set if no bus calls there.
    pub fn buses_for_stop(&self, name: &str) -> Option<BTreeSet<&str>> {
        self.catalogue.buses_for_stop(name)
    }

    /// Fastest itinerary between two named stops.
    pub fn build_route(&self, from: &str, to: &str) -> Result<Route, RouteError> {
        let router = self.router.as_ref().ok_or(RouteError::RoutingDisabled)?;
        let from_id = self
            .catalogue
            .find_stop(from)
            .ok_or_else(|| RouteError::StopNotFound(from.to_string()))?;
        let to_id = self
            .catalogue
            .find_stop(to)
            .ok_or_else(|| RouteError::StopNotFound(to.to_string()))?;

        router
            .build_route(&self.catalogue, from_id, to_id)
            .ok_or_else(|| RouteError::Unreachable {
                from: from.to_string(),
                to: to.to_string(),
            })
    }

    /// Returns true if route queries can be answered.
    pub fn routing_enabled(&self) -> bool {
        self.router.is_some()
    }

    /// The catalogue.
    pub fn catalogue(&self) -> &TransportCatalogue {
        &self.catalogue
    }

    /// The routing engine, if routing is configured.
    pub fn router(&self) -> Option<&TransportRouter> {
        self.router.as_ref()
    }

    /// Routing settings, if routing is configured.
    pub fn routing_settings(&self) -> Option<&RoutingSettings> {
        self.router.as_ref().map(TransportRouter::settings)
    }

    /// Render settings, if any were supplied.
    pub fn render_settings(&self) -> Option<&RenderSettings> {
        self.render_settings.as_ref()
    }

    /// Write the whole computed state to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        snapshot::save(self, path.as_ref())
    }

    /// Restore a system previously written by [`save`](Self::save).
    ///
    /// Either the whole snapshot is valid and a new system is returned, or
    /// an error is returned and nothing else is affected.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        snapshot::load(path.as_ref())
    }

    pub(crate) fn from_parts(
        catalogue: TransportCatalogue,
        router: Option<TransportRouter>,
        render_settings: Option<RenderSettings>,
    ) -> Self {
        Self {
            catalogue,
            router,
            render_settings,
        }
    }
}
