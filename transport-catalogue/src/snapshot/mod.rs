//! Binary snapshots of a built transport system.
//!
//! A snapshot holds everything needed to answer queries without rebuilding:
//! the catalogue arenas and indices, render and routing settings, the
//! routing graph with its edge metadata, and the full path table.
//!
//! Layout: 8 magic bytes, a little-endian `u32` format version, then the
//! bincode-encoded [`Snapshot`] payload. Stops and buses are referred to by
//! their position in the stored arenas.

mod error;

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalogue::TransportCatalogue;
use crate::domain::{Bus, BusId, Coordinates, Stop, StopId};
use crate::graph::{DirectedWeightedGraph, Edge, EdgeId, RouteInternalData, Router};
use crate::routing::{EdgeMeta, RoutingSettings, StopVertices, TransportRouter};
use crate::system::{RenderSettings, TransportSystem};

pub use error::SnapshotError;

const MAGIC: &[u8; 8] = b"TCSNAP\0\0";

/// Current on-disk format version.
pub const FORMAT_VERSION: u32 = 1;

const HEADER_LEN: usize = MAGIC.len() + 4;

#[derive(Debug, Serialize, Deserialize)]
struct StopRecord {
    name: String,
    coordinates: Coordinates,
}

#[derive(Debug, Serialize, Deserialize)]
struct DistanceRecord {
    from: usize,
    to: usize,
    meters: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct BusRecord {
    name: String,
    stops: Vec<usize>,
    last_stop: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
struct StopBusesRecord {
    stop: usize,
    buses: Vec<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RouterRecord {
    settings: RoutingSettings,
    vertices: Vec<StopVertices>,
    edge_meta: Vec<EdgeMeta>,
    edges: Vec<Edge<f64>>,
    incidence_lists: Vec<Vec<EdgeId>>,
    table: Vec<Option<RouteInternalData<f64>>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    stops: Vec<StopRecord>,
    distances: Vec<DistanceRecord>,
    buses: Vec<BusRecord>,
    stop_buses: Vec<StopBusesRecord>,
    render_settings: Option<String>,
    router: Option<RouterRecord>,
}

impl Snapshot {
    fn capture(system: &TransportSystem) -> Self {
        let catalogue = system.catalogue();

        let stops = catalogue
            .stops()
            .iter()
            .map(|stop| StopRecord {
                name: stop.name.clone(),
                coordinates: stop.coordinates,
            })
            .collect();

        let mut distances: Vec<DistanceRecord> = catalogue
            .distances()
            .map(|(from, to, meters)| DistanceRecord {
                from: from.index(),
                to: to.index(),
                meters,
            })
            .collect();
        distances.sort_by_key(|d| (d.from, d.to));

        let buses = catalogue
            .buses()
            .iter()
            .map(|bus| BusRecord {
                name: bus.name.clone(),
                stops: bus.stops.iter().map(|s| s.index()).collect(),
                last_stop: bus.last_stop.map(StopId::index),
            })
            .collect();

        let mut stop_buses: Vec<StopBusesRecord> = catalogue
            .stop_buses()
            .map(|(stop, buses)| StopBusesRecord {
                stop: stop.index(),
                buses: buses.iter().map(|b| b.index()).collect(),
            })
            .collect();
        stop_buses.sort_by_key(|r| r.stop);

        let router = system.router().map(|router| RouterRecord {
            settings: *router.settings(),
            vertices: router.vertices().to_vec(),
            edge_meta: router.edge_meta().to_vec(),
            edges: router.graph().edges().to_vec(),
            incidence_lists: router.graph().incidence_lists().to_vec(),
            table: router.router().table().to_vec(),
        });

        Self {
            stops,
            distances,
            buses,
            stop_buses,
            render_settings: system.render_settings().map(|s| s.as_str().to_string()),
            router,
        }
    }

    /// Check every stored id and rebuild the live structures.
    fn restore(self) -> Result<TransportSystem, SnapshotError> {
        let stop_count = self.stops.len();
        let bus_count = self.buses.len();
        let stop_id = |raw: usize, context: &str| {
            if raw < stop_count {
                Ok(StopId(raw))
            } else {
                Err(SnapshotError::Corrupt(format!(
                    "{context} references stop {raw} of {stop_count}"
                )))
            }
        };
        let bus_id = |raw: usize, context: &str| {
            if raw < bus_count {
                Ok(BusId(raw))
            } else {
                Err(SnapshotError::Corrupt(format!(
                    "{context} references bus {raw} of {bus_count}"
                )))
            }
        };

        let stops: Vec<Stop> = self
            .stops
            .into_iter()
            .map(|record| Stop::new(record.name, record.coordinates))
            .collect();

        let mut distances = HashMap::with_capacity(self.distances.len());
        for record in &self.distances {
            let from = stop_id(record.from, "distance")?;
            let to = stop_id(record.to, "distance")?;
            distances.insert((from, to), record.meters);
        }

        let mut buses = Vec::with_capacity(bus_count);
        for record in self.buses {
            let context = format!("bus {}", record.name);
            let stops = record
                .stops
                .iter()
                .map(|&raw| stop_id(raw, context.as_str()))
                .collect::<Result<Vec<_>, _>>()?;
            let last_stop = record
                .last_stop
                .map(|raw| stop_id(raw, context.as_str()))
                .transpose()?;
            buses.push(Bus {
                name: record.name,
                stops,
                last_stop,
            });
        }

        let mut stop_buses = HashMap::with_capacity(self.stop_buses.len());
        for record in &self.stop_buses {
            let stop = stop_id(record.stop, "stop index")?;
            let ids = record
                .buses
                .iter()
                .map(|&raw| bus_id(raw, "stop index"))
                .collect::<Result<BTreeSet<_>, _>>()?;
            stop_buses.insert(stop, ids);
        }

        let router = self
            .router
            .map(|record| restore_router(record, stop_count, &stop_id, &bus_id))
            .transpose()?;

        let catalogue = TransportCatalogue::from_parts(stops, distances, buses, stop_buses);
        Ok(TransportSystem::from_parts(
            catalogue,
            router,
            self.render_settings.map(RenderSettings::new),
        ))
    }
}

fn restore_router(
    record: RouterRecord,
    stop_count: usize,
    stop_id: &impl Fn(usize, &str) -> Result<StopId, SnapshotError>,
    bus_id: &impl Fn(usize, &str) -> Result<BusId, SnapshotError>,
) -> Result<TransportRouter, SnapshotError> {
    let settings =
        RoutingSettings::new(record.settings.bus_wait_time, record.settings.bus_velocity)
            .map_err(|e| SnapshotError::Corrupt(e.to_string()))?;

    if record.vertices.len() != stop_count {
        return Err(SnapshotError::Corrupt(format!(
            "{} stop vertex pairs for {stop_count} stops",
            record.vertices.len()
        )));
    }

    let graph = DirectedWeightedGraph::from_parts(record.edges, record.incidence_lists)?;
    if graph.vertex_count() != 2 * stop_count {
        return Err(SnapshotError::Corrupt(format!(
            "{} graph vertices for {stop_count} stops",
            graph.vertex_count()
        )));
    }

    for (stop, pair) in record.vertices.iter().enumerate() {
        if pair.entry != 2 * stop || pair.boarded != 2 * stop + 1 {
            return Err(SnapshotError::Corrupt(format!(
                "stop {stop} maps to vertices {} and {}",
                pair.entry, pair.boarded
            )));
        }
    }

    if record.edge_meta.len() != graph.edge_count() {
        return Err(SnapshotError::Corrupt(format!(
            "{} edge descriptions for {} edges",
            record.edge_meta.len(),
            graph.edge_count()
        )));
    }
    for (id, (meta, edge)) in record.edge_meta.iter().zip(graph.edges()).enumerate() {
        let from = stop_id(meta.from.index(), "edge")?;
        let to = stop_id(meta.to.index(), "edge")?;
        if let Some(bus) = meta.bus {
            bus_id(bus.index(), "edge")?;
        }

        let from = record.vertices[from.index()];
        let to = record.vertices[to.index()];
        // Wait edges stay on one stop; rides leave on a bus and arrive at a stop.
        let consistent = if meta.is_wait() {
            meta.bus.is_none()
                && meta.from == meta.to
                && (edge.from, edge.to) == (from.entry, from.boarded)
        } else {
            meta.bus.is_some() && (edge.from, edge.to) == (from.boarded, to.entry)
        };
        if !consistent || edge.weight != meta.time {
            return Err(SnapshotError::Corrupt(format!(
                "edge {id} does not match its description"
            )));
        }
    }

    let router = Router::from_table(&graph, record.table)?;

    Ok(TransportRouter::from_parts(
        settings,
        record.vertices,
        record.edge_meta,
        graph,
        router,
    ))
}

/// Encode a system into snapshot bytes.
pub fn encode(system: &TransportSystem) -> Result<Vec<u8>, SnapshotError> {
    let snapshot = Snapshot::capture(system);
    let mut bytes = Vec::new();
    bytes.extend_from_slice(MAGIC);
    bytes.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
    bincode::serialize_into(&mut bytes, &snapshot)?;
    Ok(bytes)
}

/// Decode snapshot bytes into a new system.
pub fn decode(bytes: &[u8]) -> Result<TransportSystem, SnapshotError> {
    if bytes.len() < HEADER_LEN || &bytes[..MAGIC.len()] != MAGIC {
        return Err(SnapshotError::BadMagic);
    }
    let mut version = [0u8; 4];
    version.copy_from_slice(&bytes[MAGIC.len()..HEADER_LEN]);
    let version = u32::from_le_bytes(version);
    if version != FORMAT_VERSION {
        return Err(SnapshotError::VersionMismatch {
            found: version,
            expected: FORMAT_VERSION,
        });
    }

    let snapshot: Snapshot = bincode::deserialize(&bytes[HEADER_LEN..])?;
    debug!(
        stops = snapshot.stops.len(),
        buses = snapshot.buses.len(),
        routing = snapshot.router.is_some(),
        "snapshot decoded"
    );
    snapshot.restore()
}

/// Write `system` to `path`, creating parent directories as needed.
///
/// The snapshot is written to a sibling temporary file and renamed into
/// place, so an existing snapshot is never left half-written.
pub fn save(system: &TransportSystem, path: &Path) -> Result<(), SnapshotError> {
    let bytes = encode(system)?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)?;
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    if let Err(e) = fs::write(&tmp, &bytes).and_then(|()| fs::rename(&tmp, path)) {
        if let Err(cleanup) = fs::remove_file(&tmp) {
            debug!(path = ?tmp, error = %cleanup, "temporary snapshot not removed");
        }
        return Err(e.into());
    }

    info!(path = %path.display(), bytes = bytes.len(), "snapshot saved");
    Ok(())
}

/// Read a system from `path`.
pub fn load(path: &Path) -> Result<TransportSystem, SnapshotError> {
    let bytes = fs::read(path)?;
    let system = decode(&bytes)?;
    info!(path = %path.display(), bytes = bytes.len(), "snapshot loaded");
    Ok(system)
}
