//! Data transfer objects for request and response documents.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where the snapshot lives.
#[derive(Debug, Clone, Deserialize)]
pub struct SerializationSettings {
    /// Snapshot file path
    pub file: PathBuf,
}

/// Routing settings as they appear in input documents.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RoutingSettingsRequest {
    /// Minutes spent waiting at a stop
    pub bus_wait_time: f64,

    /// Bus speed in km/h
    pub bus_velocity: f64,
}

/// Document for building and saving a base.
#[derive(Debug, Deserialize)]
pub struct MakeBaseRequest {
    /// Stops and buses, in any order
    #[serde(default)]
    pub base_requests: Vec<BaseRequest>,

    /// Enables routing when present
    pub routing_settings: Option<RoutingSettingsRequest>,

    /// Passed through to the snapshot untouched
    pub render_settings: Option<serde_json::Value>,

    /// Where to save the snapshot
    pub serialization_settings: SerializationSettings,
}

/// One entry of `base_requests`.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum BaseRequest {
    Stop(StopRequest),
    Bus(BusRequest),
}

/// A stop with its outgoing road distances.
#[derive(Debug, Deserialize)]
pub struct StopRequest {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,

    /// Meters from this stop to each named neighbour
    #[serde(default)]
    pub road_distances: BTreeMap<String, u32>,
}

/// A bus route.
#[derive(Debug, Deserialize)]
pub struct BusRequest {
    pub name: String,

    /// Full loop for round trips, outbound stops otherwise
    #[serde(default)]
    pub stops: Vec<String>,

    pub is_roundtrip: bool,
}

/// Document for answering queries against a saved base.
#[derive(Debug, Deserialize)]
pub struct ProcessRequestsRequest {
    /// Which snapshot to load
    pub serialization_settings: SerializationSettings,

    /// Queries, answered in order
    #[serde(default)]
    pub stat_requests: Vec<StatRequest>,
}

/// One query.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum StatRequest {
    Bus { id: i64, name: String },
    Stop { id: i64, name: String },
    Route { id: i64, from: String, to: String },
    Map { id: i64 },
}

impl StatRequest {
    /// The caller-chosen request id echoed in the response.
    pub fn id(&self) -> i64 {
        match self {
            StatRequest::Bus { id, .. }
            | StatRequest::Stop { id, .. }
            | StatRequest::Route { id, .. }
            | StatRequest::Map { id } => *id,
        }
    }
}

/// Answer to one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatResponse {
    Bus {
        request_id: i64,
        /// NaN (serialized as `null`) when all stops coincide
        curvature: f64,
        route_length: u64,
        stop_count: usize,
        unique_stop_count: usize,
    },
    Stop {
        request_id: i64,
        buses: Vec<String>,
    },
    Route {
        request_id: i64,
        total_time: f64,
        items: Vec<RouteItemResponse>,
    },
    Error {
        request_id: i64,
        error_message: String,
    },
}

/// One itinerary item in a route response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum RouteItemResponse {
    Wait {
        stop_name: String,
        time: f64,
    },
    Bus {
        bus: String,
        span_count: usize,
        time: f64,
    },
}
