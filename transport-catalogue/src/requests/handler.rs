//! Executes request documents against the transport system.

use std::io::{Read, Write};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, trace};

use crate::routing::{RouteItem, RoutingSettings};
use crate::system::{RenderSettings, TransportSystem, TransportSystemBuilder};

use super::dto::*;
use super::error::RequestError;

const NOT_FOUND: &str = "not found";
const ROUTING_DISABLED: &str = "routing is not configured";
const MAP_UNSUPPORTED: &str = "map rendering is not supported";

/// Parse a JSON document from a reader.
pub fn read_json<T: DeserializeOwned>(reader: impl Read) -> Result<T, RequestError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Write a value as pretty-printed JSON followed by a newline.
pub fn write_json<T: Serialize>(mut writer: impl Write, value: &T) -> Result<(), RequestError> {
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    Ok(())
}

/// Populate and build a system from a make-base document.
///
/// Stops go in first, then road distances, then buses, so that every name
/// a distance or bus mentions can already be resolved.
pub fn build_system(request: &MakeBaseRequest) -> Result<TransportSystem, RequestError> {
    let mut builder = TransportSystemBuilder::new();

    for base in &request.base_requests {
        if let BaseRequest::Stop(stop) = base {
            builder.add_stop(stop.name.as_str(), stop.latitude, stop.longitude);
        }
    }

    for base in &request.base_requests {
        if let BaseRequest::Stop(stop) = base {
            for (to, &meters) in &stop.road_distances {
                builder.set_distance(&stop.name, to, meters);
            }
        }
    }

    for base in &request.base_requests {
        if let BaseRequest::Bus(bus) = base {
            builder.add_bus(bus.name.as_str(), bus.stops.as_slice(), bus.is_roundtrip);
        }
    }

    if let Some(settings) = request.routing_settings {
        builder.routing_settings(RoutingSettings::new(
            settings.bus_wait_time,
            settings.bus_velocity,
        )?);
    }

    if let Some(render) = &request.render_settings {
        builder.render_settings(RenderSettings::new(serde_json::to_string(render)?));
    }

    debug!(
        stops = builder.catalogue().stop_count(),
        buses = builder.catalogue().bus_count(),
        "catalogue populated"
    );
    Ok(builder.build())
}

/// Build a system from a make-base document and save it.
pub fn make_base(request: &MakeBaseRequest) -> Result<TransportSystem, RequestError> {
    let system = build_system(request)?;
    system.save(&request.serialization_settings.file)?;
    info!(
        file = %request.serialization_settings.file.display(),
        routing = system.routing_enabled(),
        "base created"
    );
    Ok(system)
}

/// Load the named snapshot and answer every query in order.
pub fn process_requests(
    request: &ProcessRequestsRequest,
) -> Result<Vec<StatResponse>, RequestError> {
    let system = TransportSystem::load(&request.serialization_settings.file)?;
    Ok(request
        .stat_requests
        .iter()
        .map(|stat| answer(&system, stat))
        .collect())
}

/// Answer a single query.
pub fn answer(system: &TransportSystem, request: &StatRequest) -> StatResponse {
    trace!(?request, "answering");
    let request_id = request.id();

    match request {
        StatRequest::Bus { name, .. } => match system.bus_stat(name) {
            Some(stat) => StatResponse::Bus {
                request_id,
                curvature: stat.curvature,
                route_length: stat.route_length,
                stop_count: stat.stop_count,
                unique_stop_count: stat.unique_stop_count,
            },
            None => error(request_id, NOT_FOUND),
        },

        StatRequest::Stop { name, .. } => match system.buses_for_stop(name) {
            Some(buses) => StatResponse::Stop {
                request_id,
                buses: buses.into_iter().map(str::to_string).collect(),
            },
            None => error(request_id, NOT_FOUND),
        },

        StatRequest::Route { from, to, .. } => match system.build_route(from, to) {
            Ok(route) => StatResponse::Route {
                request_id,
                total_time: route.total_time,
                items: route.items.into_iter().map(RouteItemResponse::from).collect(),
            },
            Err(e) if e.is_not_found() => {
                debug!(request_id, error = %e, "route not found");
                error(request_id, NOT_FOUND)
            }
            Err(_) => error(request_id, ROUTING_DISABLED),
        },

        StatRequest::Map { .. } => error(request_id, MAP_UNSUPPORTED),
    }
}

fn error(request_id: i64, message: &str) -> StatResponse {
    StatResponse::Error {
        request_id,
        error_message: message.to_string(),
    }
}

impl From<RouteItem> for RouteItemResponse {
    fn from(item: RouteItem) -> Self {
        match item {
            RouteItem::Wait { stop_name, time } => RouteItemResponse::Wait { stop_name, time },
            RouteItem::Bus {
                bus,
                span_count,
                time,
            } => RouteItemResponse::Bus {
                bus,
                span_count,
                time,
            },
        }
    }
}
