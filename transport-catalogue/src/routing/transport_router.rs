//! Graph construction over the catalogue and itinerary decoding.
//!
//! Every stop gets two vertices: ENTRY (standing at the stop) and BOARDED
//! (sitting on a bus that is about to leave it). A wait edge ENTRY -> BOARDED
//! costs the wait time. For each bus and each pair of stops `i < j` along its
//! full route there is one ride edge BOARDED(i) -> ENTRY(j) costing the whole
//! ride from `i` to `j`. Riding past intermediate stops is therefore a single
//! edge, and each ride in a decoded itinerary is one bus without a transfer.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalogue::TransportCatalogue;
use crate::domain::{BusId, StopId};
use crate::graph::{DirectedWeightedGraph, Edge, EdgeId, Router, VertexId};

use super::{Route, RouteItem, RoutingSettings};

/// The two graph vertices of one stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopVertices {
    /// Arrived at the stop, not yet on a bus
    pub entry: VertexId,
    /// Waited and boarded, about to depart
    pub boarded: VertexId,
}

/// What a graph edge means in transit terms, indexed by edge id.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeMeta {
    /// Bus ridden along this edge; `None` for wait edges
    pub bus: Option<BusId>,
    pub from: StopId,
    pub to: StopId,
    /// Minutes
    pub time: f64,
    /// Stop-to-stop hops covered; 0 for wait edges
    pub span: usize,
}

impl EdgeMeta {
    /// Returns true if this edge models waiting at a stop.
    pub fn is_wait(&self) -> bool {
        self.span == 0
    }
}

/// Routing engine: graph, edge metadata and the precomputed path table.
#[derive(Debug, Clone)]
pub struct TransportRouter {
    settings: RoutingSettings,
    /// Indexed by stop id
    vertices: Vec<StopVertices>,
    /// Indexed by edge id
    edges: Vec<EdgeMeta>,
    graph: DirectedWeightedGraph<f64>,
    router: Router<f64>,
}

impl TransportRouter {
    /// Build the graph for `catalogue` and precompute all shortest paths.
    ///
    /// This is the expensive step; the result is immutable.
    pub fn new(catalogue: &TransportCatalogue, settings: RoutingSettings) -> Self {
        let vertices: Vec<StopVertices> = (0..catalogue.stop_count())
            .map(|i| StopVertices {
                entry: 2 * i,
                boarded: 2 * i + 1,
            })
            .collect();

        let mut graph = DirectedWeightedGraph::new(2 * vertices.len());
        let mut edges = Vec::new();

        for (i, stop_vertices) in vertices.iter().enumerate() {
            let stop = StopId(i);
            graph.add_edge(Edge {
                from: stop_vertices.entry,
                to: stop_vertices.boarded,
                weight: settings.bus_wait_time,
            });
            edges.push(EdgeMeta {
                bus: None,
                from: stop,
                to: stop,
                time: settings.bus_wait_time,
                span: 0,
            });
        }

        for (i, bus) in catalogue.buses().iter().enumerate() {
            let route = bus.full_route();
            let hop_minutes: Vec<f64> = route
                .windows(2)
                .map(|pair| settings.ride_minutes(catalogue.distance(pair[0], pair[1])))
                .collect();

            for (from_pos, &from) in route.iter().enumerate() {
                let mut time = 0.0;
                for to_pos in from_pos + 1..route.len() {
                    let to = route[to_pos];
                    time += hop_minutes[to_pos - 1];
                    graph.add_edge(Edge {
                        from: vertices[from.index()].boarded,
                        to: vertices[to.index()].entry,
                        weight: time,
                    });
                    edges.push(EdgeMeta {
                        bus: Some(BusId(i)),
                        from,
                        to,
                        time,
                        span: to_pos - from_pos,
                    });
                }
            }
        }

        info!(
            stops = vertices.len(),
            buses = catalogue.bus_count(),
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            "routing graph built"
        );

        let router = Router::new(&graph);

        Self {
            settings,
            vertices,
            edges,
            graph,
            router,
        }
    }

    /// Fastest itinerary between two stops, or `None` if unreachable.
    ///
    /// A stop always reaches itself with an empty itinerary of zero time.
    pub fn build_route(
        &self,
        catalogue: &TransportCatalogue,
        from: StopId,
        to: StopId,
    ) -> Option<Route> {
        let from_vertex = self.vertices.get(from.index())?.entry;
        let to_vertex = self.vertices.get(to.index())?.entry;

        let info = self.router.build_route(&self.graph, from_vertex, to_vertex)?;
        debug!(
            from = %catalogue.stop(from).name,
            to = %catalogue.stop(to).name,
            edges = info.edges.len(),
            total_time = info.weight,
            "route found"
        );

        let items = info
            .edges
            .iter()
            .map(|&edge| self.decode_edge(catalogue, edge))
            .collect();

        Some(Route {
            total_time: info.weight,
            items,
        })
    }

    fn decode_edge(&self, catalogue: &TransportCatalogue, edge: EdgeId) -> RouteItem {
        let meta = &self.edges[edge];
        if meta.is_wait() {
            return RouteItem::Wait {
                stop_name: catalogue.stop(meta.from).name.clone(),
                time: meta.time,
            };
        }
        let Some(bus) = meta.bus else {
            unreachable!("ride edge {edge} has no bus");
        };
        RouteItem::Bus {
            bus: catalogue.bus(bus).name.clone(),
            span_count: meta.span,
            time: meta.time,
        }
    }

    /// Settings the graph was built with.
    pub fn settings(&self) -> &RoutingSettings {
        &self.settings
    }

    /// Vertices of each stop, indexed by stop id.
    pub fn vertices(&self) -> &[StopVertices] {
        &self.vertices
    }

    /// Edge metadata, indexed by edge id.
    pub fn edge_meta(&self) -> &[EdgeMeta] {
        &self.edges
    }

    /// The underlying graph.
    pub fn graph(&self) -> &DirectedWeightedGraph<f64> {
        &self.graph
    }

    /// The precomputed path table.
    pub fn router(&self) -> &Router<f64> {
        &self.router
    }

    /// Reassemble a router from stored parts.
    ///
    /// Callers must have checked the parts against each other and against
    /// the catalogue they belong to.
    pub(crate) fn from_parts(
        settings: RoutingSettings,
        vertices: Vec<StopVertices>,
        edges: Vec<EdgeMeta>,
        graph: DirectedWeightedGraph<f64>,
        router: Router<f64>,
    ) -> Self {
        Self {
            settings,
            vertices,
            edges,
            graph,
            router,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Bus, Coordinates};

    fn settings(wait: f64, velocity: f64) -> RoutingSettings {
        RoutingSettings::new(wait, velocity).unwrap()
    }

    /// A(0,0), B(0,0.01), A->B = 1000 m, round-trip bus "1" over A, B, A.
    fn two_stop_catalogue() -> (TransportCatalogue, StopId, StopId) {
        let mut catalogue = TransportCatalogue::new();
        let a = catalogue.add_stop("A", Coordinates::new(0.0, 0.0));
        let b = catalogue.add_stop("B", Coordinates::new(0.0, 0.01));
        catalogue.set_distance(a, b, 1000);
        catalogue.add_bus(Bus::round_trip("1", vec![a, b, a]));
        (catalogue, a, b)
    }

    #[test]
    fn graph_shape_for_single_bus() {
        let (catalogue, _, _) = two_stop_catalogue();
        let router = TransportRouter::new(&catalogue, settings(1.0, 60.0));

        // 2 stops -> 4 vertices; 2 wait edges + 3 ride edges for a 3-stop route
        assert_eq!(router.graph().vertex_count(), 4);
        assert_eq!(router.graph().edge_count(), 5);
        assert_eq!(router.edge_meta().len(), 5);

        let spans: Vec<usize> = router.edge_meta().iter().map(|m| m.span).collect();
        assert_eq!(spans, vec![0, 0, 1, 2, 1]);
    }

    #[test]
    fn ride_edges_accumulate_time() {
        let (catalogue, a, _) = two_stop_catalogue();
        let router = TransportRouter::new(&catalogue, settings(1.0, 60.0));

        // A -> B -> A as one ride: 1000 m out and (fallback) 1000 m back
        let round = router
            .edge_meta()
            .iter()
            .find(|m| m.span == 2)
            .unwrap();
        assert_eq!(round.from, a);
        assert_eq!(round.to, a);
        assert_eq!(round.time, 2.0);
    }

    #[test]
    fn route_between_adjacent_stops() {
        let (catalogue, a, b) = two_stop_catalogue();
        let router = TransportRouter::new(&catalogue, settings(1.0, 60.0));

        let route = router.build_route(&catalogue, a, b).unwrap();
        assert_eq!(route.total_time, 2.0);
        assert_eq!(
            route.items,
            vec![
                RouteItem::Wait {
                    stop_name: "A".into(),
                    time: 1.0
                },
                RouteItem::Bus {
                    bus: "1".into(),
                    span_count: 1,
                    time: 1.0
                },
            ]
        );
    }

    #[test]
    fn self_route_is_empty() {
        let (catalogue, a, _) = two_stop_catalogue();
        let router = TransportRouter::new(&catalogue, settings(1.0, 60.0));

        let route = router.build_route(&catalogue, a, a).unwrap();
        assert_eq!(route.total_time, 0.0);
        assert!(route.items.is_empty());
    }

    #[test]
    fn stop_without_buses_is_unreachable() {
        let (mut catalogue, a, _) = two_stop_catalogue();
        let lonely = catalogue.add_stop("Lonely", Coordinates::new(1.0, 1.0));
        let router = TransportRouter::new(&catalogue, settings(1.0, 60.0));

        assert!(router.build_route(&catalogue, a, lonely).is_none());
        assert!(router.build_route(&catalogue, lonely, a).is_none());
    }

    #[test]
    fn riding_past_stops_is_one_item() {
        let mut catalogue = TransportCatalogue::new();
        let stops: Vec<StopId> = (0..4)
            .map(|i| catalogue.add_stop(format!("S{i}"), Coordinates::new(0.0, i as f64 * 0.01)))
            .collect();
        for pair in stops.windows(2) {
            catalogue.set_distance(pair[0], pair[1], 500);
        }
        catalogue.add_bus(Bus::linear("L", stops.clone()));

        let router = TransportRouter::new(&catalogue, settings(5.0, 30.0));
        let route = router.build_route(&catalogue, stops[0], stops[3]).unwrap();

        assert_eq!(route.items.len(), 2);
        assert_eq!(
            route.items[1],
            RouteItem::Bus {
                bus: "L".into(),
                span_count: 3,
                time: 3.0
            }
        );
        assert_eq!(route.total_time, 8.0);
    }

    #[test]
    #[should_panic(expected = "has no bus")]
    fn ride_edge_without_bus_is_an_invariant_violation() {
        let (catalogue, a, b) = two_stop_catalogue();
        let built = TransportRouter::new(&catalogue, settings(1.0, 60.0));

        let mut edges = built.edge_meta().to_vec();
        for meta in edges.iter_mut().filter(|meta| !meta.is_wait()) {
            meta.bus = None;
        }
        let broken = TransportRouter::from_parts(
            *built.settings(),
            built.vertices().to_vec(),
            edges,
            built.graph().clone(),
            built.router().clone(),
        );
        broken.build_route(&catalogue, a, b);
    }

    #[test]
    fn transfer_adds_a_second_wait() {
        let mut catalogue = TransportCatalogue::new();
        let a = catalogue.add_stop("A", Coordinates::new(0.0, 0.0));
        let b = catalogue.add_stop("B", Coordinates::new(0.0, 0.01));
        let c = catalogue.add_stop("C", Coordinates::new(0.0, 0.02));
        catalogue.set_distance(a, b, 1000);
        catalogue.set_distance(b, c, 2000);
        catalogue.add_bus(Bus::linear("first", vec![a, b]));
        catalogue.add_bus(Bus::linear("second", vec![b, c]));

        let router = TransportRouter::new(&catalogue, settings(2.0, 60.0));
        let route = router.build_route(&catalogue, a, c).unwrap();

        let rides = route
            .items
            .iter()
            .filter(|item| matches!(item, RouteItem::Bus { .. }))
            .count();
        assert_eq!(rides, 2);
        assert_eq!(route.items.len(), 4);
        assert_eq!(
            route.items[2],
            RouteItem::Wait {
                stop_name: "B".into(),
                time: 2.0
            }
        );
        // wait 2 + ride 1 + wait 2 + ride 2
        assert_eq!(route.total_time, 7.0);
    }

    #[test]
    fn faster_bus_wins() {
        let mut catalogue = TransportCatalogue::new();
        let a = catalogue.add_stop("A", Coordinates::new(0.0, 0.0));
        let b = catalogue.add_stop("B", Coordinates::new(0.0, 0.01));
        let c = catalogue.add_stop("C", Coordinates::new(0.0, 0.02));
        catalogue.set_distance(a, b, 3000);
        catalogue.set_distance(b, c, 3000);
        catalogue.set_distance(a, c, 1000);
        catalogue.add_bus(Bus::linear("slow", vec![a, b, c]));
        catalogue.add_bus(Bus::linear("fast", vec![a, c]));

        let router = TransportRouter::new(&catalogue, settings(1.0, 60.0));
        let route = router.build_route(&catalogue, a, c).unwrap();

        assert_eq!(route.total_time, 2.0);
        assert!(matches!(&route.items[1], RouteItem::Bus { bus, .. } if bus == "fast"));
    }

    #[test]
    fn unknown_stop_id_is_none() {
        let (catalogue, a, _) = two_stop_catalogue();
        let router = TransportRouter::new(&catalogue, settings(1.0, 60.0));
        assert!(router.build_route(&catalogue, a, StopId(99)).is_none());
    }
}
