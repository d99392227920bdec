//! Itinerary types returned by route queries.

/// One step of an itinerary.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteItem {
    /// Wait for a bus at a stop.
    Wait {
        stop_name: String,
        /// Minutes
        time: f64,
    },
    /// Ride one bus past `span_count` stop-to-stop hops without leaving it.
    Bus {
        bus: String,
        span_count: usize,
        /// Minutes
        time: f64,
    },
}

/// A fastest itinerary between two stops.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Total minutes, waits included
    pub total_time: f64,
    pub items: Vec<RouteItem>,
}
