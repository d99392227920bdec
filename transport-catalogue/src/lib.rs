//! Transport catalogue with fastest-route queries.
//!
//! Stops and bus routes are loaded from a JSON document, frozen into a
//! [`system::TransportSystem`] and saved as a binary snapshot. A second
//! document names the snapshot and asks for bus statistics, the buses at a
//! stop, or the fastest itinerary between two stops.

pub mod catalogue;
pub mod domain;
pub mod graph;
pub mod requests;
pub mod routing;
pub mod snapshot;
pub mod system;
