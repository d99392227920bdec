//! Fastest-path itineraries over the bus network.
//!
//! The catalogue is turned into a generic weighted graph once, the
//! all-pairs table is precomputed, and queries decode table paths back
//! into "wait at stop" / "ride bus" items.

mod error;
mod route;
mod settings;
mod transport_router;

pub use error::RouteError;
pub use route::{Route, RouteItem};
pub use settings::{InvalidSettings, RoutingSettings};
pub use transport_router::{EdgeMeta, StopVertices, TransportRouter};
