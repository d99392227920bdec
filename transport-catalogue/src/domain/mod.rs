//! Domain types for the transport catalogue.
//!
//! Stops and buses live in arenas owned by the catalogue and refer to each
//! other through dense integer ids rather than references.

mod bus;
mod coordinates;
mod stop;

pub use bus::{Bus, BusId, BusStat};
pub use coordinates::{Coordinates, great_circle_distance};
pub use stop::{Stop, StopId};
