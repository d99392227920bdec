//! JSON request processing.
//!
//! Two documents drive the system: a "make base" document that describes
//! the network and where to save it, and a "process requests" document
//! that names a saved snapshot and lists statistics queries.

mod dto;
mod error;
mod handler;

pub use dto::*;
pub use error::RequestError;
pub use handler::{answer, build_system, make_base, process_requests, read_json, write_json};
