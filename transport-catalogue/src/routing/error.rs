//! Routing query errors.

/// Why a route query produced no itinerary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// A stop name is not in the catalogue
    #[error("stop not found: {0}")]
    StopNotFound(String),

    /// Both stops exist but no bus connects them
    #[error("no route from {from} to {to}")]
    Unreachable { from: String, to: String },

    /// Routing settings were never supplied, so no graph was built
    #[error("routing is not configured")]
    RoutingDisabled,
}

impl RouteError {
    /// True for the "not found" family: unknown stop or no path.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            RouteError::StopNotFound(_) | RouteError::Unreachable { .. }
        )
    }
}
