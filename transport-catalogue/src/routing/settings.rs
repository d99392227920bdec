//! Routing settings.

use serde::{Deserialize, Serialize};

/// Error returned when routing settings are out of range.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid routing settings: {reason}")]
pub struct InvalidSettings {
    reason: &'static str,
}

/// Parameters of the travel-time model.
///
/// There is deliberately no `Default`: without explicit settings the
/// system refuses routing queries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoutingSettings {
    /// Minutes spent waiting for any bus at a stop.
    pub bus_wait_time: f64,

    /// Bus speed in km/h.
    pub bus_velocity: f64,
}

impl RoutingSettings {
    /// Create validated settings.
    ///
    /// The wait time must be finite and non-negative, the velocity finite
    /// and strictly positive.
    pub fn new(bus_wait_time: f64, bus_velocity: f64) -> Result<Self, InvalidSettings> {
        if !bus_wait_time.is_finite() || bus_wait_time < 0.0 {
            return Err(InvalidSettings {
                reason: "bus wait time must be a non-negative number of minutes",
            });
        }
        if !bus_velocity.is_finite() || bus_velocity <= 0.0 {
            return Err(InvalidSettings {
                reason: "bus velocity must be a positive number of km/h",
            });
        }
        Ok(Self {
            bus_wait_time,
            bus_velocity,
        })
    }

    /// Minutes needed to ride `meters` at the bus velocity.
    pub fn ride_minutes(&self, meters: u32) -> f64 {
        60.0 * f64::from(meters) / 1000.0 / self.bus_velocity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_settings() {
        let settings = RoutingSettings::new(6.0, 40.0).unwrap();
        assert_eq!(settings.bus_wait_time, 6.0);
        assert_eq!(settings.bus_velocity, 40.0);
    }

    #[test]
    fn zero_wait_is_allowed() {
        assert!(RoutingSettings::new(0.0, 40.0).is_ok());
    }

    #[test]
    fn rejects_bad_values() {
        assert!(RoutingSettings::new(-1.0, 40.0).is_err());
        assert!(RoutingSettings::new(f64::NAN, 40.0).is_err());
        assert!(RoutingSettings::new(6.0, 0.0).is_err());
        assert!(RoutingSettings::new(6.0, -3.0).is_err());
        assert!(RoutingSettings::new(6.0, f64::INFINITY).is_err());
    }

    #[test]
    fn error_display() {
        let err = RoutingSettings::new(6.0, 0.0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid routing settings: bus velocity must be a positive number of km/h"
        );
    }

    #[test]
    fn ride_minutes() {
        let settings = RoutingSettings::new(1.0, 60.0).unwrap();
        assert_eq!(settings.ride_minutes(1000), 1.0);
        assert_eq!(settings.ride_minutes(0), 0.0);

        let settings = RoutingSettings::new(6.0, 40.0).unwrap();
        assert!((settings.ride_minutes(2600) - 3.9).abs() < 1e-12);
    }
}
