//! Geographic coordinates and great-circle distance.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A point on the Earth's surface, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lng: f64,
}

impl Coordinates {
    /// Creates a coordinate pair from latitude and longitude in degrees.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Great-circle distance between two coordinates in meters.
///
/// Uses the haversine formula, which stays well-conditioned for the short
/// hops between neighbouring stops. Identical points yield exactly 0.
pub fn great_circle_distance(from: Coordinates, to: Coordinates) -> f64 {
    if from == to {
        return 0.0;
    }

    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let delta_lat = (to.lat - from.lat).to_radians();
    let delta_lng = (to.lng - from.lng).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_point_is_zero() {
        let p = Coordinates::new(55.611087, 37.20829);
        assert_eq!(great_circle_distance(p, p), 0.0);
    }

    #[test]
    fn one_hundredth_degree_of_longitude_at_equator() {
        let a = Coordinates::new(0.0, 0.0);
        let b = Coordinates::new(0.0, 0.01);
        let d = great_circle_distance(a, b);
        // 2 * pi * 6371000 / 360 / 100
        assert!((d - 1111.949).abs() < 0.01, "got {d}");
    }

    #[test]
    fn symmetric() {
        let a = Coordinates::new(55.574371, 37.6517);
        let b = Coordinates::new(55.587655, 37.645687);
        assert_eq!(great_circle_distance(a, b), great_circle_distance(b, a));
    }

    #[test]
    fn known_moscow_distance() {
        // Biryulyovo Zapadnoye -> Biryusinka, a little under 800 m apart
        let a = Coordinates::new(55.574371, 37.6517);
        let b = Coordinates::new(55.581065, 37.64839);
        let d = great_circle_distance(a, b);
        assert!(d > 700.0 && d < 800.0, "got {d}");
    }
}
