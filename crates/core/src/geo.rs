//! Geodesic distance on a spherical Earth model.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters, used by the haversine formula.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// A WGS-84 coordinate in decimal degrees. Immutable value type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees, positive north
    pub latitude: f64,

    /// Longitude in degrees, positive east
    pub longitude: f64,
}

impl Coordinate {
    /// Create a coordinate from latitude/longitude degrees.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Great-circle distance in meters between two coordinates.
///
/// Haversine on a sphere of [`EARTH_RADIUS_METERS`]. Accurate to roughly
/// 0.5%, which is plenty for pedestrian-scale proximity decisions. Pure and
/// symmetric; zero when both points coincide.
pub fn distance_meters(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos() * b.latitude.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Format a distance for display: integer meters below 1 km, one-decimal
/// kilometers at or above.
pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{} m away", meters.round() as i64)
    } else {
        format!("{:.1} km away", meters / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MELBOURNE_CBD: Coordinate = Coordinate {
        latitude: -37.8136,
        longitude: 144.9631,
    };

    #[test]
    fn test_distance_zero_for_same_point() {
        assert_eq!(distance_meters(MELBOURNE_CBD, MELBOURNE_CBD), 0.0);
    }

    #[test]
    fn test_distance_symmetric() {
        let sydney = Coordinate::new(-33.8688, 151.2093);
        let there = distance_meters(MELBOURNE_CBD, sydney);
        let back = distance_meters(sydney, MELBOURNE_CBD);
        assert_eq!(there, back);
        assert!(there > 0.0);
    }

    #[test]
    fn test_distance_hundredth_degree_latitude() {
        // 0.01 degrees of latitude is about 1113 m everywhere on the sphere.
        let offset = Coordinate::new(MELBOURNE_CBD.latitude + 0.01, MELBOURNE_CBD.longitude);
        let d = distance_meters(MELBOURNE_CBD, offset);
        assert!((d - 1113.0).abs() < 1113.0 * 0.01, "got {d}");
    }

    #[test]
    fn test_distance_nonnegative() {
        let a = Coordinate::new(10.0, 20.0);
        let b = Coordinate::new(-45.0, 170.0);
        assert!(distance_meters(a, b) >= 0.0);
    }

    #[test]
    fn test_format_distance_meters_below_threshold() {
        assert_eq!(format_distance(0.0), "0 m away");
        assert_eq!(format_distance(42.4), "42 m away");
        assert_eq!(format_distance(999.4), "999 m away");
    }

    #[test]
    fn test_format_distance_kilometers_at_threshold() {
        assert_eq!(format_distance(1000.0), "1.0 km away");
        assert_eq!(format_distance(1250.0), "1.2 km away");
        assert_eq!(format_distance(15_500.0), "15.5 km away");
    }
}
