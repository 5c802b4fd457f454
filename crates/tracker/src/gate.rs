//! Proximity gate: the distance-threshold check authorizing stop completion.

use questline_core::{distance_meters, Coordinate};

/// How close (in meters) the user must be to a stop to mark it complete.
pub const COMPLETION_RADIUS_METERS: f64 = 100.0;

/// Whether the user is close enough to the stop to complete it.
///
/// `false` whenever either location is unavailable; otherwise true iff the
/// great-circle distance is strictly below `threshold_meters`. Pure decision
/// function with no side effects.
pub fn can_complete_stop(
    user_location: Option<Coordinate>,
    stop_location: Option<Coordinate>,
    threshold_meters: f64,
) -> bool {
    match (user_location, stop_location) {
        (Some(user), Some(stop)) => distance_meters(user, stop) < threshold_meters,
        _ => false,
    }
}

/// Estimated walking time for a distance, assuming a 5 km/h pace.
///
/// Display only; never gates anything. Floors at one minute.
pub fn estimated_walk_minutes(distance_meters: f64) -> u32 {
    (distance_meters / 5000.0 * 60.0).round().max(1.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    const MELBOURNE_CBD: Coordinate = Coordinate {
        latitude: -37.8136,
        longitude: 144.9631,
    };

    #[test]
    fn test_zero_distance_is_always_within_threshold() {
        assert!(can_complete_stop(
            Some(MELBOURNE_CBD),
            Some(MELBOURNE_CBD),
            COMPLETION_RADIUS_METERS
        ));
    }

    #[test]
    fn test_missing_either_location_denies() {
        assert!(!can_complete_stop(
            None,
            Some(MELBOURNE_CBD),
            COMPLETION_RADIUS_METERS
        ));
        assert!(!can_complete_stop(
            Some(MELBOURNE_CBD),
            None,
            COMPLETION_RADIUS_METERS
        ));
        assert!(!can_complete_stop(None, None, COMPLETION_RADIUS_METERS));
    }

    #[test]
    fn test_far_away_denies() {
        // 0.01 degrees of latitude is about 1.1 km, well past 100 m.
        let far = Coordinate::new(MELBOURNE_CBD.latitude + 0.01, MELBOURNE_CBD.longitude);
        assert!(!can_complete_stop(
            Some(far),
            Some(MELBOURNE_CBD),
            COMPLETION_RADIUS_METERS
        ));
    }

    #[test]
    fn test_nearby_allows() {
        // Roughly 50 m north.
        let near = Coordinate::new(MELBOURNE_CBD.latitude + 0.00045, MELBOURNE_CBD.longitude);
        assert!(can_complete_stop(
            Some(near),
            Some(MELBOURNE_CBD),
            COMPLETION_RADIUS_METERS
        ));
    }

    #[test]
    fn test_walk_minutes_at_five_kilometers() {
        assert_eq!(estimated_walk_minutes(5000.0), 60);
    }

    #[test]
    fn test_walk_minutes_floors_at_one() {
        assert_eq!(estimated_walk_minutes(0.0), 1);
        assert_eq!(estimated_walk_minutes(10.0), 1);
    }

    #[test]
    fn test_walk_minutes_rounds() {
        // 1250 m at 5 km/h is exactly 15 minutes.
        assert_eq!(estimated_walk_minutes(1250.0), 15);
        // 2000 m is 24 minutes.
        assert_eq!(estimated_walk_minutes(2000.0), 24);
    }
}
