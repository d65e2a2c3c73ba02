//! Great-circle distance.
//!
//! Haversine is the sole distance metric used throughout the crate. It is
//! non-negative, symmetric, and zero iff the points coincide. Straight-line
//! distance ignores the road network; for strategy selection and local
//! search ordering that error is uniform enough not to matter.

use crate::models::{Location, Stop};

use super::bearing::{bearing_change_deg, initial_bearing_deg};

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// A consecutive-leg bearing change sharper than this counts as a
/// backtracking event.
const BACKTRACK_TURN_DEG: f64 = 120.0;

/// Great-circle distance between two locations in kilometers.
///
/// # Examples
///
/// ```
/// use courier_routing::geo::haversine_km;
/// use courier_routing::models::Location;
///
/// let cbd = Location::new(-1.2864, 36.8172);
/// let westlands = Location::new(-1.2683, 36.8111);
/// let d = haversine_km(cbd, westlands);
/// assert!(d > 1.5 && d < 3.0);
/// assert!((haversine_km(cbd, westlands) - haversine_km(westlands, cbd)).abs() < 1e-12);
/// ```
pub fn haversine_km(from: Location, to: Location) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let delta_lat = (to.lat - from.lat).to_radians();
    let delta_lng = (to.lng - from.lng).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Total distance of visiting the stops in order, in kilometers.
pub fn route_distance_km(stops: &[Stop]) -> f64 {
    stops
        .windows(2)
        .map(|w| haversine_km(w[0].location, w[1].location))
        .sum()
}

/// Counts backtracking events: consecutive legs whose bearing changes by
/// more than 120°, i.e. the courier doubles back on their own path.
///
/// Zero-length legs (repeated coordinates) are skipped since they have no
/// defined direction.
pub fn backtrack_count(stops: &[Stop]) -> usize {
    let mut count = 0;
    let mut prev_bearing: Option<f64> = None;

    for w in stops.windows(2) {
        if haversine_km(w[0].location, w[1].location) < 1e-9 {
            continue;
        }
        let bearing = initial_bearing_deg(w[0].location, w[1].location);
        if let Some(prev) = prev_bearing {
            if bearing_change_deg(prev, bearing) > BACKTRACK_TURN_DEG {
                count += 1;
            }
        }
        prev_bearing = Some(bearing);
    }

    count
}
