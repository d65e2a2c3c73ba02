//! Compass bearings and axis projection.

use crate::models::{Location, Stop};

/// Initial compass bearing from `from` to `to`, in degrees `[0, 360)`
/// with 0 = north.
///
/// # Examples
///
/// ```
/// use courier_routing::geo::initial_bearing_deg;
/// use courier_routing::models::Location;
///
/// let b = initial_bearing_deg(Location::new(0.0, 0.0), Location::new(1.0, 0.0));
/// assert!(b.abs() < 1e-9); // due north
/// ```
pub fn initial_bearing_deg(from: Location, to: Location) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let delta_lng = (to.lng - from.lng).to_radians();

    let y = delta_lng.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lng.cos();

    (y.atan2(x).to_degrees() + 360.0) % 360.0
}

/// Minimal angular difference between two bearings, in degrees `[0, 180]`.
pub fn bearing_change_deg(a: f64, b: f64) -> f64 {
    let diff = (a - b).abs() % 360.0;
    if diff > 180.0 {
        360.0 - diff
    } else {
        diff
    }
}

/// Projects a location onto the axis with the given compass bearing.
///
/// The scalar `lng·sin(θ) + lat·cos(θ)` is a rotation-projection ordering
/// proxy in degree space, not a geodesic projection. It only serves to
/// sort stops along a sweep direction, where the distortion is harmless.
/// At bearing 0 it reduces to latitude, at 90 to longitude.
pub fn axis_projection(location: Location, bearing_deg: f64) -> f64 {
    let theta = bearing_deg.to_radians();
    location.lng * theta.sin() + location.lat * theta.cos()
}

/// The dominant travel direction of a stop set.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimaryDirection {
    /// Sweep axis bearing in degrees.
    pub bearing_deg: f64,
    /// Human-readable label: `"north-south"`, `"east-west"`, or the
    /// nearest of the 8 compass points.
    pub label: String,
}

/// Determines the primary direction of a stop set.
///
/// If the latitude spread exceeds 1.5× the longitude spread the axis is
/// fixed at 0° (north-south); the reverse fixes it at 90° (east-west).
/// Otherwise the bearing from the first to the last stop in input order
/// is used, labeled by the nearest compass point.
pub fn primary_direction(stops: &[Stop]) -> PrimaryDirection {
    if stops.len() < 2 {
        return PrimaryDirection {
            bearing_deg: 0.0,
            label: "north-south".to_string(),
        };
    }

    let (mut min_lat, mut max_lat) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut min_lng, mut max_lng) = (f64::INFINITY, f64::NEG_INFINITY);
    for s in stops {
        min_lat = min_lat.min(s.location.lat);
        max_lat = max_lat.max(s.location.lat);
        min_lng = min_lng.min(s.location.lng);
        max_lng = max_lng.max(s.location.lng);
    }
    let lat_spread = max_lat - min_lat;
    let lng_spread = max_lng - min_lng;

    if lat_spread > 1.5 * lng_spread {
        return PrimaryDirection {
            bearing_deg: 0.0,
            label: "north-south".to_string(),
        };
    }
    if lng_spread > 1.5 * lat_spread {
        return PrimaryDirection {
            bearing_deg: 90.0,
            label: "east-west".to_string(),
        };
    }

    let bearing = initial_bearing_deg(
        stops[0].location,
        stops[stops.len() - 1].location,
    );
    PrimaryDirection {
        bearing_deg: bearing,
        label: compass_label(bearing).to_string(),
    }
}

/// Nearest 8-point compass label for a bearing.
fn compass_label(bearing_deg: f64) -> &'static str {
    const LABELS: [&str; 8] = [
        "north",
        "northeast",
        "east",
        "southeast",
        "south",
        "southwest",
        "west",
        "northwest",
    ];
    let sector = ((bearing_deg + 22.5) / 45.0).floor() as usize % 8;
    LABELS[sector]
}
