//! Centroid and bounding box.

use crate::models::{Location, Stop};

/// Flat degree-to-kilometer conversion.
///
/// Ignores longitude compression away from the equator; acceptable at
/// Nairobi's latitude (~1°S) where the error is under 0.1%. Revisit if
/// the engine is ever deployed far from the equator.
const KM_PER_DEGREE: f64 = 111.0;

/// Axis-aligned bounding box over a stop set, in degrees.
///
/// # Examples
///
/// ```
/// use courier_routing::geo::BoundingBox;
/// use courier_routing::models::{Location, Stop, StopKind};
///
/// let stops = vec![
///     Stop::new("a", StopKind::Pickup, Location::new(-1.30, 36.80), "P1"),
///     Stop::new("b", StopKind::Delivery, Location::new(-1.20, 36.90), "P1"),
/// ];
/// let bbox = BoundingBox::of(&stops).unwrap();
/// assert!((bbox.height_deg() - 0.1).abs() < 1e-9);
/// assert!((bbox.width_deg() - 0.1).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl BoundingBox {
    /// Computes the bounding box; `None` for an empty set.
    pub fn of(stops: &[Stop]) -> Option<Self> {
        let first = stops.first()?;
        let mut bbox = Self {
            min_lat: first.location.lat,
            max_lat: first.location.lat,
            min_lng: first.location.lng,
            max_lng: first.location.lng,
        };
        for s in &stops[1..] {
            bbox.min_lat = bbox.min_lat.min(s.location.lat);
            bbox.max_lat = bbox.max_lat.max(s.location.lat);
            bbox.min_lng = bbox.min_lng.min(s.location.lng);
            bbox.max_lng = bbox.max_lng.max(s.location.lng);
        }
        Some(bbox)
    }

    /// North-south extent in degrees.
    pub fn height_deg(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// East-west extent in degrees.
    pub fn width_deg(&self) -> f64 {
        self.max_lng - self.min_lng
    }

    /// Approximate area in km², using the flat 111 km/degree conversion.
    pub fn area_km2(&self) -> f64 {
        (self.height_deg() * KM_PER_DEGREE) * (self.width_deg() * KM_PER_DEGREE)
    }
}

/// Arithmetic mean of latitudes and longitudes across a stop set.
///
/// Returns `None` for an empty set.
pub fn centroid(stops: &[Stop]) -> Option<Location> {
    if stops.is_empty() {
        return None;
    }
    let n = stops.len() as f64;
    let lat = stops.iter().map(|s| s.location.lat).sum::<f64>() / n;
    let lng = stops.iter().map(|s| s.location.lng).sum::<f64>() / n;
    Some(Location::new(lat, lng))
}
