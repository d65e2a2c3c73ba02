//! Stop and location types.

use serde::{Deserialize, Serialize};

/// Whether a stop hands a parcel to the courier or to the recipient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopKind {
    /// The courier collects a parcel here.
    Pickup,
    /// The courier drops a parcel here.
    Delivery,
}

/// A geographic position in decimal degrees.
///
/// Validated locations have finite coordinates with `lat ∈ [-90, 90]` and
/// `lng ∈ [-180, 180]`.
///
/// # Examples
///
/// ```
/// use courier_routing::models::Location;
///
/// let nairobi = Location::new(-1.2921, 36.8219);
/// assert!(nairobi.is_valid());
/// assert!(!Location::new(f64::NAN, 36.8).is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lng: f64,
}

impl Location {
    /// Creates a location from decimal-degree coordinates.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Returns `true` if both coordinates are finite and within range.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

/// A single pickup or delivery visit on a courier's route.
///
/// The `parcel_code` links a pickup to its corresponding delivery; a route
/// is only valid when every delivery whose parcel has a pickup in the same
/// stop set appears after that pickup.
///
/// `id` uniqueness is a precondition: generated ids are UUIDv4, and callers
/// supplying their own ids must keep them unique within a batch.
///
/// # Examples
///
/// ```
/// use courier_routing::models::{Location, Stop, StopKind};
///
/// let pickup = Stop::new("s1", StopKind::Pickup, Location::new(-1.28, 36.82), "PKG-7");
/// assert_eq!(pickup.kind, StopKind::Pickup);
/// assert_eq!(pickup.address, "Unknown");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    /// Unique identifier within the batch.
    pub id: String,
    /// Pickup or delivery.
    #[serde(rename = "type")]
    pub kind: StopKind,
    /// Geographic position.
    pub location: Location,
    /// Identifier linking a pickup to its delivery.
    #[serde(rename = "parcelCode")]
    pub parcel_code: String,
    /// Display address.
    pub address: String,
}

impl Stop {
    /// Creates a stop with the default `"Unknown"` address.
    pub fn new(
        id: impl Into<String>,
        kind: StopKind,
        location: Location,
        parcel_code: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            location,
            parcel_code: parcel_code.into(),
            address: "Unknown".to_string(),
        }
    }

    /// Sets the display address.
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    /// Returns `true` if this stop is a pickup.
    pub fn is_pickup(&self) -> bool {
        self.kind == StopKind::Pickup
    }

    /// Returns `true` if this stop is a delivery.
    pub fn is_delivery(&self) -> bool {
        self.kind == StopKind::Delivery
    }
}
