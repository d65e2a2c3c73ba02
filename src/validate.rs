//! Input validation and normalization.
//!
//! The booking side hands over loosely-shaped stop records; only the
//! well-formed ones reach the optimizer. Invalid records are dropped,
//! never raised — an empty validated set short-circuits optimization to
//! an empty route rather than an error.

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::models::{Location, Stop, StopKind};

/// A loosely-shaped location as received from the booking collaborator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawLocation {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// A stop record as received, before validation.
///
/// Everything is optional; the parcel code is accepted under the alias
/// names historically used by the booking side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawStop {
    #[serde(default)]
    pub id: Option<String>,
    /// `"pickup"` or `"delivery"`; anything else drops the record.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub location: Option<RawLocation>,
    #[serde(
        rename = "parcelCode",
        alias = "parcel_code",
        alias = "parcelId",
        alias = "packageCode",
        alias = "trackingCode",
        default
    )]
    pub parcel_code: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl RawStop {
    /// Convenience constructor for the common well-formed case.
    pub fn new(kind: &str, lat: f64, lng: f64, parcel_code: &str) -> Self {
        Self {
            id: None,
            kind: Some(kind.to_string()),
            location: Some(RawLocation {
                lat: Some(lat),
                lng: Some(lng),
            }),
            parcel_code: Some(parcel_code.to_string()),
            address: None,
        }
    }
}

/// Filters and normalizes raw records into well-formed stops.
///
/// A record survives when it has finite, in-range coordinates and a
/// recognized stop type. Survivors get a generated UUID when the id is
/// missing, the `"Unknown"` address fallback, and — lacking any parcel
/// code — their own id as a code, which can never match a pickup and so
/// leaves the stop unconstrained.
///
/// # Examples
///
/// ```
/// use courier_routing::validate::{validate_stops, RawStop};
///
/// let raw = vec![
///     RawStop::new("pickup", -1.28, 36.82, "P1"),
///     RawStop::new("transfer", -1.28, 36.82, "P2"), // unknown type
///     RawStop::new("delivery", f64::NAN, 36.82, "P1"), // bad latitude
/// ];
/// let stops = validate_stops(&raw);
/// assert_eq!(stops.len(), 1);
/// assert_eq!(stops[0].parcel_code, "P1");
/// ```
pub fn validate_stops(raw: &[RawStop]) -> Vec<Stop> {
    let mut stops = Vec::with_capacity(raw.len());

    for (index, record) in raw.iter().enumerate() {
        let Some(kind) = parse_kind(record.kind.as_deref()) else {
            debug!(index, kind = ?record.kind, "dropping stop with unrecognized type");
            continue;
        };
        let Some(location) = parse_location(record.location.as_ref()) else {
            debug!(index, "dropping stop with missing or invalid coordinates");
            continue;
        };

        let id = record
            .id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let parcel_code = record.parcel_code.clone().unwrap_or_else(|| id.clone());
        let address = record
            .address
            .clone()
            .unwrap_or_else(|| "Unknown".to_string());

        stops.push(Stop {
            id,
            kind,
            location,
            parcel_code,
            address,
        });
    }

    stops
}

fn parse_kind(kind: Option<&str>) -> Option<StopKind> {
    match kind? {
        "pickup" => Some(StopKind::Pickup),
        "delivery" => Some(StopKind::Delivery),
        _ => None,
    }
}

fn parse_location(location: Option<&RawLocation>) -> Option<Location> {
    let location = location?;
    let candidate = Location::new(location.lat?, location.lng?);
    candidate.is_valid().then_some(candidate)
}
