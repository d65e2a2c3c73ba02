//! Geometric and statistical features of a stop set.
//!
//! The analyzer runs once per optimization call, ahead of strategy
//! selection. Everything it reports is derived from the validated stops
//! and the configuration; it performs no I/O.

use crate::geo::{centroid, haversine_km, BoundingBox};
use crate::models::{OptimizerConfig, Stop, StopKind};

use super::clusters::{identify_clusters, Cluster};

/// Density above which a stop set counts as high-density (stops/km²).
const HIGH_DENSITY_THRESHOLD: f64 = 10.0;

/// Overall geometric shape of a stop set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteShape {
    /// Fewer than 3 stops; shape is not meaningful.
    Simple,
    /// Bounding box aspect ratio beyond 2:1 either way.
    Linear,
    /// Low variance of distance from the centroid.
    Circular,
    /// Neither clearly linear nor circular.
    Mixed,
}

/// Distance statistics over matched pickup→delivery pairs.
///
/// Pickups without a matching delivery are excluded here but remain in
/// the stop set.
#[derive(Debug, Clone, PartialEq)]
pub struct PairingStats {
    /// Number of matched pairs.
    pub pair_count: usize,
    /// Mean pickup→delivery distance (0 when there are no pairs).
    pub avg_km: f64,
    /// Shortest pair distance (0 when there are no pairs).
    pub min_km: f64,
    /// Longest pair distance (0 when there are no pairs).
    pub max_km: f64,
}

/// Everything strategy selection needs to know about a stop set.
#[derive(Debug, Clone)]
pub struct RouteAnalysis {
    /// Number of validated stops.
    pub stop_count: usize,
    /// North-south bounding-box extent in degrees.
    pub spread_lat_deg: f64,
    /// East-west bounding-box extent in degrees.
    pub spread_lng_deg: f64,
    /// Stops per km² of bounding box (0 when the box has no area).
    pub density: f64,
    /// Clusters found at `cluster_radius_km`.
    pub clusters: Vec<Cluster>,
    /// Matched-pair distance statistics.
    pub pairing: PairingStats,
    /// Overall shape classification.
    pub shape: RouteShape,
    /// Density exceeds the high-density threshold.
    pub is_high_density: bool,
    /// More than one cluster, at least one of size > 3.
    pub is_clustered: bool,
    /// Shape is linear.
    pub is_linear: bool,
    /// Shape is circular.
    pub is_circular: bool,
}

/// Analyzes a validated stop set.
///
/// # Examples
///
/// ```
/// use courier_routing::analysis::{analyze, RouteShape};
/// use courier_routing::models::{Location, OptimizerConfig, Stop, StopKind};
///
/// let stops = vec![
///     Stop::new("a", StopKind::Pickup, Location::new(-1.30, 36.82), "P1"),
///     Stop::new("b", StopKind::Delivery, Location::new(-1.28, 36.82), "P1"),
/// ];
/// let analysis = analyze(&stops, &OptimizerConfig::default());
/// assert_eq!(analysis.stop_count, 2);
/// assert_eq!(analysis.shape, RouteShape::Simple);
/// assert_eq!(analysis.pairing.pair_count, 1);
/// ```
pub fn analyze(stops: &[Stop], config: &OptimizerConfig) -> RouteAnalysis {
    let bbox = BoundingBox::of(stops);
    let (spread_lat_deg, spread_lng_deg) = bbox
        .map(|b| (b.height_deg(), b.width_deg()))
        .unwrap_or((0.0, 0.0));

    let area = bbox.map(|b| b.area_km2()).unwrap_or(0.0);
    let density = if area > 0.0 {
        stops.len() as f64 / area
    } else {
        0.0
    };

    let clusters = identify_clusters(stops, config.cluster_radius_km);
    let pairing = pairing_stats(stops);
    let shape = classify_shape(stops, spread_lat_deg, spread_lng_deg);

    let is_high_density = density > HIGH_DENSITY_THRESHOLD;
    let is_clustered = clusters.len() > 1 && clusters.iter().any(|c| c.stops.len() > 3);

    RouteAnalysis {
        stop_count: stops.len(),
        spread_lat_deg,
        spread_lng_deg,
        density,
        clusters,
        pairing,
        shape,
        is_high_density,
        is_clustered,
        is_linear: shape == RouteShape::Linear,
        is_circular: shape == RouteShape::Circular,
    }
}

/// Distance statistics for every pickup with a matching delivery.
fn pairing_stats(stops: &[Stop]) -> PairingStats {
    let mut distances = Vec::new();
    for pickup in stops.iter().filter(|s| s.is_pickup()) {
        let delivery = stops
            .iter()
            .find(|s| s.kind == StopKind::Delivery && s.parcel_code == pickup.parcel_code);
        if let Some(delivery) = delivery {
            distances.push(haversine_km(pickup.location, delivery.location));
        }
    }

    if distances.is_empty() {
        return PairingStats {
            pair_count: 0,
            avg_km: 0.0,
            min_km: 0.0,
            max_km: 0.0,
        };
    }

    let sum: f64 = distances.iter().sum();
    let min = distances.iter().fold(f64::INFINITY, |a, &b| a.min(b));
    let max = distances.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));
    PairingStats {
        pair_count: distances.len(),
        avg_km: sum / distances.len() as f64,
        min_km: min,
        max_km: max,
    }
}

/// Shape classification: aspect-ratio test first, then the
/// distance-from-centroid variance test.
fn classify_shape(stops: &[Stop], spread_lat_deg: f64, spread_lng_deg: f64) -> RouteShape {
    if stops.len() < 3 {
        return RouteShape::Simple;
    }

    if spread_lat_deg > 0.0 {
        let aspect = spread_lng_deg / spread_lat_deg;
        if aspect > 2.0 || aspect < 0.5 {
            return RouteShape::Linear;
        }
    } else if spread_lng_deg > 0.0 {
        // Zero height with nonzero width is a degenerate east-west line
        return RouteShape::Linear;
    }

    let Some(center) = centroid(stops) else {
        return RouteShape::Mixed;
    };
    let from_center: Vec<f64> = stops
        .iter()
        .map(|s| haversine_km(s.location, center))
        .collect();
    let mean = from_center.iter().sum::<f64>() / from_center.len() as f64;
    if mean > 0.0 {
        let variance = from_center
            .iter()
            .map(|d| (d - mean).powi(2))
            .sum::<f64>()
            / from_center.len() as f64;
        if variance < 0.3 * mean {
            return RouteShape::Circular;
        }
    }

    RouteShape::Mixed
}
