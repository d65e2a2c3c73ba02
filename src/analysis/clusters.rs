//! Single-link greedy cluster identification.
//!
//! # Algorithm
//!
//! Take the first unassigned stop as a cluster seed and add every other
//! unassigned stop within `radius_km` of the seed's original location.
//! Membership is anchored to the seed — the threshold is not re-evaluated
//! as members join, which avoids incremental drift but can under- or
//! over-group stops near cluster boundaries. The cluster center is the
//! centroid of its members, computed once the cluster is complete.
//!
//! This is a single greedy pass, not an optimal clustering. Strategy
//! selection depends on the exact grouping, so the anchoring behavior is
//! part of the contract.
//!
//! # Complexity
//!
//! O(n²) where n = number of stops.

use crate::geo::{centroid, haversine_km};
use crate::models::{Location, Stop};

/// A transient group of geometrically proximate stops.
///
/// Created fresh per optimization call and discarded after use.
#[derive(Debug, Clone)]
pub struct Cluster {
    /// Index of this cluster in discovery order.
    pub id: usize,
    /// Member stops.
    pub stops: Vec<Stop>,
    /// Centroid of the members.
    pub center: Location,
}

impl Cluster {
    /// Number of pickup stops in this cluster.
    pub fn pickup_count(&self) -> usize {
        self.stops.iter().filter(|s| s.is_pickup()).count()
    }
}

/// Groups stops into clusters of radius `radius_km` around greedy seeds.
///
/// Every stop is assigned to exactly one cluster; isolated stops form
/// singleton clusters.
///
/// # Examples
///
/// ```
/// use courier_routing::analysis::identify_clusters;
/// use courier_routing::models::{Location, Stop, StopKind};
///
/// let stops = vec![
///     Stop::new("a", StopKind::Pickup, Location::new(-1.280, 36.820), "P1"),
///     Stop::new("b", StopKind::Delivery, Location::new(-1.281, 36.821), "P1"),
///     Stop::new("c", StopKind::Pickup, Location::new(-1.200, 36.900), "P2"),
/// ];
/// let clusters = identify_clusters(&stops, 1.0);
/// assert_eq!(clusters.len(), 2);
/// assert_eq!(clusters[0].stops.len(), 2);
/// ```
pub fn identify_clusters(stops: &[Stop], radius_km: f64) -> Vec<Cluster> {
    let mut assigned = vec![false; stops.len()];
    let mut clusters = Vec::new();

    for seed_idx in 0..stops.len() {
        if assigned[seed_idx] {
            continue;
        }
        assigned[seed_idx] = true;
        let seed_location = stops[seed_idx].location;
        let mut members = vec![stops[seed_idx].clone()];

        for other_idx in 0..stops.len() {
            if assigned[other_idx] {
                continue;
            }
            if haversine_km(seed_location, stops[other_idx].location) <= radius_km {
                assigned[other_idx] = true;
                members.push(stops[other_idx].clone());
            }
        }

        let center = centroid(&members).unwrap_or(seed_location);
        clusters.push(Cluster {
            id: clusters.len(),
            stops: members,
            center,
        });
    }

    clusters
}
