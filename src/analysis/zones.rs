//! K-means zone partitioning.
//!
//! # Algorithm
//!
//! Seeds `k` centers with k-means++-style weighted sampling (each new
//! center drawn with probability proportional to the squared distance to
//! the nearest already-chosen center), then alternates assignment and
//! centroid recomputation for up to 50 iterations, stopping early when no
//! center moves more than 0.01 km.
//!
//! The seeding step is the only randomized part of the engine; callers
//! that need reproducible partitions supply a seeded RNG.
//!
//! # Reference
//!
//! Arthur, D. & Vassilvitskii, S. (2007). "k-means++: The Advantages of
//! Careful Seeding", *SODA '07*, 1027-1035.

use rand::Rng;

use crate::geo::{centroid, haversine_km};
use crate::models::{Location, Stop};

/// Iteration cap for the assign/recompute loop.
const MAX_KMEANS_ITERATIONS: usize = 50;

/// Centers that move less than this (km) are considered converged.
const CONVERGENCE_KM: f64 = 0.01;

/// A transient k-means partition of stops.
///
/// Same lifecycle as a cluster: created per optimization call, never
/// persisted.
#[derive(Debug, Clone)]
pub struct Zone {
    /// Index of this zone in partition order.
    pub id: usize,
    /// Human-readable name ("Zone A", "Zone B", ...).
    pub name: String,
    /// Member stops.
    pub stops: Vec<Stop>,
    /// Current center of the zone.
    pub center: Location,
}

impl Zone {
    /// Number of pickup stops in this zone.
    pub fn pickup_count(&self) -> usize {
        self.stops.iter().filter(|s| s.is_pickup()).count()
    }
}

/// Partitions stops into at most `k` zones via k-means.
///
/// Returns fewer than `k` zones when some end up empty. `k` is clamped to
/// the number of stops.
///
/// # Examples
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use courier_routing::analysis::partition_zones;
/// use courier_routing::models::{Location, Stop, StopKind};
///
/// let stops = vec![
///     Stop::new("a", StopKind::Pickup, Location::new(-1.28, 36.82), "P1"),
///     Stop::new("b", StopKind::Delivery, Location::new(-1.281, 36.821), "P1"),
///     Stop::new("c", StopKind::Pickup, Location::new(-1.10, 37.00), "P2"),
///     Stop::new("d", StopKind::Delivery, Location::new(-1.101, 37.001), "P2"),
/// ];
/// let mut rng = StdRng::seed_from_u64(7);
/// let zones = partition_zones(&stops, 2, &mut rng);
/// assert_eq!(zones.len(), 2);
/// assert_eq!(zones.iter().map(|z| z.stops.len()).sum::<usize>(), 4);
/// ```
pub fn partition_zones<R: Rng + ?Sized>(stops: &[Stop], k: usize, rng: &mut R) -> Vec<Zone> {
    if stops.is_empty() || k == 0 {
        return Vec::new();
    }
    let k = k.min(stops.len());

    let mut centers = seed_centers(stops, k, rng);
    let mut assignment = vec![0usize; stops.len()];

    for _ in 0..MAX_KMEANS_ITERATIONS {
        for (i, s) in stops.iter().enumerate() {
            assignment[i] = nearest_center(s.location, &centers);
        }

        let mut max_movement = 0.0f64;
        for (c_idx, center) in centers.iter_mut().enumerate() {
            let members: Vec<Stop> = stops
                .iter()
                .enumerate()
                .filter(|(i, _)| assignment[*i] == c_idx)
                .map(|(_, s)| s.clone())
                .collect();
            if let Some(new_center) = centroid(&members) {
                max_movement = max_movement.max(haversine_km(*center, new_center));
                *center = new_center;
            }
        }

        if max_movement < CONVERGENCE_KM {
            break;
        }
    }

    // Final assignment against the converged centers
    for (i, s) in stops.iter().enumerate() {
        assignment[i] = nearest_center(s.location, &centers);
    }

    let mut zones = Vec::new();
    for (c_idx, center) in centers.iter().enumerate() {
        let members: Vec<Stop> = stops
            .iter()
            .enumerate()
            .filter(|(i, _)| assignment[*i] == c_idx)
            .map(|(_, s)| s.clone())
            .collect();
        if members.is_empty() {
            continue;
        }
        let id = zones.len();
        zones.push(Zone {
            id,
            name: zone_name(id),
            stops: members,
            center: *center,
        });
    }

    zones
}

/// k-means++ weighted seeding.
fn seed_centers<R: Rng + ?Sized>(stops: &[Stop], k: usize, rng: &mut R) -> Vec<Location> {
    let mut centers = Vec::with_capacity(k);
    let first = rng.random_range(0..stops.len());
    centers.push(stops[first].location);

    while centers.len() < k {
        let weights: Vec<f64> = stops
            .iter()
            .map(|s| {
                let nearest = centers
                    .iter()
                    .map(|c| haversine_km(s.location, *c))
                    .fold(f64::INFINITY, f64::min);
                nearest * nearest
            })
            .collect();
        let total: f64 = weights.iter().sum();

        if total <= 0.0 {
            // All remaining stops coincide with a chosen center
            centers.push(stops[rng.random_range(0..stops.len())].location);
            continue;
        }

        let mut target = rng.random_range(0.0..total);
        let mut chosen = stops.len() - 1;
        for (i, w) in weights.iter().enumerate() {
            if target < *w {
                chosen = i;
                break;
            }
            target -= w;
        }
        centers.push(stops[chosen].location);
    }

    centers
}

fn nearest_center(location: Location, centers: &[Location]) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (i, c) in centers.iter().enumerate() {
        let d = haversine_km(location, *c);
        if d < best_dist {
            best_dist = d;
            best = i;
        }
    }
    best
}

fn zone_name(index: usize) -> String {
    if index < 26 {
        format!("Zone {}", (b'A' + index as u8) as char)
    } else {
        format!("Zone {}", index + 1)
    }
}
