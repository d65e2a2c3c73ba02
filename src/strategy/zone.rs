//! Zone decomposition construction.
//!
//! # Algorithm
//!
//! Partition the stops into `k = ceil(sqrt(n/2))` k-means zones. Zones
//! are visited nearest-neighbor starting from the one with the most
//! pickups. Within a zone, pickups and local deliveries (pickup in the
//! same zone) go through the shared greedy walk; external deliveries
//! whose pickup was already visited in an earlier zone are appended
//! nearest-neighbor from the zone center. Deliveries still pending after
//! the last zone are appended in a final sweep.

use rand::Rng;

use crate::analysis::{partition_zones, Zone};
use crate::geo::haversine_km;
use crate::models::{Location, OptimizerConfig, Stop};

use super::greedy::{greedy_walk, WalkState};
use super::sequence_zones;

/// Number of zones for an n-stop set.
pub fn zone_count_for(n: usize) -> usize {
    ((n as f64 / 2.0).sqrt().ceil() as usize).max(1)
}

/// Builds a route by zone decomposition.
///
/// Returns the route and the number of zones used.
pub fn zone_route<R: Rng + ?Sized>(
    stops: &[Stop],
    config: &OptimizerConfig,
    rng: &mut R,
) -> (Vec<Stop>, usize) {
    if stops.is_empty() {
        return (Vec::new(), 0);
    }

    let zones = partition_zones(stops, zone_count_for(stops.len()), rng);
    let ordered_zones = sequence_zones(&zones);

    let mut state = WalkState::for_stops(stops);
    let mut route: Vec<Stop> = Vec::with_capacity(stops.len());
    let mut pending: Vec<Stop> = Vec::new();

    for zone in &ordered_zones {
        let (walkable, external): (Vec<Stop>, Vec<Stop>) = split_zone_stops(zone, &state);

        let (emitted, leftovers) = greedy_walk(&walkable, zone.center, &mut state, config);
        route.extend(emitted);
        pending.extend(leftovers);

        // Externals whose pickup was visited in an earlier zone, nearest
        // first from this zone's center
        let (ready, waiting): (Vec<Stop>, Vec<Stop>) = external
            .into_iter()
            .partition(|s| state.is_eligible(s));
        route.extend(nearest_neighbor_order(ready, zone.center));
        pending.extend(waiting);
    }

    if !pending.is_empty() {
        let position = route
            .last()
            .map(|s| s.location)
            .unwrap_or_else(|| ordered_zones[0].center);
        let (emitted, stranded) = greedy_walk(&pending, position, &mut state, config);
        route.extend(emitted);
        route.extend(stranded);
    }

    (route, zones.len())
}

/// Splits a zone into greedy-walkable stops (pickups, local deliveries,
/// orphans) and external deliveries whose pickup lives in another zone.
fn split_zone_stops(zone: &Zone, state: &WalkState) -> (Vec<Stop>, Vec<Stop>) {
    zone.stops.iter().cloned().partition(|s| {
        if !s.is_delivery() || !state.constrained.contains(&s.parcel_code) {
            return true;
        }
        zone.stops
            .iter()
            .any(|other| other.is_pickup() && other.parcel_code == s.parcel_code)
    })
}

fn nearest_neighbor_order(mut pool: Vec<Stop>, start: Location) -> Vec<Stop> {
    let mut ordered = Vec::with_capacity(pool.len());
    let mut position = start;
    while !pool.is_empty() {
        let mut best = 0;
        let mut best_dist = f64::INFINITY;
        for (i, s) in pool.iter().enumerate() {
            let d = haversine_km(position, s.location);
            if d < best_dist {
                best_dist = d;
                best = i;
            }
        }
        let stop = pool.remove(best);
        position = stop.location;
        ordered.push(stop);
    }
    ordered
}
