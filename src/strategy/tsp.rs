//! Nearest-neighbor + insertion construction for small stop sets.
//!
//! # Algorithm
//!
//! Order the pickups by a nearest-neighbor walk from the first pickup,
//! then insert each delivery at the position that adds the least
//! distance, constrained to fall after its pickup. A full 2-opt pass
//! finishes the route. Only selected for small sets, where the quadratic
//! insertion scan and exhaustive 2-opt stay cheap.
//!
//! # Reference
//!
//! Rosenkrantz, D.J., Stearns, R.E. & Lewis, P.M. (1977). "An Analysis
//! of Several Heuristics for the Traveling Salesman Problem",
//! *SIAM Journal on Computing* 6(3), 563-581.

use crate::geo::haversine_km;
use crate::local_search::two_opt_pass;
use crate::models::{OptimizerConfig, Stop};

const IMPROVEMENT_EPS: f64 = 1e-10;

/// Builds a route for a small stop set.
pub fn tsp_route(stops: &[Stop], _config: &OptimizerConfig) -> Vec<Stop> {
    if stops.is_empty() {
        return Vec::new();
    }

    let pickups: Vec<&Stop> = stops.iter().filter(|s| s.is_pickup()).collect();
    let mut route: Vec<Stop> = nearest_neighbor_pickups(&pickups);

    // Cheapest insertion for each delivery, constrained to fall after
    // its pickup; deliveries with no pickup in the set are unconstrained
    for delivery in stops.iter().filter(|s| s.is_delivery()) {
        let min_index = route
            .iter()
            .position(|s| s.is_pickup() && s.parcel_code == delivery.parcel_code)
            .map_or(0, |at| at + 1);
        let at = cheapest_insertion(&route, delivery, min_index);
        route.insert(at, delivery.clone());
    }

    // Full 2-opt until it runs dry
    while two_opt_pass(&mut route) > IMPROVEMENT_EPS {}

    route
}

/// Nearest-neighbor walk over the pickups, starting from the first one
/// in input order.
fn nearest_neighbor_pickups(pickups: &[&Stop]) -> Vec<Stop> {
    let mut remaining: Vec<&Stop> = pickups.to_vec();
    let mut route = Vec::with_capacity(pickups.len());
    if remaining.is_empty() {
        return route;
    }

    let mut current = remaining.remove(0).clone();
    route.push(current.clone());
    while !remaining.is_empty() {
        let mut best = 0;
        let mut best_dist = f64::INFINITY;
        for (i, s) in remaining.iter().enumerate() {
            let d = haversine_km(current.location, s.location);
            if d < best_dist {
                best_dist = d;
                best = i;
            }
        }
        current = remaining.remove(best).clone();
        route.push(current.clone());
    }
    route
}

/// Insertion index in `[min_index, route.len()]` minimizing added
/// distance.
fn cheapest_insertion(route: &[Stop], stop: &Stop, min_index: usize) -> usize {
    let mut best_at = route.len();
    let mut best_cost = f64::INFINITY;

    for at in min_index..=route.len() {
        let prev = at.checked_sub(1).map(|i| &route[i]);
        let next = route.get(at);
        let cost = match (prev, next) {
            (Some(p), Some(n)) => {
                haversine_km(p.location, stop.location) + haversine_km(stop.location, n.location)
                    - haversine_km(p.location, n.location)
            }
            (Some(p), None) => haversine_km(p.location, stop.location),
            (None, Some(n)) => haversine_km(stop.location, n.location),
            (None, None) => 0.0,
        };
        if cost < best_cost {
            best_cost = cost;
            best_at = at;
        }
    }
    best_at
}
