//! Cluster-first construction.
//!
//! # Algorithm
//!
//! Identify clusters, then visit them one at a time: the cluster with
//! the most pickups goes first, each subsequent cluster is the nearest
//! remaining one by center distance. Within a cluster, stops are ordered
//! by the shared greedy walk starting from the cluster center. Exhausting
//! one area before crossing to the next is what makes dense urban batches
//! cheap to ride.

use crate::analysis::Cluster;
use crate::models::{OptimizerConfig, Stop};

use super::greedy::{greedy_walk, WalkState};
use super::sequence_clusters;

/// Builds a route by visiting clusters exhaustively.
///
/// Returns the route and the number of clusters it was built from.
pub fn cluster_route(
    stops: &[Stop],
    clusters: &[Cluster],
    config: &OptimizerConfig,
) -> (Vec<Stop>, usize) {
    if stops.is_empty() {
        return (Vec::new(), 0);
    }

    let ordered_clusters = sequence_clusters(clusters);
    let mut state = WalkState::for_stops(stops);
    let mut route: Vec<Stop> = Vec::with_capacity(stops.len());
    let mut pending: Vec<Stop> = Vec::new();

    for cluster in &ordered_clusters {
        let (emitted, leftovers) = greedy_walk(&cluster.stops, cluster.center, &mut state, config);
        route.extend(emitted);
        pending.extend(leftovers);
    }

    // Deliveries whose pickup sat in a later cluster become eligible once
    // all clusters are done; walk them from wherever the route ended.
    if !pending.is_empty() {
        let position = route
            .last()
            .map(|s| s.location)
            .unwrap_or_else(|| ordered_clusters[0].center);
        let (emitted, stranded) = greedy_walk(&pending, position, &mut state, config);
        route.extend(emitted);
        // Nothing should remain, but never drop a stop
        route.extend(stranded);
    }

    (route, clusters.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::identify_clusters;
    use crate::local_search::route_is_feasible;
    use crate::models::{Location, StopKind};

    fn pickup(id: &str, lat: f64, lng: f64, parcel: &str) -> Stop {
        Stop::new(id, StopKind::Pickup, Location::new(lat, lng), parcel)
    }

    fn delivery(id: &str, lat: f64, lng: f64, parcel: &str) -> Stop {
        Stop::new(id, StopKind::Delivery, Location::new(lat, lng), parcel)
    }

    /// Two tight groups ~10 km apart, three parcels in each.
    fn two_cluster_stops() -> Vec<Stop> {
        let mut stops = Vec::new();
        for i in 0..3 {
            let lat = -1.280 + i as f64 * 0.002;
            stops.push(pickup(&format!("wp{i}"), lat, 36.820, &format!("W{i}")));
            stops.push(delivery(&format!("wd{i}"), lat + 0.001, 36.821, &format!("W{i}")));
        }
        for i in 0..3 {
            let lat = -1.280 + i as f64 * 0.002;
            stops.push(pickup(&format!("ep{i}"), lat, 36.910, &format!("E{i}")));
            stops.push(delivery(&format!("ed{i}"), lat + 0.001, 36.911, &format!("E{i}")));
        }
        stops
    }

    #[test]
    fn test_visits_one_cluster_before_the_other() {
        let stops = two_cluster_stops();
        let clusters = identify_clusters(&stops, 2.0);
        assert_eq!(clusters.len(), 2);
        let (route, count) = cluster_route(&stops, &clusters, &OptimizerConfig::default());
        assert_eq!(count, 2);
        assert_eq!(route.len(), stops.len());
        assert!(route_is_feasible(&route));

        // No interleaving: once the route crosses to the second group it
        // never returns. Split stops by longitude.
        let sides: Vec<bool> = route.iter().map(|s| s.location.lng > 36.86).collect();
        let transitions = sides.windows(2).filter(|w| w[0] != w[1]).count();
        assert_eq!(transitions, 1, "route crosses between clusters more than once");
    }

    #[test]
    fn test_cross_cluster_parcel_resolved_at_end() {
        // Pickup in the far cluster, delivery in the near one
        let mut stops = two_cluster_stops();
        stops.push(delivery("xd", -1.279, 36.822, "X"));
        stops.push(pickup("xp", -1.279, 36.912, "X"));
        let clusters = identify_clusters(&stops, 2.0);
        let (route, _) = cluster_route(&stops, &clusters, &OptimizerConfig::default());
        assert_eq!(route.len(), stops.len());
        assert!(route_is_feasible(&route));
    }

    #[test]
    fn test_empty() {
        let (route, count) = cluster_route(&[], &[], &OptimizerConfig::default());
        assert!(route.is_empty());
        assert_eq!(count, 0);
    }
}
