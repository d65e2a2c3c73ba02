//! Hybrid construction: cluster decomposition with directional ordering.
//!
//! # Algorithm
//!
//! Identify clusters, sequence them nearest-neighbor from the one with
//! the most pickups, and sweep each cluster along its own primary
//! bearing. Deliveries deferred past a cluster's sweep (their pickup is
//! in a later cluster) are appended once every cluster is done. The
//! caller's refinement pass then smooths the seams between clusters.

use crate::analysis::Cluster;
use crate::models::{OptimizerConfig, Stop};

use super::directional::directional_pass;
use super::greedy::WalkState;
use super::sequence_clusters;

/// Builds a route by sweeping each cluster along its own axis.
///
/// Returns the route and the number of clusters it was built from.
pub fn hybrid_route(
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
        let (emitted, deferred) = directional_pass(&cluster.stops, &mut state, config);
        route.extend(emitted);
        pending.extend(deferred);
    }

    // Every pickup is out once the clusters are done; deliveries that
    // crossed cluster boundaries follow in deferral order.
    route.extend(pending);

    (route, clusters.len())
}
