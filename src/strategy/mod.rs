//! Construction strategies and strategy selection.
//!
//! - [`cluster_route`] — exhaust one dense area before the next
//! - [`directional_route`] — single sweep along the dominant bearing
//! - [`zone_route`] — k-means decomposition for many scattered groups
//! - [`tsp_route`] — nearest-neighbor + insertion for small sets
//! - [`hybrid_route`] — clusters swept along their own axes
//!
//! [`select_strategy`] maps the analyzer's findings to one of these;
//! [`execute_strategy`] dispatches.

mod cluster;
mod directional;
mod greedy;
mod hybrid;
mod tsp;
mod zone;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::analysis::{Cluster, RouteAnalysis, Zone};
use crate::geo::haversine_km;
use crate::models::{OptimizerConfig, Stop};

pub use cluster::cluster_route;
pub use directional::directional_route;
pub use hybrid::hybrid_route;
pub use tsp::tsp_route;
pub use zone::zone_route;

/// Stop sets smaller than this go to the TSP-style construction.
const TSP_SIZE_LIMIT: usize = 10;

/// Zone decomposition needs more clusters than this to pay off.
const ZONE_CLUSTER_THRESHOLD: usize = 3;

/// The construction heuristic chosen for a stop set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Cluster,
    Directional,
    Zone,
    Tsp,
    Hybrid,
}

/// Picks a strategy from the analysis; first match wins.
///
/// Dense clustered urban data benefits from visiting one area
/// exhaustively before moving on; sparse linear corridors benefit from a
/// single geometric sweep. Everything else trades off between zone
/// decomposition, exact-style construction at small scale, and the
/// cluster/sweep hybrid.
///
/// # Examples
///
/// ```
/// use courier_routing::analysis::analyze;
/// use courier_routing::models::{Location, OptimizerConfig, Stop, StopKind};
/// use courier_routing::strategy::{select_strategy, Strategy};
///
/// let stops = vec![
///     Stop::new("a", StopKind::Pickup, Location::new(-1.28, 36.82), "P1"),
///     Stop::new("b", StopKind::Delivery, Location::new(-1.27, 36.83), "P1"),
/// ];
/// let config = OptimizerConfig::default();
/// let analysis = analyze(&stops, &config);
/// assert_eq!(select_strategy(&analysis, &config), Strategy::Tsp);
/// ```
pub fn select_strategy(analysis: &RouteAnalysis, config: &OptimizerConfig) -> Strategy {
    if analysis.is_high_density && analysis.is_clustered {
        Strategy::Cluster
    } else if analysis.is_linear {
        Strategy::Directional
    } else if analysis.clusters.len() > ZONE_CLUSTER_THRESHOLD && config.enable_zoning {
        Strategy::Zone
    } else if analysis.stop_count < TSP_SIZE_LIMIT {
        Strategy::Tsp
    } else {
        Strategy::Hybrid
    }
}

/// Runs the chosen strategy, returning the constructed route and the
/// number of zones or clusters it worked with.
pub fn execute_strategy<R: Rng + ?Sized>(
    strategy: Strategy,
    stops: &[Stop],
    analysis: &RouteAnalysis,
    config: &OptimizerConfig,
    rng: &mut R,
) -> (Vec<Stop>, usize) {
    match strategy {
        Strategy::Cluster => cluster_route(stops, &analysis.clusters, config),
        Strategy::Directional => (directional_route(stops, config), 0),
        Strategy::Zone => zone_route(stops, config, rng),
        Strategy::Tsp => (tsp_route(stops, config), 0),
        Strategy::Hybrid => hybrid_route(stops, &analysis.clusters, config),
    }
}

/// Orders clusters for visiting: most pickups first, then repeatedly the
/// nearest remaining cluster by center distance.
pub(crate) fn sequence_clusters(clusters: &[Cluster]) -> Vec<Cluster> {
    let mut remaining: Vec<Cluster> = clusters.to_vec();
    let mut ordered = Vec::with_capacity(remaining.len());
    if remaining.is_empty() {
        return ordered;
    }

    let start = index_of_most_pickups(remaining.iter().map(|c| c.pickup_count()));
    let mut current = remaining.remove(start);
    while !remaining.is_empty() {
        let next = index_of_nearest(remaining.iter().map(|c| haversine_km(current.center, c.center)));
        let chosen = remaining.remove(next);
        ordered.push(std::mem::replace(&mut current, chosen));
    }
    ordered.push(current);
    ordered
}

/// Same visiting order for zones.
pub(crate) fn sequence_zones(zones: &[Zone]) -> Vec<Zone> {
    let mut remaining: Vec<Zone> = zones.to_vec();
    let mut ordered = Vec::with_capacity(remaining.len());
    if remaining.is_empty() {
        return ordered;
    }

    let start = index_of_most_pickups(remaining.iter().map(|z| z.pickup_count()));
    let mut current = remaining.remove(start);
    while !remaining.is_empty() {
        let next = index_of_nearest(remaining.iter().map(|z| haversine_km(current.center, z.center)));
        let chosen = remaining.remove(next);
        ordered.push(std::mem::replace(&mut current, chosen));
    }
    ordered.push(current);
    ordered
}

fn index_of_most_pickups(counts: impl Iterator<Item = usize>) -> usize {
    let mut best = 0;
    let mut best_count = 0;
    for (i, count) in counts.enumerate() {
        if count > best_count {
            best_count = count;
            best = i;
        }
    }
    best
}

fn index_of_nearest(distances: impl Iterator<Item = f64>) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (i, d) in distances.enumerate() {
        if d < best_dist {
            best_dist = d;
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::models::{Location, StopKind};

    fn pickup(id: &str, lat: f64, lng: f64, parcel: &str) -> Stop {
        Stop::new(id, StopKind::Pickup, Location::new(lat, lng), parcel)
    }

    fn delivery(id: &str, lat: f64, lng: f64, parcel: &str) -> Stop {
        Stop::new(id, StopKind::Delivery, Location::new(lat, lng), parcel)
    }

    fn dense_two_cluster_stops() -> Vec<Stop> {
        // 12 stops in two tight groups ~10 km apart, 6 within 0.5 km
        // each. The bounding box is long and thin, so the latitude
        // spread stays tiny to keep the box under ~1 km² and the
        // density above the high-density bar.
        let mut stops = Vec::new();
        for i in 0..3 {
            let lat = -1.2800 - i as f64 * 0.0003;
            stops.push(pickup(&format!("wp{i}"), lat, 36.8200, &format!("W{i}")));
            stops.push(delivery(&format!("wd{i}"), lat + 0.0001, 36.8208, &format!("W{i}")));
        }
        for i in 0..3 {
            let lat = -1.2800 - i as f64 * 0.0003;
            stops.push(pickup(&format!("ep{i}"), lat, 36.9100, &format!("E{i}")));
            stops.push(delivery(&format!("ed{i}"), lat + 0.0001, 36.9108, &format!("E{i}")));
        }
        stops
    }

    #[test]
    fn test_dense_clustered_selects_cluster() {
        let config = OptimizerConfig {
            cluster_radius_km: 1.0,
            ..OptimizerConfig::default()
        };
        let analysis = analyze(&dense_two_cluster_stops(), &config);
        assert!(analysis.is_high_density, "density {}", analysis.density);
        assert!(analysis.is_clustered);
        assert_eq!(select_strategy(&analysis, &config), Strategy::Cluster);
    }

    #[test]
    fn test_linear_selects_directional() {
        let mut stops = Vec::new();
        for i in 0..8 {
            let lat = -1.45 + i as f64 * 0.03;
            stops.push(pickup(&format!("p{i}"), lat, 36.82, &format!("P{i}")));
            stops.push(delivery(&format!("d{i}"), lat + 0.01, 36.82, &format!("P{i}")));
        }
        let config = OptimizerConfig::default();
        let analysis = analyze(&stops, &config);
        assert!(analysis.is_linear);
        assert_eq!(select_strategy(&analysis, &config), Strategy::Directional);
    }

    #[test]
    fn test_small_set_selects_tsp() {
        let stops = vec![
            pickup("p1", -1.280, 36.820, "A"),
            delivery("d1", -1.276, 36.824, "A"),
            pickup("p2", -1.282, 36.818, "B"),
            delivery("d2", -1.278, 36.822, "B"),
        ];
        let config = OptimizerConfig::default();
        let analysis = analyze(&stops, &config);
        assert_eq!(select_strategy(&analysis, &config), Strategy::Tsp);
    }

    #[test]
    fn test_many_clusters_selects_zone() {
        // 5 scattered pairs, each its own cluster, 12+ stops total
        let mut stops = Vec::new();
        let coords = [
            (-1.20, 36.75),
            (-1.35, 36.78),
            (-1.22, 36.95),
            (-1.38, 36.93),
            (-1.28, 36.85),
            (-1.15, 36.85),
        ];
        for (i, (lat, lng)) in coords.iter().enumerate() {
            stops.push(pickup(&format!("p{i}"), *lat, *lng, &format!("P{i}")));
            stops.push(delivery(&format!("d{i}"), lat + 0.002, lng + 0.002, &format!("P{i}")));
        }
        let config = OptimizerConfig::default();
        let analysis = analyze(&stops, &config);
        assert!(analysis.clusters.len() > 3);
        assert_eq!(select_strategy(&analysis, &config), Strategy::Zone);
    }

    #[test]
    fn test_zoning_disabled_falls_through() {
        let mut stops = Vec::new();
        let coords = [
            (-1.20, 36.75),
            (-1.35, 36.78),
            (-1.22, 36.95),
            (-1.38, 36.93),
            (-1.28, 36.85),
            (-1.15, 36.85),
        ];
        for (i, (lat, lng)) in coords.iter().enumerate() {
            stops.push(pickup(&format!("p{i}"), *lat, *lng, &format!("P{i}")));
            stops.push(delivery(&format!("d{i}"), lat + 0.002, lng + 0.002, &format!("P{i}")));
        }
        let config = OptimizerConfig {
            enable_zoning: false,
            ..OptimizerConfig::default()
        };
        let analysis = analyze(&stops, &config);
        // 12 stops, not linear, not dense-clustered: hybrid
        assert_eq!(select_strategy(&analysis, &config), Strategy::Hybrid);
    }

    #[test]
    fn test_sequence_clusters_starts_with_most_pickups() {
        let stops_a = vec![delivery("d", 0.0, 0.0, "X")];
        let stops_b = vec![
            pickup("p1", 0.0, 1.0, "A"),
            pickup("p2", 0.0, 1.001, "B"),
        ];
        let clusters = vec![
            Cluster {
                id: 0,
                stops: stops_a,
                center: Location::new(0.0, 0.0),
            },
            Cluster {
                id: 1,
                stops: stops_b,
                center: Location::new(0.0, 1.0),
            },
        ];
        let ordered = sequence_clusters(&clusters);
        assert_eq!(ordered[0].id, 1);
        assert_eq!(ordered[1].id, 0);
    }
}
