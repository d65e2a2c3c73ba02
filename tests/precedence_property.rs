//! Randomized precedence-invariant properties.
//!
//! The local search refiner and the full optimizer are hammered with
//! randomly generated parcels and locations; no run may ever emit a
//! delivery ahead of its pickup.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use courier_routing::geo::route_distance_km;
use courier_routing::local_search::{refine, route_is_feasible};
use courier_routing::models::{Location, OptimizerConfig, Stop, StopKind};
use courier_routing::observer::NoopObserver;
use courier_routing::{RawStop, RouteOptimizer};

/// A random parcel: pickup and delivery coordinates inside the Nairobi
/// metro box, plus a delivery insertion offset.
fn parcel_strategy() -> impl Strategy<Value = ((f64, f64), (f64, f64), usize)> {
    (
        (-1.45..-1.10f64, 36.65..37.10f64),
        (-1.45..-1.10f64, 36.65..37.10f64),
        0..16usize,
    )
}

/// Builds a feasible route: pickups laid out in parcel order, each
/// delivery inserted at a random position after its pickup.
fn feasible_route(parcels: &[((f64, f64), (f64, f64), usize)]) -> Vec<Stop> {
    let mut route: Vec<Stop> = parcels
        .iter()
        .enumerate()
        .map(|(i, ((lat, lng), _, _))| {
            Stop::new(
                format!("p{i}"),
                StopKind::Pickup,
                Location::new(*lat, *lng),
                format!("PKG-{i}"),
            )
        })
        .collect();

    for (i, (_, (lat, lng), offset)) in parcels.iter().enumerate() {
        let pickup_at = route
            .iter()
            .position(|s| s.is_pickup() && s.parcel_code == format!("PKG-{i}"))
            .expect("pickup placed above");
        let at = (pickup_at + 1 + offset % (route.len() - pickup_at)).min(route.len());
        route.insert(
            at,
            Stop::new(
                format!("d{i}"),
                StopKind::Delivery,
                Location::new(*lat, *lng),
                format!("PKG-{i}"),
            ),
        );
    }
    route
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn refiner_never_breaks_precedence(
        parcels in prop::collection::vec(parcel_strategy(), 1..10)
    ) {
        let mut route = feasible_route(&parcels);
        prop_assert!(route_is_feasible(&route));

        let before = route_distance_km(&route);
        refine(&mut route, &OptimizerConfig::default(), &NoopObserver);

        prop_assert!(route_is_feasible(&route), "refiner broke pickup-before-delivery");
        prop_assert!(route_distance_km(&route) <= before + 1e-9);
        prop_assert_eq!(route.len(), parcels.len() * 2);
    }

    #[test]
    fn refinement_is_idempotent(
        parcels in prop::collection::vec(parcel_strategy(), 1..8)
    ) {
        let config = OptimizerConfig::default();
        let mut route = feasible_route(&parcels);
        refine(&mut route, &config, &NoopObserver);
        let second_saving = refine(&mut route, &config, &NoopObserver);
        prop_assert!(second_saving < config.convergence_threshold_km);
    }

    #[test]
    fn optimizer_always_returns_valid_routes(
        parcels in prop::collection::vec(parcel_strategy(), 1..12),
        seed in any::<u64>(),
    ) {
        let mut raw = Vec::new();
        for (i, ((p_lat, p_lng), (d_lat, d_lng), _)) in parcels.iter().enumerate() {
            raw.push(RawStop::new("pickup", *p_lat, *p_lng, &format!("PKG-{i}")));
            raw.push(RawStop::new("delivery", *d_lat, *d_lng, &format!("PKG-{i}")));
        }

        let optimizer = RouteOptimizer::default();
        let mut rng = StdRng::seed_from_u64(seed);
        let outcome = optimizer.optimize_with_rng(&raw, &mut rng);

        prop_assert_eq!(outcome.route.len(), raw.len());
        prop_assert!(route_is_feasible(&outcome.route));
        prop_assert!(
            outcome.statistics.optimized_distance_km
                <= outcome.statistics.original_distance_km + 1e-9
        );
    }

    #[test]
    fn optimizer_handles_unmatched_parcels(
        parcels in prop::collection::vec(parcel_strategy(), 1..6),
        orphan in parcel_strategy(),
    ) {
        let mut raw = Vec::new();
        for (i, ((p_lat, p_lng), (d_lat, d_lng), _)) in parcels.iter().enumerate() {
            raw.push(RawStop::new("pickup", *p_lat, *p_lng, &format!("PKG-{i}")));
            raw.push(RawStop::new("delivery", *d_lat, *d_lng, &format!("PKG-{i}")));
        }
        // A delivery with no pickup and a pickup with no delivery
        let ((o_lat, o_lng), (u_lat, u_lng), _) = orphan;
        raw.push(RawStop::new("delivery", o_lat, o_lng, "PKG-ORPHAN"));
        raw.push(RawStop::new("pickup", u_lat, u_lng, "PKG-UNMATCHED"));

        let optimizer = RouteOptimizer::default();
        let mut rng = StdRng::seed_from_u64(7);
        let outcome = optimizer.optimize_with_rng(&raw, &mut rng);

        prop_assert_eq!(outcome.route.len(), raw.len());
        prop_assert!(route_is_feasible(&outcome.route));
    }
}
