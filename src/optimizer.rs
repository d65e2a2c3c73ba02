//! The route optimization engine.
//!
//! Ties the phases together: validate → analyze → select → construct →
//! refine → integrity check → statistics. The optimizer holds only its
//! configuration and an injected observer; every call returns a fresh
//! result value and leaves no state behind.

use std::time::Instant;

use rand::Rng;
use tracing::{debug, warn};

use crate::analysis::analyze;
use crate::geo::{backtrack_count, route_distance_km};
use crate::local_search::{refine, route_is_feasible};
use crate::models::{ConfigUpdate, OptimizationStatistics, OptimizerConfig, Stop};
use crate::observer::{NoopObserver, OptimizeEvent, ProgressObserver};
use crate::strategy::{execute_strategy, select_strategy, Strategy};
use crate::validate::{validate_stops, RawStop};

/// The result of one optimization call.
#[derive(Debug, Clone)]
pub struct OptimizationOutcome {
    /// The ordered route; every constrained delivery follows its pickup.
    pub route: Vec<Stop>,
    /// Derived report for this call.
    pub statistics: OptimizationStatistics,
    /// The strategy that built the route; `None` when validation left
    /// nothing to optimize.
    pub strategy: Option<Strategy>,
}

/// Courier route optimizer.
///
/// Construct once with a configuration, reuse across calls. The
/// configuration can be adjusted between calls with a partial merge;
/// calls themselves never mutate the optimizer.
///
/// # Examples
///
/// ```
/// use courier_routing::{RawStop, RouteOptimizer};
/// use courier_routing::models::OptimizerConfig;
///
/// let optimizer = RouteOptimizer::new(OptimizerConfig::default());
/// let stops = vec![
///     RawStop::new("pickup", -1.2850, 36.8200, "PKG-1"),
///     RawStop::new("delivery", -1.2700, 36.8300, "PKG-1"),
/// ];
/// let outcome = optimizer.optimize(&stops);
/// assert_eq!(outcome.route.len(), 2);
/// assert_eq!(outcome.route[0].parcel_code, "PKG-1");
/// assert!(outcome.route[0].is_pickup());
/// ```
pub struct RouteOptimizer {
    config: OptimizerConfig,
    observer: Box<dyn ProgressObserver>,
}

impl RouteOptimizer {
    /// Creates an optimizer with the given configuration and a silent
    /// observer.
    pub fn new(config: OptimizerConfig) -> Self {
        Self {
            config,
            observer: Box::new(NoopObserver),
        }
    }

    /// Attaches a telemetry observer.
    pub fn with_observer(mut self, observer: Box<dyn ProgressObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// The configuration in effect for the next call.
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Merges a partial configuration update; later calls see the
    /// merged values.
    pub fn update_config(&mut self, update: ConfigUpdate) {
        self.config.apply(update);
    }

    /// Optimizes a batch of raw stop records.
    ///
    /// Uses the ambient RNG for the one randomized step (zone seeding);
    /// use [`optimize_with_rng`](Self::optimize_with_rng) for
    /// reproducible runs.
    pub fn optimize(&self, stops: &[RawStop]) -> OptimizationOutcome {
        self.optimize_with_rng(stops, &mut rand::rng())
    }

    /// Optimizes with a caller-supplied random source.
    pub fn optimize_with_rng<R: Rng + ?Sized>(
        &self,
        stops: &[RawStop],
        rng: &mut R,
    ) -> OptimizationOutcome {
        let started = Instant::now();

        let validated = validate_stops(stops);
        self.observer.on_event(&OptimizeEvent::StopsValidated {
            kept: validated.len(),
            dropped: stops.len() - validated.len(),
        });
        if validated.is_empty() {
            return OptimizationOutcome {
                route: Vec::new(),
                statistics: OptimizationStatistics::empty(),
                strategy: None,
            };
        }

        let analysis = analyze(&validated, &self.config);
        self.observer
            .on_event(&OptimizeEvent::AnalysisCompleted { analysis: &analysis });

        let strategy = select_strategy(&analysis, &self.config);
        self.observer
            .on_event(&OptimizeEvent::StrategySelected { strategy });
        debug!(?strategy, stops = validated.len(), "strategy selected");

        let (mut route, zone_count) =
            execute_strategy(strategy, &validated, &analysis, &self.config, rng);
        refine(&mut route, &self.config, self.observer.as_ref());

        let original_distance = route_distance_km(&validated);
        let route = self.checked_route(route, &validated, original_distance);

        let statistics = OptimizationStatistics::new(
            original_distance,
            route_distance_km(&route),
            backtrack_count(&validated),
            backtrack_count(&route),
            zone_count,
            started.elapsed(),
        );

        OptimizationOutcome {
            route,
            statistics,
            strategy: Some(strategy),
        }
    }

    /// Integrity backstop.
    ///
    /// A constructed route must contain every validated stop and keep
    /// each constrained delivery after its pickup; anything else falls
    /// back to the input order. A correct but longer route also yields
    /// to a feasible input order, so callers never see the optimizer
    /// make a batch worse.
    fn checked_route(
        &self,
        route: Vec<Stop>,
        validated: &[Stop],
        original_distance: f64,
    ) -> Vec<Stop> {
        if route.len() != validated.len() || !route_is_feasible(&route) {
            warn!(
                produced = route.len(),
                expected = validated.len(),
                "optimized route failed the integrity check, returning input order"
            );
            self.observer.on_event(&OptimizeEvent::FallbackTriggered);
            return validated.to_vec();
        }

        if route_is_feasible(validated) && route_distance_km(&route) > original_distance {
            return validated.to_vec();
        }

        route
    }
}

impl Default for RouteOptimizer {
    fn default() -> Self {
        Self::new(OptimizerConfig::default())
    }
}
