//! Iterated local-search refinement.
//!
//! Runs after any construction strategy. Each iteration sweeps 2-opt,
//! 3-opt (short routes only), and Or-opt over the route; the loop stops
//! at `max_iterations` or as soon as an iteration saves less than
//! `convergence_threshold_km`. Every move the operators apply preserves
//! pickup-before-delivery order, so a feasible input yields a feasible
//! output.

use crate::models::{OptimizerConfig, Stop};
use crate::observer::{OptimizeEvent, ProgressObserver};

use super::or_opt::or_opt_pass;
use super::three_opt::three_opt_pass;
use super::two_opt::two_opt_pass;

/// Refines a feasible route in place, returning the total distance saved.
///
/// # Examples
///
/// ```
/// use courier_routing::local_search::refine;
/// use courier_routing::models::{Location, OptimizerConfig, Stop, StopKind};
/// use courier_routing::observer::NoopObserver;
///
/// let mut route = vec![
///     Stop::new("a", StopKind::Pickup, Location::new(0.0, 0.0), "A"),
///     Stop::new("c", StopKind::Pickup, Location::new(0.0, 0.2), "C"),
///     Stop::new("b", StopKind::Pickup, Location::new(0.0, 0.1), "B"),
///     Stop::new("d", StopKind::Pickup, Location::new(0.0, 0.3), "D"),
/// ];
/// let saved = refine(&mut route, &OptimizerConfig::default(), &NoopObserver);
/// assert!(saved > 0.0);
/// ```
pub fn refine(
    route: &mut Vec<Stop>,
    config: &OptimizerConfig,
    observer: &dyn ProgressObserver,
) -> f64 {
    let mut total_saved = 0.0;

    for iteration in 0..config.max_iterations {
        let mut saved = two_opt_pass(route);
        saved += three_opt_pass(route);
        saved += or_opt_pass(route);

        if saved > 0.0 {
            observer.on_event(&OptimizeEvent::RefinementImproved {
                iteration,
                saved_km: saved,
            });
        }
        total_saved += saved;

        if saved < config.convergence_threshold_km {
            break;
        }
    }

    total_saved
}
