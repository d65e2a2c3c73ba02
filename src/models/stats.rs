//! Optimization result statistics.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Derived report for one optimization run.
///
/// Computed once per call and never mutated afterwards.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use courier_routing::models::OptimizationStatistics;
///
/// let stats = OptimizationStatistics::new(12.0, 9.0, 2, 0, 3, Duration::from_millis(4));
/// assert!((stats.saved_km - 3.0).abs() < 1e-10);
/// assert!((stats.saved_percentage - 25.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationStatistics {
    /// Total distance of the validated input order, in km.
    pub original_distance_km: f64,
    /// Total distance of the returned route, in km.
    pub optimized_distance_km: f64,
    /// Distance saved by optimization, in km.
    pub saved_km: f64,
    /// Saved distance as a percentage of the original (0 when the
    /// original distance is 0).
    pub saved_percentage: f64,
    /// Backtracking events removed relative to the input order.
    pub eliminated_backtracks: usize,
    /// Number of zones or clusters the chosen strategy worked with.
    pub zone_count: usize,
    /// Wall-clock duration of the optimization call.
    pub execution_time: Duration,
}

impl OptimizationStatistics {
    /// Builds the report from raw measurements.
    ///
    /// `saved_km` is clamped at zero so the fallback path (which returns
    /// the input verbatim) reports zero savings rather than a negative
    /// number.
    pub fn new(
        original_distance_km: f64,
        optimized_distance_km: f64,
        original_backtracks: usize,
        optimized_backtracks: usize,
        zone_count: usize,
        execution_time: Duration,
    ) -> Self {
        let saved_km = (original_distance_km - optimized_distance_km).max(0.0);
        let saved_percentage = if original_distance_km > 0.0 {
            saved_km / original_distance_km * 100.0
        } else {
            0.0
        };
        Self {
            original_distance_km,
            optimized_distance_km,
            saved_km,
            saved_percentage,
            eliminated_backtracks: original_backtracks.saturating_sub(optimized_backtracks),
            zone_count,
            execution_time,
        }
    }

    /// An all-zero report, returned when validation leaves no stops.
    pub fn empty() -> Self {
        Self::new(0.0, 0.0, 0, 0, 0, Duration::ZERO)
    }
}
