//! Optimization progress telemetry.
//!
//! The engine reports phase boundaries through an injectable observer
//! instead of writing to an output stream. The default observer ignores
//! everything.

use crate::analysis::RouteAnalysis;
use crate::strategy::Strategy;

/// A phase-boundary event emitted during one optimization call.
#[derive(Debug, Clone)]
pub enum OptimizeEvent<'a> {
    /// Validation finished; `dropped` records were filtered out.
    StopsValidated { kept: usize, dropped: usize },
    /// The analyzer finished.
    AnalysisCompleted { analysis: &'a RouteAnalysis },
    /// A strategy was chosen for this stop set.
    StrategySelected { strategy: Strategy },
    /// A refinement iteration shortened the route.
    RefinementImproved { iteration: usize, saved_km: f64 },
    /// The post-refinement integrity check failed; the input order is
    /// returned instead.
    FallbackTriggered,
}

/// Receives [`OptimizeEvent`]s at phase boundaries.
///
/// Implementations must be cheap; they run inline with the optimization.
pub trait ProgressObserver {
    fn on_event(&self, event: &OptimizeEvent<'_>);
}

/// Observer that discards all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ProgressObserver for NoopObserver {
    fn on_event(&self, _event: &OptimizeEvent<'_>) {}
}
