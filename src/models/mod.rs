//! Domain model types for courier route optimization.
//!
//! Provides the core abstractions: pickup/delivery stops with parcel
//! linkage, the per-call optimizer configuration, and the statistics
//! report returned alongside an optimized route.

mod config;
mod stats;
mod stop;

pub use config::{ConfigUpdate, OptimizerConfig};
pub use stats::OptimizationStatistics;
pub use stop::{Location, Stop, StopKind};
