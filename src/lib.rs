//! # courier-routing
//!
//! Route optimization for courier pickup/delivery batches: takes an
//! unordered set of stops and produces a visit order that minimizes
//! travel distance while keeping every delivery after its pickup.
//!
//! ## Modules
//!
//! - [`models`] — Domain types (Stop, configuration, statistics)
//! - [`validate`] — Raw-record filtering and normalization
//! - [`geo`] — Haversine distance, bearings, centroids, projection
//! - [`analysis`] — Clustering, zoning, and stop-set features
//! - [`strategy`] — Construction heuristics and strategy selection
//! - [`local_search`] — Precedence-aware 2-opt / 3-opt / Or-opt
//! - [`observer`] — Injectable phase-boundary telemetry
//! - [`optimizer`] — The [`RouteOptimizer`] façade
//!
//! ## Example
//!
//! ```
//! use courier_routing::{RawStop, RouteOptimizer};
//!
//! let optimizer = RouteOptimizer::default();
//! let stops = vec![
//!     RawStop::new("pickup", -1.2850, 36.8200, "PKG-1"),
//!     RawStop::new("delivery", -1.2700, 36.8300, "PKG-1"),
//!     RawStop::new("pickup", -1.2900, 36.8100, "PKG-2"),
//!     RawStop::new("delivery", -1.2750, 36.8250, "PKG-2"),
//! ];
//! let outcome = optimizer.optimize(&stops);
//! assert_eq!(outcome.route.len(), 4);
//! assert!(outcome.statistics.optimized_distance_km
//!     <= outcome.statistics.original_distance_km + 1e-9);
//! ```

pub mod analysis;
pub mod geo;
pub mod local_search;
pub mod models;
pub mod observer;
pub mod optimizer;
pub mod strategy;
pub mod validate;

pub use models::{ConfigUpdate, Location, OptimizationStatistics, OptimizerConfig, Stop, StopKind};
pub use optimizer::{OptimizationOutcome, RouteOptimizer};
pub use strategy::Strategy;
pub use validate::{validate_stops, RawStop};
