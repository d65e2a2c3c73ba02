//! Stop-set analysis: clustering, zoning, and geometric features.
//!
//! - [`identify_clusters`] — single-link greedy grouping, O(n²)
//! - [`partition_zones`] — k-means with k-means++ seeding
//! - [`analyze`] — spread, density, pairing, and shape features feeding
//!   strategy selection

mod analyzer;
mod clusters;
mod zones;

pub use analyzer::{analyze, PairingStats, RouteAnalysis, RouteShape};
pub use clusters::{identify_clusters, Cluster};
pub use zones::{partition_zones, Zone};
