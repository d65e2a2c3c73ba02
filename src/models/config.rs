//! Optimizer configuration.

use serde::{Deserialize, Serialize};

/// Tunable parameters for one optimization run.
///
/// The configuration is immutable for the duration of a call. Between
/// calls it can be adjusted with a partial [`ConfigUpdate`] merge; later
/// calls see the merged values.
///
/// # Examples
///
/// ```
/// use courier_routing::models::{ConfigUpdate, OptimizerConfig};
///
/// let mut config = OptimizerConfig::default();
/// assert!(config.enable_zoning);
///
/// config.apply(ConfigUpdate {
///     immediate_delivery_radius_km: Some(0.8),
///     enable_zoning: Some(false),
///     ..ConfigUpdate::default()
/// });
/// assert_eq!(config.immediate_delivery_radius_km, 0.8);
/// assert!(!config.enable_zoning);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// Below this distance from a just-visited pickup, its delivery is
    /// appended immediately.
    pub immediate_delivery_radius_km: f64,
    /// Grouping threshold for cluster identification.
    pub cluster_radius_km: f64,
    /// Grouping threshold for zone identification (reserved; the zone
    /// strategy derives its partition count from the stop count).
    pub zone_radius_km: f64,
    /// Scoring weight, reserved for scoring extensions.
    pub backtrack_penalty: f64,
    /// Scoring weight, reserved for scoring extensions.
    pub direction_changes_penalty: f64,
    /// Scoring weight, reserved for scoring extensions.
    pub cluster_bonus: f64,
    /// Allows the zone strategy to be selected.
    pub enable_zoning: bool,
    /// Enables immediate-delivery pairing after a pickup.
    pub enable_smart_pairing: bool,
    /// Upper bound on local-search refinement iterations.
    pub max_iterations: usize,
    /// Refinement stops once an iteration saves less than this (km).
    pub convergence_threshold_km: f64,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            immediate_delivery_radius_km: 1.5,
            cluster_radius_km: 2.0,
            zone_radius_km: 3.0,
            backtrack_penalty: 2.0,
            direction_changes_penalty: 1.0,
            cluster_bonus: 0.5,
            enable_zoning: true,
            enable_smart_pairing: true,
            max_iterations: 100,
            convergence_threshold_km: 0.01,
        }
    }
}

impl OptimizerConfig {
    /// Merges the set fields of `update` into this configuration.
    pub fn apply(&mut self, update: ConfigUpdate) {
        if let Some(v) = update.immediate_delivery_radius_km {
            self.immediate_delivery_radius_km = v;
        }
        if let Some(v) = update.cluster_radius_km {
            self.cluster_radius_km = v;
        }
        if let Some(v) = update.zone_radius_km {
            self.zone_radius_km = v;
        }
        if let Some(v) = update.backtrack_penalty {
            self.backtrack_penalty = v;
        }
        if let Some(v) = update.direction_changes_penalty {
            self.direction_changes_penalty = v;
        }
        if let Some(v) = update.cluster_bonus {
            self.cluster_bonus = v;
        }
        if let Some(v) = update.enable_zoning {
            self.enable_zoning = v;
        }
        if let Some(v) = update.enable_smart_pairing {
            self.enable_smart_pairing = v;
        }
        if let Some(v) = update.max_iterations {
            self.max_iterations = v;
        }
        if let Some(v) = update.convergence_threshold_km {
            self.convergence_threshold_km = v;
        }
    }
}

/// A partial configuration override; `None` fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigUpdate {
    pub immediate_delivery_radius_km: Option<f64>,
    pub cluster_radius_km: Option<f64>,
    pub zone_radius_km: Option<f64>,
    pub backtrack_penalty: Option<f64>,
    pub direction_changes_penalty: Option<f64>,
    pub cluster_bonus: Option<f64>,
    pub enable_zoning: Option<bool>,
    pub enable_smart_pairing: Option<bool>,
    pub max_iterations: Option<usize>,
    pub convergence_threshold_km: Option<f64>,
}
