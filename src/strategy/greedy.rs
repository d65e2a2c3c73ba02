//! Shared greedy stop walk.
//!
//! The cluster and zone strategies both sequence a pool of stops by
//! repeatedly taking the nearest eligible stop from the current position.
//! Eligibility is where precedence enters construction: a constrained
//! delivery only becomes a candidate once its pickup has been placed.

use std::collections::HashSet;

use crate::geo::haversine_km;
use crate::models::{Location, OptimizerConfig, Stop};

/// Distance multiplier favoring deliveries over pickups at equal range.
const DELIVERY_SCORE_FACTOR: f64 = 0.9;

/// Mutable walk state shared across a whole route construction.
pub struct WalkState {
    /// Parcel codes whose pickup has been placed so far.
    pub picked: HashSet<String>,
    /// Parcel codes that have a pickup somewhere in the full stop set.
    /// Deliveries outside this set are unconstrained.
    pub constrained: HashSet<String>,
}

impl WalkState {
    /// Builds the state for a full validated stop set.
    pub fn for_stops(stops: &[Stop]) -> Self {
        Self {
            picked: HashSet::new(),
            constrained: stops
                .iter()
                .filter(|s| s.is_pickup())
                .map(|s| s.parcel_code.clone())
                .collect(),
        }
    }

    /// Whether a stop may be emitted right now.
    pub fn is_eligible(&self, stop: &Stop) -> bool {
        !stop.is_delivery()
            || !self.constrained.contains(&stop.parcel_code)
            || self.picked.contains(&stop.parcel_code)
    }

    /// Records an emitted stop.
    pub fn mark_emitted(&mut self, stop: &Stop) {
        if stop.is_pickup() {
            self.picked.insert(stop.parcel_code.clone());
        }
    }
}

/// Greedily sequences `pool` from `start`, respecting precedence.
///
/// Deliveries are scored with a slight preference over pickups at equal
/// distance. After emitting a pickup, its delivery is pulled forward
/// immediately when smart pairing is on and the pair sits within the
/// immediate-delivery radius. Stops that never become eligible (their
/// pickup is outside the pool and not yet placed) are returned as
/// leftovers for the caller to place later.
pub fn greedy_walk(
    pool: &[Stop],
    start: Location,
    state: &mut WalkState,
    config: &OptimizerConfig,
) -> (Vec<Stop>, Vec<Stop>) {
    let mut remaining: Vec<Stop> = pool.to_vec();
    let mut ordered = Vec::with_capacity(pool.len());
    let mut position = start;

    loop {
        let mut best: Option<(usize, f64)> = None;
        for (i, stop) in remaining.iter().enumerate() {
            if !state.is_eligible(stop) {
                continue;
            }
            let mut score = haversine_km(position, stop.location);
            if stop.is_delivery() {
                score *= DELIVERY_SCORE_FACTOR;
            }
            if best.map_or(true, |(_, s)| score < s) {
                best = Some((i, score));
            }
        }

        let Some((idx, _)) = best else {
            break;
        };
        let stop = remaining.remove(idx);
        position = stop.location;
        state.mark_emitted(&stop);

        let immediate = if stop.is_pickup() && config.enable_smart_pairing {
            take_immediate_delivery(&mut remaining, &stop, config)
        } else {
            None
        };

        ordered.push(stop);
        if let Some(delivery) = immediate {
            position = delivery.location;
            ordered.push(delivery);
        }
    }

    (ordered, remaining)
}

/// Removes and returns the pickup's delivery when it sits within the
/// immediate-delivery radius.
fn take_immediate_delivery(
    remaining: &mut Vec<Stop>,
    pickup: &Stop,
    config: &OptimizerConfig,
) -> Option<Stop> {
    let idx = remaining.iter().position(|s| {
        s.is_delivery()
            && s.parcel_code == pickup.parcel_code
            && haversine_km(pickup.location, s.location) <= config.immediate_delivery_radius_km
    })?;
    Some(remaining.remove(idx))
}
