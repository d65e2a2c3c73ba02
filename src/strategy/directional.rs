//! Directional sweep construction.
//!
//! # Algorithm
//!
//! Determine the stop set's primary bearing, project every stop onto
//! that axis, and sort ascending. Walk the sorted list once: pickups are
//! emitted where they fall (pulling their delivery forward when it is
//! within the immediate-delivery radius); a delivery is emitted at its
//! own slot only once its pickup is already out, otherwise it is
//! deferred. Deferred deliveries are appended after the sweep, by which
//! point every pickup has been emitted.

use std::collections::HashSet;

use crate::geo::{axis_projection, haversine_km, primary_direction};
use crate::models::{OptimizerConfig, Stop};

use super::greedy::WalkState;

/// Builds a route by sweeping along the primary bearing.
pub fn directional_route(stops: &[Stop], config: &OptimizerConfig) -> Vec<Stop> {
    let mut state = WalkState::for_stops(stops);
    let (mut route, deferred) = directional_pass(stops, &mut state, config);
    route.extend(deferred);
    route
}

/// One projection-sorted sweep over `stops`.
///
/// Returns the emitted prefix and the deliveries deferred past the end
/// of the sweep, in deferral order. `state` carries pickup knowledge
/// across calls so the hybrid strategy can sweep cluster by cluster.
pub fn directional_pass(
    stops: &[Stop],
    state: &mut WalkState,
    config: &OptimizerConfig,
) -> (Vec<Stop>, Vec<Stop>) {
    if stops.is_empty() {
        return (Vec::new(), Vec::new());
    }

    let direction = primary_direction(stops);
    let mut sorted: Vec<&Stop> = stops.iter().collect();
    sorted.sort_by(|a, b| {
        let pa = axis_projection(a.location, direction.bearing_deg);
        let pb = axis_projection(b.location, direction.bearing_deg);
        pa.total_cmp(&pb)
    });

    let mut emitted: HashSet<&str> = HashSet::new();
    let mut route = Vec::with_capacity(stops.len());
    let mut deferred = Vec::new();

    for stop in &sorted {
        if emitted.contains(stop.id.as_str()) {
            continue;
        }
        if stop.is_pickup() {
            emitted.insert(stop.id.as_str());
            state.mark_emitted(stop);
            route.push((*stop).clone());

            if config.enable_smart_pairing {
                if let Some(delivery) = immediate_delivery(stop, &sorted, &emitted, config) {
                    emitted.insert(delivery.id.as_str());
                    route.push(delivery.clone());
                }
            }
        } else if state.is_eligible(stop) {
            emitted.insert(stop.id.as_str());
            route.push((*stop).clone());
        } else {
            deferred.push((*stop).clone());
        }
    }

    // A deferred delivery may have been pulled forward by its pickup's
    // immediate-delivery check later in the sweep
    deferred.retain(|s| !emitted.contains(s.id.as_str()));

    (route, deferred)
}

/// The pickup's not-yet-emitted delivery, when within the
/// immediate-delivery radius.
fn immediate_delivery<'a>(
    pickup: &Stop,
    sorted: &[&'a Stop],
    emitted: &HashSet<&str>,
    config: &OptimizerConfig,
) -> Option<&'a Stop> {
    sorted.iter().copied().find(|s| {
        s.is_delivery()
            && s.parcel_code == pickup.parcel_code
            && !emitted.contains(s.id.as_str())
            && haversine_km(pickup.location, s.location) <= config.immediate_delivery_radius_km
    })
}
