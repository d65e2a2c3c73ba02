//! Precedence-aware Or-opt.
//!
//! # Algorithm
//!
//! Tries relocating contiguous segments of 1-3 stops to every other
//! insertion point. A segment is a relocation candidate only when it is
//! precedence-closed (every constrained delivery inside it travels with
//! its pickup); a candidate move is applied when it shortens the route
//! and the relocated route passes the whole-route precedence check.
//!
//! # Complexity
//!
//! O(n²) candidate moves per pass.
//!
//! # Reference
//!
//! Or, I. (1976). "Traveling Salesman-Type Combinatorial Problems and
//! Their Relation to the Logistics of Blood Banking". PhD thesis.

use crate::geo::haversine_km;
use crate::models::Stop;

use super::precedence::{route_is_feasible, segment_is_closed};

const IMPROVEMENT_EPS: f64 = 1e-10;

/// One full Or-opt sweep over the route.
///
/// Returns the total distance saved (km).
pub fn or_opt_pass(route: &mut Vec<Stop>) -> f64 {
    let mut saved = 0.0;
    for seg_len in 1..=3usize {
        saved += relocate_segments(route, seg_len);
    }
    saved
}

/// Tries every relocation of `seg_len`-stop segments, applying each
/// improving feasible move as it is found.
fn relocate_segments(route: &mut Vec<Stop>, seg_len: usize) -> f64 {
    let mut saved = 0.0;
    if route.len() < seg_len + 2 {
        return saved;
    }

    let mut from = 0;
    while from + seg_len <= route.len() {
        if !segment_is_closed(route, from, seg_len) {
            from += 1;
            continue;
        }

        let mut moved = false;
        let n = route.len();
        for to in 0..=n - seg_len {
            if to >= from && to <= from + seg_len {
                continue;
            }
            let delta = relocation_delta(route, from, seg_len, to);
            if delta >= -IMPROVEMENT_EPS {
                continue;
            }

            let candidate = relocated(route, from, seg_len, to);
            if route_is_feasible(&candidate) {
                *route = candidate;
                saved -= delta;
                moved = true;
                break;
            }
        }

        if !moved {
            from += 1;
        }
        // After a move, re-examine the same index: a new segment now
        // starts there.
    }
    saved
}

/// Distance change from moving `route[from..from+len]` so that its first
/// stop lands at index `to` of the original route.
fn relocation_delta(route: &[Stop], from: usize, len: usize, to: usize) -> f64 {
    let n = route.len();
    let dist = |a: Option<&Stop>, b: Option<&Stop>| -> f64 {
        match (a, b) {
            (Some(x), Some(y)) => haversine_km(x.location, y.location),
            _ => 0.0,
        }
    };

    let prev = from.checked_sub(1).map(|i| &route[i]);
    let next = route.get(from + len);
    let seg_first = &route[from];
    let seg_last = &route[from + len - 1];

    let removal_gain =
        dist(prev, Some(seg_first)) + dist(Some(seg_last), next) - dist(prev, next);

    let (ins_prev, ins_next) = if to < from {
        (to.checked_sub(1).map(|i| &route[i]), route.get(to))
    } else {
        (route.get(to - 1), if to >= n { None } else { route.get(to) })
    };

    let insertion_cost = dist(ins_prev, Some(seg_first)) + dist(Some(seg_last), ins_next)
        - dist(ins_prev, ins_next);

    insertion_cost - removal_gain
}

/// Builds the route with `route[from..from+len]` moved to `to` (an index
/// of the original route).
fn relocated(route: &[Stop], from: usize, len: usize, to: usize) -> Vec<Stop> {
    let mut remaining = route.to_vec();
    let segment: Vec<Stop> = remaining.drain(from..from + len).collect();
    let insert_at = if to > from { to - len } else { to };
    for (offset, stop) in segment.into_iter().enumerate() {
        remaining.insert(insert_at + offset, stop);
    }
    remaining
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::route_distance_km;
    use crate::models::{Location, StopKind};

    fn pickup(id: &str, lat: f64, lng: f64, parcel: &str) -> Stop {
        Stop::new(id, StopKind::Pickup, Location::new(lat, lng), parcel)
    }

    fn delivery(id: &str, lat: f64, lng: f64, parcel: &str) -> Stop {
        Stop::new(id, StopKind::Delivery, Location::new(lat, lng), parcel)
    }

    #[test]
    fn test_relocates_out_of_place_stop() {
        // "c" belongs between b and d
        let mut route = vec![
            pickup("a", 0.0, 0.0, "A"),
            pickup("b", 0.0, 0.1, "B"),
            pickup("d", 0.0, 0.3, "D"),
            pickup("c", 0.0, 0.2, "C"),
            pickup("e", 0.0, 0.4, "E"),
        ];
        let before = route_distance_km(&route);
        let saved = or_opt_pass(&mut route);
        let after = route_distance_km(&route);
        assert!(saved > 0.0);
        assert!((before - after - saved).abs() < 1e-9);
        let ids: Vec<&str> = route.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_open_segment_not_relocated() {
        // A lone constrained delivery is not a relocatable segment, so the
        // distance-optimal order (d1 tucked right after p1) stays out of
        // reach and the route converges elsewhere, still feasible.
        let mut route = vec![
            pickup("p1", 0.0, 0.0, "A"),
            pickup("x", 0.0, 0.3, "X"),
            delivery("d1", 0.0, 0.05, "A"),
        ];
        or_opt_pass(&mut route);
        assert!(route_is_feasible(&route));
        let p1_at = route.iter().position(|s| s.id == "p1").expect("kept");
        let d1_at = route.iter().position(|s| s.id == "d1").expect("kept");
        assert!(p1_at < d1_at);
    }

    #[test]
    fn test_pair_moves_as_unit() {
        // The (p2, d2) pair sits far from its neighbors; moving the pair
        // together is allowed and shortens the route.
        let mut route = vec![
            pickup("a", 0.0, 0.0, "A"),
            pickup("p2", 0.0, 0.5, "B"),
            delivery("d2", 0.0, 0.51, "B"),
            pickup("b", 0.0, 0.1, "C"),
            pickup("c", 0.0, 0.6, "D"),
        ];
        let before = route_distance_km(&route);
        or_opt_pass(&mut route);
        assert!(route_distance_km(&route) < before);
        assert!(route_is_feasible(&route));
    }

    #[test]
    fn test_short_route_untouched() {
        let mut route = vec![pickup("a", 0.0, 0.0, "A"), pickup("b", 0.0, 0.1, "B")];
        assert_eq!(or_opt_pass(&mut route), 0.0);
    }

    #[test]
    fn test_does_not_worsen() {
        let mut route = vec![
            pickup("a", 0.0, 0.0, "A"),
            pickup("b", 0.0, 0.1, "B"),
            pickup("c", 0.0, 0.2, "C"),
            pickup("d", 0.0, 0.3, "D"),
        ];
        let before = route_distance_km(&route);
        or_opt_pass(&mut route);
        assert!(route_distance_km(&route) <= before + 1e-9);
    }
}
