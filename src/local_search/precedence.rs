//! Pickup-before-delivery feasibility checks.
//!
//! Every local-search move is screened against the precedence constraint:
//! a delivery whose parcel has a pickup in the same route must stay after
//! that pickup. Deliveries whose parcel has no pickup anywhere in the
//! route are unconstrained; they are treated as standalone visits rather
//! than poisoning every candidate order.

use std::collections::{HashMap, HashSet};

use crate::models::Stop;

/// Parcel codes that have a pickup somewhere in `stops`.
pub fn pickup_codes(stops: &[Stop]) -> HashSet<String> {
    stops
        .iter()
        .filter(|s| s.is_pickup())
        .map(|s| s.parcel_code.clone())
        .collect()
}

/// Index of each pickup by parcel code.
pub fn pickup_positions(stops: &[Stop]) -> HashMap<&str, usize> {
    let mut positions = HashMap::new();
    for (i, s) in stops.iter().enumerate() {
        if s.is_pickup() {
            positions.entry(s.parcel_code.as_str()).or_insert(i);
        }
    }
    positions
}

/// Front-to-back integrity walk.
///
/// Accumulates picked-up parcel codes and rejects the route if a
/// constrained delivery appears before its pickup. Deliveries without a
/// pickup in the route are exempt.
///
/// # Examples
///
/// ```
/// use courier_routing::local_search::route_is_feasible;
/// use courier_routing::models::{Location, Stop, StopKind};
///
/// let pickup = Stop::new("p", StopKind::Pickup, Location::new(0.0, 0.0), "A");
/// let delivery = Stop::new("d", StopKind::Delivery, Location::new(0.0, 0.1), "A");
///
/// assert!(route_is_feasible(&[pickup.clone(), delivery.clone()]));
/// assert!(!route_is_feasible(&[delivery, pickup]));
/// ```
pub fn route_is_feasible(stops: &[Stop]) -> bool {
    let constrained = pickup_codes(stops);
    let mut picked: HashSet<&str> = HashSet::new();

    for s in stops {
        if s.is_pickup() {
            picked.insert(s.parcel_code.as_str());
        } else if constrained.contains(&s.parcel_code) && !picked.contains(s.parcel_code.as_str())
        {
            return false;
        }
    }
    true
}

/// Whether reversing `route[start..=end]` keeps every constrained
/// delivery after its pickup.
///
/// A reversal flips the relative order inside the segment, so any
/// complete pickup/delivery pair contained in it becomes infeasible.
/// Deliveries inside whose pickup sits outside keep a valid order as long
/// as the delivery's mirrored index still falls after the pickup.
pub fn reversal_is_feasible(route: &[Stop], start: usize, end: usize) -> bool {
    let positions = pickup_positions(route);

    for idx in start..=end {
        let stop = &route[idx];
        if !stop.is_delivery() {
            continue;
        }
        let Some(&pickup_idx) = positions.get(stop.parcel_code.as_str()) else {
            continue;
        };
        let new_delivery_idx = start + end - idx;
        let new_pickup_idx = if (start..=end).contains(&pickup_idx) {
            start + end - pickup_idx
        } else {
            pickup_idx
        };
        if new_delivery_idx <= new_pickup_idx {
            return false;
        }
    }
    true
}

/// Whether `route[start..start + len]` can be relocated as a unit.
///
/// The segment must be precedence-closed: every constrained delivery
/// inside it must have its pickup inside it too. Segments containing a
/// pickup whose delivery lies elsewhere still need the full-route check
/// after the move, since relocating the pickup later can overtake its
/// delivery.
pub fn segment_is_closed(route: &[Stop], start: usize, len: usize) -> bool {
    let constrained = pickup_codes(route);
    let segment = &route[start..start + len];

    for stop in segment {
        if !stop.is_delivery() || !constrained.contains(&stop.parcel_code) {
            continue;
        }
        let pickup_inside = segment
            .iter()
            .any(|s| s.is_pickup() && s.parcel_code == stop.parcel_code);
        if !pickup_inside {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Location, StopKind};

    fn pickup(id: &str, parcel: &str) -> Stop {
        Stop::new(id, StopKind::Pickup, Location::new(0.0, 0.0), parcel)
    }

    fn delivery(id: &str, parcel: &str) -> Stop {
        Stop::new(id, StopKind::Delivery, Location::new(0.0, 0.1), parcel)
    }

    #[test]
    fn test_feasible_in_order() {
        let route = vec![pickup("p1", "A"), delivery("d1", "A"), pickup("p2", "B"), delivery("d2", "B")];
        assert!(route_is_feasible(&route));
    }

    #[test]
    fn test_infeasible_delivery_first() {
        let route = vec![delivery("d1", "A"), pickup("p1", "A")];
        assert!(!route_is_feasible(&route));
    }

    #[test]
    fn test_orphan_delivery_is_exempt() {
        let route = vec![delivery("d1", "A"), pickup("p2", "B"), delivery("d2", "B")];
        assert!(route_is_feasible(&route));
    }

    #[test]
    fn test_empty_route_feasible() {
        assert!(route_is_feasible(&[]));
    }

    #[test]
    fn test_reversal_blocks_contained_pair() {
        // Reversing [1..=2] would flip p1 and d1
        let route = vec![pickup("p0", "Z"), pickup("p1", "A"), delivery("d1", "A")];
        assert!(!reversal_is_feasible(&route, 1, 2));
    }

    #[test]
    fn test_reversal_allows_disjoint_segment() {
        // d1's pickup is before the segment; the mirrored index stays after it
        let route = vec![
            pickup("p1", "A"),
            delivery("d1", "A"),
            pickup("p2", "B"),
            delivery("d2", "B"),
        ];
        // Reversing [2..=3] flips the B pair — infeasible
        assert!(!reversal_is_feasible(&route, 2, 3));
        // Reversing [1..=2] moves d1 to index 2, still after p1 at 0
        assert!(reversal_is_feasible(&route, 1, 2));
    }

    #[test]
    fn test_segment_closed() {
        let route = vec![
            pickup("p1", "A"),
            delivery("d1", "A"),
            pickup("p2", "B"),
            delivery("d2", "B"),
        ];
        // [p1, d1] contains both halves of parcel A
        assert!(segment_is_closed(&route, 0, 2));
        // [d1] alone carries a constrained delivery without its pickup
        assert!(!segment_is_closed(&route, 1, 1));
        // [p2] contains only a pickup; closure only constrains deliveries
        assert!(segment_is_closed(&route, 2, 1));
    }

    #[test]
    fn test_segment_with_orphan_delivery_is_closed() {
        let route = vec![pickup("p1", "A"), delivery("dx", "X"), delivery("d1", "A")];
        assert!(segment_is_closed(&route, 1, 1));
    }

    #[test]
    fn test_pickup_positions_first_wins() {
        let route = vec![pickup("p1", "A"), pickup("p1b", "A"), delivery("d1", "A")];
        let positions = pickup_positions(&route);
        assert_eq!(positions["A"], 0);
    }
}
