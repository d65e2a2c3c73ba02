//! Precedence-aware 3-opt.
//!
//! # Algorithm
//!
//! For every ordered triple of cut points (i, j, k) the route splits into
//! segments `A = r[..=i]`, `B = r[i+1..=j]`, `C = r[j+1..=k]`,
//! `D = r[k+1..]`. The reconnection variants — each middle segment
//! reversed independently or together, and the B/C swap with and without
//! reversal — are generated in full, and the lowest-distance variant that
//! passes the whole-route precedence check replaces the current route.
//!
//! Only run on short routes: the triple scan is cubic, and each variant
//! is rebuilt and re-checked in full.
//!
//! # Reference
//!
//! Lin, S. (1965). "Computer Solutions of the Traveling Salesman Problem",
//! *Bell System Technical Journal* 44(10), 2245-2269.

use crate::geo::route_distance_km;
use crate::models::Stop;

use super::precedence::route_is_feasible;

const IMPROVEMENT_EPS: f64 = 1e-10;

/// Routes at or above this length skip 3-opt entirely.
pub const THREE_OPT_MAX_LEN: usize = 20;

/// One full 3-opt sweep over the route.
///
/// Returns the total distance saved (km). Routes of length
/// [`THREE_OPT_MAX_LEN`] or more are left untouched.
pub fn three_opt_pass(route: &mut Vec<Stop>) -> f64 {
    let n = route.len();
    if n < 4 || n >= THREE_OPT_MAX_LEN {
        return 0.0;
    }

    let mut saved = 0.0;
    let mut current_dist = route_distance_km(route);

    for i in 0..n - 3 {
        for j in i + 1..n - 2 {
            for k in j + 1..n - 1 {
                if let Some((candidate, candidate_dist)) =
                    best_reconnection(route, current_dist, i, j, k)
                {
                    saved += current_dist - candidate_dist;
                    *route = candidate;
                    current_dist = candidate_dist;
                }
            }
        }
    }
    saved
}

/// Builds the reconnection variants for cut points (i, j, k) and returns
/// the best feasible one, if any beats the current distance.
fn best_reconnection(
    route: &[Stop],
    current_dist: f64,
    i: usize,
    j: usize,
    k: usize,
) -> Option<(Vec<Stop>, f64)> {
    let seg_a = &route[..=i];
    let seg_b = &route[i + 1..=j];
    let seg_c = &route[j + 1..=k];
    let seg_d = &route[k + 1..];

    let reversed = |seg: &[Stop]| -> Vec<Stop> { seg.iter().rev().cloned().collect() };

    let variants: [(Vec<Stop>, Vec<Stop>); 5] = [
        (seg_b.to_vec(), reversed(seg_c)),  // A B C' D
        (reversed(seg_b), seg_c.to_vec()),  // A B' C D
        (reversed(seg_b), reversed(seg_c)), // A B' C' D
        (seg_c.to_vec(), seg_b.to_vec()),   // A C B D
        (reversed(seg_c), reversed(seg_b)), // A C' B' D
    ];

    let mut best: Option<(Vec<Stop>, f64)> = None;
    for (first, second) in variants {
        let mut candidate = Vec::with_capacity(route.len());
        candidate.extend_from_slice(seg_a);
        candidate.extend(first);
        candidate.extend(second);
        candidate.extend_from_slice(seg_d);

        let dist = route_distance_km(&candidate);
        let beats_current = dist < current_dist - IMPROVEMENT_EPS;
        let beats_best = best.as_ref().map_or(true, |(_, d)| dist < *d);
        if beats_current && beats_best && route_is_feasible(&candidate) {
            best = Some((candidate, dist));
        }
    }
    best
}
