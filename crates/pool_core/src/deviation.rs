//! Endpoint-only detour estimate.
//!
//! Only the four endpoints are used (base pickup/drop, candidate pickup/drop),
//! so the estimate is O(1) per candidate. Straight-line legs understate road
//! distance, so the result is scaled by the base trip's road/straight ratio.
//! The scoring thresholds are tuned against exactly this heuristic.

use crate::geo::haversine_m;
use crate::trip::Trip;

/// Estimated extra metres the base route travels to serve the candidate.
///
/// Two insertion orders are tried, `B -> C -> C' -> B'` and
/// `B -> C' -> C -> B'`, and the shorter one is taken as the combined route.
pub fn approximate_extra_distance(base: &Trip, candidate: &Trip) -> f64 {
    let (bp, bd) = (base.pickup, base.drop);
    let (cp, cd) = (candidate.pickup, candidate.drop);

    let in_order = haversine_m(bp, cp) + haversine_m(cp, cd) + haversine_m(cd, bd);
    let swapped = haversine_m(bp, cd) + haversine_m(cd, cp) + haversine_m(cp, bd);
    let combined = in_order.min(swapped);

    let direct = haversine_m(bp, bd);
    let extra = (combined - direct).max(0.0);

    extra * road_scale(base.known_distance_m(), direct)
}

/// Ratio of known road distance to straight-line distance, or 1.
fn road_scale(road_m: Option<f64>, straight_m: f64) -> f64 {
    match road_m {
        Some(road) if straight_m > 0.0 => road / straight_m,
        _ => 1.0,
    }
}
