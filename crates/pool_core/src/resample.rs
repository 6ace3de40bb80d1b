//! Distance-uniform resampling of a path.
//!
//! Raw route polylines are dense around junctions and sparse on straight
//! roads. Resampling at a fixed step first keeps point-coverage comparisons
//! from being biased by polyline resolution.

use crate::geo::{haversine_m, Point};

/// Emit a point every `step_m` metres of travelled distance along `points`.
///
/// The leftover distance after each segment carries over into the next one,
/// so spacing stays uniform across segment boundaries. The first point is
/// always kept and the last point is appended when the walk does not land on
/// it exactly. Paths with fewer than two points come back unchanged.
pub fn resample(points: &[Point], step_m: f64) -> Vec<Point> {
    if points.len() < 2 {
        return points.to_vec();
    }
    if !(step_m.is_finite() && step_m > 0.0) {
        log::debug!("resample step {step_m} is not positive; returning path as-is");
        return points.to_vec();
    }

    let mut out = vec![points[0]];
    // Distance travelled since the last emitted point.
    let mut carried = 0.0;

    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let seg_len = haversine_m(a, b);

        let mut t = step_m - carried;
        while t <= seg_len {
            out.push(a.lerp(&b, t / seg_len));
            t += step_m;
        }
        carried = seg_len - (t - step_m);
    }

    let last = points[points.len() - 1];
    if out.last() != Some(&last) {
        out.push(last);
    }
    out
}
