//! Symmetric route-coverage estimate.
//!
//! Coverage is a proxy for shared geometry rather than a true intersection:
//! every resampled point of one path is tested for a neighbour on the other
//! path within a tolerance, in both directions, and the two covered fractions
//! are averaged. The cost is `O(|A| * |B|)` haversine evaluations.

use crate::geo::{haversine_m, Point};
use crate::resample::resample;

/// Spacing used to normalise both paths before comparison.
pub const DEFAULT_RESAMPLE_STEP_M: f64 = 250.0;
/// Default distance within which two resampled points count as shared.
pub const DEFAULT_TOLERANCE_M: f64 = 150.0;

/// Overlap percentage in `[0, 100]` between two raw paths.
pub fn overlap_percent(path_a: &[Point], path_b: &[Point], tol_m: f64) -> f64 {
    overlap_percent_with_step(path_a, path_b, tol_m, DEFAULT_RESAMPLE_STEP_M)
}

/// Same as [`overlap_percent`] with an explicit resampling step.
pub fn overlap_percent_with_step(
    path_a: &[Point],
    path_b: &[Point],
    tol_m: f64,
    step_m: f64,
) -> f64 {
    let a = resample(path_a, step_m);
    let b = resample(path_b, step_m);
    overlap_percent_resampled(&a, &b, tol_m)
}

/// Overlap between two paths that have already been resampled.
///
/// Returns 0 when either side is empty.
pub fn overlap_percent_resampled(a: &[Point], b: &[Point], tol_m: f64) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let a_covered = covered_fraction(a, b, tol_m);
    let b_covered = covered_fraction(b, a, tol_m);
    100.0 * (a_covered + b_covered) / 2.0
}

fn covered_fraction(points: &[Point], other: &[Point], tol_m: f64) -> f64 {
    let covered = points
        .iter()
        .filter(|p| other.iter().any(|q| haversine_m(**p, *q) <= tol_m))
        .count();
    covered as f64 / points.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(lat0: f64, lng: f64, len_deg: f64, n: usize) -> Vec<Point> {
        (0..n)
            .map(|i| Point::new(lat0 + len_deg * i as f64 / (n - 1) as f64, lng))
            .collect()
    }

    #[test]
    fn identical_paths_overlap_fully() {
        let path = line(12.9, 77.6, 0.045, 12);
        assert_eq!(overlap_percent(&path, &path, DEFAULT_TOLERANCE_M), 100.0);
    }

    #[test]
    fn distant_paths_do_not_overlap() {
        let a = line(12.9, 77.6, 0.045, 5);
        let b = line(12.9, 77.7, 0.045, 5); // ~10 km east
        assert_eq!(overlap_percent(&a, &b, DEFAULT_TOLERANCE_M), 0.0);
    }

    #[test]
    fn empty_side_yields_zero() {
        let a = line(12.9, 77.6, 0.045, 5);
        assert_eq!(overlap_percent(&a, &[], DEFAULT_TOLERANCE_M), 0.0);
        assert_eq!(overlap_percent(&[], &a, DEFAULT_TOLERANCE_M), 0.0);
    }

    #[test]
    fn overlap_is_symmetric() {
        let a = line(12.9, 77.6, 0.045, 5);
        let b = line(12.92, 77.6, 0.045, 5);
        let ab = overlap_percent(&a, &b, DEFAULT_TOLERANCE_M);
        let ba = overlap_percent(&b, &a, DEFAULT_TOLERANCE_M);
        assert!((ab - ba).abs() < 1e-9);
        assert!(ab > 0.0 && ab < 100.0, "partial overlap expected, got {ab}");
    }

    #[test]
    fn tolerance_controls_coverage() {
        let a = line(12.9, 77.6, 0.045, 5);
        let b = line(12.9, 77.6015, 0.045, 5); // ~163 m east
        assert_eq!(overlap_percent(&a, &b, 150.0), 0.0);
        assert_eq!(overlap_percent(&a, &b, 200.0), 100.0);
    }
}
