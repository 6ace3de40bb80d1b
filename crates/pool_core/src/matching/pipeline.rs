//! Per-candidate filter/score pipeline and final ranking.
//!
//! Each candidate goes through `time -> overlap -> deviation -> score` and
//! stops at the first failed filter. Candidates are independent of each
//! other; ordering is only established by the final stable sort.

use crate::deviation::approximate_extra_distance;
use crate::geo::{path_length_m, Point};
use crate::overlap::overlap_percent_resampled;
use crate::resample::resample;
use crate::trip::Trip;

use super::config::MatchConfig;
use super::scoring::{match_score, round_to};
use super::types::{MatchReport, MatchResult, Rejection, RejectionReason};

/// Base-trip geometry computed once per run.
struct PreparedBase<'a> {
    trip: &'a Trip,
    resampled: Vec<Point>,
    length_m: f64,
}

/// Matches a base trip against candidates using a [`MatchConfig`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PoolMatcher {
    config: MatchConfig,
}

impl PoolMatcher {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    /// Ranked matches for `base`; rejected candidates are dropped.
    pub fn find_matches(&self, base: &Trip, candidates: &[Trip]) -> Vec<MatchResult> {
        self.find_matches_with_report(base, candidates).matches
    }

    /// Ranked matches together with the rejection reason of every other
    /// candidate. The base trip itself (same id) is skipped silently.
    pub fn find_matches_with_report(&self, base: &Trip, candidates: &[Trip]) -> MatchReport {
        let prepared = self.prepare(base);
        let outcomes = candidates
            .iter()
            .filter(|candidate| candidate.id != base.id)
            .map(|candidate| (candidate, self.evaluate_prepared(&prepared, candidate)));
        collect_report(outcomes)
    }

    /// Same as [`PoolMatcher::find_matches_with_report`], evaluating
    /// candidates on the rayon thread pool. Output is identical.
    #[cfg(feature = "parallel")]
    pub fn find_matches_parallel(&self, base: &Trip, candidates: &[Trip]) -> MatchReport {
        use rayon::prelude::*;

        let prepared = self.prepare(base);
        let outcomes: Vec<_> = candidates
            .par_iter()
            .filter(|candidate| candidate.id != base.id)
            .map(|candidate| (candidate, self.evaluate_prepared(&prepared, candidate)))
            .collect();
        collect_report(outcomes)
    }

    /// Run a single candidate through the filters and scoring.
    pub fn evaluate(&self, base: &Trip, candidate: &Trip) -> Result<MatchResult, RejectionReason> {
        self.evaluate_prepared(&self.prepare(base), candidate)
    }

    fn prepare<'a>(&self, base: &'a Trip) -> PreparedBase<'a> {
        let path = base.path();
        PreparedBase {
            trip: base,
            resampled: resample(&path, self.config.resample_step_m),
            length_m: route_length_m(base, &path),
        }
    }

    fn evaluate_prepared(
        &self,
        base: &PreparedBase<'_>,
        candidate: &Trip,
    ) -> Result<MatchResult, RejectionReason> {
        let config = &self.config;

        let delta_minutes = departure_delta_minutes(base.trip, candidate);
        if delta_minutes > config.time_window_min {
            return Err(RejectionReason::TimeWindow {
                delta_minutes,
                limit_minutes: config.time_window_min,
            });
        }

        let path = candidate.path();
        let resampled = resample(&path, config.resample_step_m);
        let overlap_pct =
            overlap_percent_resampled(&base.resampled, &resampled, config.overlap_tolerance_m);
        if overlap_pct < config.min_overlap_pct {
            return Err(RejectionReason::InsufficientOverlap {
                overlap_pct,
                min_pct: config.min_overlap_pct,
            });
        }

        let extra_m = approximate_extra_distance(base.trip, candidate);
        let shorter_m = base.length_m.min(route_length_m(candidate, &path));
        let deviation_pct = extra_m / shorter_m * 100.0;
        if deviation_pct > config.max_deviation_pct {
            return Err(RejectionReason::ExcessiveDeviation {
                deviation_pct,
                max_pct: config.max_deviation_pct,
            });
        }

        let score = match_score(overlap_pct, deviation_pct, delta_minutes, config);
        log::debug!(
            "accepted {}: delta {:.1} min, overlap {:.2}%, deviation {:.2}%, extra {:.0} m, score {}",
            candidate.id,
            delta_minutes,
            overlap_pct,
            deviation_pct,
            extra_m,
            score
        );

        Ok(MatchResult {
            matched_trip_id: candidate.id.clone(),
            overlap_percentage: round_to(overlap_pct, 2),
            additional_distance_m: extra_m.round() as i64,
            additional_time_s: (extra_m / config.assumed_speed_mps).round() as i64,
            deviation_percentage: round_to(deviation_pct, 2),
            time_delta_minutes: delta_minutes.round() as i64,
            match_score: score,
        })
    }
}

/// Absolute departure gap in minutes.
fn departure_delta_minutes(base: &Trip, candidate: &Trip) -> f64 {
    let delta = candidate.departure_time - base.departure_time;
    delta.num_milliseconds().abs() as f64 / 60_000.0
}

/// Decoded path length, else the stored road distance, else 1 m.
///
/// The 1 m floor keeps the deviation ratio finite when nothing is known.
fn route_length_m(trip: &Trip, path: &[Point]) -> f64 {
    let measured = path_length_m(path);
    if measured > 0.0 {
        measured
    } else {
        trip.known_distance_m().unwrap_or(1.0)
    }
}

fn collect_report<'a>(
    outcomes: impl IntoIterator<Item = (&'a Trip, Result<MatchResult, RejectionReason>)>,
) -> MatchReport {
    let mut report = MatchReport::default();
    for (candidate, outcome) in outcomes {
        match outcome {
            Ok(result) => report.matches.push(result),
            Err(reason) => {
                log::debug!("rejected {}: {}", candidate.id, reason);
                report.rejections.push(Rejection {
                    trip_id: candidate.id.clone(),
                    reason,
                });
            }
        }
    }
    rank(&mut report.matches);
    report
}

/// Stable sort by score, then overlap, both descending.
pub fn rank(results: &mut [MatchResult]) {
    results.sort_by(|a, b| {
        b.match_score
            .cmp(&a.match_score)
            .then_with(|| b.overlap_percentage.total_cmp(&a.overlap_percentage))
    });
}
