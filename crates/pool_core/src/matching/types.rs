use serde::{Deserialize, Serialize};

use crate::trip::TripId;

/// A candidate that passed every filter, with display-rounded metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub matched_trip_id: TripId,
    /// Overlap in percent, two decimals.
    pub overlap_percentage: f64,
    pub additional_distance_m: i64,
    pub additional_time_s: i64,
    /// Deviation in percent, two decimals.
    pub deviation_percentage: f64,
    pub time_delta_minutes: i64,
    pub match_score: i64,
}

/// The first filter a candidate failed, with the measured value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "reason",
    rename_all = "snake_case",
    rename_all_fields = "camelCase"
)]
pub enum RejectionReason {
    TimeWindow { delta_minutes: f64, limit_minutes: f64 },
    InsufficientOverlap { overlap_pct: f64, min_pct: f64 },
    ExcessiveDeviation { deviation_pct: f64, max_pct: f64 },
}

impl std::fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectionReason::TimeWindow {
                delta_minutes,
                limit_minutes,
            } => write!(f, "time delta {delta_minutes:.2} min > {limit_minutes} min"),
            RejectionReason::InsufficientOverlap {
                overlap_pct,
                min_pct,
            } => write!(f, "overlap {overlap_pct:.2}% < {min_pct}%"),
            RejectionReason::ExcessiveDeviation {
                deviation_pct,
                max_pct,
            } => write!(f, "deviation {deviation_pct:.2}% > {max_pct}%"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rejection {
    pub trip_id: TripId,
    #[serde(flatten)]
    pub reason: RejectionReason,
}

/// Ranked matches plus the reason every other candidate was dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    pub matches: Vec<MatchResult>,
    pub rejections: Vec<Rejection>,
}
