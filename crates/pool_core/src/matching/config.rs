use serde::{Deserialize, Serialize};

use crate::overlap::{DEFAULT_RESAMPLE_STEP_M, DEFAULT_TOLERANCE_M};

/// Maximum departure gap between base and candidate (minutes).
const DEFAULT_TIME_WINDOW_MIN: f64 = 30.0;
/// Minimum overlap percentage for a candidate to survive.
const DEFAULT_MIN_OVERLAP_PCT: f64 = 15.0;
/// Maximum deviation percentage for a candidate to survive.
const DEFAULT_MAX_DEVIATION_PCT: f64 = 15.0;
const DEFAULT_OVERLAP_WEIGHT: f64 = 0.6;
const DEFAULT_DEVIATION_PENALTY_PER_PCT: f64 = 6.0;
/// Rough urban speed used to turn extra metres into extra seconds.
const DEFAULT_ASSUMED_SPEED_MPS: f64 = 12.0;

/// Thresholds and weights for the pooling match pipeline.
///
/// `Default` carries the tuned production values; the deviation penalty and
/// threshold are calibrated against the endpoint heuristic in
/// [`crate::deviation`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub time_window_min: f64,
    pub min_overlap_pct: f64,
    pub max_deviation_pct: f64,
    pub overlap_tolerance_m: f64,
    /// Overlap thresholds are tuned for the 250 m default; only override
    /// through deserialised config when retuning them together.
    pub resample_step_m: f64,
    pub overlap_weight: f64,
    pub deviation_penalty_per_pct: f64,
    pub assumed_speed_mps: f64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            time_window_min: DEFAULT_TIME_WINDOW_MIN,
            min_overlap_pct: DEFAULT_MIN_OVERLAP_PCT,
            max_deviation_pct: DEFAULT_MAX_DEVIATION_PCT,
            overlap_tolerance_m: DEFAULT_TOLERANCE_M,
            resample_step_m: DEFAULT_RESAMPLE_STEP_M,
            overlap_weight: DEFAULT_OVERLAP_WEIGHT,
            deviation_penalty_per_pct: DEFAULT_DEVIATION_PENALTY_PER_PCT,
            assumed_speed_mps: DEFAULT_ASSUMED_SPEED_MPS,
        }
    }
}

impl MatchConfig {
    pub fn with_time_window_min(mut self, minutes: f64) -> Self {
        self.time_window_min = minutes;
        self
    }

    pub fn with_min_overlap_pct(mut self, pct: f64) -> Self {
        self.min_overlap_pct = pct;
        self
    }

    pub fn with_max_deviation_pct(mut self, pct: f64) -> Self {
        self.max_deviation_pct = pct;
        self
    }

    pub fn with_overlap_tolerance_m(mut self, metres: f64) -> Self {
        self.overlap_tolerance_m = metres;
        self
    }

    pub fn with_assumed_speed_mps(mut self, speed: f64) -> Self {
        self.assumed_speed_mps = speed;
        self
    }
}
