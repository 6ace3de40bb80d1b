pub mod config;
pub mod pipeline;
pub mod scoring;
pub mod types;

pub use config::MatchConfig;
pub use pipeline::{rank, PoolMatcher};
pub use scoring::match_score;
pub use types::{MatchReport, MatchResult, Rejection, RejectionReason};

use crate::trip::Trip;

/// Ranked pooling matches for `base` with the default thresholds.
pub fn find_matches(base: &Trip, candidates: &[Trip]) -> Vec<MatchResult> {
    PoolMatcher::default().find_matches(base, candidates)
}
