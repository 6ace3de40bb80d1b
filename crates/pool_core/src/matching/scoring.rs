use super::config::MatchConfig;

/// Composite score for a surviving candidate, rounded to an integer.
///
/// Overlap contributes linearly, deviation is a penalty off a base of 100,
/// and departure proximity adds the unused part of the time window.
pub fn match_score(overlap_pct: f64, deviation_pct: f64, delta_minutes: f64, config: &MatchConfig) -> i64 {
    let overlap = overlap_pct * config.overlap_weight;
    let deviation = (100.0 - deviation_pct * config.deviation_penalty_per_pct).max(0.0);
    let time = (config.time_window_min - delta_minutes).max(0.0);
    (overlap + deviation + time).round() as i64
}

/// Round to `decimals` places for display.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
