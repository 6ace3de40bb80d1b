//! Offline batch matching over the most recent trips.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use serde::{Deserialize, Serialize};

use pool_core::matching::{MatchResult, PoolMatcher};
use pool_core::trip::{Trip, TripId};

use crate::error::ServiceError;

/// How many recent trips a dry run looks at by default.
pub const DEFAULT_DRY_RUN_LIMIT: usize = 5;

/// Matches of one base trip against the rest of the batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DryRunEntry {
    pub base_trip_id: TripId,
    pub matches: Vec<MatchResult>,
}

/// Match each of the newest `limit` trips against the others in that batch.
///
/// `trips` is in insertion order (oldest first); entries come back newest
/// first. Fewer than two trips in the batch yields no entries.
pub fn dry_run(trips: &[Trip], limit: usize) -> Vec<DryRunEntry> {
    let batch: Vec<Trip> = trips.iter().rev().take(limit).cloned().collect();
    if batch.len() < 2 {
        log::info!("dry run needs at least two trips, found {}", batch.len());
        return Vec::new();
    }

    let matcher = PoolMatcher::default();
    batch
        .iter()
        .enumerate()
        .map(|(i, base)| {
            let candidates: Vec<Trip> = batch
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, t)| t.clone())
                .collect();
            DryRunEntry {
                base_trip_id: base.id.clone(),
                matches: matcher.find_matches(base, &candidates),
            }
        })
        .collect()
}

/// Write dry-run entries as a pretty-printed JSON array.
pub fn export_to_json(entries: &[DryRunEntry], path: impl AsRef<Path>) -> Result<(), ServiceError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, entries)?;
    Ok(())
}
