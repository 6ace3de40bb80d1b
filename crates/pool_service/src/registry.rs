//! In-memory ordered trip store with JSON snapshot files.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind};
use std::path::Path;

use pool_core::trip::{Trip, TripId};

use crate::error::ServiceError;

/// Trips in insertion order, oldest first.
#[derive(Debug, Clone, Default)]
pub struct TripRegistry {
    trips: Vec<Trip>,
}

impl TripRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_trips(trips: Vec<Trip>) -> Self {
        Self { trips }
    }

    /// Load a snapshot written by [`TripRegistry::save_json`].
    ///
    /// A missing file is an empty registry. Every record is validated while
    /// it is read; one bad record or a repeated id fails the whole load.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ServiceError> {
        let path = path.as_ref();
        let file = match File::open(path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::info!("no trip store at {}; starting empty", path.display());
                return Ok(Self::new());
            }
            Err(err) => return Err(err.into()),
        };
        let trips: Vec<Trip> = serde_json::from_reader(BufReader::new(file))?;
        let mut seen = HashSet::with_capacity(trips.len());
        if let Some(dup) = trips.iter().find(|t| !seen.insert(&t.id)) {
            return Err(ServiceError::DuplicateTrip(dup.id.to_string()));
        }
        log::debug!("loaded {} trips from {}", trips.len(), path.display());
        Ok(Self::from_trips(trips))
    }

    /// Write all trips, oldest first, as a pretty-printed JSON array.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<(), ServiceError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, &self.trips)?;
        log::debug!("saved {} trips to {}", self.trips.len(), path.display());
        Ok(())
    }

    /// The id the next stored trip should take: the first unused
    /// `trip-NNNNNN` from the current count upwards. Nothing is reserved, so
    /// a trip that is never inserted leaves no gap.
    pub fn next_id(&self) -> TripId {
        let mut seq = self.trips.len() + 1;
        loop {
            let id = format!("trip-{seq:06}");
            if self.get(&id).is_none() {
                return TripId(id);
            }
            seq += 1;
        }
    }

    pub fn insert(&mut self, trip: Trip) {
        self.trips.push(trip);
    }

    pub fn get(&self, id: &str) -> Option<&Trip> {
        self.trips.iter().find(|t| t.id.as_str() == id)
    }

    /// Up to `limit` trips, most recently inserted first.
    pub fn newest(&self, limit: usize) -> Vec<Trip> {
        self.trips.iter().rev().take(limit).cloned().collect()
    }

    /// Every trip except the one with `id`, in insertion order.
    pub fn others(&self, id: &TripId) -> Vec<Trip> {
        self.trips.iter().filter(|t| &t.id != id).cloned().collect()
    }

    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pool_core::test_helpers::TripBuilder;

    #[test]
    fn next_id_skips_taken_ids() {
        let mut registry = TripRegistry::from_trips(vec![
            TripBuilder::new("trip-000001").build(),
            TripBuilder::new("trip-000003").build(),
        ]);
        assert_eq!(registry.next_id().as_str(), "trip-000004");
        // Asking again without inserting hands out the same id.
        assert_eq!(registry.next_id().as_str(), "trip-000004");

        registry.insert(TripBuilder::new("trip-000004").build());
        assert_eq!(registry.next_id().as_str(), "trip-000005");
    }

    #[test]
    fn newest_reverses_insertion_order() {
        let mut registry = TripRegistry::new();
        for id in ["a", "b", "c"] {
            registry.insert(TripBuilder::new(id).build());
        }
        let ids: Vec<String> = registry
            .newest(2)
            .into_iter()
            .map(|t| t.id.0)
            .collect();
        assert_eq!(ids, vec!["c", "b"]);
    }

    #[test]
    fn others_excludes_only_the_base() {
        let registry = TripRegistry::from_trips(vec![
            TripBuilder::new("a").build(),
            TripBuilder::new("b").build(),
        ]);
        let others = registry.others(&TripId::from("a"));
        assert_eq!(others.len(), 1);
        assert_eq!(others[0].id.as_str(), "b");
    }

    #[test]
    fn missing_snapshot_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let registry = TripRegistry::load_json(dir.path().join("absent.json")).unwrap();
        assert!(registry.is_empty());
    }
}
