//! Bulk loading of sample trips.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Serialize;

use pool_core::routing::DirectionsProvider;

use crate::error::ServiceError;
use crate::request::NewTripRequest;
use crate::service::TripService;

/// One entry of a seed file; same fields as a new-trip request.
pub type SeedTrip = NewTripRequest;

/// Outcome of a seeding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub seeded: usize,
    pub failed: usize,
}

/// Read a JSON array of [`SeedTrip`]s.
pub fn load_seed_file(path: impl AsRef<Path>) -> Result<Vec<SeedTrip>, ServiceError> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

/// Add every item through `service`. A failed item is logged and counted;
/// it does not stop the rest.
pub fn seed_trips<P: DirectionsProvider>(
    service: &mut TripService<P>,
    items: Vec<SeedTrip>,
) -> SeedSummary {
    log::info!("seeding {} trips", items.len());
    let mut summary = SeedSummary::default();
    for (idx, item) in items.into_iter().enumerate() {
        match service.add_trip(item) {
            Ok(trip) => {
                log::info!("seeded trip #{}: {}", idx + 1, trip.id);
                summary.seeded += 1;
            }
            Err(err) => {
                log::error!("failed to seed trip #{}: {err}", idx + 1);
                summary.failed += 1;
            }
        }
    }
    summary
}
