//! Trip intake, snapshot storage and match queries built on `pool_core`.
//!
//! [`TripService`] resolves a route for each new trip through a
//! [`pool_core::routing::DirectionsProvider`], keeps trips in a
//! [`TripRegistry`] and answers match queries against the other stored trips.
//! The `seed` and `dry_run` modules drive the same service from batch files.

pub mod dry_run;
pub mod error;
pub mod registry;
pub mod request;
pub mod seed;
pub mod service;

pub use dry_run::{dry_run, export_to_json, DryRunEntry, DEFAULT_DRY_RUN_LIMIT};
pub use error::ServiceError;
pub use registry::TripRegistry;
pub use request::NewTripRequest;
pub use seed::{load_seed_file, seed_trips, SeedSummary, SeedTrip};
pub use service::{MatchesResponse, TripService, DEFAULT_LIST_LIMIT};
