//! Trip-pooling match engine.
//!
//! Given a base trip and a set of previously recorded trips, this crate
//! decides which of them can share a vehicle with the base trip and ranks
//! the survivors.
//!
//! The engine is split into small, independently testable pieces:
//!
//! - [`polyline`]: encoded-polyline codec (1e-5 precision)
//! - [`geo`]: haversine distance and path length
//! - [`resample`]: near-uniform spacing along a path
//! - [`overlap`]: symmetric route coverage percentage
//! - [`deviation`]: endpoint-based detour estimate
//! - [`matching`]: filter, score and rank pipeline
//! - [`routing`]: directions provider and route cache collaborators
//!
//! # Quick Start
//!
//! ```no_run
//! use pool_core::matching::find_matches;
//! use pool_core::trip::Trip;
//!
//! # fn load() -> (Trip, Vec<Trip>) { unimplemented!() }
//! let (base, candidates) = load();
//! for result in find_matches(&base, &candidates) {
//!     println!("{} scored {}", result.matched_trip_id, result.match_score);
//! }
//! ```

pub mod deviation;
pub mod geo;
pub mod matching;
pub mod overlap;
pub mod polyline;
pub mod resample;
pub mod routing;
pub mod trip;

#[cfg(feature = "test-helpers")]
pub mod test_helpers;

pub use geo::{haversine_m, path_length_m, Point};
pub use matching::{find_matches, MatchConfig, MatchReport, MatchResult, PoolMatcher};
pub use trip::{Trip, TripId, TripRecord};
