//! Trip intake and match queries.

use serde::{Deserialize, Serialize};

use pool_core::matching::{MatchResult, PoolMatcher};
use pool_core::routing::DirectionsProvider;
use pool_core::trip::{Trip, TripId};

use crate::error::ServiceError;
use crate::registry::TripRegistry;
use crate::request::NewTripRequest;

/// Default page size for [`TripService::list_trips`].
pub const DEFAULT_LIST_LIMIT: usize = 100;

/// Matches for one stored trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchesResponse {
    pub trip_id: TripId,
    pub matches: Vec<MatchResult>,
}

/// Owns the trip store and resolves routes through `P`.
pub struct TripService<P> {
    provider: P,
    registry: TripRegistry,
    matcher: PoolMatcher,
}

impl<P: DirectionsProvider> TripService<P> {
    pub fn new(provider: P, registry: TripRegistry) -> Self {
        Self {
            provider,
            registry,
            matcher: PoolMatcher::default(),
        }
    }

    pub fn with_matcher(mut self, matcher: PoolMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    pub fn registry(&self) -> &TripRegistry {
        &self.registry
    }

    /// Validate `request`, resolve its route and store the resulting trip.
    ///
    /// Nothing is stored, and no id is used up, when validation or route
    /// resolution fails.
    pub fn add_trip(&mut self, request: NewTripRequest) -> Result<Trip, ServiceError> {
        let id = self.registry.next_id();
        let mut trip = request.to_record(&id)?.validate()?;

        let route = self
            .provider
            .fetch_route(trip.pickup, trip.drop)
            .map_err(|err| {
                log::error!("route lookup for {id} failed: {err}");
                ServiceError::RouteUnavailable(err)
            })?;
        trip.route_polyline = route.polyline;
        trip.total_distance_m = route.distance_m;
        trip.total_duration_s = route.duration_s;

        log::info!("stored trip {id} departing {}", trip.departure_time);
        self.registry.insert(trip.clone());
        Ok(trip)
    }

    /// Up to `limit` stored trips, newest first.
    pub fn list_trips(&self, limit: usize) -> Vec<Trip> {
        self.registry.newest(limit)
    }

    /// Match the stored trip `trip_id` against every other stored trip.
    pub fn get_matches(&self, trip_id: &str) -> Result<MatchesResponse, ServiceError> {
        let base = self
            .registry
            .get(trip_id)
            .ok_or_else(|| ServiceError::TripNotFound(trip_id.to_string()))?;
        let candidates = self.registry.others(&base.id);
        let matches = self.run_matcher(base, &candidates);
        log::info!(
            "trip {} matched {} of {} candidates",
            base.id,
            matches.len(),
            candidates.len()
        );
        Ok(MatchesResponse {
            trip_id: base.id.clone(),
            matches,
        })
    }

    #[cfg(feature = "parallel")]
    fn run_matcher(&self, base: &Trip, candidates: &[Trip]) -> Vec<MatchResult> {
        self.matcher.find_matches_parallel(base, candidates).matches
    }

    #[cfg(not(feature = "parallel"))]
    fn run_matcher(&self, base: &Trip, candidates: &[Trip]) -> Vec<MatchResult> {
        self.matcher.find_matches(base, candidates)
    }
}
