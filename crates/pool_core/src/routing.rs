//! Directions provider and route cache collaborators.
//!
//! The matcher never talks to a routing backend; trips reach it with their
//! geometry already resolved. This module holds the collaborators that do the
//! resolving, selectable via [`DirectionsProviderKind`]:
//!
//! - **`StraightLineDirectionsProvider`**: Two-point route plus haversine distance. Zero dependencies.
//! - **`OsrmDirectionsProvider`** (feature `osrm`): Calls an OSRM `/route` HTTP endpoint.
//! - **`PrecomputedDirectionsProvider`** (feature `precomputed`): Loads a serialized route table from disk.
//!
//! Any provider can be wrapped in a [`CachedDirectionsProvider`] with an
//! injected [`RouteCache`].

use serde::{Deserialize, Serialize};

use crate::geo::{haversine_m, Point};
use crate::polyline;

pub mod cache;
pub mod error;
pub mod osrm;

#[cfg(feature = "precomputed")]
pub mod precomputed;

pub use cache::{
    route_cache_key, CacheConfig, CacheError, CachedDirectionsProvider, LruRouteCache,
    NoopRouteCache, RouteCache,
};
pub use error::DirectionsError;

/// Average speed assumed by the straight-line provider (km/h).
const STRAIGHT_LINE_SPEED_KMH: f64 = 40.0;

/// A resolved route between a pickup and a drop-off.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteResult {
    /// Encoded polyline of the route geometry.
    pub polyline: String,
    /// Road distance in metres, when the backend reports it.
    pub distance_m: Option<f64>,
    /// Travel time in seconds, when the backend reports it.
    pub duration_s: Option<f64>,
}

/// Which directions backend to use.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub enum DirectionsProviderKind {
    /// Straight segment between the endpoints, zero external dependencies.
    #[default]
    StraightLine,
    /// OSRM HTTP endpoint (e.g. `"http://localhost:5000"`).
    #[cfg(feature = "osrm")]
    Osrm { endpoint: String },
    /// Pre-computed route table loaded from a binary file at startup.
    #[cfg(feature = "precomputed")]
    Precomputed { path: String },
}

/// Trait for directions backends. Implementations must be `Send + Sync` so a
/// provider can be shared between request handlers.
pub trait DirectionsProvider: Send + Sync {
    /// Resolve a route between two points. Fails when no route exists or the
    /// backend cannot be reached.
    fn fetch_route(&self, pickup: Point, drop: Point) -> Result<RouteResult, DirectionsError>;
}

impl<P: DirectionsProvider + ?Sized> DirectionsProvider for Box<P> {
    fn fetch_route(&self, pickup: Point, drop: Point) -> Result<RouteResult, DirectionsError> {
        (**self).fetch_route(pickup, drop)
    }
}

// ---------------------------------------------------------------------------
// Straight-line provider (always available)
// ---------------------------------------------------------------------------

/// Routes along the straight segment between pickup and drop-off.
pub struct StraightLineDirectionsProvider;

impl DirectionsProvider for StraightLineDirectionsProvider {
    fn fetch_route(&self, pickup: Point, drop: Point) -> Result<RouteResult, DirectionsError> {
        if !pickup.is_valid() || !drop.is_valid() {
            return Err(DirectionsError::NoRoute);
        }
        let distance_m = haversine_m(pickup, drop);
        let duration_s = distance_m / (STRAIGHT_LINE_SPEED_KMH / 3.6);
        Ok(RouteResult {
            polyline: polyline::encode(&[pickup, drop]),
            distance_m: Some(distance_m),
            duration_s: Some(duration_s),
        })
    }
}

// ---------------------------------------------------------------------------
// Factory: build a provider from DirectionsProviderKind
// ---------------------------------------------------------------------------

/// Construct a boxed [`DirectionsProvider`] from a [`DirectionsProviderKind`].
///
/// - `StraightLine` is returned without caching (it is already O(1)).
/// - `Osrm` and `Precomputed` are wrapped in a [`CachedDirectionsProvider`]
///   backed by an [`LruRouteCache`] sized from `cache`.
#[cfg_attr(
    not(any(feature = "osrm", feature = "precomputed")),
    allow(unused_variables)
)]
pub fn build_directions_provider(
    kind: &DirectionsProviderKind,
    cache: &CacheConfig,
) -> Result<Box<dyn DirectionsProvider>, DirectionsError> {
    match kind {
        DirectionsProviderKind::StraightLine => Ok(Box::new(StraightLineDirectionsProvider)),

        #[cfg(feature = "osrm")]
        DirectionsProviderKind::Osrm { endpoint } => {
            let inner = osrm::OsrmDirectionsProvider::new(endpoint)?;
            Ok(Box::new(CachedDirectionsProvider::new(
                Box::new(inner),
                Box::new(LruRouteCache::new(cache.capacity)),
                cache.ttl,
            )))
        }

        #[cfg(feature = "precomputed")]
        DirectionsProviderKind::Precomputed { path } => {
            let inner = precomputed::PrecomputedDirectionsProvider::from_file(path)?;
            Ok(Box::new(CachedDirectionsProvider::new(
                Box::new(inner),
                Box::new(LruRouteCache::new(cache.capacity)),
                cache.ttl,
            )))
        }
    }
}
