//! Route cache collaborator and the caching provider wrapper.
//!
//! A cache is an optimisation only: read or write failures are logged and
//! treated as misses, never surfaced to the caller.

use std::fmt;
use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use lru::LruCache;

use super::{DirectionsError, DirectionsProvider, RouteResult};
use crate::geo::Point;

/// Default route cache capacity.
pub const DEFAULT_ROUTE_CACHE_CAPACITY: usize = 20_000;
/// Default time-to-live for cached routes.
pub const DEFAULT_ROUTE_TTL: Duration = Duration::from_secs(3600);

/// Cache key for a directed pickup/drop pair, coordinates at 5 decimals.
pub fn route_cache_key(pickup: Point, drop: Point) -> String {
    format!(
        "route:{:.5},{:.5}->{:.5},{:.5}",
        pickup.lat, pickup.lng, drop.lat, drop.lng
    )
}

/// Sizing and expiry for the in-memory route cache.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CacheConfig {
    pub capacity: usize,
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_ROUTE_CACHE_CAPACITY,
            ttl: DEFAULT_ROUTE_TTL,
        }
    }
}

impl CacheConfig {
    /// Read `CACHE_TTL_SECONDS` and `CACHE_CAPACITY`, keeping defaults for
    /// unset or unparsable values.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(ttl) = env_number("CACHE_TTL_SECONDS") {
            config.ttl = Duration::from_secs(ttl);
        }
        if let Some(capacity) = env_number("CACHE_CAPACITY") {
            config.capacity = capacity as usize;
        }
        config
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }
}

fn env_number(name: &str) -> Option<u64> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("ignoring {name}={raw:?}: not a non-negative integer");
            None
        }
    }
}

/// Errors from a cache backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// A previous holder of the cache lock panicked.
    Poisoned,
    Backend(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::Poisoned => f.write_str("route cache lock poisoned"),
            CacheError::Backend(msg) => write!(f, "route cache backend error: {msg}"),
        }
    }
}

impl std::error::Error for CacheError {}

/// Key/value store for resolved routes.
pub trait RouteCache: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<RouteResult>, CacheError>;
    fn set(&self, key: &str, value: &RouteResult, ttl: Duration) -> Result<(), CacheError>;
}

/// Cache that stores nothing; every lookup misses.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopRouteCache;

impl RouteCache for NoopRouteCache {
    fn get(&self, _key: &str) -> Result<Option<RouteResult>, CacheError> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &RouteResult, _ttl: Duration) -> Result<(), CacheError> {
        Ok(())
    }
}

struct CachedRoute {
    route: RouteResult,
    /// `None` when the TTL reaches past what `Instant` can represent.
    expires_at: Option<Instant>,
}

impl CachedRoute {
    fn is_fresh(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |deadline| now < deadline)
    }
}

/// Bounded in-memory LRU cache with per-entry expiry.
pub struct LruRouteCache {
    entries: Mutex<LruCache<String, CachedRoute>>,
}

impl LruRouteCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RouteCache for LruRouteCache {
    fn get(&self, key: &str) -> Result<Option<RouteResult>, CacheError> {
        let mut entries = self.entries.lock().map_err(|_| CacheError::Poisoned)?;
        let expired = match entries.get(key) {
            Some(entry) if entry.is_fresh(Instant::now()) => {
                return Ok(Some(entry.route.clone()))
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            entries.pop(key);
        }
        Ok(None)
    }

    fn set(&self, key: &str, value: &RouteResult, ttl: Duration) -> Result<(), CacheError> {
        let mut entries = self.entries.lock().map_err(|_| CacheError::Poisoned)?;
        entries.put(
            key.to_string(),
            CachedRoute {
                route: value.clone(),
                expires_at: Instant::now().checked_add(ttl),
            },
        );
        Ok(())
    }
}

/// Cache-aside wrapper around any [`DirectionsProvider`].
///
/// Cache key is [`route_cache_key`] (directional). Cache failures degrade to
/// a direct provider call; provider failures propagate unchanged and are
/// never cached.
pub struct CachedDirectionsProvider {
    inner: Box<dyn DirectionsProvider>,
    cache: Box<dyn RouteCache>,
    ttl: Duration,
}

impl CachedDirectionsProvider {
    pub fn new(inner: Box<dyn DirectionsProvider>, cache: Box<dyn RouteCache>, ttl: Duration) -> Self {
        Self { inner, cache, ttl }
    }
}

impl DirectionsProvider for CachedDirectionsProvider {
    fn fetch_route(&self, pickup: Point, drop: Point) -> Result<RouteResult, DirectionsError> {
        let key = route_cache_key(pickup, drop);

        match self.cache.get(&key) {
            Ok(Some(route)) => {
                log::trace!("route cache hit for {key}");
                return Ok(route);
            }
            Ok(None) => {}
            Err(err) => log::warn!("route cache read failed for {key}: {err}"),
        }

        let route = self.inner.fetch_route(pickup, drop)?;

        if let Err(err) = self.cache.set(&key, &route, self.ttl) {
            log::warn!("failed to cache route {key}: {err}");
        }

        Ok(route)
    }
}
