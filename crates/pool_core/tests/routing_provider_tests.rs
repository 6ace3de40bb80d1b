use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use pool_core::geo::Point;
use pool_core::routing::{
    build_directions_provider, route_cache_key, CacheConfig, CacheError,
    CachedDirectionsProvider, DirectionsError, DirectionsProvider, DirectionsProviderKind,
    LruRouteCache, NoopRouteCache, RouteCache, RouteResult, StraightLineDirectionsProvider,
};

/// Counts calls and delegates to the straight-line provider.
struct CountingProvider {
    calls: Arc<AtomicUsize>,
}

impl DirectionsProvider for CountingProvider {
    fn fetch_route(&self, pickup: Point, drop: Point) -> Result<RouteResult, DirectionsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        StraightLineDirectionsProvider.fetch_route(pickup, drop)
    }
}

struct UnroutableProvider {
    calls: Arc<AtomicUsize>,
}

impl DirectionsProvider for UnroutableProvider {
    fn fetch_route(&self, _pickup: Point, _drop: Point) -> Result<RouteResult, DirectionsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(DirectionsError::NoRoute)
    }
}

/// A cache whose backend is always down.
struct BrokenCache;

impl RouteCache for BrokenCache {
    fn get(&self, _key: &str) -> Result<Option<RouteResult>, CacheError> {
        Err(CacheError::Backend("connection refused".to_string()))
    }

    fn set(&self, _key: &str, _value: &RouteResult, _ttl: Duration) -> Result<(), CacheError> {
        Err(CacheError::Backend("connection refused".to_string()))
    }
}

fn pickup() -> Point {
    Point::new(12.9716, 77.5946)
}

fn drop_off() -> Point {
    Point::new(12.9352, 77.6245)
}

#[test]
fn cached_provider_serves_repeat_lookups_from_cache() {
    let calls = Arc::new(AtomicUsize::new(0));
    let provider = CachedDirectionsProvider::new(
        Box::new(CountingProvider {
            calls: Arc::clone(&calls),
        }),
        Box::new(LruRouteCache::new(16)),
        Duration::from_secs(60),
    );

    let first = provider.fetch_route(pickup(), drop_off()).expect("route");
    let second = provider.fetch_route(pickup(), drop_off()).expect("route");
    assert_eq!(first, second);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // Reverse direction is a different key.
    provider.fetch_route(drop_off(), pickup()).expect("route");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn broken_cache_never_blocks_the_lookup() {
    let calls = Arc::new(AtomicUsize::new(0));
    let provider = CachedDirectionsProvider::new(
        Box::new(CountingProvider {
            calls: Arc::clone(&calls),
        }),
        Box::new(BrokenCache),
        Duration::from_secs(60),
    );

    assert!(provider.fetch_route(pickup(), drop_off()).is_ok());
    assert!(provider.fetch_route(pickup(), drop_off()).is_ok());
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn provider_failure_propagates_and_is_not_cached() {
    let calls = Arc::new(AtomicUsize::new(0));
    let provider = CachedDirectionsProvider::new(
        Box::new(UnroutableProvider {
            calls: Arc::clone(&calls),
        }),
        Box::new(LruRouteCache::new(16)),
        Duration::from_secs(60),
    );

    assert!(matches!(
        provider.fetch_route(pickup(), drop_off()),
        Err(DirectionsError::NoRoute)
    ));
    assert!(provider.fetch_route(pickup(), drop_off()).is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn cache_entries_are_stored_under_the_rounded_key() {
    let cache = Arc::new(LruRouteCache::new(16));
    let provider = CachedDirectionsProvider::new(
        Box::new(StraightLineDirectionsProvider),
        Box::new(SharedCache(Arc::clone(&cache))),
        Duration::from_secs(60),
    );
    let route = provider.fetch_route(pickup(), drop_off()).expect("route");

    let key = route_cache_key(pickup(), drop_off());
    assert_eq!(key, "route:12.97160,77.59460->12.93520,77.62450");
    assert_eq!(cache.get(&key).expect("cache read"), Some(route));
}

#[test]
fn noop_cache_always_calls_through() {
    let calls = Arc::new(AtomicUsize::new(0));
    let provider = CachedDirectionsProvider::new(
        Box::new(CountingProvider {
            calls: Arc::clone(&calls),
        }),
        Box::new(NoopRouteCache),
        Duration::from_secs(60),
    );
    provider.fetch_route(pickup(), drop_off()).expect("route");
    provider.fetch_route(pickup(), drop_off()).expect("route");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn build_directions_provider_straight_line() {
    let provider =
        build_directions_provider(&DirectionsProviderKind::StraightLine, &CacheConfig::default())
            .expect("provider");
    let route = provider.fetch_route(pickup(), drop_off()).expect("route");
    assert!(route.distance_m.expect("distance") > 0.0);
    assert!(route.duration_s.expect("duration") > 0.0);
}

/// Lets a test keep a handle on the cache it hands to the provider.
struct SharedCache(Arc<LruRouteCache>);

impl RouteCache for SharedCache {
    fn get(&self, key: &str) -> Result<Option<RouteResult>, CacheError> {
        self.0.get(key)
    }

    fn set(&self, key: &str, value: &RouteResult, ttl: Duration) -> Result<(), CacheError> {
        self.0.set(key, value, ttl)
    }
}
