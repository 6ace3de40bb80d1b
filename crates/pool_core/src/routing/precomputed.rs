//! Pre-computed route table keyed by [`route_cache_key`].

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::{route_cache_key, DirectionsError, DirectionsProvider, RouteResult};
use crate::geo::Point;

/// Serves routes from a fixed table; pairs missing from the table are
/// [`DirectionsError::NoRoute`].
#[derive(Debug, Clone, Default)]
pub struct PrecomputedDirectionsProvider {
    table: HashMap<String, RouteResult>,
}

impl PrecomputedDirectionsProvider {
    /// Build a table from resolved `(pickup, drop)` pairs. Later entries for
    /// the same rounded key replace earlier ones.
    pub fn from_routes(routes: impl IntoIterator<Item = ((Point, Point), RouteResult)>) -> Self {
        let table = routes
            .into_iter()
            .map(|((pickup, drop), route)| (route_cache_key(pickup, drop), route))
            .collect();
        Self { table }
    }

    /// Load a table written by [`PrecomputedDirectionsProvider::save`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DirectionsError> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|err| {
            DirectionsError::Unavailable(format!("cannot read {}: {err}", path.display()))
        })?;
        let table: HashMap<String, RouteResult> = bincode::deserialize(&data).map_err(|err| {
            DirectionsError::Unavailable(format!("corrupt route table {}: {err}", path.display()))
        })?;
        log::info!("loaded {} precomputed routes from {}", table.len(), path.display());
        Ok(Self { table })
    }

    /// Write the table as bincode.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DirectionsError> {
        let path = path.as_ref();
        let data = bincode::serialize(&self.table)
            .map_err(|err| DirectionsError::Unavailable(format!("cannot encode route table: {err}")))?;
        fs::write(path, data).map_err(|err| {
            DirectionsError::Unavailable(format!("cannot write {}: {err}", path.display()))
        })
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl DirectionsProvider for PrecomputedDirectionsProvider {
    fn fetch_route(&self, pickup: Point, drop: Point) -> Result<RouteResult, DirectionsError> {
        self.table
            .get(&route_cache_key(pickup, drop))
            .cloned()
            .ok_or(DirectionsError::NoRoute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(distance_m: f64) -> RouteResult {
        RouteResult {
            polyline: "_p~iF~ps|U".to_string(),
            distance_m: Some(distance_m),
            duration_s: Some(600.0),
        }
    }

    #[test]
    fn lookups_use_rounded_directional_keys() {
        let pickup = Point::new(12.97, 77.59);
        let drop = Point::new(12.93, 77.62);
        let provider = PrecomputedDirectionsProvider::from_routes([((pickup, drop), route(5_000.0))]);

        // Within the 1e-5 rounding of the stored key.
        let nearby = Point::new(12.970_001, 77.59);
        assert_eq!(provider.fetch_route(nearby, drop).unwrap().distance_m, Some(5_000.0));
        assert!(matches!(
            provider.fetch_route(drop, pickup),
            Err(DirectionsError::NoRoute)
        ));
    }

    #[test]
    fn later_duplicate_pairs_win() {
        let pair = (Point::new(1.0, 2.0), Point::new(3.0, 4.0));
        let provider =
            PrecomputedDirectionsProvider::from_routes([(pair, route(1.0)), (pair, route(2.0))]);
        assert_eq!(provider.len(), 1);
        assert_eq!(provider.fetch_route(pair.0, pair.1).unwrap().distance_m, Some(2.0));
    }

    #[test]
    fn table_survives_a_save_and_load() {
        let pickup = Point::new(12.97, 77.59);
        let drop = Point::new(12.93, 77.62);
        let provider = PrecomputedDirectionsProvider::from_routes([((pickup, drop), route(5_000.0))]);

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("routes.bin");
        provider.save(&path).expect("save");

        let loaded = PrecomputedDirectionsProvider::from_file(&path).expect("load");
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.fetch_route(pickup, drop).unwrap(), route(5_000.0));
    }

    #[test]
    fn missing_file_is_unavailable() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(matches!(
            PrecomputedDirectionsProvider::from_file(dir.path().join("absent.bin")),
            Err(DirectionsError::Unavailable(_))
        ));
    }
}
