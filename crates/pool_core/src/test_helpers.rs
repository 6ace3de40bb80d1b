//! Test helpers for common test setup and utilities.
//!
//! This module provides shared fixtures so unit tests, integration tests and
//! benchmarks build trips the same way.

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::geo::{path_length_m, Point};
use crate::polyline;
use crate::trip::{Trip, TripId};

/// The canonical three-point polyline and its documented coordinates.
pub const REFERENCE_POLYLINE: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";
pub const REFERENCE_POINTS: [(f64, f64); 3] =
    [(38.5, -120.2), (40.7, -120.95), (43.252, -126.453)];

/// A fixed origin in central Bengaluru used across test files.
pub const TEST_ORIGIN: Point = Point {
    lat: 12.9716,
    lng: 77.5946,
};

/// Metres per degree of latitude on the mean-radius sphere.
const METRES_PER_DEG_LAT: f64 = 111_194.926_644_558_73;

/// Midnight of the fixed test day.
pub fn test_day() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 15, 0, 0, 0)
        .single()
        .expect("fixed test date is unambiguous")
}

/// A timestamp on the test day.
pub fn at(hour: i64, minute: i64) -> DateTime<Utc> {
    test_day() + Duration::hours(hour) + Duration::minutes(minute)
}

/// Point `metres` due north of `origin`.
pub fn north_of(origin: Point, metres: f64) -> Point {
    Point::new(origin.lat + metres / METRES_PER_DEG_LAT, origin.lng)
}

/// Point `metres` due east of `origin` (flat approximation, fine below ~50 km).
pub fn east_of(origin: Point, metres: f64) -> Point {
    let deg = metres / (METRES_PER_DEG_LAT * origin.lat.to_radians().cos());
    Point::new(origin.lat, origin.lng + deg)
}

/// A straight northbound route of `len_m` metres with evenly spaced vertices.
pub fn straight_north_route(origin: Point, len_m: f64, vertices: usize) -> Vec<Point> {
    let vertices = vertices.max(2);
    (0..vertices)
        .map(|i| north_of(origin, len_m * i as f64 / (vertices - 1) as f64))
        .collect()
}

/// Fluent builder for [`Trip`] fixtures.
///
/// Defaults: departs at 09:00 on the test day, a 5 km straight route north of
/// [`TEST_ORIGIN`], total distance equal to the route length.
#[derive(Debug, Clone)]
pub struct TripBuilder {
    id: String,
    route: Vec<Point>,
    pickup: Option<Point>,
    drop: Option<Point>,
    departure_time: DateTime<Utc>,
    polyline_override: Option<String>,
    total_distance_m: Option<Option<f64>>,
}

impl TripBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            route: straight_north_route(TEST_ORIGIN, 5_000.0, 21),
            pickup: None,
            drop: None,
            departure_time: at(9, 0),
            polyline_override: None,
            total_distance_m: None,
        }
    }

    /// Use `route` as geometry; pickup and drop follow its first and last points.
    pub fn route(mut self, route: Vec<Point>) -> Self {
        self.route = route;
        self
    }

    /// Set pickup and drop; the route becomes the straight segment between them.
    pub fn endpoints(mut self, pickup: Point, drop: Point) -> Self {
        self.route = vec![pickup, drop];
        self.pickup = Some(pickup);
        self.drop = Some(drop);
        self
    }

    pub fn departs_at(mut self, hour: i64, minute: i64) -> Self {
        self.departure_time = at(hour, minute);
        self
    }

    /// Store a raw polyline string instead of encoding the route.
    pub fn polyline(mut self, encoded: &str) -> Self {
        self.polyline_override = Some(encoded.to_string());
        self
    }

    pub fn total_distance_m(mut self, distance: Option<f64>) -> Self {
        self.total_distance_m = Some(distance);
        self
    }

    pub fn build(self) -> Trip {
        let pickup = self
            .pickup
            .or_else(|| self.route.first().copied())
            .unwrap_or(TEST_ORIGIN);
        let drop = self
            .drop
            .or_else(|| self.route.last().copied())
            .unwrap_or(TEST_ORIGIN);
        let total_distance_m = self
            .total_distance_m
            .unwrap_or_else(|| Some(path_length_m(&self.route)));

        Trip {
            id: TripId(self.id),
            pickup,
            drop,
            departure_time: self.departure_time,
            route_polyline: self
                .polyline_override
                .unwrap_or_else(|| polyline::encode(&self.route)),
            total_distance_m,
            total_duration_s: None,
        }
    }
}
