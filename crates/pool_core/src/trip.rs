//! Trip snapshot consumed by the matcher, and its validated boundary form.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::geo::Point;
use crate::polyline;

/// Identifier of a recorded trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TripId(pub String);

impl TripId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TripId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TripId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// An immutable, fully-populated trip.
///
/// Serialises through [`TripRecord`], so deserialising a `Trip` validates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TripRecord", into = "TripRecord")]
pub struct Trip {
    pub id: TripId,
    pub pickup: Point,
    pub drop: Point,
    pub departure_time: DateTime<Utc>,
    /// Encoded route geometry; may be empty or malformed.
    pub route_polyline: String,
    /// Road distance of the route in metres, when known.
    pub total_distance_m: Option<f64>,
    /// Road duration of the route in seconds, when known.
    pub total_duration_s: Option<f64>,
}

impl Trip {
    /// Decoded route geometry; empty when the polyline cannot be decoded.
    pub fn path(&self) -> Vec<Point> {
        polyline::decode(&self.route_polyline)
    }

    /// Known road distance, treating zero as unknown.
    pub fn known_distance_m(&self) -> Option<f64> {
        self.total_distance_m.filter(|d| *d > 0.0)
    }
}

/// Loosely-typed trip as it arrives from storage or a request body.
///
/// Field names match the persisted document layout (`pickupLat`,
/// `routePolyline`, ...). Every field is optional here; [`TripRecord::validate`]
/// decides what is acceptable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRecord {
    #[serde(alias = "_id")]
    pub id: Option<String>,
    pub pickup_lat: Option<f64>,
    pub pickup_lng: Option<f64>,
    pub drop_lat: Option<f64>,
    pub drop_lng: Option<f64>,
    pub departure_time: Option<DateTime<Utc>>,
    pub route_polyline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_distance_m: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_duration_s: Option<f64>,
}

/// Why a [`TripRecord`] was refused at the boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum TripValidationError {
    MissingField(&'static str),
    InvalidCoordinate { field: &'static str, value: f64 },
    InvalidDistance { field: &'static str, value: f64 },
}

impl fmt::Display for TripValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TripValidationError::MissingField(field) => write!(f, "missing field `{field}`"),
            TripValidationError::InvalidCoordinate { field, value } => {
                write!(f, "`{field}` is not a valid coordinate: {value}")
            }
            TripValidationError::InvalidDistance { field, value } => {
                write!(f, "`{field}` must be a finite non-negative number, got {value}")
            }
        }
    }
}

impl std::error::Error for TripValidationError {}

impl TripRecord {
    pub fn validate(self) -> Result<Trip, TripValidationError> {
        let id = self
            .id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .ok_or(TripValidationError::MissingField("id"))?;

        let pickup = Point::new(
            coordinate("pickupLat", self.pickup_lat, 90.0)?,
            coordinate("pickupLng", self.pickup_lng, 180.0)?,
        );
        let drop = Point::new(
            coordinate("dropLat", self.drop_lat, 90.0)?,
            coordinate("dropLng", self.drop_lng, 180.0)?,
        );

        let departure_time = self
            .departure_time
            .ok_or(TripValidationError::MissingField("departureTime"))?;
        let route_polyline = self
            .route_polyline
            .ok_or(TripValidationError::MissingField("routePolyline"))?;

        Ok(Trip {
            id: TripId(id),
            pickup,
            drop,
            departure_time,
            route_polyline,
            total_distance_m: measure("totalDistanceM", self.total_distance_m)?,
            total_duration_s: measure("totalDurationS", self.total_duration_s)?,
        })
    }
}

fn coordinate(field: &'static str, value: Option<f64>, limit: f64) -> Result<f64, TripValidationError> {
    let value = value.ok_or(TripValidationError::MissingField(field))?;
    if !value.is_finite() || value.abs() > limit {
        return Err(TripValidationError::InvalidCoordinate { field, value });
    }
    Ok(value)
}

fn measure(field: &'static str, value: Option<f64>) -> Result<Option<f64>, TripValidationError> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => {
            Err(TripValidationError::InvalidDistance { field, value: v })
        }
        other => Ok(other),
    }
}

impl TryFrom<TripRecord> for Trip {
    type Error = TripValidationError;

    fn try_from(record: TripRecord) -> Result<Self, Self::Error> {
        record.validate()
    }
}

impl From<Trip> for TripRecord {
    fn from(trip: Trip) -> Self {
        Self {
            id: Some(trip.id.0),
            pickup_lat: Some(trip.pickup.lat),
            pickup_lng: Some(trip.pickup.lng),
            drop_lat: Some(trip.drop.lat),
            drop_lng: Some(trip.drop.lng),
            departure_time: Some(trip.departure_time),
            route_polyline: Some(trip.route_polyline),
            total_distance_m: trip.total_distance_m,
            total_duration_s: trip.total_duration_s,
        }
    }
}
