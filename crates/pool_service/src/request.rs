use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pool_core::trip::{TripId, TripRecord};

use crate::error::ServiceError;

/// Body of a new-trip request.
///
/// Fields use the snake_case names of the request body. Everything is
/// optional so that absent fields can be reported together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewTripRequest {
    pub pickup_lat: Option<f64>,
    pub pickup_lng: Option<f64>,
    pub drop_lat: Option<f64>,
    pub drop_lng: Option<f64>,
    pub departure_time: Option<DateTime<Utc>>,
}

impl NewTripRequest {
    pub fn new(
        pickup: (f64, f64),
        drop: (f64, f64),
        departure_time: DateTime<Utc>,
    ) -> Self {
        Self {
            pickup_lat: Some(pickup.0),
            pickup_lng: Some(pickup.1),
            drop_lat: Some(drop.0),
            drop_lng: Some(drop.1),
            departure_time: Some(departure_time),
        }
    }

    /// Names of the fields that are absent, in request order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("pickup_lat", self.pickup_lat.is_none()),
            ("pickup_lng", self.pickup_lng.is_none()),
            ("drop_lat", self.drop_lat.is_none()),
            ("drop_lng", self.drop_lng.is_none()),
            ("departure_time", self.departure_time.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, missing)| missing.then_some(name))
        .collect()
    }

    /// Storage record for this request, still without a route.
    pub(crate) fn to_record(&self, id: &TripId) -> Result<TripRecord, ServiceError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(ServiceError::MissingFields(missing));
        }
        Ok(TripRecord {
            id: Some(id.to_string()),
            pickup_lat: self.pickup_lat,
            pickup_lng: self.pickup_lng,
            drop_lat: self.drop_lat,
            drop_lng: self.drop_lng,
            departure_time: self.departure_time,
            route_polyline: Some(String::new()),
            total_distance_m: None,
            total_duration_s: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_snake_case_body() {
        let body = r#"{
            "pickup_lat": 12.9716, "pickup_lng": 77.5946,
            "drop_lat": 12.9352, "drop_lng": 77.6245,
            "departure_time": "2025-01-15T09:00:00Z"
        }"#;
        let request: NewTripRequest = serde_json::from_str(body).unwrap();
        assert!(request.missing_fields().is_empty());
        assert_eq!(request.pickup_lat, Some(12.9716));
    }

    #[test]
    fn reports_every_missing_field() {
        let request = NewTripRequest {
            pickup_lat: Some(12.9716),
            drop_lng: Some(77.6245),
            ..Default::default()
        };
        assert_eq!(
            request.missing_fields(),
            vec!["pickup_lng", "drop_lat", "departure_time"]
        );
        assert!(matches!(
            request.to_record(&TripId::from("t")),
            Err(ServiceError::MissingFields(fields)) if fields.len() == 3
        ));
    }
}
