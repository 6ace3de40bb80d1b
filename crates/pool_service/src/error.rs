use std::fmt;

use pool_core::routing::DirectionsError;
use pool_core::trip::TripValidationError;

/// Failures surfaced by [`crate::TripService`] and the batch helpers.
#[derive(Debug)]
pub enum ServiceError {
    /// The request left out required fields (snake_case request names).
    MissingFields(Vec<&'static str>),
    InvalidTrip(TripValidationError),
    /// The directions backend could not produce a route.
    RouteUnavailable(DirectionsError),
    TripNotFound(String),
    /// A snapshot holds the same trip id more than once.
    DuplicateTrip(String),
    Io(std::io::Error),
    Serialization(serde_json::Error),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::MissingFields(fields) => {
                write!(f, "missing fields: {}", fields.join(", "))
            }
            ServiceError::InvalidTrip(err) => write!(f, "invalid trip: {err}"),
            ServiceError::RouteUnavailable(err) => write!(f, "could not resolve route: {err}"),
            ServiceError::TripNotFound(id) => write!(f, "trip not found: {id}"),
            ServiceError::DuplicateTrip(id) => write!(f, "duplicate trip id in store: {id}"),
            ServiceError::Io(err) => write!(f, "I/O error: {err}"),
            ServiceError::Serialization(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServiceError::InvalidTrip(err) => Some(err),
            ServiceError::RouteUnavailable(err) => Some(err),
            ServiceError::Io(err) => Some(err),
            ServiceError::Serialization(err) => Some(err),
            ServiceError::MissingFields(_)
            | ServiceError::TripNotFound(_)
            | ServiceError::DuplicateTrip(_) => None,
        }
    }
}

impl From<TripValidationError> for ServiceError {
    fn from(err: TripValidationError) -> Self {
        ServiceError::InvalidTrip(err)
    }
}

impl From<DirectionsError> for ServiceError {
    fn from(err: DirectionsError) -> Self {
        ServiceError::RouteUnavailable(err)
    }
}

impl From<std::io::Error> for ServiceError {
    fn from(err: std::io::Error) -> Self {
        ServiceError::Io(err)
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::Serialization(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_failures_read_as_unresolved_routes() {
        let err = ServiceError::from(DirectionsError::NoRoute);
        assert!(err.to_string().starts_with("could not resolve route: "));
    }

    #[test]
    fn missing_fields_are_listed() {
        let err = ServiceError::MissingFields(vec!["pickup_lat", "departure_time"]);
        assert_eq!(err.to_string(), "missing fields: pickup_lat, departure_time");
    }
}
