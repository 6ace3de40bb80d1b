use super::response::OsrmRouteResponse;
use crate::routing::{DirectionsError, RouteResult};

/// OSRM reports unroutable pairs with these codes rather than an HTTP error.
const NO_ROUTE_CODES: [&str; 2] = ["NoRoute", "NoSegment"];

pub(super) fn parse_route_response(resp: OsrmRouteResponse) -> Result<RouteResult, DirectionsError> {
    if resp.code != "Ok" {
        if NO_ROUTE_CODES.contains(&resp.code.as_str()) {
            return Err(DirectionsError::NoRoute);
        }
        let detail = match resp.message {
            Some(message) if !message.trim().is_empty() => format!("{}: {}", resp.code, message),
            _ => resp.code,
        };
        return Err(DirectionsError::Api(detail));
    }

    let route = resp
        .routes
        .and_then(|routes| routes.into_iter().next())
        .ok_or(DirectionsError::NoRoute)?;

    let polyline = route
        .geometry
        .filter(|geometry| !geometry.is_empty())
        .ok_or_else(|| DirectionsError::Api("route has no geometry".to_string()))?;

    Ok(RouteResult {
        polyline,
        distance_m: route.distance,
        duration_s: route.duration,
    })
}
