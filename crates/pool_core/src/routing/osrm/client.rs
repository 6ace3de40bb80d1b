use std::time::Duration;

use reqwest::{blocking::Client, Url};

use super::parser::parse_route_response;
use super::response::OsrmRouteResponse;
use crate::geo::Point;
use crate::routing::{DirectionsError, DirectionsProvider, RouteResult};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Routes via an OSRM HTTP endpoint.
#[derive(Debug, Clone)]
pub struct OsrmDirectionsProvider {
    client: Client,
    endpoint: String,
}

impl OsrmDirectionsProvider {
    /// Create a client for the given OSRM endpoint (e.g. `http://localhost:5000`).
    pub fn new(endpoint: &str) -> Result<Self, DirectionsError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(DirectionsError::Http)?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    fn route_url(&self, pickup: Point, drop: Point) -> Result<Url, DirectionsError> {
        // OSRM takes coordinates as lng,lat.
        let base = format!(
            "{}/route/v1/driving/{},{};{},{}",
            self.endpoint, pickup.lng, pickup.lat, drop.lng, drop.lat
        );
        let mut url = Url::parse(&base)
            .map_err(|err| DirectionsError::Api(format!("failed to build OSRM URL: {}", err)))?;
        url.query_pairs_mut()
            .append_pair("overview", "full")
            .append_pair("geometries", "polyline");
        Ok(url)
    }
}

impl DirectionsProvider for OsrmDirectionsProvider {
    fn fetch_route(&self, pickup: Point, drop: Point) -> Result<RouteResult, DirectionsError> {
        let url = self.route_url(pickup, drop)?;
        let response = self.client.get(url).send().map_err(DirectionsError::Http)?;
        let parsed: OsrmRouteResponse = response.json().map_err(DirectionsError::Json)?;
        parse_route_response(parsed)
    }
}
