#[derive(serde::Deserialize)]
pub(super) struct OsrmRouteResponse {
    pub(super) code: String,
    #[serde(default)]
    pub(super) message: Option<String>,
    #[serde(default)]
    pub(super) routes: Option<Vec<OsrmRoute>>,
}

#[derive(serde::Deserialize)]
pub(super) struct OsrmRoute {
    /// Encoded polyline when requested with `geometries=polyline`.
    pub(super) geometry: Option<String>,
    pub(super) distance: Option<f64>, // metres
    pub(super) duration: Option<f64>, // seconds
}
