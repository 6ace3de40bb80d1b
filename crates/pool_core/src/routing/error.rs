use std::fmt;

/// Errors raised while resolving a route.
///
/// These are never recovered inside the matcher; callers surface them as
/// "could not resolve route".
#[derive(Debug)]
pub enum DirectionsError {
    #[cfg(feature = "osrm")]
    Http(reqwest::Error),
    #[cfg(feature = "osrm")]
    Json(reqwest::Error),
    /// The backend answered with a non-`Ok` code.
    Api(String),
    /// No route exists between the requested points.
    NoRoute,
    /// The backend could not be constructed or loaded.
    Unavailable(String),
}

impl fmt::Display for DirectionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            #[cfg(feature = "osrm")]
            DirectionsError::Http(err) => write!(f, "directions request failed: {err}"),
            #[cfg(feature = "osrm")]
            DirectionsError::Json(err) => write!(f, "invalid directions response: {err}"),
            DirectionsError::Api(code) => write!(f, "directions backend error: {code}"),
            DirectionsError::NoRoute => f.write_str("no route found between the points"),
            DirectionsError::Unavailable(msg) => write!(f, "directions backend unavailable: {msg}"),
        }
    }
}

impl std::error::Error for DirectionsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            #[cfg(feature = "osrm")]
            DirectionsError::Http(err) | DirectionsError::Json(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(feature = "osrm")]
impl From<reqwest::Error> for DirectionsError {
    fn from(err: reqwest::Error) -> Self {
        DirectionsError::Http(err)
    }
}
