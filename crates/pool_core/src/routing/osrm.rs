//! OSRM `/route` service client.
//!
//! The HTTP client lives behind the `osrm` feature; response parsing is plain
//! serde and always compiled so it can be tested without a server.

#[cfg(feature = "osrm")]
mod client;
#[cfg_attr(not(feature = "osrm"), allow(dead_code))]
mod parser;
#[cfg_attr(not(feature = "osrm"), allow(dead_code))]
mod response;


#[cfg(feature = "osrm")]
pub use client::OsrmDirectionsProvider;
