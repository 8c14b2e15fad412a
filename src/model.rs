//! Core data types shared by the location state and the browser adapters.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Shown in both address fields when the geocoder knows no name for a point.
pub const ADDRESS_NOT_FOUND: &str = "Address not found";

/// A WGS84 coordinate pair in decimal degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Formats as `"lat, lon"`, the same text the coordinates input accepts.
impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.lat, self.lon)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("geolocation is not supported by this browser")]
    Unsupported,
    #[error("permission to read the device location was denied")]
    PermissionDenied,
    #[error("the device location is unavailable")]
    PositionUnavailable,
    #[error("timed out waiting for the device location")]
    Timeout,
}

impl GeolocationError {
    /// Maps a `GeolocationPositionError.code` to an error kind.
    pub const fn from_code(code: u16) -> Self {
        match code {
            1 => Self::PermissionDenied,
            3 => Self::Timeout,
            _ => Self::PositionUnavailable,
        }
    }
}

/// Any failure of a reverse-geocoding lookup. The page reports all of them
/// the same way; the detail only ends up in the log.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GeocodeError {
    #[error("request failed: {0}")]
    Fetch(String),
    #[error("unexpected HTTP status {0}")]
    Status(u16),
    #[error("invalid response body: {0}")]
    Decode(String),
}

/// A blocking, user-visible message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    LocationConfirmed,
    GeolocationFailed(GeolocationError),
    GeocodeFailed,
}

impl Notice {
    pub const fn message(&self) -> &'static str {
        match self {
            Self::LocationConfirmed => "Location confirmed!",
            Self::GeolocationFailed(GeolocationError::Unsupported) => {
                "Geolocation is not supported by this browser."
            }
            Self::GeolocationFailed(_) => "Unable to retrieve your location.",
            Self::GeocodeFailed => "Failed to fetch address from coordinates.",
        }
    }
}
