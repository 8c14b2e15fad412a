use gloo_net::http::Request;
use serde::Deserialize;

use super::ReverseGeocoder;
use crate::model::{GeoPoint, GeocodeError};

pub const DEFAULT_ENDPOINT: &str = "https://nominatim.openstreetmap.org/reverse";

/// The part of a Nominatim `/reverse` response the page uses. Points the
/// service cannot resolve come back as `{"error": "..."}` without a name.
#[derive(Debug, Default, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    display_name: Option<String>,
}

/// Reverse geocoding against a Nominatim instance.
#[derive(Clone, Debug, PartialEq)]
pub struct Nominatim {
    endpoint: String,
}

impl Nominatim {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

}

/// Query parameters of a `/reverse` call. They are appended to whatever the
/// endpoint already carries, so an endpoint with its own query string works.
fn reverse_query(point: GeoPoint) -> [(&'static str, String); 3] {
    [
        ("lat", point.lat.to_string()),
        ("lon", point.lon.to_string()),
        ("format", "json".to_string()),
    ]
}

impl Default for Nominatim {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

impl ReverseGeocoder for Nominatim {
    async fn reverse(&self, point: GeoPoint) -> Result<Option<String>, GeocodeError> {
        log::debug!("GET {} for {point}", self.endpoint);
        let response = Request::get(&self.endpoint)
            .query(reverse_query(point))
            .send()
            .await?;
        // ensure we've got 2xx status
        if !response.ok() {
            return Err(GeocodeError::Status(response.status()));
        }
        let body: ReverseResponse = response.json().await?;
        Ok(body.display_name)
    }
}

impl From<gloo_net::Error> for GeocodeError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(err) => Self::Decode(err.to_string()),
            other => Self::Fetch(other.to_string()),
        }
    }
}
