//! Page configuration.
//!
//! Defaults match the public OpenStreetMap services. A deployment can
//! override any field with a JSON object in the `data-config` attribute of
//! the element the app is mounted on.

use serde::Deserialize;
use thiserror::Error;
use web_sys::Element;

use crate::model::GeoPoint;
use crate::services::{MapSettings, nominatim};
use crate::state::ResponseOrder;

pub const CONFIG_ATTRIBUTE: &str = "data-config";

const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
const TILE_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";
const MAP_LINK_BASE: &str = "https://www.google.com/maps";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub geocoder_endpoint: String,
    pub tile_url: String,
    pub tile_attribution: String,
    pub zoom: f64,
    pub scroll_wheel_zoom: bool,
    /// Base URL of the external map the pin link opens; `?q=lat,lon` is appended.
    pub map_link_base: String,
    pub response_order: ResponseOrder,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            geocoder_endpoint: nominatim::DEFAULT_ENDPOINT.to_string(),
            tile_url: TILE_URL.to_string(),
            tile_attribution: TILE_ATTRIBUTION.to_string(),
            zoom: 13.0,
            scroll_wheel_zoom: false,
            map_link_base: MAP_LINK_BASE.to_string(),
            response_order: ResponseOrder::default(),
        }
    }
}

impl AppConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Reads overrides from the mount element, falling back to the defaults
    /// when the attribute is absent or malformed.
    pub fn from_element(element: &Element) -> Self {
        let Some(raw) = element.get_attribute(CONFIG_ATTRIBUTE) else {
            return Self::default();
        };
        if raw.trim().is_empty() {
            return Self::default();
        }
        Self::from_json(&raw).unwrap_or_else(|err| {
            log::warn!("Ignoring {CONFIG_ATTRIBUTE}: {err}");
            Self::default()
        })
    }

    pub fn map_settings(&self) -> MapSettings {
        MapSettings {
            tile_url: self.tile_url.clone(),
            attribution: self.tile_attribution.clone(),
            zoom: self.zoom,
            scroll_wheel_zoom: self.scroll_wheel_zoom,
            marker_popup: "Pinned Location".to_string(),
        }
    }

    pub fn map_link(&self, point: GeoPoint) -> String {
        format!("{}?q={},{}", self.map_link_base, point.lat, point.lon)
    }
}
