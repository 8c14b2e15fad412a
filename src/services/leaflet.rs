//! Minimal bindings to the Leaflet library loaded by `index.html`.
//!
//! Only the handful of calls the map view needs are bound; everything is
//! wrapped by [`MapWidget`], which owns the map, its marker and the click
//! handler, and tears the map down when dropped.

use js_sys::{Array, Function, Object, Reflect};
use thiserror::Error;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use crate::model::GeoPoint;

#[wasm_bindgen]
extern "C" {
    type LeafletMap;

    #[wasm_bindgen(catch, js_namespace = L, js_name = map)]
    fn create_map(element: &HtmlElement, options: &Object) -> Result<LeafletMap, JsValue>;

    #[wasm_bindgen(catch, method, js_name = setView)]
    fn set_view(this: &LeafletMap, center: &Array, zoom: f64) -> Result<LeafletMap, JsValue>;

    #[wasm_bindgen(catch, method, js_name = getZoom)]
    fn get_zoom(this: &LeafletMap) -> Result<f64, JsValue>;

    #[wasm_bindgen(catch, method)]
    fn on(this: &LeafletMap, event: &str, handler: &Function) -> Result<LeafletMap, JsValue>;

    #[wasm_bindgen(catch, method, js_name = remove)]
    fn remove_map(this: &LeafletMap) -> Result<LeafletMap, JsValue>;

    type Layer;

    #[wasm_bindgen(catch, js_namespace = L, js_name = tileLayer)]
    fn tile_layer(url_template: &str, options: &Object) -> Result<Layer, JsValue>;

    #[wasm_bindgen(catch, js_namespace = L, js_name = marker)]
    fn marker(lat_lng: &Array) -> Result<Layer, JsValue>;

    #[wasm_bindgen(catch, method, js_name = addTo)]
    fn add_to(this: &Layer, map: &LeafletMap) -> Result<Layer, JsValue>;

    #[wasm_bindgen(catch, method, js_name = bindPopup)]
    fn bind_popup(this: &Layer, content: &str) -> Result<Layer, JsValue>;

    #[wasm_bindgen(catch, method, js_name = setLatLng)]
    fn set_lat_lng(this: &Layer, lat_lng: &Array) -> Result<Layer, JsValue>;

    #[wasm_bindgen(catch, method, js_name = remove)]
    fn remove_layer(this: &Layer) -> Result<Layer, JsValue>;

    type LeafletMouseEvent;

    #[wasm_bindgen(method, getter)]
    fn latlng(this: &LeafletMouseEvent) -> LatLng;

    type LatLng;

    #[wasm_bindgen(method, getter)]
    fn lat(this: &LatLng) -> f64;

    #[wasm_bindgen(method, getter)]
    fn lng(this: &LatLng) -> f64;
}

#[derive(Debug, Error)]
pub enum MapError {
    #[error("Leaflet is not loaded")]
    LeafletMissing,
    #[error("Leaflet cannot show {0}")]
    OutOfRange(GeoPoint),
    #[error("Leaflet call failed: {0}")]
    Js(String),
}

impl From<JsValue> for MapError {
    fn from(err: JsValue) -> Self {
        Self::Js(
            err.as_string()
                .or_else(|| err.dyn_ref::<js_sys::Error>().map(|e| String::from(e.message())))
                .unwrap_or_else(|| "unknown JS error".to_string()),
        )
    }
}

/// Static map setup: tile source and initial view.
#[derive(Clone, Debug, PartialEq)]
pub struct MapSettings {
    pub tile_url: String,
    pub attribution: String,
    pub zoom: f64,
    pub scroll_wheel_zoom: bool,
    pub marker_popup: String,
}

pub struct MapWidget {
    map: LeafletMap,
    marker: Option<Layer>,
    marker_popup: String,
    _on_click: Closure<dyn FnMut(LeafletMouseEvent)>,
}

impl MapWidget {
    pub fn mount(
        element: &HtmlElement,
        settings: &MapSettings,
        center: GeoPoint,
        on_click: impl Fn(GeoPoint) + 'static,
    ) -> Result<Self, MapError> {
        if !Reflect::has(&js_sys::global(), &JsValue::from_str("L"))? {
            return Err(MapError::LeafletMissing);
        }

        let options = Object::new();
        Reflect::set(&options, &"center".into(), &lat_lng(displayable(center).unwrap_or_default()))?;
        Reflect::set(&options, &"zoom".into(), &settings.zoom.into())?;
        Reflect::set(
            &options,
            &"scrollWheelZoom".into(),
            &settings.scroll_wheel_zoom.into(),
        )?;
        let map = create_map(element, &options)?;

        let tile_options = Object::new();
        Reflect::set(
            &tile_options,
            &"attribution".into(),
            &settings.attribution.as_str().into(),
        )?;
        tile_layer(&settings.tile_url, &tile_options)?.add_to(&map)?;

        let on_click = Closure::wrap(Box::new(move |e: LeafletMouseEvent| {
            let at = e.latlng();
            on_click(GeoPoint::new(at.lat(), at.lng()));
        }) as Box<dyn FnMut(LeafletMouseEvent)>);
        map.on("click", on_click.as_ref().unchecked_ref())?;

        log::debug!("Leaflet map mounted at {center}");
        Ok(Self {
            map,
            marker: None,
            marker_popup: settings.marker_popup.clone(),
            _on_click: on_click,
        })
    }

    /// Pans to `center`, keeping the user's current zoom.
    pub fn set_center(&self, center: GeoPoint) -> Result<(), MapError> {
        let center = lat_lng(displayable(center)?);
        let zoom = self.map.get_zoom()?;
        self.map.set_view(&center, zoom)?;
        Ok(())
    }

    pub fn set_marker(&mut self, point: Option<GeoPoint>) -> Result<(), MapError> {
        let Some(point) = point else {
            if let Some(layer) = self.marker.take() {
                layer.remove_layer()?;
            }
            return Ok(());
        };
        let at = lat_lng(displayable(point)?);
        if let Some(layer) = &self.marker {
            layer.set_lat_lng(&at)?;
            return Ok(());
        }
        let layer = marker(&at)?;
        layer.bind_popup(&self.marker_popup)?;
        layer.add_to(&self.map)?;
        self.marker = Some(layer);
        Ok(())
    }
}

impl Drop for MapWidget {
    fn drop(&mut self) {
        if let Err(err) = self.map.remove_map() {
            log::warn!("Unable to remove map: {err:?}");
        }
    }
}

/// Leaflet throws on points it cannot project, so anything off the globe
/// stays out of the widget. The location state keeps such points as typed.
fn displayable(point: GeoPoint) -> Result<GeoPoint, MapError> {
    let GeoPoint { lat, lon } = point;
    if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon) {
        Ok(point)
    } else {
        Err(MapError::OutOfRange(point))
    }
}

fn lat_lng(point: GeoPoint) -> Array {
    Array::of2(&point.lat.into(), &point.lon.into())
}
