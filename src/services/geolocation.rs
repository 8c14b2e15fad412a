// Device location through `navigator.geolocation`
use js_sys::{Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{GeolocationPosition, GeolocationPositionError};

use crate::model::{GeoPoint, GeolocationError};

/// Asks the browser for the current device position once. No retry.
pub async fn current_position() -> Result<GeoPoint, GeolocationError> {
    let window = web_sys::window().ok_or(GeolocationError::Unsupported)?;
    let navigator = window.navigator();
    let supported = Reflect::has(&navigator, &JsValue::from_str("geolocation")).unwrap_or(false);
    if !supported {
        return Err(GeolocationError::Unsupported);
    }
    let geolocation = navigator
        .geolocation()
        .map_err(|_| GeolocationError::Unsupported)?;

    let mut request_failed = false;
    let promise = Promise::new(&mut |resolve, reject| {
        if geolocation
            .get_current_position_with_error_callback(&resolve, Some(&reject))
            .is_err()
        {
            request_failed = true;
        }
    });
    // the callbacks never fire if the request itself was refused
    if request_failed {
        return Err(GeolocationError::Unsupported);
    }

    match JsFuture::from(promise).await {
        Ok(value) => {
            let coords = value.unchecked_into::<GeolocationPosition>().coords();
            Ok(GeoPoint::new(coords.latitude(), coords.longitude()))
        }
        Err(err) => Err(classify(&err)),
    }
}

fn classify(err: &JsValue) -> GeolocationError {
    err.dyn_ref::<GeolocationPositionError>()
        .map_or(GeolocationError::PositionUnavailable, |err| {
            GeolocationError::from_code(err.code())
        })
}
