//! `navigator.geolocation.watchPosition` as a [`LocationSource`].

use std::cell::RefCell;
use std::collections::HashMap;

use engine::error::LocationError;
use engine::location::{LocationSink, LocationSource, WatchId};
use js_sys::Reflect;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Geolocation, PositionOptions};

use super::{js_field, js_message};

/// `GeolocationPositionError.PERMISSION_DENIED`.
const PERMISSION_DENIED: u32 = 1;

/// Callbacks handed to the browser. They must outlive the watch.
struct WatchCallbacks {
    _on_position: Closure<dyn FnMut(JsValue)>,
    _on_error: Closure<dyn FnMut(JsValue)>,
}

#[derive(Default)]
pub struct BrowserLocationSource {
    watches: RefCell<HashMap<WatchId, WatchCallbacks>>,
}

fn geolocation() -> Result<Geolocation, LocationError> {
    web_sys::window()
        .ok_or_else(|| LocationError::Unavailable("no window".to_string()))?
        .navigator()
        .geolocation()
        .map_err(|_| LocationError::Unavailable("geolocation not supported".to_string()))
}

fn read_coords(position: &JsValue) -> Option<(f64, f64)> {
    let coords = js_field(position, "coords")?;
    let latitude = js_field(&coords, "latitude")?.as_f64()?;
    let longitude = js_field(&coords, "longitude")?.as_f64()?;
    Some((latitude, longitude))
}

fn to_location_error(error: &JsValue) -> LocationError {
    let code = js_field(error, "code").and_then(|code| code.as_f64());
    if code == Some(f64::from(PERMISSION_DENIED)) {
        LocationError::PermissionDenied
    } else {
        LocationError::Unavailable(js_message(error))
    }
}

impl LocationSource for BrowserLocationSource {
    fn watch(&self, sink: LocationSink) -> Result<WatchId, LocationError> {
        let geolocation = geolocation()?;

        let position_sink = sink.clone();
        let on_position = Closure::<dyn FnMut(JsValue)>::new(move |position: JsValue| {
            match read_coords(&position) {
                Some((latitude, longitude)) => {
                    position_sink.sample(latitude, longitude);
                }
                None => {
                    position_sink.fail(LocationError::Unavailable(
                        "position without coordinates".to_string(),
                    ));
                }
            }
        });
        let on_error = Closure::<dyn FnMut(JsValue)>::new(move |error: JsValue| {
            sink.fail(to_location_error(&error));
        });

        let options = PositionOptions::new();
        Reflect::set(
            &options,
            &JsValue::from_str("enableHighAccuracy"),
            &JsValue::TRUE,
        )
        .ok();

        let id = geolocation
            .watch_position_with_error_callback_and_options(
                on_position.as_ref().unchecked_ref(),
                Some(on_error.as_ref().unchecked_ref()),
                &options,
            )
            .map_err(|error| LocationError::Unavailable(js_message(&error)))?;

        self.watches.borrow_mut().insert(
            id,
            WatchCallbacks {
                _on_position: on_position,
                _on_error: on_error,
            },
        );
        Ok(id)
    }

    fn clear_watch(&self, id: WatchId) {
        if let Ok(geolocation) = geolocation() {
            geolocation.clear_watch(id);
        }
        // Dropping the callbacks drops the sink, which ends the stream.
        self.watches.borrow_mut().remove(&id);
    }
}
