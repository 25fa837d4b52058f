//! Browser implementations of the engine's platform traits.

pub mod api;
pub mod camera;
pub mod geocoder;
pub mod geolocation;
pub mod session_store;
pub mod timer;

use js_sys::Reflect;
use wasm_bindgen::JsValue;

/// Reads `object[key]`, treating missing keys and non-objects alike.
pub(crate) fn js_field(object: &JsValue, key: &str) -> Option<JsValue> {
    Reflect::get(object, &JsValue::from_str(key))
        .ok()
        .filter(|value| !value.is_undefined() && !value.is_null())
}

/// Best-effort description of a thrown JS value.
pub(crate) fn js_message(value: &JsValue) -> String {
    js_field(value, "message")
        .and_then(|message| message.as_string())
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{value:?}"))
}
