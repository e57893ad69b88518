//! Injected wallet provider bridge.
//!
//! The wallet extension exposes a `solana`-style object on `window`; its
//! absence is a first-class state the UI must render around.

use js_sys::{Function, Object, Promise, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::dom;

/// The injected provider object, if one is present on `window`.
pub fn injected_provider() -> Option<Object> {
    let window = dom::window();
    let provider = Reflect::get(&window, &JsValue::from_str("solana")).ok()?;
    if provider.is_undefined() || provider.is_null() {
        return None;
    }
    provider.dyn_into::<Object>().ok()
}

/// True when the provider identifies itself as Phantom.
pub fn is_phantom(provider: &Object) -> bool {
    Reflect::get(provider, &JsValue::from_str("isPhantom"))
        .ok()
        .and_then(|v| v.as_bool())
        .unwrap_or(false)
}

/// Call `provider.connect({ onlyIfTrusted })` and extract the public key.
///
/// Rejection (user declined, or a silent attempt against an unauthorized
/// origin) surfaces as `Err` for the caller to log.
pub async fn connect(provider: &Object, only_if_trusted: bool) -> Result<String, String> {
    let opts = Object::new();
    Reflect::set(
        &opts,
        &JsValue::from_str("onlyIfTrusted"),
        &JsValue::from_bool(only_if_trusted),
    )
    .map_err(|e| format!("{:?}", e))?;

    let connect_fn: Function = Reflect::get(provider, &JsValue::from_str("connect"))
        .map_err(|e| format!("{:?}", e))?
        .dyn_into()
        .map_err(|_| "provider.connect is not a function".to_string())?;

    let promise: Promise = connect_fn
        .call1(provider, &opts)
        .map_err(|e| format!("connect threw: {:?}", e))?
        .dyn_into()
        .map_err(|_| "provider.connect did not return a promise".to_string())?;

    let response = JsFuture::from(promise)
        .await
        .map_err(|e| format!("connect rejected: {:?}", e))?;

    let public_key: Object = Reflect::get(&response, &JsValue::from_str("publicKey"))
        .map_err(|e| format!("{:?}", e))?
        .dyn_into()
        .map_err(|_| "connect response has no publicKey".to_string())?;

    Ok(String::from(public_key.to_string()))
}
