//! GIF Portal browser front-end.
//!
//! Pure Rust + WASM rendition of the portal view. Each concern lives in its
//! own module; the state machine itself comes from gp-core and only the
//! JS-boundary calls (injected wallet, gateway fetch, DOM) live here.

pub mod api;
pub mod dom;
pub mod events;
pub mod ops;
pub mod render;
pub mod state;
pub mod wallet;

use gp_api_types::AccountAddress;
use wasm_bindgen::prelude::*;

/// WASM entry point – called automatically when the module is instantiated.
#[wasm_bindgen(start)]
pub async fn start() -> Result<(), JsValue> {
    // Improve panic messages in the browser console
    console_error_panic_hook::set_once();

    init().await
}

/// Main initialisation sequence: bind DOM, read injected configuration,
/// wire events, attempt the one silent reconnect, render.
async fn init() -> Result<(), JsValue> {
    let els = dom::Elements::bind()?;

    // Provisioned configuration travels on the app root; the UI never
    // generates an account identity at load time.
    let account = els
        .portal_root
        .get_attribute("data-account-address")
        .unwrap_or_default();
    if account.is_empty() {
        return Err(JsValue::from_str(
            "missing data-account-address on #portalApp",
        ));
    }
    state::set_account(AccountAddress(account));

    events::bind_events(&els);

    ops::try_silent_connect(&els).await;

    Ok(())
}
