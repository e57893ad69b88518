//! Portal operations.
//!
//! Each function corresponds to one user-visible flow: silent reconnect,
//! explicit connect, account initialization, submission. Errors are caught
//! here, logged, and never propagate past the handler.

use gloo_console::{error, log};
use gp_api_types::{
    ACCOUNT_BASE, ACCOUNT_USER, AccountAddress, InvokeRequest, METHOD_ADD_GIF, METHOD_INITIALIZE,
};

use crate::api;
use crate::dom::{self, Elements};
use crate::render;
use crate::state;
use crate::wallet;

const NO_WALLET_MESSAGE: &str = "Wallet extension not found! Install one to use the portal.";

/// One silent reconnect attempt on load. Never prompts; a missing provider
/// raises the alert, a rejection is only logged.
pub async fn try_silent_connect(els: &Elements) {
    let Some(provider) = wallet::injected_provider() else {
        let _ = dom::window().alert_with_message(NO_WALLET_MESSAGE);
        render::render(els);
        return;
    };

    if wallet::is_phantom(&provider) {
        log!("Phantom wallet found");
    }

    match wallet::connect(&provider, true).await {
        Ok(public_key) => {
            log!("connected with public key:", public_key.clone());
            state::apply_connected(&public_key);
            load_entries(els).await;
        }
        Err(err) => log!("silent reconnect failed:", err),
    }

    render::render(els);
}

/// Explicit connect, triggered by the connect affordance.
pub async fn on_connect(els: &Elements) {
    let Some(provider) = wallet::injected_provider() else {
        let _ = dom::window().alert_with_message(NO_WALLET_MESSAGE);
        return;
    };

    match wallet::connect(&provider, false).await {
        Ok(public_key) => {
            log!("connected with public key:", public_key.clone());
            state::apply_connected(&public_key);
            load_entries(els).await;
        }
        Err(err) => error!("wallet connection rejected:", err),
    }

    render::render(els);
}

/// One fetch of the remote entry list; a failure sets the sentinel so the
/// renderer offers initialization. No retry, no backoff.
pub async fn load_entries(els: &Elements) {
    let Some(account) = state::account() else {
        return;
    };

    match api::fetch_account(els, &account).await {
        Ok(response) => state::apply_fetched(response.gif_list),
        Err(err) => {
            log!("account fetch failed:", err);
            state::apply_fetch_failed();
        }
    }
}

/// Create the backing account, then re-fetch. On failure the state is left
/// unchanged and re-clicking retries.
pub async fn on_initialize(els: &Elements) {
    let Some(account) = state::account() else {
        return;
    };

    match api::invoke(els, &invocation(METHOD_INITIALIZE, &account)).await {
        Ok(()) => load_entries(els).await,
        Err(err) => error!("account initialization failed:", err),
    }

    render::render(els);
}

/// Submit the draft: invoke `add_gif`, then re-fetch to confirm. The draft
/// clears only once the invocation succeeded.
pub async fn on_submit(els: &Elements) {
    state::set_draft(&dom::get_input_value(&els.link_input));

    let Some(entry) = state::submission() else {
        log!("Empty input. Try again.");
        return;
    };

    let Some(account) = state::account() else {
        return;
    };

    let request =
        invocation(METHOD_ADD_GIF, &account).args(serde_json::json!({ "link": entry.link }));

    match api::invoke(els, &request).await {
        Ok(()) => {
            state::clear_draft();
            dom::set_input_value(&els.link_input, "");
            load_entries(els).await;
        }
        Err(err) => error!("submission failed, keeping draft:", err),
    }

    render::render(els);
}

fn invocation(method: &str, account: &AccountAddress) -> InvokeRequest {
    let mut request = InvokeRequest::new(method)
        .account(ACCOUNT_BASE, &account.0)
        .signer(&account.0);

    if let Some(user) = state::connected_address() {
        request = request.account(ACCOUNT_USER, &user).signer(&user);
    }

    request
}
