//! Global application state.
//!
//! Uses a `RefCell`-wrapped `thread_local!` store (WASM is single-threaded).
//! The portal machine itself is gp-core's `PortalState`; this module only
//! adds the injected configuration and accessor helpers.

use std::cell::RefCell;

use gp_api_types::{AccountAddress, GifEntry, WalletPublicKey};
use gp_core::{PortalState, ViewState};

/// Central application state.
#[derive(Default)]
pub struct UiState {
    pub portal: PortalState,
    pub account: Option<AccountAddress>,
}

// ── Thread-local singleton ──

thread_local! {
    static STATE: RefCell<UiState> = RefCell::new(UiState::default());
}

/// Run a closure with shared read access to the state.
pub fn with<F, R>(f: F) -> R
where
    F: FnOnce(&UiState) -> R,
{
    STATE.with(|s| f(&s.borrow()))
}

/// Run a closure with mutable access to the state.
pub fn with_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut UiState) -> R,
{
    STATE.with(|s| f(&mut s.borrow_mut()))
}

// ── Convenience accessors ──

pub fn view() -> ViewState {
    with(|s| s.portal.view())
}

pub fn account() -> Option<AccountAddress> {
    with(|s| s.account.clone())
}

pub fn set_account(account: AccountAddress) {
    with_mut(|s| s.account = Some(account));
}

pub fn connected_address() -> Option<String> {
    with(|s| s.portal.session().address().map(|k| k.0.clone()))
}

pub fn entries() -> Option<Vec<GifEntry>> {
    with(|s| s.portal.entries().map(|e| e.to_vec()))
}

pub fn set_draft(value: &str) {
    with_mut(|s| s.portal.set_draft(value));
}

pub fn submission() -> Option<GifEntry> {
    with(|s| s.portal.submission())
}

pub fn clear_draft() {
    with_mut(|s| s.portal.clear_draft());
}

pub fn apply_connected(public_key: &str) {
    with_mut(|s| {
        s.portal
            .apply_connected(WalletPublicKey(public_key.to_owned()))
    });
}

pub fn apply_fetched(entries: Vec<GifEntry>) {
    with_mut(|s| s.portal.apply_fetched(entries));
}

pub fn apply_fetch_failed() {
    with_mut(|s| s.portal.apply_fetch_failed());
}
