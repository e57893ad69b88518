//! Portal state and its transitions.
//!
//! `PortalState` is a plain synchronous machine: async orchestration lives in
//! [`crate::portal`] for native embedders and in the wasm UI's handlers for
//! the browser, both driving the same transitions.

use gp_api_types::{GifEntry, WalletPublicKey};

/// Wallet-connection state held by the view.
///
/// `connected()` is derived from the address, so "connected iff address is
/// set" holds by construction. There is no disconnect flow; a session ends
/// only with the process.
#[derive(Debug, Clone, Default)]
pub struct Session {
    address: Option<WalletPublicKey>,
}

impl Session {
    pub fn connected(&self) -> bool {
        self.address.is_some()
    }

    pub fn address(&self) -> Option<&WalletPublicKey> {
        self.address.as_ref()
    }
}

/// Which of the three views the renderer should draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// Not connected: show the connect affordance.
    ConnectPrompt,
    /// Connected but the backing account is not provisioned yet.
    NeedsInitialization,
    /// Connected with an entry list: show the form and the grid.
    Collection,
}

/// The full view model: session, entry list, and the input draft.
///
/// `entries == None` is the sentinel meaning "backing account not yet
/// provisioned"; an empty `Some` list is a provisioned account with nothing
/// in it. Insertion order is display order.
#[derive(Debug, Clone, Default)]
pub struct PortalState {
    session: Session,
    entries: Option<Vec<GifEntry>>,
    draft: String,
}

impl PortalState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn entries(&self) -> Option<&[GifEntry]> {
        self.entries.as_deref()
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, value: &str) {
        self.draft = value.to_owned();
    }

    pub fn clear_draft(&mut self) {
        self.draft.clear();
    }

    /// A wallet connection succeeded (silent or prompted).
    pub fn apply_connected(&mut self, public_key: WalletPublicKey) {
        self.session.address = Some(public_key);
    }

    /// The account fetch returned a list (possibly empty).
    pub fn apply_fetched(&mut self, entries: Vec<GifEntry>) {
        self.entries = Some(entries);
    }

    /// The account fetch failed: back to the sentinel.
    pub fn apply_fetch_failed(&mut self) {
        self.entries = None;
    }

    /// The entry the current draft would submit, or `None` when the draft is
    /// blank. Does not clear the draft; that happens once the submission is
    /// confirmed.
    pub fn submission(&self) -> Option<GifEntry> {
        let link = self.draft.trim();
        if link.is_empty() {
            return None;
        }
        Some(GifEntry {
            link: link.to_owned(),
        })
    }

    /// Pure derivation of the rendered view from the current state.
    pub fn view(&self) -> ViewState {
        if !self.session.connected() {
            return ViewState::ConnectPrompt;
        }
        match self.entries {
            None => ViewState::NeedsInitialization,
            Some(_) => ViewState::Collection,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(value: &str) -> WalletPublicKey {
        WalletPublicKey(value.to_owned())
    }

    #[test]
    fn connected_iff_address_is_set() {
        let mut state = PortalState::new();
        assert_eq!(
            state.session().connected(),
            state.session().address().is_some()
        );

        state.apply_connected(key("Addr1"));
        assert!(state.session().connected());
        assert_eq!(state.session().address().unwrap().0, "Addr1");
    }

    #[test]
    fn disconnected_always_shows_connect_prompt() {
        let mut state = PortalState::new();
        assert_eq!(state.view(), ViewState::ConnectPrompt);

        // Even a fetched list does not change the view while disconnected.
        state.apply_fetched(vec![]);
        assert_eq!(state.view(), ViewState::ConnectPrompt);
    }

    #[test]
    fn only_the_sentinel_enables_initialization() {
        let mut state = PortalState::new();
        state.apply_connected(key("Addr1"));
        assert_eq!(state.view(), ViewState::NeedsInitialization);

        state.apply_fetched(vec![]);
        assert_eq!(state.view(), ViewState::Collection);

        state.apply_fetch_failed();
        assert_eq!(state.view(), ViewState::NeedsInitialization);
    }

    #[test]
    fn blank_draft_has_no_submission() {
        let mut state = PortalState::new();
        assert!(state.submission().is_none());

        state.set_draft("   ");
        assert!(state.submission().is_none());

        state.set_draft(" http://x.gif ");
        assert_eq!(state.submission().unwrap().link, "http://x.gif");
        // Peeking does not clear the draft.
        assert_eq!(state.draft(), " http://x.gif ");
    }
}
