//! Async orchestration of the portal operations.

use gp_api_types::{
    ACCOUNT_BASE, ACCOUNT_USER, AccountAddress, ConnectOpts, InvokeRequest, METHOD_ADD_GIF,
    METHOD_INITIALIZE,
};
use gp_client::{ProgramClient, WalletProvider};
use tracing::{debug, warn};

use crate::error::PortalError;
use crate::state::{PortalState, ViewState};

/// Provisioned configuration injected into the portal.
///
/// The backing account address comes from a keypair generated once at
/// provisioning time (see gp-keys); the portal never creates one per load.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    pub account: AccountAddress,
}

/// The portal component: injected capabilities plus the view state.
///
/// `wallet` is `None` when no provider is injected into the environment;
/// every operation then reports [`PortalError::WalletUnavailable`] instead
/// of connecting. All external calls are awaited sequentially within the
/// operation that triggered them.
pub struct Portal<W, C> {
    config: PortalConfig,
    wallet: Option<W>,
    client: C,
    state: PortalState,
}

impl<W, C> Portal<W, C>
where
    W: WalletProvider,
    C: ProgramClient,
{
    pub fn new(config: PortalConfig, wallet: Option<W>, client: C) -> Self {
        Self {
            config,
            wallet,
            client,
            state: PortalState::new(),
        }
    }

    pub fn state(&self) -> &PortalState {
        &self.state
    }

    pub fn view(&self) -> ViewState {
        self.state.view()
    }

    pub fn set_draft(&mut self, value: &str) {
        self.state.set_draft(value);
    }

    /// On-load sequence: one silent reconnect attempt, then a fetch on
    /// success. Failures are logged and never surfaced.
    pub async fn start(&mut self) {
        let Some(wallet) = self.wallet.as_ref() else {
            debug!("no injected wallet provider; staying disconnected");
            return;
        };

        match wallet
            .connect(ConnectOpts {
                only_if_trusted: true,
            })
            .await
        {
            Ok(session) => {
                debug!(
                    provider = wallet.provider_name(),
                    "reconnected with public key {}", session.public_key.0
                );
                self.state.apply_connected(session.public_key);
                self.refresh().await;
            }
            Err(err) => debug!("silent reconnect failed: {err:#}"),
        }
    }

    /// Explicit, user-triggered connect. On success, fetches the entry list.
    pub async fn connect(&mut self) -> Result<(), PortalError> {
        let Some(wallet) = self.wallet.as_ref() else {
            return Err(PortalError::WalletUnavailable);
        };

        match wallet.connect(ConnectOpts::default()).await {
            Ok(session) => {
                debug!(
                    provider = wallet.provider_name(),
                    "connected with public key {}", session.public_key.0
                );
                self.state.apply_connected(session.public_key);
                self.refresh().await;
                Ok(())
            }
            Err(err) => {
                warn!("wallet connection rejected: {err:#}");
                Err(PortalError::ConnectRejected(err.to_string()))
            }
        }
    }

    /// One fetch of the remote entry list. No retry, no backoff; a failure
    /// sets the sentinel so the renderer offers initialization.
    pub async fn refresh(&mut self) {
        match self.client.fetch_account(&self.config.account).await {
            Ok(response) => self.state.apply_fetched(response.gif_list),
            Err(err) => {
                warn!("account fetch failed: {err:#}");
                self.state.apply_fetch_failed();
            }
        }
    }

    /// Create the backing account, then re-fetch. On failure the state is
    /// unchanged and the user may retry by triggering this again.
    pub async fn initialize_account(&mut self) -> Result<(), PortalError> {
        let request = self.request_for(METHOD_INITIALIZE);

        if let Err(err) = self.client.invoke(request).await {
            warn!("account initialization failed: {err:#}");
            return Err(PortalError::RemoteInvokeFailed(err.to_string()));
        }

        self.refresh().await;
        Ok(())
    }

    /// Submit the draft: invoke `add_gif`, then re-fetch to confirm. The
    /// draft is cleared only once the invocation succeeded; a blank draft is
    /// a logged no-op reported as `Ok(false)`.
    pub async fn submit_draft(&mut self) -> Result<bool, PortalError> {
        let Some(entry) = self.state.submission() else {
            debug!("empty input, nothing to submit");
            return Ok(false);
        };

        let request = self
            .request_for(METHOD_ADD_GIF)
            .args(serde_json::json!({ "link": entry.link }));

        if let Err(err) = self.client.invoke(request).await {
            warn!("submission failed, keeping draft: {err:#}");
            return Err(PortalError::RemoteInvokeFailed(err.to_string()));
        }

        self.state.clear_draft();
        self.refresh().await;
        Ok(true)
    }

    fn request_for(&self, method: &str) -> InvokeRequest {
        let mut request = InvokeRequest::new(method)
            .account(ACCOUNT_BASE, &self.config.account.0)
            .signer(&self.config.account.0);

        if let Some(user) = self.state.session().address() {
            request = request.account(ACCOUNT_USER, &user.0).signer(&user.0);
        }

        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use gp_api_types::GifEntry;
    use gp_client::{MemoryProgram, MemoryWallet};

    fn config() -> PortalConfig {
        PortalConfig {
            account: AccountAddress("0xbase".to_owned()),
        }
    }

    fn entry(link: &str) -> GifEntry {
        GifEntry {
            link: link.to_owned(),
        }
    }

    #[tokio::test]
    async fn silent_reconnect_with_empty_account_shows_collection() {
        let program = MemoryProgram::with_account(&config().account, Vec::new());
        let mut portal = Portal::new(config(), Some(MemoryWallet::trusted("Addr1")), program);

        portal.start().await;

        let session = portal.state().session();
        assert_eq!(session.connected(), session.address().is_some());
        assert_eq!(session.address().unwrap().0, "Addr1");
        assert_eq!(portal.view(), ViewState::Collection);
        assert_eq!(portal.state().entries().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn absent_wallet_reports_unavailable_and_stays_disconnected() {
        let program = MemoryProgram::new();
        let mut portal = Portal::new(config(), None::<MemoryWallet>, program);

        portal.start().await;
        assert_eq!(portal.view(), ViewState::ConnectPrompt);

        let err = portal.connect().await.unwrap_err();
        assert!(matches!(err, PortalError::WalletUnavailable));
        assert_eq!(portal.view(), ViewState::ConnectPrompt);
    }

    #[tokio::test]
    async fn untrusted_wallet_needs_the_explicit_connect() -> Result<()> {
        let program = MemoryProgram::with_account(&config().account, Vec::new());
        let mut portal = Portal::new(config(), Some(MemoryWallet::untrusted("Addr1")), program);

        portal.start().await;
        assert_eq!(portal.view(), ViewState::ConnectPrompt);

        portal.connect().await?;
        assert_eq!(portal.view(), ViewState::Collection);
        Ok(())
    }

    #[tokio::test]
    async fn rejected_connect_leaves_the_portal_disconnected() {
        let program = MemoryProgram::new();
        let mut portal = Portal::new(config(), Some(MemoryWallet::rejecting("Addr1")), program);

        let err = portal.connect().await.unwrap_err();
        assert!(matches!(err, PortalError::ConnectRejected(_)));
        assert!(!portal.state().session().connected());
        assert_eq!(portal.view(), ViewState::ConnectPrompt);
    }

    #[tokio::test]
    async fn missing_account_shows_initialization_until_it_is_created() -> Result<()> {
        let mut portal = Portal::new(
            config(),
            Some(MemoryWallet::trusted("Addr1")),
            MemoryProgram::new(),
        );

        portal.start().await;
        assert_eq!(portal.view(), ViewState::NeedsInitialization);

        portal.initialize_account().await?;
        assert_eq!(portal.view(), ViewState::Collection);
        assert_eq!(portal.state().entries().unwrap().len(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn failed_initialization_is_retryable() -> Result<()> {
        let program = std::sync::Arc::new(MemoryProgram::new());
        program.set_fail_invokes(true);
        let mut portal = Portal::new(
            config(),
            Some(MemoryWallet::trusted("Addr1")),
            program.clone(),
        );

        portal.start().await;
        let err = portal.initialize_account().await.unwrap_err();
        assert!(matches!(err, PortalError::RemoteInvokeFailed(_)));
        assert_eq!(portal.view(), ViewState::NeedsInitialization);

        program.set_fail_invokes(false);
        portal.initialize_account().await?;
        assert_eq!(portal.view(), ViewState::Collection);
        Ok(())
    }

    #[tokio::test]
    async fn submit_appends_exactly_one_entry_and_clears_the_draft() -> Result<()> {
        let program = MemoryProgram::with_account(&config().account, vec![entry("http://a.gif")]);
        let mut portal = Portal::new(config(), Some(MemoryWallet::trusted("Addr1")), program);

        portal.start().await;
        portal.set_draft("http://x.gif");
        assert!(portal.submit_draft().await?);

        let links: Vec<&str> = portal
            .state()
            .entries()
            .unwrap()
            .iter()
            .map(|e| e.link.as_str())
            .collect();
        assert_eq!(links, vec!["http://a.gif", "http://x.gif"]);
        assert_eq!(portal.state().draft(), "");
        Ok(())
    }

    #[tokio::test]
    async fn blank_draft_submission_changes_nothing() -> Result<()> {
        let program = MemoryProgram::with_account(&config().account, vec![entry("http://a.gif")]);
        let mut portal = Portal::new(config(), Some(MemoryWallet::trusted("Addr1")), program);

        portal.start().await;
        portal.set_draft("   ");
        assert!(!portal.submit_draft().await?);

        assert_eq!(portal.state().entries().unwrap().len(), 1);
        assert_eq!(portal.state().draft(), "   ");
        Ok(())
    }

    #[tokio::test]
    async fn failed_submission_keeps_draft_and_entries() {
        let program = MemoryProgram::with_account(&config().account, vec![entry("http://a.gif")]);
        program.set_fail_invokes(true);
        let mut portal = Portal::new(config(), Some(MemoryWallet::trusted("Addr1")), program);

        portal.start().await;
        portal.set_draft("http://x.gif");

        let err = portal.submit_draft().await.unwrap_err();
        assert!(matches!(err, PortalError::RemoteInvokeFailed(_)));
        assert_eq!(portal.state().draft(), "http://x.gif");
        assert_eq!(portal.state().entries().unwrap().len(), 1);
    }
}
