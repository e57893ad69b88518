use anyhow::{Result, bail};
use async_trait::async_trait;
use gp_api_types::{ConnectOpts, WalletPublicKey, WalletSession};

/// Injected wallet capability.
///
/// Absence of a wallet is modeled at the composition site (`Option<W>`), not
/// here: an implementation of this trait is a provider that was found.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    fn provider_name(&self) -> &str;

    /// Request a connection. With `only_if_trusted` set this is the silent
    /// reconnect: it must reject instead of prompting when the user never
    /// authorized this origin.
    async fn connect(&self, opts: ConnectOpts) -> Result<WalletSession>;
}

/// In-memory wallet for tests and headless embedding.
pub struct MemoryWallet {
    public_key: WalletPublicKey,
    trusted: bool,
    reject_all: bool,
}

impl MemoryWallet {
    /// A wallet that has previously authorized this origin.
    pub fn trusted(public_key: &str) -> Self {
        Self {
            public_key: WalletPublicKey(public_key.to_owned()),
            trusted: true,
            reject_all: false,
        }
    }

    /// A wallet that will prompt-connect but refuses silent reconnects.
    pub fn untrusted(public_key: &str) -> Self {
        Self {
            public_key: WalletPublicKey(public_key.to_owned()),
            trusted: false,
            reject_all: false,
        }
    }

    /// A wallet whose user declines every connection request.
    pub fn rejecting(public_key: &str) -> Self {
        Self {
            public_key: WalletPublicKey(public_key.to_owned()),
            trusted: false,
            reject_all: true,
        }
    }
}

#[async_trait]
impl WalletProvider for MemoryWallet {
    fn provider_name(&self) -> &str {
        "memory"
    }

    async fn connect(&self, opts: ConnectOpts) -> Result<WalletSession> {
        if self.reject_all {
            bail!("user rejected the connection request");
        }

        if opts.only_if_trusted && !self.trusted {
            bail!("origin not previously authorized");
        }

        Ok(WalletSession {
            public_key: self.public_key.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn trusted_wallet_silently_reconnects() -> Result<()> {
        let wallet = MemoryWallet::trusted("Addr1");
        let session = wallet
            .connect(ConnectOpts {
                only_if_trusted: true,
            })
            .await?;

        assert_eq!(session.public_key.0, "Addr1");
        Ok(())
    }

    #[tokio::test]
    async fn untrusted_wallet_rejects_silent_reconnect_but_allows_prompt() -> Result<()> {
        let wallet = MemoryWallet::untrusted("Addr1");

        assert!(
            wallet
                .connect(ConnectOpts {
                    only_if_trusted: true,
                })
                .await
                .is_err()
        );

        let session = wallet.connect(ConnectOpts::default()).await?;
        assert_eq!(session.public_key.0, "Addr1");
        Ok(())
    }

    #[tokio::test]
    async fn rejecting_wallet_declines_every_request() {
        let wallet = MemoryWallet::rejecting("Addr1");

        assert!(wallet.connect(ConnectOpts::default()).await.is_err());
        assert!(
            wallet
                .connect(ConnectOpts {
                    only_if_trusted: true,
                })
                .await
                .is_err()
        );
    }
}
