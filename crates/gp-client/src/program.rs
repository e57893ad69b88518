use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Result, bail};
use async_trait::async_trait;
use gp_api_types::{
    ACCOUNT_BASE, AccountAddress, GifAccountResponse, GifEntry, InvokeRequest, METHOD_ADD_GIF,
    METHOD_INITIALIZE,
};
use tokio::sync::RwLock;

/// Injected remote-program capability.
#[async_trait]
pub trait ProgramClient: Send + Sync {
    /// Read the account's entry list. Rejects when the account does not exist.
    async fn fetch_account(&self, account: &AccountAddress) -> Result<GifAccountResponse>;

    /// Execute one named remote method.
    async fn invoke(&self, request: InvokeRequest) -> Result<()>;
}

#[async_trait]
impl<P: ProgramClient + ?Sized> ProgramClient for Arc<P> {
    async fn fetch_account(&self, account: &AccountAddress) -> Result<GifAccountResponse> {
        (**self).fetch_account(account).await
    }

    async fn invoke(&self, request: InvokeRequest) -> Result<()> {
        (**self).invoke(request).await
    }
}

/// In-memory program for tests and headless embedding.
///
/// Implements the two methods the portal uses: `initialize` creates an empty
/// list for the base account, `add_gif` appends the `link` argument to it.
#[derive(Default)]
pub struct MemoryProgram {
    accounts: RwLock<HashMap<String, Vec<GifEntry>>>,
    fail_invokes: AtomicBool,
}

impl MemoryProgram {
    pub fn new() -> Self {
        Self::default()
    }

    /// A program whose backing account already holds the given entries.
    pub fn with_account(address: &AccountAddress, entries: Vec<GifEntry>) -> Self {
        let mut accounts = HashMap::new();
        accounts.insert(address.0.clone(), entries);
        Self {
            accounts: RwLock::new(accounts),
            fail_invokes: AtomicBool::new(false),
        }
    }

    /// Make every subsequent invoke fail, for exercising the retry paths.
    pub fn set_fail_invokes(&self, fail: bool) {
        self.fail_invokes.store(fail, Ordering::SeqCst);
    }

    fn base_account(request: &InvokeRequest) -> Result<String> {
        let Some(meta) = request.accounts.iter().find(|m| m.name == ACCOUNT_BASE) else {
            bail!("invoke is missing the {ACCOUNT_BASE} account");
        };
        Ok(meta.address.clone())
    }
}

#[async_trait]
impl ProgramClient for MemoryProgram {
    async fn fetch_account(&self, account: &AccountAddress) -> Result<GifAccountResponse> {
        let guard = self.accounts.read().await;
        let Some(entries) = guard.get(&account.0) else {
            bail!("account not found: {}", account.0);
        };

        Ok(GifAccountResponse {
            gif_list: entries.clone(),
        })
    }

    async fn invoke(&self, request: InvokeRequest) -> Result<()> {
        if self.fail_invokes.load(Ordering::SeqCst) {
            bail!("program invocation refused");
        }

        let base = Self::base_account(&request)?;
        let mut guard = self.accounts.write().await;

        match request.method.as_str() {
            METHOD_INITIALIZE => {
                guard.entry(base).or_default();
                Ok(())
            }
            METHOD_ADD_GIF => {
                let Some(entries) = guard.get_mut(&base) else {
                    bail!("account not found: {base}");
                };
                let Some(link) = request.args.get("link").and_then(|v| v.as_str()) else {
                    bail!("add_gif requires a link argument");
                };
                entries.push(GifEntry {
                    link: link.to_owned(),
                });
                Ok(())
            }
            other => bail!("unknown method: {other}"),
        }
    }
}
