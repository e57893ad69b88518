use thiserror::Error;

/// Everything that can go wrong at the portal's boundaries.
///
/// None of these is fatal: each is caught by the triggering handler, logged,
/// and leaves the portal in a state the user can act on.
#[derive(Error, Debug)]
pub enum PortalError {
    #[error("no injected wallet provider found")]
    WalletUnavailable,
    #[error("wallet connection rejected: {0}")]
    ConnectRejected(String),
    #[error("account fetch failed: {0}")]
    AccountFetchFailed(String),
    #[error("program invocation failed: {0}")]
    RemoteInvokeFailed(String),
}
