use serde::{Deserialize, Serialize};

/// Remote method that creates the backing account.
pub const METHOD_INITIALIZE: &str = "initialize";
/// Remote method that appends one link to the account's list.
pub const METHOD_ADD_GIF: &str = "add_gif";

/// Named account slot for the backing data account.
pub const ACCOUNT_BASE: &str = "base_account";
/// Named account slot for the connected wallet.
pub const ACCOUNT_USER: &str = "user";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WalletPublicKey(pub String);

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountAddress(pub String);

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GifEntry {
    pub link: String,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ConnectOpts {
    /// Silent reconnect: succeed only if the user previously authorized
    /// this origin, and never prompt.
    pub only_if_trusted: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletSession {
    pub public_key: WalletPublicKey,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GifAccountResponse {
    pub gif_list: Vec<GifEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountMeta {
    pub name: String,
    pub address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvokeRequest {
    pub method: String,
    pub accounts: Vec<AccountMeta>,
    pub signers: Vec<String>,
    pub args: serde_json::Value,
}

impl InvokeRequest {
    pub fn new(method: &str) -> Self {
        Self {
            method: method.to_owned(),
            accounts: Vec::new(),
            signers: Vec::new(),
            args: serde_json::Value::Null,
        }
    }

    pub fn account(mut self, name: &str, address: &str) -> Self {
        self.accounts.push(AccountMeta {
            name: name.to_owned(),
            address: address.to_owned(),
        });
        self
    }

    pub fn signer(mut self, address: &str) -> Self {
        self.signers.push(address.to_owned());
        self
    }

    pub fn args(mut self, args: serde_json::Value) -> Self {
        self.args = args;
        self
    }
}
