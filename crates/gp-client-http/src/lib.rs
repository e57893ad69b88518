use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use gp_api_types::{AccountAddress, GifAccountResponse, InvokeRequest};
use gp_client::ProgramClient;
use serde::Deserialize;
use tracing::debug;

/// HTTP implementation of [`ProgramClient`] against a program gateway.
///
/// Reads `GIF_PORTAL_GATEWAY_URL` from the environment at construction time
/// (default: `http://localhost:8899`).
pub struct HttpProgramClient {
    endpoint: String,
    http: reqwest::Client,
}

impl Default for HttpProgramClient {
    fn default() -> Self {
        Self::new(None)
    }
}

impl HttpProgramClient {
    pub fn new(endpoint: Option<String>) -> Self {
        let endpoint = endpoint
            .or_else(|| std::env::var("GIF_PORTAL_GATEWAY_URL").ok())
            .unwrap_or_else(|| "http://localhost:8899".to_string());
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    fn account_url(&self, account: &AccountAddress) -> String {
        format!("{}/account/{}", self.endpoint, account.0)
    }

    fn invoke_url(&self, method: &str) -> String {
        format!("{}/program/{}", self.endpoint, method)
    }
}

#[derive(Debug, Deserialize)]
struct GatewayErrorBody {
    error: String,
}

/// Surface a non-success gateway response as an error, preferring the
/// structured `{ "error": ... }` body when one is present.
fn gateway_error(operation: &str, status: reqwest::StatusCode, body: &str) -> anyhow::Error {
    if let Ok(parsed) = serde_json::from_str::<GatewayErrorBody>(body) {
        anyhow::anyhow!("{operation}: {}", parsed.error)
    } else {
        anyhow::anyhow!("{operation} HTTP {status}: {body}")
    }
}

#[async_trait]
impl ProgramClient for HttpProgramClient {
    async fn fetch_account(&self, account: &AccountAddress) -> Result<GifAccountResponse> {
        let url = self.account_url(account);
        debug!("fetching account {url}");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .context("gateway fetch_account transport")?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            bail!("account not found: {}", account.0);
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(gateway_error("fetch_account", status, &text));
        }

        response
            .json::<GifAccountResponse>()
            .await
            .context("gateway fetch_account parse")
    }

    async fn invoke(&self, request: InvokeRequest) -> Result<()> {
        let url = self.invoke_url(&request.method);
        debug!("invoking {url}");

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .context("gateway invoke transport")?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(gateway_error("invoke", status, &text));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_trailing_slash_is_normalized() {
        let client = HttpProgramClient::new(Some("http://gateway:9000/".to_owned()));
        assert_eq!(
            client.account_url(&AccountAddress("0xabc".to_owned())),
            "http://gateway:9000/account/0xabc"
        );
        assert_eq!(
            client.invoke_url("initialize"),
            "http://gateway:9000/program/initialize"
        );
    }

    #[test]
    fn gateway_error_prefers_structured_body() {
        let err = gateway_error(
            "invoke",
            reqwest::StatusCode::BAD_REQUEST,
            r#"{"error":"account already initialized"}"#,
        );
        assert_eq!(err.to_string(), "invoke: account already initialized");
    }

    #[test]
    fn gateway_error_falls_back_to_status_and_body() {
        let err = gateway_error("fetch_account", reqwest::StatusCode::BAD_GATEWAY, "boom");
        assert_eq!(
            err.to_string(),
            "fetch_account HTTP 502 Bad Gateway: boom"
        );
    }
}
