//! HTTP API client.
//!
//! Wraps `fetch` for JSON requests to the program gateway. The gateway
//! endpoint is injected via `data-endpoint` on the app root, falling back to
//! the page's origin on port 8899.

use gp_api_types::{AccountAddress, GifAccountResponse, InvokeRequest};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

use crate::dom::{self, Elements};

/// Determine the gateway base URL.
pub fn base_url(els: &Elements) -> String {
    if let Some(endpoint) = els.portal_root.get_attribute("data-endpoint") {
        let endpoint = endpoint.trim();
        if !endpoint.is_empty() {
            return endpoint.trim_end_matches('/').to_string();
        }
    }

    let loc = dom::window().location();
    let host = loc.hostname().unwrap_or_default();
    let protocol = loc.protocol().unwrap_or_else(|_| "http:".into());
    format!("{}//{}:8899", protocol, host)
}

/// Perform a fetch request, returning the parsed JSON as `serde_json::Value`.
pub async fn request(
    els: &Elements,
    path: &str,
    method: &str,
    body: Option<String>,
) -> Result<serde_json::Value, String> {
    let url = format!("{}{}", base_url(els), path);

    let opts = RequestInit::new();
    opts.set_method(method);
    opts.set_mode(RequestMode::Cors);

    let headers = Headers::new().map_err(|e| format!("{:?}", e))?;

    if let Some(ref b) = body {
        headers
            .set("Content-Type", "application/json")
            .map_err(|e| format!("{:?}", e))?;
        let js_body = JsValue::from_str(b);
        opts.set_body(&js_body);
    }

    opts.set_headers(&headers);

    let request = Request::new_with_str_and_init(&url, &opts).map_err(|e| format!("{:?}", e))?;

    let window = dom::window();
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| format!("fetch error: {:?}", e))?;

    let resp: Response = resp_value
        .dyn_into()
        .map_err(|_| "response is not a Response".to_string())?;

    let text = JsFuture::from(resp.text().map_err(|e| format!("{:?}", e))?)
        .await
        .map_err(|e| format!("text error: {:?}", e))?;

    let text_str = text.as_string().unwrap_or_default();

    if !resp.ok() {
        return Err(format!(
            "{} {}: {}",
            resp.status(),
            resp.status_text(),
            text_str
        ));
    }

    if text_str.trim().is_empty() {
        return Ok(serde_json::Value::Null);
    }

    serde_json::from_str(&text_str)
        .map_err(|e| format!("JSON parse error: {}, raw: {}", e, text_str))
}

/// GET /account/:address — the remote entry list.
pub async fn fetch_account(
    els: &Elements,
    account: &AccountAddress,
) -> Result<GifAccountResponse, String> {
    let value = request(els, &format!("/account/{}", account.0), "GET", None).await?;
    serde_json::from_value(value).map_err(|e| format!("unexpected account shape: {}", e))
}

/// POST /program/:method — one remote program invocation.
pub async fn invoke(els: &Elements, invocation: &InvokeRequest) -> Result<(), String> {
    let body = serde_json::to_string(invocation).map_err(|e| e.to_string())?;
    request(
        els,
        &format!("/program/{}", invocation.method),
        "POST",
        Some(body),
    )
    .await?;
    Ok(())
}
