//! Fetch client for the chat API
//!
//! Thin typed wrappers over `window.fetch`. Every failure comes back as
//! a `String` the caller can log and turn into an apology bubble; no
//! error escapes into the host page.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use crate::api::{ChatRequest, ChatResponse, LatestSession, SessionList, SessionMessages};
use crate::config::ApiConfig;

async fn fetch_text(method: &str, url: &str, body: Option<String>) -> Result<String, String> {
    let init = RequestInit::new();
    init.set_method(method);
    init.set_mode(RequestMode::Cors);
    if let Some(body) = body {
        init.set_body(&JsValue::from_str(&body));
    }

    let request = Request::new_with_str_and_init(url, &init)
        .map_err(|_| format!("invalid request for {}", url))?;
    if method == "POST" {
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(|_| "failed to set request headers".to_string())?;
    }

    let window = web_sys::window().ok_or_else(|| "no window".to_string())?;
    let response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|_| format!("network error reaching {}", url))?;
    let response: Response = response
        .dyn_into()
        .map_err(|_| "fetch returned a non-Response value".to_string())?;

    if !response.ok() {
        return Err(format!("{} returned HTTP {}", url, response.status()));
    }

    let text = JsFuture::from(
        response
            .text()
            .map_err(|_| "response body unreadable".to_string())?,
    )
    .await
    .map_err(|_| "response body unreadable".to_string())?;
    text.as_string()
        .ok_or_else(|| "response body was not text".to_string())
}

async fn get_json<T: serde::de::DeserializeOwned>(url: &str) -> Result<T, String> {
    let text = fetch_text("GET", url, None).await?;
    serde_json::from_str(&text).map_err(|e| format!("bad response from {}: {}", url, e))
}

/// `POST /chat`.
pub async fn post_chat(config: &ApiConfig, request: &ChatRequest) -> Result<ChatResponse, String> {
    let url = config.endpoint("/chat");
    let body = serde_json::to_string(request).map_err(|e| e.to_string())?;
    let text = fetch_text("POST", &url, Some(body)).await?;
    serde_json::from_str(&text).map_err(|e| format!("bad response from {}: {}", url, e))
}

/// `GET /sessions`.
pub async fn get_sessions(config: &ApiConfig) -> Result<SessionList, String> {
    get_json(&config.endpoint("/sessions")).await
}

/// `GET /sessions/latest`.
pub async fn get_latest_session(config: &ApiConfig) -> Result<LatestSession, String> {
    get_json(&config.endpoint("/sessions/latest")).await
}

/// `GET /sessions/{id}/messages`.
pub async fn get_session_messages(
    config: &ApiConfig,
    session_id: &str,
) -> Result<SessionMessages, String> {
    get_json(&config.endpoint(&format!("/sessions/{}/messages", session_id))).await
}

/// `GET /healthz` against an arbitrary base, for the config panel's
/// connection test.
pub async fn health_check(base_url: &str) -> Result<(), String> {
    let url = format!("{}/healthz", base_url.trim_end_matches('/'));
    fetch_text("GET", &url, None).await.map(|_| ())
}
