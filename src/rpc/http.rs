//! JSON-over-HTTP client for the project backend.
//!
//! Procedures are addressed by dotted path under the base URL:
//! - mutations: `POST {base_url}/messages.create` with the input as the JSON body
//! - queries:   `GET {base_url}/usage.status`
//!
//! Responses use the envelope `{"result":{"data": ...}}`. Backends with a
//! serializing transformer wrap the payload once more in `{"json": ...}`;
//! both shapes are accepted. Errors arrive as `{"error":{"message", "data":{"code"}}}`,
//! again optionally `json`-wrapped.

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::client::{RpcClient, RpcError};
use super::types::{CreateMessageInput, ErrorCode, Message, UsageSnapshot};

const CREATE_MESSAGE_PATH: &str = "messages.create";
const USAGE_STATUS_PATH: &str = "usage.status";
/// Longest message taken from a non-JSON error body; the full text stays in `body`.
const MAX_TEXT_MESSAGE_CHARS: usize = 200;

/// HTTP implementation of [`RpcClient`].
pub struct HttpRpcClient {
    base_url: String,
    auth_token: Option<String>,
    client: reqwest::Client,
}

impl HttpRpcClient {
    /// Creates a client rooted at `base_url` (e.g. `http://localhost:3000/api/trpc`).
    ///
    /// Returns `RpcError::Config` if the URL is not http(s).
    pub fn new(base_url: String, auth_token: Option<String>) -> Result<Self, RpcError> {
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(RpcError::Config(format!(
                "base URL must start with http:// or https://, got '{base_url}'"
            )));
        }
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_token,
            client: reqwest::Client::new(),
        })
    }

    fn url(&self, procedure: &str) -> String {
        format!("{}/{}", self.base_url, procedure)
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth_token {
            Some(token) => builder.header("Authorization", format!("Bearer {token}")),
            None => builder,
        }
    }

    /// Sends a prepared request and decodes the envelope into `T`.
    async fn call<T: DeserializeOwned>(
        &self,
        procedure: &str,
        builder: reqwest::RequestBuilder,
    ) -> Result<T, RpcError> {
        let response = self
            .authorize(builder)
            .send()
            .await
            .map_err(|e| RpcError::Network(e.to_string()))?;

        let status = response.status();
        debug!("{} response status: {}", procedure, status);

        let text = response
            .text()
            .await
            .map_err(|e| RpcError::Network(e.to_string()))?;

        if !status.is_success() {
            warn!("{} failed: {} - {}", procedure, status.as_u16(), text);
            return Err(decode_error(status.as_u16(), &text));
        }

        let body: Value = serde_json::from_str(&text)
            .map_err(|e| RpcError::Parse(format!("{procedure}: invalid JSON: {e}")))?;

        // Some backends report errors with a 200 status
        if body.get("error").is_some() {
            warn!("{} returned an error envelope with HTTP {}", procedure, status);
            return Err(decode_error(status.as_u16(), &text));
        }

        decode_result(procedure, body)
    }
}

/// Extracts `result.data` (or `result.data.json`) and deserializes it.
fn decode_result<T: DeserializeOwned>(procedure: &str, body: Value) -> Result<T, RpcError> {
    let data = body
        .pointer("/result/data/json")
        .or_else(|| body.pointer("/result/data"))
        .cloned()
        .ok_or_else(|| RpcError::Parse(format!("{procedure}: missing result.data")))?;

    serde_json::from_value(data).map_err(|e| RpcError::Parse(format!("{procedure}: {e}")))
}

/// Builds an `RpcError::Api` from a failed response body.
///
/// A 429 without a structured code is still treated as a rate limit.
pub(crate) fn decode_error(status: u16, text: &str) -> RpcError {
    let body: Value =
        serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()));

    let error = body
        .pointer("/error/json")
        .or_else(|| body.get("error"))
        .unwrap_or(&body);

    let message = error
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .or_else(|| body.as_str().and_then(summarize_text))
        .unwrap_or_else(|| format!("request failed with HTTP {status}"));

    let code = error
        .pointer("/data/code")
        .and_then(Value::as_str)
        .map(ErrorCode::from_wire)
        .or_else(|| (status == 429).then_some(ErrorCode::TooManyRequests));

    RpcError::Api {
        status,
        code,
        message,
        body,
    }
}

/// First non-blank line of a plain-text body, capped at `MAX_TEXT_MESSAGE_CHARS`.
fn summarize_text(text: &str) -> Option<String> {
    let line = text.lines().map(str::trim).find(|l| !l.is_empty())?;
    if line.chars().count() <= MAX_TEXT_MESSAGE_CHARS {
        return Some(line.to_string());
    }
    let mut summary: String = line.chars().take(MAX_TEXT_MESSAGE_CHARS - 1).collect();
    summary.push('…');
    Some(summary)
}

#[async_trait]
impl RpcClient for HttpRpcClient {
    fn name(&self) -> &str {
        "http"
    }

    async fn create_message(&self, input: &CreateMessageInput) -> Result<Message, RpcError> {
        info!(
            "messages.create: project={}, value_len={}",
            input.project_id,
            input.value.chars().count()
        );
        let builder = self.client.post(self.url(CREATE_MESSAGE_PATH)).json(input);
        self.call(CREATE_MESSAGE_PATH, builder).await
    }

    async fn usage_status(&self) -> Result<UsageSnapshot, RpcError> {
        debug!("usage.status");
        let builder = self.client.get(self.url(USAGE_STATUS_PATH));
        self.call(USAGE_STATUS_PATH, builder).await
    }
}
