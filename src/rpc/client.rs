use std::fmt;

use async_trait::async_trait;

use super::types::{CreateMessageInput, ErrorCode, Message, UsageSnapshot};

/// Errors that can occur while calling the RPC backend.
#[derive(Debug, Clone)]
pub enum RpcError {
    /// Client misconfigured (bad base URL, unusable token).
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// The backend answered with an error envelope.
    Api {
        status: u16,
        code: Option<ErrorCode>,
        message: String,
        /// The decoded error body, kept whole for the details dialog.
        body: serde_json::Value,
    },
    /// The response body could not be decoded.
    Parse(String),
}

impl RpcError {
    /// Structured code of an API error, if the backend supplied one.
    pub fn code(&self) -> Option<&ErrorCode> {
        match self {
            RpcError::Api { code, .. } => code.as_ref(),
            _ => None,
        }
    }

    /// Short human-readable message without the category prefix.
    pub fn message(&self) -> &str {
        match self {
            RpcError::Config(msg) | RpcError::Network(msg) | RpcError::Parse(msg) => msg,
            RpcError::Api { message, .. } => message,
        }
    }
}

impl fmt::Display for RpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RpcError::Config(msg) => write!(f, "config error: {msg}"),
            RpcError::Network(msg) => write!(f, "network error: {msg}"),
            RpcError::Api {
                status,
                code: Some(code),
                message,
                ..
            } => write!(f, "API error (HTTP {status}, {}): {message}", code.as_str()),
            RpcError::Api { status, message, .. } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            RpcError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for RpcError {}

/// The backend procedures this client calls.
#[async_trait]
pub trait RpcClient: Send + Sync {
    /// Returns the name of the client, used in logs.
    fn name(&self) -> &str;

    /// `messages.create`: store a new message in the given project.
    async fn create_message(&self, input: &CreateMessageInput) -> Result<Message, RpcError>;

    /// `usage.status`: current quota for the caller.
    async fn usage_status(&self) -> Result<UsageSnapshot, RpcError>;
}
