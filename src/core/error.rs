//! # Mutation Errors
//!
//! Failures are modelled as a tagged union rather than inspected dynamically:
//!
//! ```text
//! MutationError { kind, message, code?, raw }
//!   kind = Validation | Network | RateLimit
//! ```
//!
//! `ErrorDetails` is what the details dialog shows: the most recent failure
//! plus when it happened. It is replaced by the next failure and never cleared.

use chrono::{DateTime, Local};
use serde_json::Value;

use crate::core::form::ValidationError;
use crate::rpc::{ErrorCode, RpcError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Blocked client-side before any network call.
    Validation,
    /// Transport or backend failure.
    Network,
    /// Backend reported `TOO_MANY_REQUESTS`.
    RateLimit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MutationError {
    pub kind: ErrorKind,
    pub message: String,
    pub code: Option<ErrorCode>,
    /// Opaque payload for inspection (the decoded error body, or the error text).
    pub raw: Value,
}

impl MutationError {
    pub fn is_rate_limit(&self) -> bool {
        self.kind == ErrorKind::RateLimit
    }
}

impl From<ValidationError> for MutationError {
    fn from(err: ValidationError) -> Self {
        MutationError {
            kind: ErrorKind::Validation,
            message: err.to_string(),
            code: None,
            raw: Value::Null,
        }
    }
}

impl From<RpcError> for MutationError {
    fn from(err: RpcError) -> Self {
        let code = err.code().cloned();
        let kind = if code.as_ref().is_some_and(ErrorCode::is_rate_limit) {
            ErrorKind::RateLimit
        } else {
            ErrorKind::Network
        };
        let raw = match &err {
            RpcError::Api { body, .. } => body.clone(),
            other => Value::String(other.to_string()),
        };
        MutationError {
            kind,
            message: err.message().to_string(),
            code,
            raw,
        }
    }
}

/// The last mutation failure, as shown in the details dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorDetails {
    pub message: String,
    pub full_error: MutationError,
    pub timestamp: DateTime<Local>,
}

impl ErrorDetails {
    pub fn new(full_error: MutationError, timestamp: DateTime<Local>) -> Self {
        Self {
            message: full_error.message.clone(),
            full_error,
            timestamp,
        }
    }

    pub fn code(&self) -> Option<&ErrorCode> {
        self.full_error.code.as_ref()
    }
}
