use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Input for the `messages.create` procedure.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateMessageInput {
    pub value: String,
    pub project_id: String,
}

/// Who authored a message.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageRole {
    #[default]
    User,
    Assistant,
}

/// A message as returned by `messages.create`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub role: MessageRole,
    pub project_id: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Quota snapshot returned by `usage.status`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UsageSnapshot {
    pub remaining_points: u32,
    pub ms_before_next: u64,
}

/// Structured error code carried in an RPC error's `data.code` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorCode {
    TooManyRequests,
    Unauthorized,
    Forbidden,
    NotFound,
    BadRequest,
    InternalServerError,
    Other(String),
}

impl ErrorCode {
    /// Parses the wire spelling (e.g. `"TOO_MANY_REQUESTS"`).
    pub fn from_wire(code: &str) -> Self {
        match code {
            "TOO_MANY_REQUESTS" => ErrorCode::TooManyRequests,
            "UNAUTHORIZED" => ErrorCode::Unauthorized,
            "FORBIDDEN" => ErrorCode::Forbidden,
            "NOT_FOUND" => ErrorCode::NotFound,
            "BAD_REQUEST" => ErrorCode::BadRequest,
            "INTERNAL_SERVER_ERROR" => ErrorCode::InternalServerError,
            other => ErrorCode::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ErrorCode::TooManyRequests => "TOO_MANY_REQUESTS",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::InternalServerError => "INTERNAL_SERVER_ERROR",
            ErrorCode::Other(code) => code,
        }
    }

    pub fn is_rate_limit(&self) -> bool {
        matches!(self, ErrorCode::TooManyRequests)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_input_uses_camel_case() {
        let input = CreateMessageInput {
            value: "hi".to_string(),
            project_id: "p1".to_string(),
        };
        let json = serde_json::to_string(&input).unwrap();
        assert_eq!(json, r#"{"value":"hi","projectId":"p1"}"#);
    }

    #[test]
    fn test_message_deserializes_backend_shape() {
        let json = r#"{
            "id": "m1",
            "content": "hello",
            "role": "USER",
            "projectId": "p1",
            "createdAt": "2025-01-15T10:00:00Z"
        }"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert_eq!(msg.id, "m1");
        assert_eq!(msg.role, MessageRole::User);
        assert_eq!(msg.project_id, "p1");
        assert!(msg.created_at.is_some());
    }

    #[test]
    fn test_message_optional_fields_default() {
        let json = r#"{"id":"m1","content":"x","projectId":"p1"}"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert_eq!(msg.role, MessageRole::User);
        assert_eq!(msg.created_at, None);
    }

    #[test]
    fn test_usage_snapshot_field_names() {
        let usage: UsageSnapshot =
            serde_json::from_str(r#"{"remainingPoints":3,"msBeforeNext":60000}"#).unwrap();
        assert_eq!(usage.remaining_points, 3);
        assert_eq!(usage.ms_before_next, 60_000);
    }

    #[test]
    fn test_error_code_wire_names() {
        assert_eq!(ErrorCode::from_wire("TOO_MANY_REQUESTS"), ErrorCode::TooManyRequests);
        assert!(ErrorCode::from_wire("TOO_MANY_REQUESTS").is_rate_limit());
        assert!(!ErrorCode::from_wire("UNAUTHORIZED").is_rate_limit());

        let custom = ErrorCode::from_wire("PAYLOAD_TOO_LARGE");
        assert_eq!(custom, ErrorCode::Other("PAYLOAD_TOO_LARGE".to_string()));
        assert_eq!(custom.as_str(), "PAYLOAD_TOO_LARGE");
    }
}
