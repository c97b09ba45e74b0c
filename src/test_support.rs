//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::rpc::{CreateMessageInput, Message, MessageRole, RpcClient, RpcError, UsageSnapshot};

/// An in-memory client that records calls and returns canned results.
pub struct FakeRpcClient {
    error: Option<RpcError>,
    usage: UsageSnapshot,
    create_calls: Mutex<Vec<CreateMessageInput>>,
}

impl FakeRpcClient {
    /// Every call succeeds; created messages echo their input.
    pub fn succeeding() -> Self {
        Self {
            error: None,
            usage: UsageSnapshot {
                remaining_points: 5,
                ms_before_next: 60_000,
            },
            create_calls: Mutex::new(Vec::new()),
        }
    }

    /// Every call fails with `error`.
    pub fn failing(error: RpcError) -> Self {
        Self {
            error: Some(error),
            ..Self::succeeding()
        }
    }

    pub fn with_usage(mut self, usage: UsageSnapshot) -> Self {
        self.usage = usage;
        self
    }

    pub fn create_calls(&self) -> Vec<CreateMessageInput> {
        self.create_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RpcClient for FakeRpcClient {
    fn name(&self) -> &str {
        "fake"
    }

    async fn create_message(&self, input: &CreateMessageInput) -> Result<Message, RpcError> {
        self.create_calls.lock().unwrap().push(input.clone());
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        Ok(Message {
            id: "msg-1".to_string(),
            content: input.value.clone(),
            role: MessageRole::User,
            project_id: input.project_id.clone(),
            created_at: None,
        })
    }

    async fn usage_status(&self) -> Result<UsageSnapshot, RpcError> {
        match &self.error {
            Some(err) => Err(err.clone()),
            None => Ok(self.usage),
        }
    }
}

/// Creates a test App for project `test-project`.
pub fn test_app() -> crate::core::state::App {
    crate::core::state::App::new("test-project".to_string(), Duration::from_secs(4))
}
