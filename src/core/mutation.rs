//! # Mutation Client
//!
//! Runs the backend calls requested by `Effect`s and folds each outcome into
//! the `Action` the reducer expects. These are the only async functions in
//! `core`; the adapter decides where they run.

use chrono::Local;
use log::{debug, warn};

use crate::core::action::Action;
use crate::core::error::MutationError;
use crate::core::state::RequestId;
use crate::rpc::{CreateMessageInput, RpcClient};

/// Call `messages.create` and report back under `id`.
pub async fn create_message(
    client: &dyn RpcClient,
    id: RequestId,
    input: CreateMessageInput,
) -> Action {
    debug!("Request {} via {} client", id, client.name());
    match client.create_message(&input).await {
        Ok(message) => Action::MutationSucceeded { id, message },
        Err(err) => {
            warn!("messages.create failed for request {}: {}", id, err);
            Action::MutationFailed {
                id,
                error: MutationError::from(err),
                at: Local::now(),
            }
        }
    }
}

/// Call `usage.status`.
pub async fn fetch_usage(client: &dyn RpcClient) -> Action {
    match client.usage_status().await {
        Ok(usage) => Action::UsageLoaded(usage),
        Err(err) => Action::UsageFailed(err),
    }
}
