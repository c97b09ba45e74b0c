//! # Actions
//!
//! Everything that can happen in Herald becomes an `Action`.
//! User presses Ctrl+Enter? That's `Action::Submit`.
//! The backend answers? That's `Action::MutationSucceeded { .. }`.
//!
//! The `update()` function takes the current state and an action, mutates the
//! state, and returns the side effects the caller must perform. No I/O here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Vec<Effect>
//! ```
//!
//! Submission lifecycle:
//!
//! ```text
//! Idle ──Submit──▶ Submitting ──Succeeded──▶ Idle            (value cleared)
//!                             └─Failed─────▶ Idle + Error    (value kept)
//! ```

use std::time::Instant;

use chrono::{DateTime, Local};
use log::{debug, info, warn};

use crate::core::cache::QueryKey;
use crate::core::error::{ErrorDetails, MutationError};
use crate::core::state::{App, RequestId, Route};
use crate::rpc::{CreateMessageInput, Message, RpcError, UsageSnapshot};

#[derive(Debug, Clone)]
pub enum Action {
    /// The form value changed (keystroke, paste, deletion).
    InputChanged(String),
    /// Focus gained or lost. Styling only.
    SetFocus(bool),
    /// Submit control activated (button or Ctrl/Cmd+Enter).
    Submit,
    MutationSucceeded {
        id: RequestId,
        message: Message,
    },
    MutationFailed {
        id: RequestId,
        error: MutationError,
        at: DateTime<Local>,
    },
    UsageLoaded(UsageSnapshot),
    UsageFailed(RpcError),
    Navigate(Route),
    /// Periodic tick for expiring toasts.
    Tick(Instant),
    Quit,
}

/// Side effects requested by `update()`.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Call `messages.create`; report back with the same id.
    CreateMessage {
        id: RequestId,
        input: CreateMessageInput,
    },
    /// Mark a cached query stale through the injected query client.
    Invalidate(QueryKey),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Vec<Effect> {
    if app.disposed {
        debug!("Ignoring {:?}: app disposed", action_name(&action));
        return Vec::new();
    }

    match action {
        Action::InputChanged(value) => {
            app.dirty = true;
            app.value = value;
            Vec::new()
        }
        Action::SetFocus(focused) => {
            app.focused = focused;
            Vec::new()
        }
        Action::Submit => submit(app),
        Action::MutationSucceeded { id, message } => {
            if app.pending != Some(id) {
                debug!("Ignoring stale success for request {}", id);
                return Vec::new();
            }
            info!("Message {} created in project {}", message.id, message.project_id);
            app.pending = None;
            app.value.clear();
            app.dirty = false;
            vec![
                Effect::Invalidate(QueryKey::Messages {
                    project_id: app.project_id.clone(),
                }),
                Effect::Invalidate(QueryKey::UsageStatus),
            ]
        }
        Action::MutationFailed { id, error, at } => {
            if app.pending != Some(id) {
                debug!("Ignoring stale failure for request {}", id);
                return Vec::new();
            }
            warn!(
                "Request {} failed ({:?}, code={:?}): {}",
                id,
                error.kind,
                error.code.as_ref().map(|c| c.as_str()),
                error.message
            );
            app.pending = None;
            app.toasts.push(error.message.clone(), Instant::now());
            if error.is_rate_limit() {
                info!("Rate limited, navigating to {}", Route::Pricing.path());
                app.route = Route::Pricing;
            }
            app.last_error = Some(ErrorDetails::new(error, at));
            Vec::new()
        }
        Action::UsageLoaded(usage) => {
            debug!(
                "Usage: {} points, {}ms before next",
                usage.remaining_points, usage.ms_before_next
            );
            app.usage = Some(usage);
            Vec::new()
        }
        Action::UsageFailed(err) => {
            // Keep whatever snapshot we had; the banner hides when there is none.
            warn!("Failed to load usage status: {}", err);
            Vec::new()
        }
        Action::Navigate(route) => {
            debug!("Navigating to {}", route.path());
            app.route = route;
            Vec::new()
        }
        Action::Tick(now) => {
            app.toasts.prune(now);
            Vec::new()
        }
        Action::Quit => {
            app.disposed = true;
            if let Some(id) = app.pending.take() {
                info!("Disposing with request {} still in flight", id);
            }
            vec![Effect::Quit]
        }
    }
}

fn submit(app: &mut App) -> Vec<Effect> {
    if let Some(id) = app.pending {
        debug!("Submit ignored: request {} in flight", id);
        return Vec::new();
    }
    let input = match app.submission() {
        Ok(input) => input,
        Err(err) => {
            debug!("Submit rejected ({:?}): {}", err.kind, err.message);
            return Vec::new();
        }
    };
    let id = RequestId::new();
    info!("Submitting request {} ({} chars)", id, input.value.chars().count());
    app.pending = Some(id);
    vec![Effect::CreateMessage { id, input }]
}

fn action_name(action: &Action) -> &'static str {
    match action {
        Action::InputChanged(_) => "InputChanged",
        Action::SetFocus(_) => "SetFocus",
        Action::Submit => "Submit",
        Action::MutationSucceeded { .. } => "MutationSucceeded",
        Action::MutationFailed { .. } => "MutationFailed",
        Action::UsageLoaded(_) => "UsageLoaded",
        Action::UsageFailed(_) => "UsageFailed",
        Action::Navigate(_) => "Navigate",
        Action::Tick(_) => "Tick",
        Action::Quit => "Quit",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ErrorKind;
    use crate::rpc::{ErrorCode, MessageRole};
    use crate::test_support::test_app;

    fn message(project_id: &str) -> Message {
        Message {
            id: "m1".to_string(),
            content: "hello".to_string(),
            role: MessageRole::User,
            project_id: project_id.to_string(),
            created_at: None,
        }
    }

    fn api_error(code: Option<ErrorCode>, message: &str) -> MutationError {
        MutationError::from(RpcError::Api {
            status: 400,
            code,
            message: message.to_string(),
            body: serde_json::Value::Null,
        })
    }

    /// Types a value and submits it, returning the minted request id.
    fn submit_value(app: &mut App, value: &str) -> RequestId {
        update(app, Action::InputChanged(value.to_string()));
        let effects = update(app, Action::Submit);
        match effects.as_slice() {
            [Effect::CreateMessage { id, .. }] => *id,
            other => panic!("Expected CreateMessage, got {:?}", other),
        }
    }

    #[test]
    fn test_input_changed_marks_dirty() {
        let mut app = test_app();
        update(&mut app, Action::InputChanged("a".to_string()));
        assert_eq!(app.value, "a");
        assert!(app.dirty);
    }

    #[test]
    fn test_focus_is_styling_only() {
        let mut app = test_app();
        update(&mut app, Action::InputChanged("hello".to_string()));
        update(&mut app, Action::SetFocus(false));
        assert!(!app.focused);
        assert!(app.can_submit());
    }

    #[test]
    fn test_submit_empty_is_rejected() {
        let mut app = test_app();
        let effects = update(&mut app, Action::Submit);
        assert!(effects.is_empty());
        assert!(!app.is_submitting());
    }

    #[test]
    fn test_submit_too_long_is_rejected() {
        let mut app = test_app();
        update(&mut app, Action::InputChanged("x".repeat(10_001)));
        let effects = update(&mut app, Action::Submit);
        assert!(effects.is_empty());
        assert!(!app.is_submitting());
    }

    #[test]
    fn test_submit_valid_spawns_request() {
        let mut app = test_app();
        update(&mut app, Action::InputChanged("hello".to_string()));
        let effects = update(&mut app, Action::Submit);

        assert_eq!(effects.len(), 1);
        match &effects[0] {
            Effect::CreateMessage { id, input } => {
                assert_eq!(app.pending, Some(*id));
                assert_eq!(input.value, "hello");
                assert_eq!(input.project_id, "test-project");
            }
            other => panic!("Expected CreateMessage, got {:?}", other),
        }
        // Value is kept until the backend confirms
        assert_eq!(app.value, "hello");
    }

    #[test]
    fn test_submit_while_pending_is_noop() {
        let mut app = test_app();
        let id = submit_value(&mut app, "first");
        let effects = update(&mut app, Action::Submit);
        assert!(effects.is_empty());
        assert_eq!(app.pending, Some(id));
    }

    #[test]
    fn test_success_clears_form_and_invalidates() {
        let mut app = test_app();
        let id = submit_value(&mut app, "hello");

        let effects = update(
            &mut app,
            Action::MutationSucceeded {
                id,
                message: message("test-project"),
            },
        );

        assert_eq!(
            effects,
            vec![
                Effect::Invalidate(QueryKey::Messages {
                    project_id: "test-project".to_string()
                }),
                Effect::Invalidate(QueryKey::UsageStatus),
            ]
        );
        assert!(app.value.is_empty());
        assert!(!app.dirty);
        assert!(!app.is_submitting());
        assert!(app.toasts.is_empty());
    }

    #[test]
    fn test_rate_limit_failure_navigates_to_pricing() {
        let mut app = test_app();
        let id = submit_value(&mut app, "hello");

        let effects = update(
            &mut app,
            Action::MutationFailed {
                id,
                error: api_error(Some(ErrorCode::TooManyRequests), "Out of credits"),
                at: Local::now(),
            },
        );

        assert!(effects.is_empty());
        assert_eq!(app.route, Route::Pricing);
        let details = app.last_error.as_ref().expect("error details retained");
        assert_eq!(details.code(), Some(&ErrorCode::TooManyRequests));
        assert_eq!(details.message, "Out of credits");
        assert_eq!(app.last_error_kind(), Some(ErrorKind::RateLimit));
        assert_eq!(app.toasts.len(), 1);
        // The form keeps the value so the user can resubmit later
        assert_eq!(app.value, "hello");
    }

    #[test]
    fn test_other_failure_toasts_without_navigation() {
        let mut app = test_app();
        let id = submit_value(&mut app, "hello");

        update(
            &mut app,
            Action::MutationFailed {
                id,
                error: api_error(Some(ErrorCode::InternalServerError), "boom"),
                at: Local::now(),
            },
        );

        assert_eq!(app.route, Route::Form);
        assert_eq!(app.toasts.iter().next().map(|t| t.message.as_str()), Some("boom"));
        assert_eq!(app.last_error_kind(), Some(ErrorKind::Network));
        assert!(!app.is_submitting());
    }

    #[test]
    fn test_later_failure_replaces_details() {
        let mut app = test_app();
        let first = submit_value(&mut app, "one");
        update(
            &mut app,
            Action::MutationFailed {
                id: first,
                error: api_error(None, "first"),
                at: Local::now(),
            },
        );
        let second = submit_value(&mut app, "two");
        update(
            &mut app,
            Action::MutationFailed {
                id: second,
                error: api_error(None, "second"),
                at: Local::now(),
            },
        );
        assert_eq!(app.last_error.as_ref().map(|d| d.message.as_str()), Some("second"));
    }

    #[test]
    fn test_success_keeps_previous_error_details() {
        let mut app = test_app();
        let first = submit_value(&mut app, "one");
        update(
            &mut app,
            Action::MutationFailed {
                id: first,
                error: api_error(None, "failed"),
                at: Local::now(),
            },
        );
        let second = submit_value(&mut app, "two");
        update(
            &mut app,
            Action::MutationSucceeded {
                id: second,
                message: message("test-project"),
            },
        );
        assert!(app.has_error());
    }

    #[test]
    fn test_stale_completion_is_ignored() {
        let mut app = test_app();
        let _id = submit_value(&mut app, "hello");

        let effects = update(
            &mut app,
            Action::MutationSucceeded {
                id: RequestId::new(),
                message: message("test-project"),
            },
        );

        assert!(effects.is_empty());
        assert!(app.is_submitting());
        assert_eq!(app.value, "hello");
    }

    #[test]
    fn test_completion_after_quit_is_ignored() {
        let mut app = test_app();
        let id = submit_value(&mut app, "hello");

        assert_eq!(update(&mut app, Action::Quit), vec![Effect::Quit]);
        let effects = update(
            &mut app,
            Action::MutationFailed {
                id,
                error: api_error(Some(ErrorCode::TooManyRequests), "late"),
                at: Local::now(),
            },
        );

        assert!(effects.is_empty());
        assert!(!app.has_error());
        assert_eq!(app.route, Route::Form);
        assert!(app.toasts.is_empty());
    }

    #[test]
    fn test_usage_failure_keeps_previous_snapshot() {
        let mut app = test_app();
        let usage = UsageSnapshot {
            remaining_points: 4,
            ms_before_next: 1000,
        };
        update(&mut app, Action::UsageLoaded(usage));
        update(
            &mut app,
            Action::UsageFailed(RpcError::Network("offline".to_string())),
        );
        assert_eq!(app.usage, Some(usage));
    }

    #[test]
    fn test_navigate_back_to_form() {
        let mut app = test_app();
        app.route = Route::Pricing;
        update(&mut app, Action::Navigate(Route::Form));
        assert_eq!(app.route, Route::Form);
    }

    #[test]
    fn test_tick_expires_toasts() {
        let mut app = test_app();
        let id = submit_value(&mut app, "hello");
        update(
            &mut app,
            Action::MutationFailed {
                id,
                error: api_error(None, "boom"),
                at: Local::now(),
            },
        );
        update(
            &mut app,
            Action::Tick(Instant::now() + std::time::Duration::from_secs(60)),
        );
        assert!(app.toasts.is_empty());
    }
}
