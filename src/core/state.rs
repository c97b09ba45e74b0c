//! # Application State
//!
//! Core business state for Herald. Domain logic only; presentation state
//! (cursor, overlay visibility) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── project_id: String                // target project for messages.create
//! ├── value: String                     // form value, reset on success
//! ├── dirty: bool                       // user has edited since the last reset
//! ├── focused: bool                     // styling only
//! ├── pending: Option<RequestId>        // in-flight submission token
//! ├── last_error: Option<ErrorDetails>  // most recent mutation failure
//! ├── usage: Option<UsageSnapshot>      // last loaded quota
//! ├── route: Route                      // current screen
//! ├── toasts: ToastQueue                // transient notifications
//! └── disposed: bool                    // completions ignored once set
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::fmt;
use std::time::Duration;

use uuid::Uuid;

use crate::core::error::{ErrorDetails, ErrorKind, MutationError};
use crate::core::form::{self, ValidationError};
use crate::core::toast::ToastQueue;
use crate::rpc::{CreateMessageInput, UsageSnapshot};

/// Ownership token for one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Screens the app can navigate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Form,
    Pricing,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Form => "/",
            Route::Pricing => "/pricing",
        }
    }
}

pub struct App {
    pub project_id: String,
    pub value: String,
    pub dirty: bool,
    pub focused: bool,
    pub pending: Option<RequestId>,
    pub last_error: Option<ErrorDetails>,
    pub usage: Option<UsageSnapshot>,
    pub route: Route,
    pub toasts: ToastQueue,
    pub disposed: bool,
}

impl App {
    pub fn new(project_id: String, toast_duration: Duration) -> Self {
        Self {
            project_id,
            value: String::new(),
            dirty: false,
            focused: true,
            pending: None,
            last_error: None,
            usage: None,
            route: Route::default(),
            toasts: ToastQueue::new(toast_duration),
            disposed: false,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.pending.is_some()
    }

    /// Inline validation result for the current value.
    pub fn validation(&self) -> Result<(), ValidationError> {
        form::validate(&self.value)
    }

    /// Submit is enabled only for a valid value with nothing in flight.
    pub fn can_submit(&self) -> bool {
        !self.disposed && !self.is_submitting() && self.validation().is_ok()
    }

    /// Build the `messages.create` input from the current value.
    pub fn submission(&self) -> Result<CreateMessageInput, MutationError> {
        self.validation().map_err(MutationError::from)?;
        Ok(CreateMessageInput {
            value: self.value.clone(),
            project_id: self.project_id.clone(),
        })
    }

    pub fn has_error(&self) -> bool {
        self.last_error.is_some()
    }

    /// Kind of the last failure, if any.
    pub fn last_error_kind(&self) -> Option<ErrorKind> {
        self.last_error.as_ref().map(|d| d.full_error.kind)
    }
}
