//! Transient error notifications shown in the corner of the screen.
//!
//! Each toast lives for a fixed duration from the moment it is pushed.
//! Expiry is driven by the caller passing `now`, keeping this module free of clocks.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Toasts beyond this many are dropped oldest-first.
const MAX_TOASTS: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub message: String,
    pub expires_at: Instant,
}

#[derive(Debug)]
pub struct ToastQueue {
    toasts: VecDeque<Toast>,
    ttl: Duration,
}

impl ToastQueue {
    pub fn new(ttl: Duration) -> Self {
        Self {
            toasts: VecDeque::new(),
            ttl,
        }
    }

    pub fn push(&mut self, message: impl Into<String>, now: Instant) {
        if self.toasts.len() == MAX_TOASTS {
            self.toasts.pop_front();
        }
        self.toasts.push_back(Toast {
            message: message.into(),
            expires_at: now + self.ttl,
        });
    }

    /// Drop expired toasts. Returns true if anything was removed.
    pub fn prune(&mut self, now: Instant) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.expires_at > now);
        self.toasts.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}
