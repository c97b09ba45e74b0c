//! # Core Application Logic
//!
//! This module contains Herald's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (form, errors) │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No UI. I/O only via    │
//!                    │  injected RpcClient.    │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌────────────┐
//!     │    TUI     │                          │    RPC     │
//!     │  Adapter   │                          │  (reqwest) │
//!     │ (ratatui)  │                          │            │
//!     └────────────┘                          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`form`]: Length validation for the message value
//! - [`error`]: Tagged mutation errors and the retained error details
//! - [`cache`]: Query keys and the invalidation capability
//! - [`mutation`]: Backend calls folded into actions
//! - [`toast`]: Transient notifications
//! - [`config`]: Layered settings

pub mod action;
pub mod cache;
pub mod config;
pub mod error;
pub mod form;
pub mod mutation;
pub mod state;
pub mod toast;
