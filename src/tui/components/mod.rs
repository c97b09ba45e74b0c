//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! Components in this directory follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as fields, built each frame:
//! - `UsageBanner`: project and remaining credits above the form
//! - `PricingScreen`: upgrade prompt after running out of credits
//! - `ToastStack`: transient error notifications
//! - `ErrorDialog`: details overlay for the last failure
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that manage local state and emit events:
//! - `InputBox`: the message form (buffer, cursor, controls)
//!
//! ## Props-Based Data Flow
//!
//! Components receive external data as "props", not by reading `App`
//! directly. The event loop copies what each component needs before drawing:
//!
//! ```rust,ignore
//! tui.input_box.submit_enabled = app.can_submit();
//! UsageBanner::new(app.project_id.clone(), app.usage).render(frame, area);
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── usage_banner.rs  (Project + credits line)
//! ├── input_box/       (Message form with counter and controls)
//! ├── toast.rs         (Toast stack)
//! ├── error_dialog.rs  (Error details overlay)
//! └── pricing.rs       (Out-of-credits screen)
//! ```

pub mod error_dialog;
pub mod input_box;
pub mod pricing;
pub mod toast;
pub mod usage_banner;

pub use error_dialog::{ErrorDialog, ErrorDialogState};
pub use input_box::{InputBox, InputEvent};
pub use pricing::PricingScreen;
pub use toast::ToastStack;
pub use usage_banner::UsageBanner;
