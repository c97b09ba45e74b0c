//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! translates keyboard events into `core::Action` values and performs the
//! `Effect`s the reducer asks for.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Background Work
//!
//! Backend calls run on tokio tasks and report back over an `mpsc` channel
//! as ordinary `Action`s. Each `messages.create` carries the `RequestId`
//! minted by the reducer, so a late answer for a request the form no longer
//! owns is dropped there. Abort handles are kept so quitting cancels
//! anything still in flight.
//!
//! ## Redraw Strategy
//!
//! Idle, the loop sleeps up to 500ms and only redraws on events. While toasts
//! are visible or a request is in flight it polls every 100ms so expiry and
//! completion show up promptly.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use tokio::task::AbortHandle;

use crate::core::action::{Action, Effect, update};
use crate::core::cache::{CachedValue, QueryCache, QueryClient, QueryKey};
use crate::core::config::ResolvedConfig;
use crate::core::mutation;
use crate::core::state::{App, RequestId, Route};
use crate::rpc::{CreateMessageInput, HttpRpcClient, RpcClient, RpcError};
use crate::tui::component::EventHandler;
use crate::tui::components::{ErrorDialogState, InputBox, InputEvent};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const IDLE_POLL: Duration = Duration::from_millis(500);
const ACTIVE_POLL: Duration = Duration::from_millis(100);

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub input_box: InputBox,
    pub error_dialog: ErrorDialogState,
    /// Web origin used to build the pricing link
    pub web_url: String,
}

impl TuiState {
    pub fn new(web_url: String) -> Self {
        Self {
            input_box: InputBox::new(),
            error_dialog: ErrorDialogState::default(),
            web_url,
        }
    }

    /// Copy the props each component needs out of `App`.
    fn sync_props(&mut self, app: &App) {
        self.input_box.set_text(&app.value);
        self.input_box.focused = app.focused && !self.error_dialog.open;
        self.input_box.submit_enabled = app.can_submit();
        self.input_box.submitting = app.is_submitting();
        self.input_box.has_error = app.has_error();
        // Untouched forms don't nag about the empty value
        self.input_box.validation = if app.dirty {
            app.validation().err().map(|e| e.to_string())
        } else {
            None
        };
        if !app.has_error() {
            self.error_dialog.open = false;
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol lets Ctrl+Enter arrive as a distinct key;
        // terminals without it ignore the request
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// Build the RPC client from a resolved config.
pub fn build_client(config: &ResolvedConfig) -> Result<Arc<dyn RpcClient>, RpcError> {
    let client = HttpRpcClient::new(config.base_url.clone(), config.auth_token.clone())?;
    Ok(Arc::new(client))
}

/// Performs effects and owns everything background work needs.
struct Runtime {
    client: Arc<dyn RpcClient>,
    tx: mpsc::Sender<Action>,
    cache: QueryCache,
    abort_handles: Vec<AbortHandle>,
}

impl Runtime {
    /// Run `action` through the reducer and perform its effects.
    /// Returns true when the app asked to quit.
    fn dispatch(&mut self, app: &mut App, action: Action) -> bool {
        if let Action::UsageLoaded(usage) = &action {
            self.cache
                .set(QueryKey::UsageStatus, CachedValue::Usage(*usage));
        }

        let mut quit = false;
        for effect in update(app, action) {
            match effect {
                Effect::CreateMessage { id, input } => self.spawn_create(id, input),
                Effect::Invalidate(key) => self.cache.invalidate(&key),
                Effect::Quit => quit = true,
            }
        }
        self.refetch_stale();
        quit
    }

    fn refetch_stale(&mut self) {
        for key in self.cache.take_stale() {
            match key {
                QueryKey::UsageStatus => self.spawn_usage_fetch(),
                QueryKey::Messages { .. } => {
                    debug!("No view shows {}, nothing to refetch", key);
                }
            }
        }
    }

    fn spawn_create(&mut self, id: RequestId, input: CreateMessageInput) {
        info!("Spawning messages.create for request {}", id);
        let client = self.client.clone();
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            let action = mutation::create_message(client.as_ref(), id, input).await;
            if tx.send(action).is_err() {
                warn!("Failed to report request {}: receiver dropped", id);
            }
        });
        self.track(handle.abort_handle());
    }

    fn spawn_usage_fetch(&mut self) {
        debug!("Fetching usage status");
        let client = self.client.clone();
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            let action = mutation::fetch_usage(client.as_ref()).await;
            if tx.send(action).is_err() {
                warn!("Failed to report usage status: receiver dropped");
            }
        });
        self.track(handle.abort_handle());
    }

    fn track(&mut self, handle: AbortHandle) {
        self.abort_handles.retain(|h| !h.is_finished());
        self.abort_handles.push(handle);
    }

    fn abort_all(&mut self) {
        for handle in self.abort_handles.drain(..) {
            handle.abort();
        }
    }
}

/// Translate a terminal event into actions for the form screen.
fn handle_form_event(event: TuiEvent, app: &App, tui: &mut TuiState) -> Vec<Action> {
    match event {
        TuiEvent::Escape => {
            if app.focused {
                vec![Action::SetFocus(false)]
            } else {
                Vec::new()
            }
        }
        TuiEvent::ToggleFocus => vec![Action::SetFocus(!app.focused)],
        TuiEvent::OpenErrorDetails => {
            if app.has_error() {
                tui.error_dialog.open = true;
            }
            Vec::new()
        }
        // Clicks hit the controls whether or not the field has focus
        TuiEvent::MouseClick(..) => form_input_actions(&event, app, tui),
        // Typing into a blurred form focuses it first
        TuiEvent::InputChar(_) | TuiEvent::Paste(_) if !app.focused => {
            let mut actions = vec![Action::SetFocus(true)];
            actions.extend(form_input_actions(&event, app, tui));
            actions
        }
        _ if app.focused => form_input_actions(&event, app, tui),
        _ => Vec::new(),
    }
}

fn form_input_actions(event: &TuiEvent, app: &App, tui: &mut TuiState) -> Vec<Action> {
    match tui.input_box.handle_event(event) {
        Some(InputEvent::Submit) => vec![Action::Submit],
        Some(InputEvent::ContentChanged) => {
            vec![Action::InputChanged(tui.input_box.buffer.clone())]
        }
        Some(InputEvent::OpenErrorDetails) => {
            if app.has_error() {
                tui.error_dialog.open = true;
            }
            Vec::new()
        }
        Some(InputEvent::CursorMoved) | None => Vec::new(),
    }
}

/// Translate one terminal event into actions, routing overlays first.
fn handle_event(event: TuiEvent, app: &App, tui: &mut TuiState) -> Vec<Action> {
    if matches!(event, TuiEvent::ForceQuit) {
        return vec![Action::Quit];
    }
    if tui.error_dialog.open {
        tui.error_dialog.handle_event(&event);
        return Vec::new();
    }
    match app.route {
        Route::Pricing => match event {
            TuiEvent::Escape => vec![Action::Navigate(Route::Form)],
            _ => Vec::new(),
        },
        Route::Form => handle_form_event(event, app, tui),
    }
}

pub fn run(config: ResolvedConfig) -> Result<(), Box<dyn std::error::Error>> {
    let client = build_client(&config)?;
    info!("Using {} client at {}", client.name(), config.base_url);

    let mut app = App::new(config.project_id.clone(), config.toast_duration);
    let mut tui = TuiState::new(config.web_url.clone());

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let mut runtime = Runtime {
        client,
        tx,
        cache: QueryCache::new(),
        abort_handles: Vec::new(),
    };
    runtime.spawn_usage_fetch();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let mut needs_redraw = true;
    let mut should_quit = false;

    while !should_quit {
        if needs_redraw {
            tui.sync_props(&app);
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let timeout = if app.toasts.is_empty() && !app.is_submitting() {
            IDLE_POLL
        } else {
            ACTIVE_POLL
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain all pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if matches!(event, TuiEvent::Resize) {
                continue;
            }
            for action in handle_event(event, &app, &mut tui) {
                should_quit |= runtime.dispatch(&mut app, action);
            }
            // Keep the input box in step with the reducer between events
            tui.sync_props(&app);
        }

        // Handle background task results
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            should_quit |= runtime.dispatch(&mut app, action);
        }

        let toasts_before = app.toasts.len();
        runtime.dispatch(&mut app, Action::Tick(Instant::now()));
        if app.toasts.len() != toasts_before {
            needs_redraw = true;
        }
    }

    runtime.abort_all();
    ratatui::restore();
    info!("Herald shut down");
    Ok(())
}
