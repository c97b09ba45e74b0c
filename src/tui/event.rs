use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq)]
pub enum TuiEvent {
    // Core actions (passed to core::update)
    ForceQuit, // Ctrl+C
    Submit,    // Ctrl+Enter / Cmd+Enter / Ctrl+J

    // TUI-local events (handled directly in TUI)
    InputChar(char),
    Paste(String), // Bracketed paste - preserves newlines
    Newline,       // Plain Enter inserts a line break
    Backspace,
    Delete,
    CursorLeft,
    CursorRight,
    CursorUp,
    CursorDown,
    CursorHome,
    CursorEnd,
    Escape,
    ToggleFocus,      // Tab
    OpenErrorDetails, // Ctrl+E
    MouseClick(u16, u16),
    Resize,
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(std::time::Duration::ZERO)
}

/// Poll for an event, blocking up to `timeout`.
pub fn poll_event_timeout(timeout: std::time::Duration) -> Option<TuiEvent> {
    if !event::poll(timeout).unwrap_or(false) {
        return None;
    }
    match event::read().ok()? {
        Event::Key(key_event) => {
            log::debug!(
                "Key event: {:?} with modifiers {:?}",
                key_event.code,
                key_event.modifiers
            );
            map_key(key_event)
        }
        Event::Mouse(mouse_event) => match mouse_event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                Some(TuiEvent::MouseClick(mouse_event.column, mouse_event.row))
            }
            _ => None,
        },
        Event::Paste(data) => Some(TuiEvent::Paste(data)),
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}

/// Translate a key press into a `TuiEvent`. Releases are dropped; repeats
/// map like presses so holding Backspace or an arrow key keeps acting.
pub fn map_key(key_event: KeyEvent) -> Option<TuiEvent> {
    if key_event.kind == KeyEventKind::Release {
        return None;
    }
    let submit_modifier = KeyModifiers::CONTROL | KeyModifiers::SUPER | KeyModifiers::META;
    match (key_event.modifiers, key_event.code) {
        (m, KeyCode::Char('c')) if m.contains(KeyModifiers::CONTROL) => Some(TuiEvent::ForceQuit),
        // Ctrl+Enter / Cmd+Enter (needs keyboard enhancement to be distinguishable)
        (m, KeyCode::Enter) if m.intersects(submit_modifier) => Some(TuiEvent::Submit),
        // Legacy terminals send Ctrl+Enter as Ctrl+J (ASCII LF)
        (m, KeyCode::Char('j')) if m.contains(KeyModifiers::CONTROL) => Some(TuiEvent::Submit),
        (m, KeyCode::Char('e')) if m.contains(KeyModifiers::CONTROL) => {
            Some(TuiEvent::OpenErrorDetails)
        }
        (m, KeyCode::Char(_)) if m.contains(KeyModifiers::CONTROL) => None,
        (_, KeyCode::Char(c)) => Some(TuiEvent::InputChar(c)),
        (_, KeyCode::Enter) => Some(TuiEvent::Newline),
        (_, KeyCode::Backspace) => Some(TuiEvent::Backspace),
        (_, KeyCode::Delete) => Some(TuiEvent::Delete),
        (_, KeyCode::Left) => Some(TuiEvent::CursorLeft),
        (_, KeyCode::Right) => Some(TuiEvent::CursorRight),
        (_, KeyCode::Up) => Some(TuiEvent::CursorUp),
        (_, KeyCode::Down) => Some(TuiEvent::CursorDown),
        (_, KeyCode::Home) => Some(TuiEvent::CursorHome),
        (_, KeyCode::End) => Some(TuiEvent::CursorEnd),
        (_, KeyCode::Tab) => Some(TuiEvent::ToggleFocus),
        (_, KeyCode::Esc) => Some(TuiEvent::Escape),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_ctrl_enter_submits() {
        assert_eq!(
            map_key(key(KeyCode::Enter, KeyModifiers::CONTROL)),
            Some(TuiEvent::Submit)
        );
    }

    #[test]
    fn test_cmd_enter_submits() {
        assert_eq!(
            map_key(key(KeyCode::Enter, KeyModifiers::SUPER)),
            Some(TuiEvent::Submit)
        );
    }

    #[test]
    fn test_ctrl_j_submits() {
        assert_eq!(
            map_key(key(KeyCode::Char('j'), KeyModifiers::CONTROL)),
            Some(TuiEvent::Submit)
        );
    }

    #[test]
    fn test_plain_enter_is_newline() {
        assert_eq!(
            map_key(key(KeyCode::Enter, KeyModifiers::NONE)),
            Some(TuiEvent::Newline)
        );
        assert_eq!(
            map_key(key(KeyCode::Enter, KeyModifiers::SHIFT)),
            Some(TuiEvent::Newline)
        );
    }

    #[test]
    fn test_ctrl_c_quits() {
        assert_eq!(
            map_key(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(TuiEvent::ForceQuit)
        );
    }

    #[test]
    fn test_shifted_char_is_input() {
        assert_eq!(
            map_key(key(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            Some(TuiEvent::InputChar('A'))
        );
    }

    #[test]
    fn test_unbound_ctrl_char_is_dropped() {
        assert_eq!(map_key(key(KeyCode::Char('x'), KeyModifiers::CONTROL)), None);
    }

    #[test]
    fn test_release_is_ignored() {
        let mut release = key(KeyCode::Char('a'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(map_key(release), None);
    }

    #[test]
    fn test_repeat_maps_like_press() {
        let mut repeat = key(KeyCode::Backspace, KeyModifiers::NONE);
        repeat.kind = KeyEventKind::Repeat;
        assert_eq!(map_key(repeat), Some(TuiEvent::Backspace));
    }
}
