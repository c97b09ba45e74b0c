//! # InputBox Component
//!
//! The message form: a multi-line text field with a character counter, an
//! inline validation message and the `[ Send ]` control.
//!
//! ## Responsibilities
//!
//! - Capture text input and editing (backspace, delete, cursor movement, paste)
//! - Emit `Submit` for Ctrl/Cmd+Enter or a click on `[ Send ]`
//! - Emit `OpenErrorDetails` for a click on `[ Error details ]`
//! - Reflect focus, validity and in-flight state through styling
//!
//! ## State Management
//!
//! The buffer mirrors `App::value`: edits here are reported as
//! `ContentChanged`, and the parent pushes the reducer's value back with
//! `set_text` (which is how a successful submit clears the field).
//! Everything else is a prop refreshed by the parent every frame.

mod layout;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::core::form::MAX_VALUE_LEN;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use layout::{
    CursorState, MAX_VISIBLE_LINES, VERTICAL_OVERHEAD, inner_width, next_char_boundary,
    prev_char_boundary, visual_rows,
};

const SEND_LABEL: &str = "[ Send ]";
const SENDING_LABEL: &str = "[ Sending... ]";
const DETAILS_LABEL: &str = "[ Error details ]";

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Submit requested (shortcut or `[ Send ]`). The parent decides whether it is allowed.
    Submit,
    /// `[ Error details ]` clicked
    OpenErrorDetails,
    /// Buffer content changed
    ContentChanged,
    /// Cursor moved without changing content
    CursorMoved,
}

/// Message form input.
///
/// # Props
///
/// - `focused`: styling only
/// - `submit_enabled`: whether `[ Send ]` is active (`App::can_submit`)
/// - `submitting`: a request is in flight
/// - `validation`: inline message to show, if any
/// - `has_error`: show the `[ Error details ]` control
pub struct InputBox {
    /// Text buffer (mirrors `App::value`)
    pub buffer: String,
    pub focused: bool,
    pub submit_enabled: bool,
    pub submitting: bool,
    pub validation: Option<String>,
    pub has_error: bool,
    cursor: CursorState,
    /// Where the controls were drawn last frame, for mouse hit testing
    send_area: Option<Rect>,
    details_area: Option<Rect>,
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            focused: true,
            submit_enabled: false,
            submitting: false,
            validation: None,
            has_error: false,
            cursor: CursorState::new(),
            send_area: None,
            details_area: None,
        }
    }

    /// Replace the buffer with `text` and move the cursor to its end.
    /// No-op when the text is unchanged, so the cursor survives prop syncs.
    pub fn set_text(&mut self, text: &str) {
        if self.buffer != text {
            self.buffer = text.to_string();
            self.cursor.reset_to(self.buffer.len());
        }
    }

    /// Height needed for the current buffer, clamped to the visible-line limit.
    pub fn calculate_height(&self, area_width: u16) -> u16 {
        let rows = visual_rows(&self.buffer, inner_width(area_width)).len() as u16;
        rows.clamp(1, MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    /// Map a mouse click to the control under it.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<InputEvent> {
        let hit = |area: Option<Rect>| {
            area.is_some_and(|a| {
                row == a.y && column >= a.x && column < a.x.saturating_add(a.width)
            })
        };
        if hit(self.send_area) {
            Some(InputEvent::Submit)
        } else if hit(self.details_area) {
            Some(InputEvent::OpenErrorDetails)
        } else {
            None
        }
    }

    fn visible_text(&self, area_width: u16) -> String {
        let rows = visual_rows(&self.buffer, inner_width(area_width));
        let start = self.cursor.scroll_offset as usize;
        let end = (start + MAX_VISIBLE_LINES as usize).min(rows.len());
        rows[start.min(end)..end]
            .iter()
            .map(|r| &self.buffer[r.start..r.end])
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn send_span(&self) -> Span<'static> {
        if self.submitting {
            Span::styled(SENDING_LABEL, Style::default().fg(Color::Yellow))
        } else if self.submit_enabled {
            Span::styled(
                SEND_LABEL,
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(SEND_LABEL, Style::default().fg(Color::DarkGray))
        }
    }

    fn counter_span(&self) -> Span<'static> {
        let len = crate::core::form::value_len(&self.buffer);
        let style = if len > MAX_VALUE_LEN {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Span::styled(format!(" {len}/{MAX_VALUE_LEN} "), style)
    }

    /// Lay out the bottom-right controls: `[ Error details ] [ Send ]`.
    /// Right-aligned titles end one column before the right border.
    fn place_controls(&mut self, area: Rect, send_width: u16) {
        let y = area.y + area.height.saturating_sub(1);
        let right = area.x + area.width.saturating_sub(1);
        let send_x = right.saturating_sub(send_width);
        self.send_area = Some(Rect::new(send_x, y, send_width, 1));
        self.details_area = self.has_error.then(|| {
            let width = DETAILS_LABEL.len() as u16;
            Rect::new(send_x.saturating_sub(width + 1), y, width, 1)
        });
    }
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.cursor.last_width = area.width;
        self.cursor.update_scroll_offset(&self.buffer, area.width);

        let border_style = if self.focused {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let send = self.send_span();
        let send_width = send.content.chars().count() as u16;
        let mut controls = Vec::new();
        if self.has_error {
            controls.push(Span::styled(DETAILS_LABEL, Style::default().fg(Color::Red)));
            controls.push(Span::raw(" "));
        }
        controls.push(send);

        let mut block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(" Message ")
            .title_bottom(Line::from(self.counter_span()))
            .title_bottom(Line::from(controls).right_aligned());

        if let Some(msg) = &self.validation {
            block = block.title(
                Line::from(Span::styled(format!(" {msg} "), Style::default().fg(Color::Red)))
                    .right_aligned(),
            );
        }

        let text_style = if self.focused {
            Style::default()
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };

        let input = Paragraph::new(self.visible_text(area.width))
            .block(block)
            .style(text_style);
        frame.render_widget(input, area);

        self.place_controls(area, send_width);

        if self.focused {
            frame.set_cursor_position(self.cursor.screen_pos(&self.buffer, area));
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor.pos, *c);
                self.cursor.pos += c.len_utf8();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Newline => {
                self.buffer.insert(self.cursor.pos, '\n');
                self.cursor.pos += 1;
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                // Terminals deliver pasted line breaks as \r
                let text = text.replace("\r\n", "\n").replace('\r', "\n");
                self.buffer.insert_str(self.cursor.pos, &text);
                self.cursor.pos += text.len();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => (self.cursor.pos > 0).then(|| {
                let prev = prev_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(prev..self.cursor.pos);
                self.cursor.pos = prev;
                InputEvent::ContentChanged
            }),
            TuiEvent::Delete => (self.cursor.pos < self.buffer.len()).then(|| {
                let next = next_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(self.cursor.pos..next);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorLeft => (self.cursor.pos > 0).then(|| {
                self.cursor.pos = prev_char_boundary(&self.buffer, self.cursor.pos);
                InputEvent::CursorMoved
            }),
            TuiEvent::CursorRight => (self.cursor.pos < self.buffer.len()).then(|| {
                self.cursor.pos = next_char_boundary(&self.buffer, self.cursor.pos);
                InputEvent::CursorMoved
            }),
            TuiEvent::CursorHome => {
                let line_start = self.buffer[..self.cursor.pos]
                    .rfind('\n')
                    .map(|i| i + 1)
                    .unwrap_or(0);
                (self.cursor.pos != line_start).then(|| {
                    self.cursor.pos = line_start;
                    InputEvent::CursorMoved
                })
            }
            TuiEvent::CursorEnd => {
                let line_end = self.buffer[self.cursor.pos..]
                    .find('\n')
                    .map(|i| self.cursor.pos + i)
                    .unwrap_or(self.buffer.len());
                (self.cursor.pos != line_end).then(|| {
                    self.cursor.pos = line_end;
                    InputEvent::CursorMoved
                })
            }
            TuiEvent::CursorUp => self
                .cursor
                .move_vertically(&self.buffer, -1, self.cursor.last_width)
                .then_some(InputEvent::CursorMoved),
            TuiEvent::CursorDown => self
                .cursor
                .move_vertically(&self.buffer, 1, self.cursor.last_width)
                .then_some(InputEvent::CursorMoved),
            TuiEvent::Submit => Some(InputEvent::Submit),
            TuiEvent::MouseClick(col, row) => self.hit_test(*col, *row),
            _ => None,
        }
    }
}
