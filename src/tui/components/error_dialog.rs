//! # Error Dialog Component
//!
//! Overlay with the details of the last failed submission.
//! Opened with Ctrl+E or the `[ Error details ]` control, dismissed with Esc.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `ErrorDialogState` lives in `TuiState` (only whether it is open)
//! - `ErrorDialog` is created each frame with the borrowed details
//!
//! Purely presentational; there is no retry action.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::core::error::ErrorDetails;
use crate::tui::event::TuiEvent;

/// Generic troubleshooting steps shown under every error.
pub const SUGGESTIONS: &[&str] = &[
    "Check that the server has its API key configured (it is read from the server environment, not from this client).",
    "Verify your network connection and that the backend URL is reachable.",
    "Wait a moment and submit again; the service may be temporarily unavailable.",
    "If you are out of credits, review the plans on the pricing page.",
    "Shorten very long messages and try again.",
];

/// Persistent state for the dialog overlay.
#[derive(Debug, Default)]
pub struct ErrorDialogState {
    pub open: bool,
}

impl ErrorDialogState {
    /// Handle a key event while the dialog is open. Returns true if it closed.
    pub fn handle_event(&mut self, event: &TuiEvent) -> bool {
        if matches!(event, TuiEvent::Escape | TuiEvent::OpenErrorDetails) {
            self.open = false;
            return true;
        }
        false
    }
}

/// Transient render wrapper for the error dialog.
pub struct ErrorDialog<'a> {
    details: &'a ErrorDetails,
}

impl<'a> ErrorDialog<'a> {
    pub fn new(details: &'a ErrorDetails) -> Self {
        Self { details }
    }

    fn lines(&self, width: usize) -> Vec<Line<'a>> {
        let label = Style::default().fg(Color::DarkGray);
        let message_style = Style::default().fg(Color::Red).add_modifier(Modifier::BOLD);
        let width = width.max(8);

        // The full message is only readable here, so it wraps instead of clipping
        let mut lines: Vec<Line<'a>> = textwrap::wrap(&self.details.message, width)
            .into_iter()
            .map(|l| Line::from(Span::styled(l.into_owned(), message_style)))
            .collect();
        lines.push(Line::default());

        if let Some(code) = self.details.code() {
            lines.push(Line::from(vec![
                Span::styled("Code:     ", label),
                Span::raw(code.as_str().to_string()),
            ]));
        }
        lines.push(Line::from(vec![
            Span::styled("Occurred: ", label),
            Span::raw(
                self.details
                    .timestamp
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string(),
            ),
        ]));
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "Troubleshooting",
            Style::default().add_modifier(Modifier::BOLD),
        )));

        // Hanging indent so wrapped suggestions line up under their text
        let options = textwrap::Options::new(width)
            .initial_indent("• ")
            .subsequent_indent("  ");
        for suggestion in SUGGESTIONS {
            for wrapped in textwrap::wrap(suggestion, &options) {
                lines.push(Line::from(wrapped.into_owned()));
            }
        }
        lines
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(80, 70, area);
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(" Error details ")
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" Esc Close ").centered())
            .padding(Padding::horizontal(1));

        // Borders (2) + horizontal padding (2)
        let width = overlay.width.saturating_sub(4) as usize;
        let paragraph = Paragraph::new(self.lines(width)).block(block);
        frame.render_widget(paragraph, overlay);
    }
}

/// Compute a centered rect using percentage of the outer rect.
pub fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}
