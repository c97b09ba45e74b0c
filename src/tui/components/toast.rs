//! # Toast Stack Component
//!
//! Renders the live toasts from `core::toast::ToastQueue` in the top-right
//! corner, newest on top. Expiry is handled by the queue, not here.
//!
//! A toast taller than the space left is cut to fit, its last visible line
//! ending in `…`, so every failure stays visible however long its message.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::toast::Toast;
use crate::tui::component::Component;

/// Widest a toast may get, borders included.
const MAX_TOAST_WIDTH: u16 = 48;

pub struct ToastStack<'a> {
    toasts: Vec<&'a Toast>,
}

impl<'a> ToastStack<'a> {
    pub fn new(toasts: impl Iterator<Item = &'a Toast>) -> Self {
        Self {
            toasts: toasts.collect(),
        }
    }
}

/// Wrap `message` to `width` columns, keeping at most `max_lines` lines.
/// When lines are dropped the last kept one ends in `…`.
fn fit_lines(message: &str, width: usize, max_lines: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines: Vec<String> = textwrap::wrap(message, width)
        .into_iter()
        .map(|l| l.into_owned())
        .collect();
    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            while !last.is_empty() && last.width() + 1 > width {
                last.pop();
            }
            last.push('…');
        }
    }
    lines
}

impl Component for ToastStack<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = MAX_TOAST_WIDTH.min(area.width);
        let inner_width = usize::from(width.saturating_sub(2));
        let x = area.right().saturating_sub(width);
        let mut y = area.y;

        for toast in self.toasts.iter().rev() {
            // Borders plus at least one line of text
            let space = area.bottom().saturating_sub(y);
            if space < 3 {
                break;
            }
            let lines = fit_lines(&toast.message, inner_width, usize::from(space - 2));
            let height = lines.len() as u16 + 2;
            let rect = Rect::new(x, y, width, height);
            frame.render_widget(Clear, rect);
            let paragraph = Paragraph::new(lines.into_iter().map(Line::from).collect::<Vec<_>>())
                .style(Style::default().fg(Color::Red))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .border_style(Style::default().fg(Color::Red)),
                );
            frame.render_widget(paragraph, rect);
            y += height;
        }
    }
}
