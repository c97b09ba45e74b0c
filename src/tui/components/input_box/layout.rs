//! Row layout and cursor tracking for the InputBox.
//!
//! The buffer is hard-wrapped by display width (no word wrapping), so every
//! visual row maps to a contiguous byte range of the buffer. Cursor movement
//! and screen placement are computed from those ranges.

use ratatui::layout::Rect;
use unicode_width::UnicodeWidthChar;

/// Left + right borders consumed horizontally by the bordered block
pub(super) const HORIZONTAL_OVERHEAD: u16 = 2;
/// Top + bottom borders consumed vertically
pub(super) const VERTICAL_OVERHEAD: u16 = 2;
/// Maximum visible content lines before internal scrolling kicks in
pub(super) const MAX_VISIBLE_LINES: u16 = 8;

/// One visual row, as a byte range `[start, end)` of the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Row {
    pub start: usize,
    pub end: usize,
}

/// Content width inside the borders. Returns 0 if the area is too narrow.
pub(super) fn inner_width(area_width: u16) -> u16 {
    area_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

/// Split `text` into visual rows at most `width` columns wide.
///
/// A logical line that exactly fills its last row gets an extra empty row so
/// the cursor after it stays inside the box.
pub(super) fn visual_rows(text: &str, width: u16) -> Vec<Row> {
    let width = usize::from(width.max(1));
    let mut rows = Vec::new();
    let mut offset = 0;

    for line in text.split('\n') {
        let mut start = offset;
        let mut col = 0;
        for (i, c) in line.char_indices() {
            let w = c.width().unwrap_or(0);
            if col + w > width && col > 0 {
                rows.push(Row {
                    start,
                    end: offset + i,
                });
                start = offset + i;
                col = 0;
            }
            col += w;
        }
        let end = offset + line.len();
        rows.push(Row { start, end });
        if col >= width {
            rows.push(Row { start: end, end });
        }
        offset = end + 1;
    }

    rows
}

/// Display width of `text`.
fn display_width(text: &str) -> usize {
    text.chars().map(|c| c.width().unwrap_or(0)).sum()
}

pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map(|c| pos + c.len_utf8())
        .unwrap_or(text.len())
}

/// Cursor byte offset plus the internal scroll position.
pub(super) struct CursorState {
    /// Byte offset in the buffer (0..=buffer.len()), always on a char boundary
    pub pos: usize,
    /// First visible row when the content overflows
    pub scroll_offset: u16,
    /// Width from the last render, used for vertical movement between renders
    pub last_width: u16,
}

impl CursorState {
    const DEFAULT_WIDTH: u16 = 80;

    pub fn new() -> Self {
        Self {
            pos: 0,
            scroll_offset: 0,
            last_width: Self::DEFAULT_WIDTH,
        }
    }

    /// Place the cursor at `pos` and reset scrolling.
    pub fn reset_to(&mut self, pos: usize) {
        self.pos = pos;
        self.scroll_offset = 0;
    }

    /// Row index and display column of the cursor.
    pub fn row_col(&self, buffer: &str, area_width: u16) -> (usize, usize) {
        let rows = visual_rows(buffer, inner_width(area_width));
        let row = rows
            .iter()
            .rposition(|r| r.start <= self.pos)
            .unwrap_or(0);
        let col = display_width(&buffer[rows[row].start..self.pos.min(rows[row].end)]);
        (row, col)
    }

    /// Move one visual row up (`direction < 0`) or down, keeping the column.
    ///
    /// Returns `true` if the cursor moved.
    pub fn move_vertically(&mut self, buffer: &str, direction: i16, area_width: u16) -> bool {
        let rows = visual_rows(buffer, inner_width(area_width));
        let (row, col) = self.row_col(buffer, area_width);

        let target = if direction < 0 {
            match row.checked_sub(1) {
                Some(r) => r,
                None => return false,
            }
        } else if row + 1 < rows.len() {
            row + 1
        } else {
            return false;
        };

        let Row { start, end } = rows[target];
        let mut x = 0;
        let mut pos = end;
        for (i, c) in buffer[start..end].char_indices() {
            let w = c.width().unwrap_or(0);
            if x + w > col {
                pos = start + i;
                break;
            }
            x += w;
        }
        self.pos = pos;
        true
    }

    /// Keep the cursor row inside the visible window.
    pub fn update_scroll_offset(&mut self, buffer: &str, area_width: u16) {
        let total = visual_rows(buffer, inner_width(area_width)).len() as u16;
        if total <= MAX_VISIBLE_LINES {
            self.scroll_offset = 0;
            return;
        }

        let (row, _) = self.row_col(buffer, area_width);
        let row = row as u16;
        if row < self.scroll_offset {
            self.scroll_offset = row;
        } else if row >= self.scroll_offset + MAX_VISIBLE_LINES {
            self.scroll_offset = row + 1 - MAX_VISIBLE_LINES;
        }
    }

    /// Terminal coordinates of the cursor inside `area`.
    pub fn screen_pos(&self, buffer: &str, area: Rect) -> (u16, u16) {
        let (row, col) = self.row_col(buffer, area.width);
        let visible_row = (row as u16).saturating_sub(self.scroll_offset);
        (area.x + 1 + col as u16, area.y + 1 + visible_row)
    }
}
