//! # Selection & Viewport
//!
//! Tracks two independent rows of the contact directory:
//!
//! - `cursor`: the row under keyboard focus
//! - `open`: the row whose conversation is shown in the transcript
//!
//! plus the scroll offset of the fixed-height contact panel. Moving the
//! cursor never changes what is open; only `open()` does.
//!
//! ```text
//!   row 0   alice
//!   row 1   bob        ┐ scroll_offset = 1
//!   row 2 > carol      │ height = 3
//!   row 3   general    ┘
//!   row 4   random
//! ```
//!
//! The window slides by the minimum amount that keeps `cursor` visible.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    cursor: usize,
    open: Option<usize>,
    scroll_offset: usize,
    height: usize,
    len: usize,
}

impl Selection {
    /// `len` is the directory length, `height` the visible rows of the panel.
    pub fn new(len: usize, height: usize) -> Self {
        Self {
            cursor: 0,
            open: None,
            scroll_offset: 0,
            height,
            len,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn open_index(&self) -> Option<usize> {
        self.open
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn move_down(&mut self) {
        if self.len > 0 && self.cursor < self.len - 1 {
            self.cursor += 1;
        }
        self.reclamp_scroll();
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
        self.reclamp_scroll();
    }

    /// Slide the window just enough to keep `cursor` on screen.
    pub fn reclamp_scroll(&mut self) {
        if self.height == 0 {
            // Nothing is visible; pin the window to the cursor.
            self.scroll_offset = self.cursor;
        } else if self.cursor >= self.scroll_offset + self.height {
            self.scroll_offset = self.cursor + 1 - self.height;
        } else if self.cursor < self.scroll_offset {
            self.scroll_offset = self.cursor;
        }
    }

    /// Mark the cursor row as the open conversation.
    /// Returns the opened index, or `None` for an empty directory.
    pub fn open(&mut self) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        self.open = Some(self.cursor);
        self.open
    }

    /// Panel height changed (terminal resize).
    pub fn set_height(&mut self, height: usize) {
        self.height = height;
        self.scroll_offset = self
            .scroll_offset
            .min(self.len.saturating_sub(height.max(1)));
        self.reclamp_scroll();
    }

    /// Directory indices currently inside the window, top to bottom.
    pub fn visible_rows(&self) -> std::ops::Range<usize> {
        let end = (self.scroll_offset + self.height).min(self.len);
        self.scroll_offset.min(end)..end
    }
}
