//! # InputBox Component
//!
//! The text area under the chat frame. Shows the line being typed and puts
//! the terminal cursor after it. The buffer itself lives in
//! `core::line_editor`; this component only decides what fits.
//!
//! A line wider than the box scrolls horizontally: the tail stays visible so
//! the character just typed is always on screen.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::line_editor::LineEditor;
use crate::tui::component::Component;

pub struct InputBox<'a> {
    pub editor: &'a LineEditor,
}

impl<'a> InputBox<'a> {
    pub fn new(editor: &'a LineEditor) -> Self {
        Self { editor }
    }
}

/// The longest suffix of `text` narrower than `width` columns, leaving one
/// column free for the cursor.
fn visible_tail(text: &str, width: usize) -> &str {
    if width == 0 {
        return "";
    }
    if text.width() < width {
        return text;
    }
    let mut used = 0;
    let mut start = text.len();
    for (i, c) in text.char_indices().rev() {
        let w = c.width().unwrap_or(0);
        if used + w >= width {
            break;
        }
        used += w;
        start = i;
    }
    &text[start..]
}

impl Component for InputBox<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Message ");
        let inner = block.inner(area);

        // Newlines would break the single-line layout
        let shown = visible_tail(self.editor.as_str(), inner.width as usize).replace('\n', " ");
        let cursor_x = inner.x + shown.width() as u16;

        let input = Paragraph::new(shown)
            .block(block)
            .style(Style::default().fg(Color::Green));
        frame.render_widget(input, area);

        if inner.height > 0 && inner.width > 0 {
            frame.set_cursor_position((cursor_x, inner.y));
        }
    }
}
