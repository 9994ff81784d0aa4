//! # ContactList Component
//!
//! The left-hand panel: numbered conversation names inside the scroll window
//! kept by `Selection`.
//!
//! Follows the persistent state + transient wrapper pattern: the directory
//! and selection live in `App`, `ContactList` borrows them for one frame.
//!
//! Row styles:
//! - cursor on the open conversation: black on green
//! - cursor: black on magenta
//! - open conversation: green
//! - anything else: white

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::directory::Directory;
use crate::core::selection::Selection;
use crate::tui::component::Component;

pub struct ContactList<'a> {
    pub directory: &'a Directory,
    pub selection: &'a Selection,
}

impl<'a> ContactList<'a> {
    pub fn new(directory: &'a Directory, selection: &'a Selection) -> Self {
        Self {
            directory,
            selection,
        }
    }

    fn row_style(&self, index: usize) -> Style {
        let is_cursor = index == self.selection.cursor();
        let is_open = self.selection.open_index() == Some(index);
        match (is_cursor, is_open) {
            (true, true) => Style::default().fg(Color::Black).bg(Color::Green),
            (true, false) => Style::default().fg(Color::Black).bg(Color::Magenta),
            (false, true) => Style::default().fg(Color::Green),
            (false, false) => Style::default().fg(Color::White),
        }
    }
}

impl Component for ContactList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Contacts ");
        let inner_width = block.inner(area).width as usize;

        let lines: Vec<Line> = self
            .selection
            .visible_rows()
            .filter_map(|i| self.directory.get(i).map(|c| (i, c)))
            .map(|(i, conversation)| {
                let label = format!("{}. {}", i + 1, conversation.name);
                let label = fit_to_width(&label, inner_width);
                Line::styled(label, self.row_style(i))
            })
            .collect();

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

/// Truncate to `width` display columns (ending in "…" when cut), then pad
/// with spaces so a highlight fills the whole row.
fn fit_to_width(s: &str, width: usize) -> String {
    if s.width() <= width {
        return format!("{s}{}", " ".repeat(width - s.width()));
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    used += 1;
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}
