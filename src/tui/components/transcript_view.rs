//! # TranscriptView Component
//!
//! The chat frame on the right: a bordered box titled with the open
//! conversation, showing the rows of the transcript that fit. Wrapping and
//! scrolling already happened in `core::transcript`, so every row here maps
//! to exactly one terminal line.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::core::transcript::{Transcript, TranscriptRow};
use crate::tui::component::Component;

pub struct TranscriptView<'a> {
    pub transcript: &'a Transcript,
    /// Name of the open conversation (None before anything is opened)
    pub title: Option<&'a str>,
}

impl<'a> TranscriptView<'a> {
    pub fn new(transcript: &'a Transcript, title: Option<&'a str>) -> Self {
        Self { transcript, title }
    }
}

fn row_line(row: &TranscriptRow) -> Line<'_> {
    let (sender, rest) = row.text.split_at(row.sender_len);
    Line::from(vec![
        Span::styled(sender, Style::default().fg(Color::Magenta)),
        Span::raw(rest),
    ])
}

impl Component for TranscriptView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut block = Block::default().borders(Borders::ALL);
        if let Some(title) = self.title {
            block = block.title(format!(" {title} "));
        }

        let lines: Vec<Line> = self
            .transcript
            .visible_rows()
            .iter()
            .map(row_line)
            .collect();

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}
