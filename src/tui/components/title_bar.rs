//! # TitleBar Component
//!
//! Single-line header across the top of the screen: the app name and the
//! current status message (open conversation, load/send failures, hints).
//!
//! Stateless: everything it shows is a prop.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

pub const APP_NAME: &str = "Slacky";

/// Top status bar showing the app name and a status message.
pub struct TitleBar<'a> {
    pub status_message: &'a str,
}

impl<'a> TitleBar<'a> {
    pub fn new(status_message: &'a str) -> Self {
        Self { status_message }
    }
}

impl Component for TitleBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let bar = Style::default().fg(Color::Black).bg(Color::Green);
        let mut spans = vec![Span::styled(
            APP_NAME,
            bar.fg(Color::Blue).add_modifier(Modifier::BOLD),
        )];
        if !self.status_message.is_empty() {
            spans.push(Span::styled(" | ", bar));
            spans.push(Span::styled(self.status_message, bar));
        }

        let title = Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .style(bar);
        frame.render_widget(title, area);
    }
}
