//! Screen layout and the per-frame draw.
//!
//! ```text
//! ┌──────────────────── title ─────────────────────┐
//! ├─contacts─┐┌─transcript──────────────────────────┤
//! │ 1. alice ││ alice: hi                           │
//! │ 2. bob   ││ me: hello                           │
//! │          │└─────────────────────────────────────┤
//! │          │┌─input───────────────────────────────┤
//! │          ││ typing here_                        │
//! └──────────┘└─────────────────────────────────────┘
//! ```
//!
//! The contact panel takes 20% of the width; the input box 20% of the
//! height (at least one text row). Geometry is computed once at startup and
//! again only on a resize event.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

use crate::core::state::{App, Viewports};
use crate::tui::component::Component;
use crate::tui::components::{ContactList, InputBox, TitleBar, TranscriptView};

/// Border rows/columns around each panel's content
const BORDER: u16 = 2;
const CONTACTS_PERCENT: u16 = 20;
const INPUT_PERCENT: u16 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub title: Rect,
    pub contacts: Rect,
    pub transcript: Rect,
    pub input: Rect,
}

impl Geometry {
    pub fn new(area: Rect) -> Self {
        use Constraint::{Length, Min, Percentage};

        let [title, body] = Layout::vertical([Length(1), Min(0)]).areas(area);
        let [contacts, right] =
            Layout::horizontal([Percentage(CONTACTS_PERCENT), Min(0)]).areas(body);
        let input_height =
            ((u32::from(area.height) * u32::from(INPUT_PERCENT) / 100) as u16).max(1 + BORDER);
        let [transcript, input] = Layout::vertical([Min(0), Length(input_height)]).areas(right);

        Self {
            title,
            contacts,
            transcript,
            input,
        }
    }

    /// Content sizes the core models lay out into.
    pub fn viewports(&self) -> Viewports {
        Viewports {
            contact_rows: self.contacts.height.saturating_sub(BORDER) as usize,
            transcript_width: self.transcript.width.saturating_sub(BORDER) as usize,
            transcript_rows: self.transcript.height.saturating_sub(BORDER) as usize,
        }
    }
}

/// Render every panel from current state.
///
/// Ratatui diffs each frame against the previous one, so only the cells of
/// panels whose state changed are written to the terminal.
pub fn draw_ui(frame: &mut Frame, app: &App, geometry: &Geometry) {
    TitleBar::new(&app.status_message).render(frame, geometry.title);
    ContactList::new(&app.directory, &app.selection).render(frame, geometry.contacts);
    let title = app.open_conversation().map(|c| c.name.as_str());
    TranscriptView::new(&app.transcript, title).render(frame, geometry.transcript);
    InputBox::new(&app.editor).render(frame, geometry.input);
}
