//! # Application State
//!
//! Core business state for slacky. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── directory: Directory        // ordered conversations + sender names
//! ├── selection: Selection        // cursor, open row, contact scroll offset
//! ├── transcript: Transcript      // open conversation's wrapped history
//! ├── editor: LineEditor          // text not yet sent
//! ├── status_message: String      // title bar text
//! ├── self_label: String          // sender shown for our own messages
//! └── history_count: usize        // messages fetched on open
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::backend::Conversation;
use crate::core::config::ResolvedConfig;
use crate::core::directory::Directory;
use crate::core::line_editor::LineEditor;
use crate::core::selection::Selection;
use crate::core::transcript::Transcript;

/// Sizes of the regions the core models lay out into, in terminal cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewports {
    /// Visible rows of the contact list
    pub contact_rows: usize,
    /// Inner width of the transcript region
    pub transcript_width: usize,
    /// Inner height of the transcript region
    pub transcript_rows: usize,
}

pub struct App {
    pub directory: Directory,
    pub selection: Selection,
    pub transcript: Transcript,
    pub editor: LineEditor,
    pub status_message: String,
    pub self_label: String,
    pub history_count: usize,
}

impl App {
    pub fn new(
        directory: Directory,
        self_label: String,
        history_count: usize,
        viewports: Viewports,
    ) -> Self {
        let selection = Selection::new(directory.len(), viewports.contact_rows);
        let status_message = if directory.is_empty() {
            String::from("No conversations")
        } else {
            String::from("↑/↓ select, → open, Enter send")
        };
        Self {
            directory,
            selection,
            transcript: Transcript::new(viewports.transcript_width, viewports.transcript_rows),
            editor: LineEditor::new(),
            status_message,
            self_label,
            history_count,
        }
    }

    pub fn from_config(directory: Directory, config: &ResolvedConfig, viewports: Viewports) -> Self {
        Self::new(
            directory,
            config.self_label.clone(),
            config.history_count,
            viewports,
        )
    }

    /// The conversation currently shown in the transcript.
    pub fn open_conversation(&self) -> Option<&Conversation> {
        self.selection
            .open_index()
            .and_then(|i| self.directory.get(i))
    }

    pub fn resize(&mut self, viewports: Viewports) {
        self.selection.set_height(viewports.contact_rows);
        self.transcript
            .resize(viewports.transcript_width, viewports.transcript_rows);
    }
}
