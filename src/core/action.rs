//! # Actions
//!
//! Everything that can happen in slacky becomes an `Action`.
//! User presses → ? That's `Action::OpenSelection`.
//! History arrives? That's `Action::HistoryLoaded { .. }`.
//!
//! `update()` applies an action to the state and returns an `Outcome`: the
//! `Effect` the caller must perform (backend I/O, quitting) and the set of
//! panels that need redrawing. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect + Redraw
//! ```

use std::ops::{BitOr, BitOrAssign};

use log::{debug, info, warn};

use crate::backend::{BackendError, Conversation, HistoryEntry};
use crate::core::state::{App, Viewports};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    MoveDown,
    MoveUp,
    OpenSelection,
    SubmitLine,
    DeleteChar,
    InsertChar(char),
    Interrupt,
    Resize(Viewports),
    HistoryLoaded {
        conversation_id: String,
        result: Result<Vec<HistoryEntry>, BackendError>,
    },
    MessagePosted {
        conversation_id: String,
        result: Result<(), BackendError>,
    },
}

/// Side effect requested by `update`, performed by the dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    LoadHistory(Conversation),
    PostMessage {
        conversation: Conversation,
        text: String,
    },
}

/// Screen regions whose state changed.
///
/// The event loop only asks `any()` to decide whether to draw; a draw
/// renders every panel and ratatui's buffer diff writes just the changed
/// cells. The per-panel flags record what an action touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Redraw {
    pub title: bool,
    pub contacts: bool,
    pub transcript: bool,
    pub input: bool,
}

impl Redraw {
    pub const NONE: Redraw = Redraw {
        title: false,
        contacts: false,
        transcript: false,
        input: false,
    };
    pub const ALL: Redraw = Redraw {
        title: true,
        contacts: true,
        transcript: true,
        input: true,
    };
    pub const TITLE: Redraw = Redraw {
        title: true,
        ..Redraw::NONE
    };
    pub const CONTACTS: Redraw = Redraw {
        contacts: true,
        ..Redraw::NONE
    };
    pub const TRANSCRIPT: Redraw = Redraw {
        transcript: true,
        ..Redraw::NONE
    };
    pub const INPUT: Redraw = Redraw {
        input: true,
        ..Redraw::NONE
    };

    pub fn any(&self) -> bool {
        self.title || self.contacts || self.transcript || self.input
    }
}

impl BitOr for Redraw {
    type Output = Redraw;

    fn bitor(self, rhs: Redraw) -> Redraw {
        Redraw {
            title: self.title || rhs.title,
            contacts: self.contacts || rhs.contacts,
            transcript: self.transcript || rhs.transcript,
            input: self.input || rhs.input,
        }
    }
}

impl BitOrAssign for Redraw {
    fn bitor_assign(&mut self, rhs: Redraw) {
        *self = *self | rhs;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub effect: Effect,
    pub redraw: Redraw,
}

impl Outcome {
    fn redraw(redraw: Redraw) -> Self {
        Self {
            effect: Effect::None,
            redraw,
        }
    }

    fn with_effect(effect: Effect, redraw: Redraw) -> Self {
        Self { effect, redraw }
    }
}

/// Append to the transcript, logging when older rows scroll out of view.
fn append_entry(app: &mut App, sender: &str, text: &str) {
    if let Err(overflow) = app.transcript.append(sender, text) {
        debug!("{overflow}");
    }
}

pub fn update(app: &mut App, action: Action) -> Outcome {
    match action {
        Action::MoveDown => {
            app.selection.move_down();
            Outcome::redraw(Redraw::CONTACTS)
        }
        Action::MoveUp => {
            app.selection.move_up();
            Outcome::redraw(Redraw::CONTACTS)
        }
        Action::OpenSelection => {
            let Some(conversation) = app
                .selection
                .open()
                .and_then(|i| app.directory.get(i))
                .cloned()
            else {
                app.status_message = String::from("No conversations");
                return Outcome::redraw(Redraw::TITLE);
            };
            info!("Opening {} ({})", conversation.name, conversation.id);
            app.transcript.reset(Some(conversation.id.clone()));
            app.status_message = format!("Loading {}...", conversation.name);
            Outcome::with_effect(
                Effect::LoadHistory(conversation),
                Redraw::CONTACTS | Redraw::TRANSCRIPT | Redraw::TITLE,
            )
        }
        Action::HistoryLoaded {
            conversation_id,
            result,
        } => {
            if app.transcript.conversation_id() != Some(conversation_id.as_str()) {
                debug!("Ignoring history for {conversation_id}: no longer open");
                return Outcome::redraw(Redraw::NONE);
            }
            let name = app
                .directory
                .display_name(&conversation_id)
                .unwrap_or(&conversation_id)
                .to_string();
            match result {
                Ok(entries) => {
                    for entry in &entries {
                        let sender = app.directory.sender_name(&entry.sender).to_string();
                        append_entry(app, &sender, &entry.text);
                    }
                    app.status_message = name;
                }
                Err(e) => {
                    warn!("Failed to load history for {name}: {e}");
                    app.transcript.reset(Some(conversation_id));
                    app.status_message = format!("Could not load {name}: {e}");
                }
            }
            Outcome::redraw(Redraw::TRANSCRIPT | Redraw::TITLE)
        }
        Action::SubmitLine => {
            let Some(conversation) = app.open_conversation().cloned() else {
                app.status_message = String::from("Open a conversation with → first");
                return Outcome::redraw(Redraw::TITLE);
            };
            let text = app.editor.submit();
            if text.trim().is_empty() {
                return Outcome::redraw(Redraw::INPUT);
            }
            let sender = app.self_label.clone();
            append_entry(app, &sender, &text);
            Outcome::with_effect(
                Effect::PostMessage { conversation, text },
                Redraw::INPUT | Redraw::TRANSCRIPT,
            )
        }
        Action::MessagePosted {
            conversation_id,
            result,
        } => match result {
            Ok(()) => {
                debug!("Message delivered to {conversation_id}");
                Outcome::redraw(Redraw::NONE)
            }
            Err(e) => {
                warn!("Failed to post to {conversation_id}: {e}");
                app.status_message = format!("Send failed: {e}");
                Outcome::redraw(Redraw::TITLE)
            }
        },
        Action::DeleteChar => {
            app.editor.backspace();
            Outcome::redraw(Redraw::INPUT)
        }
        Action::InsertChar(c) => {
            app.editor.append_char(c);
            Outcome::redraw(Redraw::INPUT)
        }
        Action::Resize(viewports) => {
            app.resize(viewports);
            Outcome::redraw(Redraw::ALL)
        }
        Action::Interrupt => {
            info!("Interrupt received, shutting down");
            Outcome::with_effect(Effect::Quit, Redraw::NONE)
        }
    }
}
