//! # Dispatcher
//!
//! Runs an action through `update()` and performs the effect it asks for.
//! Backend calls are awaited inline: nothing is spawned, so a slow backend
//! blocks the event loop until it answers. The backend's result goes back
//! through `update()` as a follow-up action.

use log::debug;

use crate::backend::ChatBackend;
use crate::core::action::{Action, Effect, Outcome, Redraw, update};
use crate::core::state::App;

/// What the event loop needs to know after an action has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatched {
    pub quit: bool,
    pub redraw: Redraw,
}

pub async fn dispatch(app: &mut App, backend: &dyn ChatBackend, action: Action) -> Dispatched {
    debug!("Dispatching {action:?}");
    let mut redraw = Redraw::NONE;
    let mut next = Some(action);

    while let Some(action) = next.take() {
        let Outcome { effect, redraw: r } = update(app, action);
        redraw |= r;

        match effect {
            Effect::None => {}
            Effect::Quit => return Dispatched { quit: true, redraw },
            Effect::LoadHistory(conversation) => {
                let result = backend
                    .fetch_history(&conversation, app.history_count)
                    .await;
                next = Some(Action::HistoryLoaded {
                    conversation_id: conversation.id,
                    result,
                });
            }
            Effect::PostMessage { conversation, text } => {
                let result = backend.post_message(&conversation, &text).await;
                next = Some(Action::MessagePosted {
                    conversation_id: conversation.id,
                    result,
                });
            }
        }
    }

    Dispatched {
        quit: false,
        redraw,
    }
}
