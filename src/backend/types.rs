//! # Backend Types
//!
//! Typed records produced by a backend's deserialization step. UI code only
//! ever sees these, never raw service responses.

use serde::{Deserialize, Serialize};

/// What kind of chat target a conversation is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationKind {
    /// A workspace member; messaging it opens a direct-message channel.
    User,
    Channel,
    /// An already-open direct-message channel.
    DirectMessage,
}

/// An addressable chat target with a stable id and a display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub name: String,
    pub kind: ConversationKind,
}

impl Conversation {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: ConversationKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
        }
    }

    pub fn user(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, name, ConversationKind::User)
    }

    pub fn channel(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, name, ConversationKind::Channel)
    }
}

/// An open direct-message channel and the user on the other end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectMessage {
    pub id: String,
    pub user_id: String,
}

/// One message of a conversation's history.
///
/// `sender` is the raw author reference (a user id, or a bot username when
/// there is no user); the directory turns it into a display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub sender: String,
    pub text: String,
}

impl HistoryEntry {
    pub fn new(sender: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            text: text.into(),
        }
    }
}
