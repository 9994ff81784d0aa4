pub mod client;
pub mod slack;
pub mod types;

pub use client::{BackendError, ChatBackend};
pub use slack::SlackClient;
pub use types::{Conversation, ConversationKind, DirectMessage, HistoryEntry};
