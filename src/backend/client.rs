use std::fmt;

use async_trait::async_trait;

use super::types::{Conversation, DirectMessage, HistoryEntry};

/// Errors that can occur during backend operations.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendError {
    /// The service rejected the token (missing, invalid, revoked, expired).
    Auth(String),
    /// The conversation or user id is unknown to the service.
    NotFound(String),
    /// Network-level failure or a non-success HTTP status.
    Transport(String),
    /// The service answered `ok: false` with an error code we don't classify.
    Api(String),
    /// Failed to decode the service's response.
    Parse(String),
}

impl BackendError {
    /// Auth failures are the only backend errors that end the process,
    /// and only while the directory is being built at startup.
    pub fn is_auth(&self) -> bool {
        matches!(self, BackendError::Auth(_))
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::Auth(msg) => write!(f, "authentication failed: {msg}"),
            BackendError::NotFound(msg) => write!(f, "not found: {msg}"),
            BackendError::Transport(msg) => write!(f, "network error: {msg}"),
            BackendError::Api(code) => write!(f, "API error: {code}"),
            BackendError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for BackendError {}

/// The messaging service as seen by the chat UI.
///
/// Implementations are awaited inline by the event loop, so every call
/// blocks the UI until it returns. No retries happen at this layer.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Returns the name of the backend (used in logs).
    fn name(&self) -> &str;

    /// Users that can be messaged directly.
    async fn list_direct_users(&self) -> Result<Vec<Conversation>, BackendError>;

    /// Channels the token can see, archived ones excluded.
    async fn list_channels(&self) -> Result<Vec<Conversation>, BackendError>;

    /// Direct-message channels that are already open.
    async fn list_direct_messages(&self) -> Result<Vec<DirectMessage>, BackendError>;

    /// Up to `max_count` most recent messages of a conversation, oldest first.
    async fn fetch_history(
        &self,
        conversation: &Conversation,
        max_count: usize,
    ) -> Result<Vec<HistoryEntry>, BackendError>;

    /// Posts `text` to the conversation. Errors are always returned to the caller.
    async fn post_message(&self, conversation: &Conversation, text: &str)
    -> Result<(), BackendError>;
}
