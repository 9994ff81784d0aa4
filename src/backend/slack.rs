//! Slack Web API backend.
//!
//! Every Web API method answers HTTP 200 with a JSON envelope
//! `{"ok": bool, "error": "code", ...}`, so failures are classified from the
//! envelope's error code rather than the status line. Listing methods are
//! cursor-paginated through `response_metadata.next_cursor`.

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::backend::{
    BackendError, ChatBackend, Conversation, ConversationKind, DirectMessage, HistoryEntry,
};

pub const DEFAULT_SLACK_BASE_URL: &str = "https://slack.com/api";

/// Page size requested from listing methods.
const PAGE_LIMIT: &str = "200";
/// Hard stop for cursor pagination in case the service keeps handing out cursors.
const MAX_PAGES: usize = 50;

const AUTH_ERRORS: &[&str] = &[
    "not_authed",
    "invalid_auth",
    "token_revoked",
    "token_expired",
    "account_inactive",
];
const NOT_FOUND_ERRORS: &[&str] = &["channel_not_found", "user_not_found"];

// ============================================================================
// Slack Web API Types
// ============================================================================

#[derive(Deserialize, Debug)]
struct Envelope {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
struct ResponseMetadata {
    #[serde(default)]
    next_cursor: String,
}

#[derive(Deserialize, Debug)]
struct UsersListResponse {
    #[serde(default)]
    members: Vec<Member>,
    #[serde(default)]
    response_metadata: Option<ResponseMetadata>,
}

#[derive(Deserialize, Debug)]
struct Member {
    id: String,
    name: String,
    #[serde(default)]
    deleted: bool,
    #[serde(default)]
    profile: Option<Profile>,
}

#[derive(Deserialize, Debug)]
struct Profile {
    #[serde(default)]
    display_name: String,
}

impl Member {
    /// The profile display name when the user set one, otherwise the handle.
    fn display_name(&self) -> &str {
        match &self.profile {
            Some(profile) if !profile.display_name.is_empty() => &profile.display_name,
            _ => &self.name,
        }
    }
}

#[derive(Deserialize, Debug)]
struct ConversationsListResponse {
    #[serde(default)]
    channels: Vec<ChannelData>,
    #[serde(default)]
    response_metadata: Option<ResponseMetadata>,
}

#[derive(Deserialize, Debug)]
struct ChannelData {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    user: Option<String>,
    #[serde(default)]
    is_archived: bool,
}

#[derive(Deserialize, Debug)]
struct HistoryResponse {
    #[serde(default)]
    messages: Vec<MessageData>,
}

#[derive(Deserialize, Debug)]
struct MessageData {
    #[serde(default)]
    user: Option<String>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    bot_id: Option<String>,
    #[serde(default)]
    text: String,
}

impl MessageData {
    fn sender(&self) -> String {
        self.user
            .clone()
            .or_else(|| self.username.clone())
            .or_else(|| self.bot_id.clone())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

#[derive(Deserialize, Debug)]
struct OpenResponse {
    channel: OpenedChannel,
}

#[derive(Deserialize, Debug)]
struct OpenedChannel {
    id: String,
}

#[derive(Serialize, Debug)]
struct OpenRequest<'a> {
    users: &'a str,
}

#[derive(Serialize, Debug)]
struct PostMessageRequest<'a> {
    channel: &'a str,
    text: &'a str,
}

/// Maps a Slack `error` code onto the backend error taxonomy.
fn classify(code: &str) -> BackendError {
    if AUTH_ERRORS.contains(&code) {
        BackendError::Auth(code.to_string())
    } else if NOT_FOUND_ERRORS.contains(&code) {
        BackendError::NotFound(code.to_string())
    } else {
        BackendError::Api(code.to_string())
    }
}

/// A cursor still pending after the last page means the listing was cut at `MAX_PAGES`.
fn warn_if_truncated(method: &str, cursor: Option<&str>) {
    if cursor.is_some() {
        warn!("Slack {method} stopped after {MAX_PAGES} pages; listing is incomplete");
    }
}

fn next_cursor(metadata: Option<ResponseMetadata>) -> Option<String> {
    metadata
        .map(|m| m.next_cursor)
        .filter(|cursor| !cursor.is_empty())
}

// ============================================================================
// Client
// ============================================================================

/// Slack Web API client authenticated with a single token.
pub struct SlackClient {
    token: String,
    base_url: String,
    client: reqwest::Client,
}

impl SlackClient {
    /// Creates a new Slack client.
    ///
    /// # Arguments
    /// * `token` - Slack user or bot token (`xoxp-...`, `xoxb-...`)
    /// * `base_url` - Optional custom base URL (defaults to Slack's API)
    pub fn new(token: String, base_url: Option<String>) -> Self {
        Self {
            token,
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_SLACK_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, method: &str) -> String {
        format!("{}/{}", self.base_url, method)
    }

    /// Sends a prepared request and decodes the Slack envelope into `T`.
    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, BackendError> {
        let response = request
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        let status = response.status();
        debug!("Slack {method} response status: {status}");

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Slack {method} HTTP error: {status} - {body}");
            return Err(BackendError::Transport(format!("{method}: HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;
        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| BackendError::Parse(e.to_string()))?;
        let envelope: Envelope = serde_json::from_value(value.clone())
            .map_err(|e| BackendError::Parse(format!("{method}: {e}")))?;

        if !envelope.ok {
            let code = envelope.error.unwrap_or_else(|| "unknown_error".to_string());
            warn!("Slack {method} failed: {code}");
            return Err(classify(&code));
        }

        serde_json::from_value(value).map_err(|e| BackendError::Parse(format!("{method}: {e}")))
    }

    async fn get<T: DeserializeOwned>(
        &self,
        method: &str,
        params: &[(&str, &str)],
    ) -> Result<T, BackendError> {
        let request = self.client.get(self.url(method)).query(params);
        self.call(method, request).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: &str,
        body: &B,
    ) -> Result<T, BackendError> {
        let request = self.client.post(self.url(method)).json(body);
        self.call(method, request).await
    }

    /// Pages through `conversations.list` for the given conversation types.
    async fn list_conversations(&self, types: &str) -> Result<Vec<ChannelData>, BackendError> {
        let mut channels = Vec::new();
        let mut cursor: Option<String> = None;

        for _ in 0..MAX_PAGES {
            let mut params = vec![
                ("types", types),
                ("exclude_archived", "true"),
                ("limit", PAGE_LIMIT),
            ];
            if let Some(ref c) = cursor {
                params.push(("cursor", c.as_str()));
            }
            let page: ConversationsListResponse = self.get("conversations.list", &params).await?;
            channels.extend(page.channels);
            cursor = next_cursor(page.response_metadata);
            if cursor.is_none() {
                break;
            }
        }
        warn_if_truncated("conversations.list", cursor.as_deref());

        Ok(channels)
    }

    /// Resolves the channel id that history and posts should target.
    /// A user id is opened as a direct-message channel first.
    async fn target_channel(&self, conversation: &Conversation) -> Result<String, BackendError> {
        if conversation.kind != ConversationKind::User {
            return Ok(conversation.id.clone());
        }
        let opened: OpenResponse = self
            .post(
                "conversations.open",
                &OpenRequest {
                    users: &conversation.id,
                },
            )
            .await?;
        debug!("Opened DM {} for user {}", opened.channel.id, conversation.id);
        Ok(opened.channel.id)
    }
}

#[async_trait]
impl ChatBackend for SlackClient {
    fn name(&self) -> &str {
        "slack"
    }

    async fn list_direct_users(&self) -> Result<Vec<Conversation>, BackendError> {
        let mut users = Vec::new();
        let mut cursor: Option<String> = None;

        for _ in 0..MAX_PAGES {
            let mut params = vec![("limit", PAGE_LIMIT)];
            if let Some(ref c) = cursor {
                params.push(("cursor", c.as_str()));
            }
            let page: UsersListResponse = self.get("users.list", &params).await?;
            users.extend(
                page.members
                    .iter()
                    .filter(|m| !m.deleted)
                    .map(|m| Conversation::user(m.id.clone(), m.display_name())),
            );
            cursor = next_cursor(page.response_metadata);
            if cursor.is_none() {
                break;
            }
        }
        warn_if_truncated("users.list", cursor.as_deref());

        info!("Listed {} users", users.len());
        Ok(users)
    }

    async fn list_channels(&self) -> Result<Vec<Conversation>, BackendError> {
        let channels: Vec<Conversation> = self
            .list_conversations("public_channel,private_channel")
            .await?
            .into_iter()
            .filter(|c| !c.is_archived)
            .map(|c| {
                let name = c.name.unwrap_or_else(|| c.id.clone());
                Conversation::channel(c.id, name)
            })
            .collect();
        info!("Listed {} channels", channels.len());
        Ok(channels)
    }

    async fn list_direct_messages(&self) -> Result<Vec<DirectMessage>, BackendError> {
        let ims: Vec<DirectMessage> = self
            .list_conversations("im")
            .await?
            .into_iter()
            .filter_map(|c| {
                c.user.map(|user_id| DirectMessage {
                    id: c.id,
                    user_id,
                })
            })
            .collect();
        info!("Listed {} direct messages", ims.len());
        Ok(ims)
    }

    async fn fetch_history(
        &self,
        conversation: &Conversation,
        max_count: usize,
    ) -> Result<Vec<HistoryEntry>, BackendError> {
        let channel = self.target_channel(conversation).await?;
        let limit = max_count.to_string();
        let history: HistoryResponse = self
            .get(
                "conversations.history",
                &[("channel", channel.as_str()), ("limit", limit.as_str())],
            )
            .await?;

        // Slack returns newest first
        let entries: Vec<HistoryEntry> = history
            .messages
            .iter()
            .rev()
            .map(|m| HistoryEntry::new(m.sender(), m.text.clone()))
            .collect();
        info!(
            "Fetched {} messages for {} ({})",
            entries.len(),
            conversation.name,
            channel
        );
        Ok(entries)
    }

    async fn post_message(
        &self,
        conversation: &Conversation,
        text: &str,
    ) -> Result<(), BackendError> {
        let channel = self.target_channel(conversation).await?;
        let _: serde_json::Value = self
            .post(
                "chat.postMessage",
                &PostMessageRequest {
                    channel: &channel,
                    text,
                },
            )
            .await?;
        info!("Posted {} bytes to {}", text.len(), conversation.name);
        Ok(())
    }
}
