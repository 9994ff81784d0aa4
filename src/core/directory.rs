//! # Contact Directory
//!
//! The ordered, read-only list of conversations shown in the contact panel.
//! Insertion order is display order. Built once at startup and never
//! re-sorted or mutated afterwards.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::backend::{BackendError, ChatBackend, Conversation, ConversationKind, DirectMessage};

/// Which conversations the directory lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DirectoryMode {
    /// Every workspace user followed by every channel.
    #[default]
    Merged,
    /// Only direct-message channels that are already open.
    Direct,
}

impl FromStr for DirectoryMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "merged" => Ok(DirectoryMode::Merged),
            "direct" => Ok(DirectoryMode::Direct),
            other => Err(format!("unknown directory mode: {other}")),
        }
    }
}

impl fmt::Display for DirectoryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectoryMode::Merged => write!(f, "merged"),
            DirectoryMode::Direct => write!(f, "direct"),
        }
    }
}

#[derive(Debug, Default)]
pub struct Directory {
    conversations: Vec<Conversation>,
    /// user id → display name, for labelling transcript senders
    user_names: HashMap<String, String>,
}

impl Directory {
    /// Build a directory from an ordered list of conversations.
    ///
    /// Duplicate ids are dropped (first occurrence wins) so ids stay unique.
    /// `users` seeds the sender-name lookup.
    pub fn new(conversations: Vec<Conversation>, users: &[Conversation]) -> Self {
        let mut seen = HashSet::new();
        let mut unique = Vec::with_capacity(conversations.len());
        for conversation in conversations {
            if seen.insert(conversation.id.clone()) {
                unique.push(conversation);
            } else {
                warn!("Dropping duplicate conversation id {}", conversation.id);
            }
        }

        let user_names = users
            .iter()
            .map(|u| (u.id.clone(), u.name.clone()))
            .collect();

        Self {
            conversations: unique,
            user_names,
        }
    }

    /// Users followed by channels, in backend order.
    pub fn merged(users: Vec<Conversation>, channels: Vec<Conversation>) -> Self {
        let mut conversations = users.clone();
        conversations.extend(channels);
        Self::new(conversations, &users)
    }

    /// Open direct-message channels, each named after the user on the other end.
    pub fn direct(ims: Vec<DirectMessage>, users: &[Conversation]) -> Self {
        let names: HashMap<&str, &str> = users
            .iter()
            .map(|u| (u.id.as_str(), u.name.as_str()))
            .collect();
        let conversations = ims
            .into_iter()
            .map(|im| {
                let name = names
                    .get(im.user_id.as_str())
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| im.user_id.clone());
                Conversation::new(im.id, name, ConversationKind::DirectMessage)
            })
            .collect();
        Self::new(conversations, users)
    }

    /// Populate the directory from the backend.
    ///
    /// Any error is returned as-is; the caller decides whether it's fatal.
    pub async fn load(backend: &dyn ChatBackend, mode: DirectoryMode) -> Result<Self, BackendError> {
        let users = backend.list_direct_users().await?;
        let directory = match mode {
            DirectoryMode::Merged => {
                let channels = backend.list_channels().await?;
                Self::merged(users, channels)
            }
            DirectoryMode::Direct => {
                let ims = backend.list_direct_messages().await?;
                Self::direct(ims, &users)
            }
        };
        info!(
            "Directory loaded from {} ({} mode): {} conversations",
            backend.name(),
            mode,
            directory.len()
        );
        Ok(directory)
    }

    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Conversation> {
        self.conversations.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Conversation> {
        self.conversations.iter()
    }

    /// Display name of a conversation id, if the directory lists it.
    pub fn display_name(&self, id: &str) -> Option<&str> {
        self.conversations
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.as_str())
    }

    /// Label for a message author. Unknown senders show their raw id.
    pub fn sender_name<'a>(&'a self, sender: &'a str) -> &'a str {
        self.user_names
            .get(sender)
            .map(String::as_str)
            .or_else(|| self.display_name(sender))
            .unwrap_or(sender)
    }
}
