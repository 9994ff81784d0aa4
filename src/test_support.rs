//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::backend::{
    BackendError, ChatBackend, Conversation, DirectMessage, HistoryEntry,
};
use crate::core::directory::Directory;
use crate::core::state::{App, Viewports};

pub fn sample_users() -> Vec<Conversation> {
    vec![
        Conversation::user("U1", "alice"),
        Conversation::user("U2", "bob"),
        Conversation::user("U3", "carol"),
    ]
}

pub fn sample_channels() -> Vec<Conversation> {
    vec![
        Conversation::channel("C1", "general"),
        Conversation::channel("C2", "random"),
    ]
}

/// A scripted in-memory backend that records what it was asked to do.
pub struct FakeBackend {
    users: Vec<Conversation>,
    channels: Vec<Conversation>,
    ims: Vec<DirectMessage>,
    histories: HashMap<String, Vec<HistoryEntry>>,
    users_error: Option<BackendError>,
    history_error: Option<BackendError>,
    post_error: Option<BackendError>,
    history_requests: Mutex<Vec<(String, usize)>>,
    posted: Mutex<Vec<(String, String)>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            users: sample_users(),
            channels: sample_channels(),
            ims: Vec::new(),
            histories: HashMap::new(),
            users_error: None,
            history_error: None,
            post_error: None,
            history_requests: Mutex::new(Vec::new()),
            posted: Mutex::new(Vec::new()),
        }
    }

    pub fn with_history(mut self, id: &str, entries: Vec<HistoryEntry>) -> Self {
        self.histories.insert(id.to_string(), entries);
        self
    }

    pub fn with_ims(mut self, ims: Vec<DirectMessage>) -> Self {
        self.ims = ims;
        self
    }

    pub fn with_users_error(mut self, error: BackendError) -> Self {
        self.users_error = Some(error);
        self
    }

    pub fn with_history_error(mut self, error: BackendError) -> Self {
        self.history_error = Some(error);
        self
    }

    pub fn with_post_error(mut self, error: BackendError) -> Self {
        self.post_error = Some(error);
        self
    }

    pub fn history_requests(&self) -> Vec<(String, usize)> {
        self.history_requests.lock().unwrap().clone()
    }

    pub fn posted(&self) -> Vec<(String, String)> {
        self.posted.lock().unwrap().clone()
    }

    fn knows(&self, id: &str) -> bool {
        self.users.iter().chain(&self.channels).any(|c| c.id == id)
            || self.ims.iter().any(|im| im.id == id)
    }
}

#[async_trait]
impl ChatBackend for FakeBackend {
    fn name(&self) -> &str {
        "fake"
    }

    async fn list_direct_users(&self) -> Result<Vec<Conversation>, BackendError> {
        match &self.users_error {
            Some(e) => Err(e.clone()),
            None => Ok(self.users.clone()),
        }
    }

    async fn list_channels(&self) -> Result<Vec<Conversation>, BackendError> {
        Ok(self.channels.clone())
    }

    async fn list_direct_messages(&self) -> Result<Vec<DirectMessage>, BackendError> {
        Ok(self.ims.clone())
    }

    async fn fetch_history(
        &self,
        conversation: &Conversation,
        max_count: usize,
    ) -> Result<Vec<HistoryEntry>, BackendError> {
        self.history_requests
            .lock()
            .unwrap()
            .push((conversation.id.clone(), max_count));
        if let Some(e) = &self.history_error {
            return Err(e.clone());
        }
        if !self.knows(&conversation.id) {
            return Err(BackendError::NotFound(conversation.id.clone()));
        }
        let entries = self
            .histories
            .get(&conversation.id)
            .cloned()
            .unwrap_or_default();
        let skip = entries.len().saturating_sub(max_count);
        Ok(entries.into_iter().skip(skip).collect())
    }

    async fn post_message(
        &self,
        conversation: &Conversation,
        text: &str,
    ) -> Result<(), BackendError> {
        if let Some(e) = &self.post_error {
            return Err(e.clone());
        }
        self.posted
            .lock()
            .unwrap()
            .push((conversation.id.clone(), text.to_string()));
        Ok(())
    }
}

pub fn test_viewports() -> Viewports {
    Viewports {
        contact_rows: 3,
        transcript_width: 40,
        transcript_rows: 8,
    }
}

/// Creates a test App over the sample users and channels.
pub fn test_app() -> App {
    let directory = Directory::merged(sample_users(), sample_channels());
    App::new(directory, "me".to_string(), 10, test_viewports())
}
