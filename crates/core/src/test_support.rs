//! In-memory backends shared by the unit tests.

use async_trait::async_trait;
use deepdesk_providers::{ChatBackend, Message, ProviderError};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Replays canned replies in order and records every request it receives.
pub struct ScriptedBackend {
    replies: Mutex<VecDeque<Result<String, ProviderError>>>,
    requests: Mutex<Vec<Vec<Message>>>,
}

impl ScriptedBackend {
    pub fn new(replies: Vec<Result<String, ProviderError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<Vec<Message>> {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl ChatBackend for ScriptedBackend {
    async fn send(&self, messages: &[Message]) -> Result<String, ProviderError> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(messages.to_vec());
        self.replies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
            .unwrap_or_else(|| Err(ProviderError::Http("script exhausted".to_string())))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
