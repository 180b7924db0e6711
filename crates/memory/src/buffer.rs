//! Rolling chat history with a pinned system prompt.

use deepdesk_providers::{Message, Role};

const MIN_LIMIT: usize = 2;

/// Bounded, ordered message log.
///
/// The first message is always the system prompt and is never evicted. When the log
/// grows past `limit`, the oldest non-system messages are dropped so that exactly the
/// last `limit - 1` remain behind the system prompt.
#[derive(Debug, Clone)]
pub struct ConversationBuffer {
    limit: usize,
    messages: Vec<Message>,
}

impl ConversationBuffer {
    /// `limit` is clamped to at least 2 (system prompt plus one message).
    pub fn new(system_prompt: &str, limit: usize) -> Self {
        Self {
            limit: limit.max(MIN_LIMIT),
            messages: vec![Message::system(system_prompt.trim())],
        }
    }

    pub fn add(&mut self, role: Role, content: impl Into<String>) {
        self.messages.push(Message::new(role, content));
        self.trim();
    }

    pub fn add_user(&mut self, content: impl Into<String>) {
        self.add(Role::User, content);
    }

    pub fn add_assistant(&mut self, content: impl Into<String>) {
        self.add(Role::Assistant, content);
    }

    /// Owned copy of the current history, used as an outgoing request payload.
    pub fn snapshot(&self) -> Vec<Message> {
        self.messages.clone()
    }

    pub fn last_assistant(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|message| message.role == Role::Assistant)
            .map(|message| message.content.as_str())
    }

    pub fn system_prompt(&self) -> &str {
        &self.messages[0].content
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Never true: the system prompt is always present.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    fn trim(&mut self) {
        if self.messages.len() <= self.limit {
            return;
        }
        let excess = self.messages.len() - self.limit;
        self.messages.drain(1..=excess);
        tracing::debug!("Trimmed {} messages from conversation buffer", excess);
    }
}
