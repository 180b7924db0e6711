use async_trait::async_trait;

/// Phrases that end the chat loop, compared case-insensitively.
pub const EXIT_PHRASES: [&str; 3] = ["exit", "quit", "выход"];

pub fn is_exit_phrase(input: &str) -> bool {
    let input = input.trim().to_lowercase();
    EXIT_PHRASES.contains(&input.as_str())
}

#[async_trait]
pub trait Interface: Send + Sync {
    /// Next line of user input, trimmed. `None` on end of input.
    async fn receive_input(&self) -> Option<String>;
    async fn send_output(&self, message: &str);
    async fn show_status(&self, status: &str);
}
