use async_trait::async_trait;
use deepdesk_providers::{Message, ProviderError};
use thiserror::Error;

/// Argument mapping handed to a capability.
pub type Arguments = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Error)]
pub enum CapabilityError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Backend error: {0}")]
    Backend(#[from] ProviderError),
    #[error("Execution error: {0}")]
    Execution(String),
}

/// Per-turn state a capability may read while executing.
#[derive(Debug, Clone, Copy)]
pub struct CapabilityContext<'a> {
    /// Answer-track history as of the start of this turn's dispatch.
    pub answer_history: &'a [Message],
}

impl<'a> CapabilityContext<'a> {
    pub fn new(answer_history: &'a [Message]) -> Self {
        Self { answer_history }
    }
}

#[async_trait]
pub trait Capability: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;

    async fn execute(
        &self,
        ctx: &CapabilityContext<'_>,
        args: &Arguments,
    ) -> Result<String, CapabilityError>;
}
