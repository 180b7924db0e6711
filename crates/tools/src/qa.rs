use crate::traits::{Arguments, Capability, CapabilityContext, CapabilityError};
use async_trait::async_trait;
use deepdesk_providers::ChatBackend;
use std::sync::Arc;

pub const QA_CAPABILITY: &str = "qa";

/// Answers the user by replaying the answer-track history to the backend.
///
/// This is the fallback capability: anything the dispatcher cannot route ends up here.
pub struct QaCapability {
    backend: Arc<dyn ChatBackend>,
}

impl QaCapability {
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl Capability for QaCapability {
    fn name(&self) -> &str {
        QA_CAPABILITY
    }

    fn description(&self) -> &str {
        "Answer the user's question conversationally"
    }

    async fn execute(
        &self,
        ctx: &CapabilityContext<'_>,
        _args: &Arguments,
    ) -> Result<String, CapabilityError> {
        tracing::debug!(
            "qa: sending {} messages to {}",
            ctx.answer_history.len(),
            self.backend.name()
        );
        Ok(self.backend.send(ctx.answer_history).await?)
    }
}
