//! Routes a [`Plan`] to its capability and picks the text the user sees.

use crate::planning::Plan;
use deepdesk_tools::{
    Capability, CapabilityContext, CapabilityError, CapabilityRegistry, QA_CAPABILITY,
};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("fallback capability '{0}' is not registered")]
    MissingFallback(&'static str),
}

/// Result of running a plan: the capability that actually executed and its raw output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatched {
    pub capability: String,
    pub output: String,
}

pub struct Dispatcher {
    registry: CapabilityRegistry,
    fallback: Arc<dyn Capability>,
}

impl Dispatcher {
    pub fn new(registry: CapabilityRegistry) -> Result<Self, DispatchError> {
        let fallback = registry
            .get(QA_CAPABILITY)
            .ok_or(DispatchError::MissingFallback(QA_CAPABILITY))?;
        Ok(Self { registry, fallback })
    }

    pub fn capabilities(&self) -> Vec<String> {
        self.registry.list()
    }

    pub async fn dispatch(
        &self,
        plan: &Plan,
        ctx: &CapabilityContext<'_>,
    ) -> Result<Dispatched, CapabilityError> {
        let handler = match self.registry.get(&plan.capability) {
            Some(handler) => handler,
            None => {
                tracing::warn!(
                    "Unknown capability '{}', falling back to {}",
                    plan.capability,
                    QA_CAPABILITY
                );
                self.fallback.clone()
            }
        };

        tracing::info!("Dispatching capability: {}", handler.name());
        let output = handler.execute(ctx, &plan.arguments).await?;

        Ok(Dispatched {
            capability: handler.name().to_string(),
            output,
        })
    }
}

/// qa output is the answer itself and is never overridden; for side-effecting
/// capabilities a non-empty planner message replaces the mechanical confirmation.
pub fn select_reply(plan: &Plan, executed: &str, output: String) -> String {
    if executed == QA_CAPABILITY {
        return output;
    }
    match plan.user_visible_message.as_deref() {
        Some(message) if !message.is_empty() => message.to_string(),
        _ => output,
    }
}
