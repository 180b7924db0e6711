//! Wires configuration, backend and capabilities into a [`Conversation`].

use crate::config::Config;
use anyhow::{Context, Result};
use deepdesk_core::{Conversation, Dispatcher, Planner};
use deepdesk_memory::ConversationBuffer;
use deepdesk_providers::{ChatBackend, DeepSeekProvider, ProviderSettings};
use deepdesk_tools::{BrowserCapability, BrowserOpener, CapabilityRegistry, QaCapability};
use std::sync::Arc;

pub fn build_backend(config: &Config) -> Result<Arc<dyn ChatBackend>> {
    let provider = DeepSeekProvider::new(ProviderSettings {
        api_url: config.api_url.clone(),
        api_key: config.api_key.clone(),
        model: config.model.clone(),
        temperature: config.temperature,
        max_tokens: config.max_tokens,
        timeout: config.timeout(),
    })
    .context("Failed to create DeepSeek client")?;
    Ok(Arc::new(provider))
}

/// Appends the registered capabilities to the planner's instructions.
pub fn planner_prompt(base: &str, registry: &CapabilityRegistry) -> String {
    format!("{}\n\nCapabilities:\n{}", base.trim_end(), registry.describe())
}

/// Both tracks share one backend; the browser side effect goes through `opener`.
pub fn build_conversation(
    config: &Config,
    backend: Arc<dyn ChatBackend>,
    opener: Arc<dyn BrowserOpener>,
) -> Result<Conversation> {
    let mut registry = CapabilityRegistry::new();
    registry.register(Arc::new(QaCapability::new(backend.clone())));
    registry.register(Arc::new(BrowserCapability::new(opener)));
    let planner_prompt = planner_prompt(&config.planner_system_prompt, &registry);
    let dispatcher = Dispatcher::new(registry)?;

    tracing::info!(
        capabilities = ?dispatcher.capabilities(),
        chat_history_limit = config.chat_history_limit,
        planner_history_limit = config.planner_history_limit,
        "conversation ready"
    );

    Ok(Conversation::new(
        ConversationBuffer::new(&config.system_prompt, config.chat_history_limit),
        ConversationBuffer::new(&planner_prompt, config.planner_history_limit),
        Planner::new(backend),
        dispatcher,
    ))
}
