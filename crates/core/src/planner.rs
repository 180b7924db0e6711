//! Turns the planning track into a [`Plan`].
//!
//! Model output is untrusted free text. The planner locates the outermost `{...}` span
//! in the reply, tolerating prose around it, and coerces the parsed object into a plan.

use crate::planning::Plan;
use deepdesk_memory::ConversationBuffer;
use deepdesk_providers::{ChatBackend, ProviderError};
use serde_json::{Map, Value};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanningError {
    #[error(transparent)]
    Transport(#[from] ProviderError),
    #[error("no valid plan found")]
    NoValidPlan,
}

pub struct Planner {
    backend: Arc<dyn ChatBackend>,
}

impl Planner {
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self { backend }
    }

    pub async fn plan(&self, buffer: &ConversationBuffer) -> Result<Plan, PlanningError> {
        let raw = self.backend.send(&buffer.snapshot()).await?;
        tracing::debug!("planner raw reply: {}", raw);

        let object = extract_plan_object(&raw).ok_or(PlanningError::NoValidPlan)?;
        let plan = Plan::from_object(&object);
        tracing::info!(
            capability = %plan.capability,
            arguments = plan.arguments.len(),
            "plan ready"
        );
        Ok(plan)
    }
}

/// Parses the span from the first `{` to the last `}` as a JSON object.
///
/// Returns `None` when either brace is missing, the span is malformed, or the value is
/// not an object.
pub fn extract_plan_object(raw: &str) -> Option<Map<String, Value>> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }
    match serde_json::from_str::<Value>(&raw[start..=end]) {
        Ok(Value::Object(object)) => Some(object),
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedBackend;
    use deepdesk_providers::Message;
    use serde_json::json;

    #[test]
    fn test_extract_tolerates_surrounding_prose() {
        let raw = "preamble {\"capability\":\"Browser\",\"arguments\":{\"url\":\"x.com\"}} trailing";
        let object = extract_plan_object(raw).unwrap();
        assert_eq!(object["capability"], "Browser");
        assert_eq!(object["arguments"], json!({"url": "x.com"}));
    }

    #[test]
    fn test_extract_from_markdown_fence() {
        let raw = "Sure!\n```json\n{\"capability\": \"qa\"}\n```\nHope that helps.";
        assert_eq!(extract_plan_object(raw).unwrap()["capability"], "qa");
    }

    #[test]
    fn test_extract_without_braces() {
        assert!(extract_plan_object("I will just answer the question.").is_none());
        assert!(extract_plan_object("only an opening {").is_none());
        assert!(extract_plan_object("only a closing }").is_none());
        assert!(extract_plan_object("").is_none());
    }

    #[test]
    fn test_extract_reversed_braces() {
        assert!(extract_plan_object("} nothing here {").is_none());
    }

    #[test]
    fn test_extract_malformed_span() {
        assert!(extract_plan_object("{\"capability\": \"qa\",}").is_none());
        // First { to last } spans both objects, which is not valid JSON.
        assert!(extract_plan_object("{\"a\": 1} and {\"b\": 2}").is_none());
    }

    #[test]
    fn test_extract_handles_multibyte_prose() {
        let raw = "Открываю — {\"capability\": \"browser\"} ✓";
        assert_eq!(extract_plan_object(raw).unwrap()["capability"], "browser");
    }

    #[tokio::test]
    async fn test_plan_from_backend_reply() {
        let backend = ScriptedBackend::new(vec![Ok(
            "preamble {\"capability\":\"Browser\",\"arguments\":{\"url\":\"x.com\"}} trailing"
                .to_string(),
        )]);
        let planner = Planner::new(backend.clone());
        let mut buffer = ConversationBuffer::new("plan things", 5);
        buffer.add_user("User: open x.com");

        let plan = planner.plan(&buffer).await.unwrap();
        assert_eq!(plan.capability, "browser");
        assert_eq!(Value::Object(plan.arguments), json!({"url": "x.com"}));
        assert_eq!(plan.user_visible_message, None);

        let sent = backend.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(
            sent[0],
            vec![Message::system("plan things"), Message::user("User: open x.com")]
        );
    }

    #[tokio::test]
    async fn test_plan_without_arguments_is_not_an_error() {
        let backend = ScriptedBackend::new(vec![Ok("{\"capability\":\"browser\"}".to_string())]);
        let plan = Planner::new(backend)
            .plan(&ConversationBuffer::new("sys", 4))
            .await
            .unwrap();
        assert_eq!(plan.capability, "browser");
        assert!(plan.arguments.is_empty());
    }

    #[tokio::test]
    async fn test_plan_no_json_is_planning_error() {
        let backend = ScriptedBackend::new(vec![Ok("I think you want the weather.".to_string())]);
        let result = Planner::new(backend)
            .plan(&ConversationBuffer::new("sys", 4))
            .await;
        match result {
            Err(err @ PlanningError::NoValidPlan) => {
                assert_eq!(err.to_string(), "no valid plan found")
            }
            other => panic!("Expected NoValidPlan, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_plan_object_inside_array() {
        let backend = ScriptedBackend::new(vec![Ok("[{\"capability\": \"qa\"}]".to_string())]);
        let plan = Planner::new(backend)
            .plan(&ConversationBuffer::new("sys", 4))
            .await
            .unwrap();
        assert_eq!(plan.capability, "qa");
    }

    #[tokio::test]
    async fn test_plan_transport_error_is_propagated() {
        let backend = ScriptedBackend::new(vec![Err(ProviderError::Api(
            "HTTP 503. Details: overloaded".to_string(),
        ))]);
        let result = Planner::new(backend)
            .plan(&ConversationBuffer::new("sys", 4))
            .await;
        match result {
            Err(PlanningError::Transport(ProviderError::Api(msg))) => {
                assert!(msg.contains("overloaded"))
            }
            other => panic!("Expected transport error, got {:?}", other),
        }
    }
}
