use deepdesk_tools::{Arguments, QA_CAPABILITY};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Validated action plan for a single turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub capability: String,
    pub arguments: Arguments,
    pub user_visible_message: Option<String>,
}

impl Plan {
    /// The plan used when planning fails: answer the question, no arguments, no override.
    pub fn fallback() -> Self {
        Self {
            capability: QA_CAPABILITY.to_string(),
            arguments: Arguments::new(),
            user_visible_message: None,
        }
    }

    /// Builds a plan from an untrusted JSON object, coercing every field to a safe shape.
    pub fn from_object(object: &Map<String, Value>) -> Self {
        let capability = match object.get("capability") {
            None | Some(Value::Null) => QA_CAPABILITY.to_string(),
            Some(value) => value_to_text(value),
        }
        .trim()
        .to_lowercase();

        let arguments = match object.get("arguments") {
            Some(Value::Object(arguments)) => arguments.clone(),
            _ => Arguments::new(),
        };

        let user_visible_message = match object.get("user_visible_message") {
            None | Some(Value::Null) => None,
            Some(value) => Some(value_to_text(value).trim().to_string()),
        };

        Self {
            capability,
            arguments,
            user_visible_message,
        }
    }
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
