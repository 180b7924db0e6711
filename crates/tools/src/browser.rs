//! Opens links in the host's default browser.

use crate::traits::{Arguments, Capability, CapabilityContext, CapabilityError};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

pub const BROWSER_CAPABILITY: &str = "browser";

const DEFAULT_SCHEME: &str = "https://";
const KNOWN_SCHEMES: [&str; 2] = ["http://", "https://"];

/// Side-effecting collaborator that hands a URL to the desktop.
#[async_trait]
pub trait BrowserOpener: Send + Sync {
    async fn open(&self, url: &str) -> Result<(), String>;
}

/// Launches the platform's default browser via the `open` crate.
pub struct SystemBrowser;

#[async_trait]
impl BrowserOpener for SystemBrowser {
    async fn open(&self, url: &str) -> Result<(), String> {
        open::that_detached(url).map_err(|e| format!("failed to launch browser: {}", e))
    }
}

pub struct BrowserCapability {
    opener: Arc<dyn BrowserOpener>,
}

impl BrowserCapability {
    pub fn new(opener: Arc<dyn BrowserOpener>) -> Self {
        Self { opener }
    }
}

/// Prepends `https://` unless the URL already carries an http(s) scheme.
pub fn normalize_url(url: &str) -> String {
    let url = url.trim();
    let lower = url.to_lowercase();
    if KNOWN_SCHEMES.iter().any(|scheme| lower.starts_with(scheme)) {
        url.to_string()
    } else {
        format!("{DEFAULT_SCHEME}{url}")
    }
}

fn required_url(args: &Arguments) -> Result<&str, CapabilityError> {
    match args.get("url") {
        Some(Value::String(url)) if !url.trim().is_empty() => Ok(url.trim()),
        Some(Value::String(_)) | Some(Value::Null) | None => Err(
            CapabilityError::InvalidArgument("browser requires a non-empty 'url'".to_string()),
        ),
        Some(other) => Err(CapabilityError::InvalidArgument(format!(
            "'url' must be a string, got {}",
            other
        ))),
    }
}

fn optional_label(args: &Arguments) -> Option<String> {
    let label = match args.get("label")? {
        Value::Null => return None,
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    };
    (!label.is_empty()).then_some(label)
}

#[async_trait]
impl Capability for BrowserCapability {
    fn name(&self) -> &str {
        BROWSER_CAPABILITY
    }

    fn description(&self) -> &str {
        "Open a website in the default browser. Arguments: url (required), label (optional)"
    }

    async fn execute(
        &self,
        _ctx: &CapabilityContext<'_>,
        args: &Arguments,
    ) -> Result<String, CapabilityError> {
        let url = normalize_url(required_url(args)?);

        tracing::info!("Opening URL in browser: {}", url);
        self.opener
            .open(&url)
            .await
            .map_err(CapabilityError::Execution)?;

        Ok(match optional_label(args) {
            Some(label) => format!("Opening tab '{}' at {}", label, url),
            None => format!("Opening browser at {}", url),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingOpener {
        opened: Mutex<Vec<String>>,
        fail: bool,
    }

    #[async_trait]
    impl BrowserOpener for RecordingOpener {
        async fn open(&self, url: &str) -> Result<(), String> {
            if self.fail {
                return Err("no display".to_string());
            }
            self.opened.lock().unwrap().push(url.to_string());
            Ok(())
        }
    }

    fn args(value: serde_json::Value) -> Arguments {
        value.as_object().cloned().unwrap()
    }

    async fn run(
        opener: Arc<RecordingOpener>,
        value: serde_json::Value,
    ) -> Result<String, CapabilityError> {
        BrowserCapability::new(opener)
            .execute(&CapabilityContext::new(&[]), &args(value))
            .await
    }

    #[test]
    fn test_normalize_url() {
        assert_eq!(normalize_url("example.com"), "https://example.com");
        assert_eq!(normalize_url("  example.com/a?b=c "), "https://example.com/a?b=c");
        assert_eq!(normalize_url("http://example.com"), "http://example.com");
        assert_eq!(normalize_url("HTTPS://Example.com"), "HTTPS://Example.com");
    }

    #[tokio::test]
    async fn test_opens_normalized_url() {
        let opener = Arc::new(RecordingOpener::default());
        let reply = run(opener.clone(), json!({"url": "example.com"})).await.unwrap();

        assert_eq!(*opener.opened.lock().unwrap(), vec!["https://example.com"]);
        assert_eq!(reply, "Opening browser at https://example.com");
    }

    #[tokio::test]
    async fn test_label_in_confirmation() {
        let opener = Arc::new(RecordingOpener::default());
        let reply = run(
            opener,
            json!({"url": "https://docs.rs", "label": "  Rust docs "}),
        )
        .await
        .unwrap();
        assert_eq!(reply, "Opening tab 'Rust docs' at https://docs.rs");
    }

    #[tokio::test]
    async fn test_blank_label_is_ignored() {
        let opener = Arc::new(RecordingOpener::default());
        let reply = run(opener, json!({"url": "docs.rs", "label": "   "}))
            .await
            .unwrap();
        assert_eq!(reply, "Opening browser at https://docs.rs");
    }

    #[tokio::test]
    async fn test_missing_url_is_invalid_argument() {
        let opener = Arc::new(RecordingOpener::default());
        let result = run(opener.clone(), json!({})).await;
        assert!(matches!(result, Err(CapabilityError::InvalidArgument(_))));
        assert!(opener.opened.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blank_or_non_string_url_is_invalid_argument() {
        for value in [json!({"url": "   "}), json!({"url": null}), json!({"url": 42})] {
            let opener = Arc::new(RecordingOpener::default());
            let result = run(opener.clone(), value).await;
            assert!(matches!(result, Err(CapabilityError::InvalidArgument(_))));
            assert!(opener.opened.lock().unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn test_launch_failure_is_execution_error() {
        let opener = Arc::new(RecordingOpener {
            fail: true,
            ..Default::default()
        });
        match run(opener, json!({"url": "example.com"})).await {
            Err(CapabilityError::Execution(msg)) => assert_eq!(msg, "no display"),
            other => panic!("Expected execution error, got {:?}", other),
        }
    }
}
