use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_PATH_ENV: &str = "DEEPDESK_CONFIG";
pub const API_KEY_ENV: &str = "DEEPSEEK_API_KEY";
pub const API_URL_ENV: &str = "DEEPSEEK_API_URL";
pub const MODEL_ENV: &str = "DEEPSEEK_MODEL";

const DEFAULT_CONFIG_PATH: &str = "./config.yaml";
pub const DEFAULT_API_URL: &str = "https://api.deepseek.com/chat/completions";
pub const DEFAULT_MODEL: &str = "deepseek-chat";

pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a helpful assistant. Answer clearly and concisely, in the user's language.";

pub const DEFAULT_PLANNER_SYSTEM_PROMPT: &str = r#"You are the planner of a desktop assistant.
For every user message choose exactly one capability and reply with a single JSON object:
{"capability": "<name>", "arguments": {...}, "user_visible_message": "<optional short reply>"}

Use "qa" whenever no other capability clearly applies. Reply with JSON only."#;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub api_key: String,
    pub api_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
    pub system_prompt: String,
    pub planner_system_prompt: String,
    pub chat_history_limit: usize,
    pub planner_history_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.7,
            max_tokens: 1000,
            timeout_secs: 60,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            planner_system_prompt: DEFAULT_PLANNER_SYSTEM_PROMPT.to_string(),
            chat_history_limit: 20,
            planner_history_limit: 12,
        }
    }
}

impl Config {
    /// Config file location, honoring `DEEPDESK_CONFIG`.
    pub fn path() -> PathBuf {
        std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
    }

    pub fn exists() -> bool {
        Self::path().exists()
    }

    /// Loads the config file (defaults if it is missing) and applies environment overrides.
    pub fn load() -> Result<Self> {
        let path = Self::path();
        let mut config = if path.exists() {
            Self::load_from(&path)?
        } else {
            Self::default()
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    pub fn delete() -> Result<()> {
        let path = Self::path();
        if path.exists() {
            std::fs::remove_file(&path)
                .with_context(|| format!("Failed to remove {}", path.display()))?;
        }
        Ok(())
    }

    /// Non-empty environment values win over the file.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(key) = non_empty(API_KEY_ENV) {
            self.api_key = key;
        }
        if let Some(url) = non_empty(API_URL_ENV) {
            self.api_url = url;
        }
        if let Some(model) = non_empty(MODEL_ENV) {
            self.model = model;
        }
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.has_api_key() {
            anyhow::bail!("API key is not set (config file or {})", API_KEY_ENV);
        }
        if self.api_url.trim().is_empty() {
            anyhow::bail!("API URL cannot be empty");
        }
        if self.model.trim().is_empty() {
            anyhow::bail!("Model cannot be empty");
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            anyhow::bail!("Temperature must be within 0.0..=2.0, got {}", self.temperature);
        }
        if self.max_tokens == 0 {
            anyhow::bail!("max_tokens must be greater than 0");
        }
        if self.timeout_secs == 0 {
            anyhow::bail!("timeout_secs must be greater than 0");
        }
        Ok(())
    }
}
