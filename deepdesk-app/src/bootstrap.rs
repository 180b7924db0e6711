use crate::config::{Config, DEFAULT_MODEL};
use anyhow::{Context, Result};
use std::io::{self, Write};
use std::path::Path;

/// Interactive first-run setup: asks for the API key and model, then saves the config.
pub fn run_bootstrap() -> Result<Config> {
    println!("\nNo DeepSeek API key configured.");
    println!("Enter DeepSeek API key:");
    let api_key = rpassword::read_password().context("Failed to read API key")?;

    print!("Model [{}]: ", DEFAULT_MODEL);
    io::stdout().flush()?;
    let mut model = String::new();
    io::stdin().read_line(&mut model)?;

    let config = finish_bootstrap(&api_key, &model, &Config::path(), |key| {
        std::env::var(key).ok()
    })?;
    println!("✅ Configuration saved to {}", Config::path().display());

    Ok(config)
}

/// Saves the entered settings, then applies environment overrides for this session only.
fn finish_bootstrap<F>(api_key: &str, model: &str, path: &Path, env: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = bootstrap_config(api_key, model)?;
    config.save_to(path)?;
    config.apply_env_overrides(env);
    Ok(config)
}

fn bootstrap_config(api_key: &str, model: &str) -> Result<Config> {
    if api_key.trim().is_empty() {
        anyhow::bail!("API key cannot be empty");
    }

    let mut config = Config {
        api_key: api_key.trim().to_string(),
        ..Config::default()
    };
    if !model.trim().is_empty() {
        config.model = model.trim().to_string();
    }
    Ok(config)
}
