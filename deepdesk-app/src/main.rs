use anyhow::{Context, Result};
use deepdesk_app::config::{Config, API_KEY_ENV};
use deepdesk_app::repl::ReplAgent;
use deepdesk_app::{bootstrap, session};
use deepdesk_interfaces::TerminalInterface;
use deepdesk_tools::SystemBrowser;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    init_logging();

    let args: Vec<String> = std::env::args().collect();
    if args.len() > 2 && args[1] == "config" && args[2] == "reset" {
        if let Err(e) = handle_config_reset() {
            eprintln!("❌ Failed to reset configuration: {:#}", e);
            std::process::exit(1);
        }
        return;
    }

    if let Err(e) = run().await {
        eprintln!("failed to initialize chat: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config() -> Result<Config> {
    let config = Config::load()?;
    if config.has_api_key() {
        return Ok(config);
    }
    if Config::exists() {
        anyhow::bail!(
            "{} has no api_key and {} is not set. Run 'deepdesk config reset' to reconfigure",
            Config::path().display(),
            API_KEY_ENV
        );
    }
    bootstrap::run_bootstrap()
}

async fn run() -> Result<()> {
    let config = load_config()?;
    config.validate().context("Invalid configuration")?;
    tracing::info!(model = %config.model, url = %config.api_url, "starting deepdesk");

    let backend = session::build_backend(&config)?;
    let conversation = session::build_conversation(&config, backend, Arc::new(SystemBrowser))?;

    let mut repl = ReplAgent::new(conversation, TerminalInterface::new("you> "));
    repl.run().await;
    Ok(())
}

fn handle_config_reset() -> Result<()> {
    Config::delete()?;
    println!("✅ Configuration reset. Run deepdesk again to reconfigure.");
    Ok(())
}
