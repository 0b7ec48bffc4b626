mod config;
mod event;
mod platform;
mod reply;
mod responder;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::responder::Responder;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,idbot=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if dotenvy::dotenv().is_ok() {
        info!("Loaded environment from .env");
    }

    let config_path = Config::resolve_path(
        std::env::args().nth(1).map(PathBuf::from),
        Path::new(config::DEFAULT_CONFIG_FILE),
    );
    match &config_path {
        Some(path) => info!("Loading configuration from: {}", path.display()),
        None => info!("No config file, using environment only"),
    }

    let config = Config::load(config_path.as_deref()).context("Failed to load configuration")?;

    info!("Configuration loaded successfully");
    info!("  Reply format: {}", config.reply.format);

    let bot = teloxide::Bot::new(&config.telegram.bot_token);
    let responder = Arc::new(Responder::new(config.reply.format));

    info!("Bot is starting...");
    platform::telegram::run(bot, responder).await?;

    Ok(())
}
