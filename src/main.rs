mod classifier;
mod config;
mod extractor;
mod health;
mod model;
mod notifier;
mod parser;
mod pricing;
mod report;

use classifier::TierEngine;
use config::{AppConfig, load_config};
use notifier::TelegramNotifier;
use pricing::PriceTable;
use report::{ReportFetcher, ReqwestFetcher};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("😱 Panic occurred: {:?}", panic_info);
    }));

    // Load configuration from file
    let config: Arc<AppConfig> = match load_config("config.json") {
        Ok(cfg) => Arc::new(cfg),
        Err(e) => {
            error!("Config load error: {}", e);
            return;
        }
    };

    // Price table: promotional override from config, or the built-in sheet.
    // A table that cannot price every tier is refused at startup.
    let prices = match &config.price_table {
        Some(table) => Arc::new(table.clone()),
        None => Arc::new(PriceTable::builtin()),
    };
    if let Err(e) = prices.validate() {
        error!("Price table error: {}", e);
        return;
    }

    let engine = Arc::new(TierEngine::new());
    let fetcher: Arc<dyn ReportFetcher> =
        Arc::new(ReqwestFetcher::new(config.fetch_timeout_seconds));

    let notifier = Arc::new(TelegramNotifier::new(
        config.clone(),
        engine,
        prices,
        fetcher,
    ));

    if let Err(e) = notifier.set_my_commands().await {
        warn!("Failed to register bot commands: {:?}", e);
    }

    health::spawn_health_server(config.health_port);
    if let Some(url) = config.keepalive_url.clone() {
        health::spawn_keepalive(url, config.keepalive_interval_seconds);
    }

    info!("Sending startup message...");
    if let Err(e) = notifier.notify_text("🚀 DiagAdvisor started!").await {
        warn!("Startup notification failed: {:?}", e);
    }

    // The listener is the main work: everything else is spawned.
    TelegramNotifier::spawn_listener(notifier.clone());

    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received, exiting."),
        Err(e) => error!("Failed to listen for shutdown signal: {}", e),
    }
}
