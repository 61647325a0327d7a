pub mod command_handler;
pub mod listener;
pub mod report_handler;
pub mod sender;

use crate::classifier::TierEngine;
use crate::config::AppConfig;
use crate::model::{NotifyError, OfferTier};
use crate::parser::UserdiagParser;
use crate::pricing::PriceTable;
use crate::report::ReportFetcher;
use reqwest::Client;
use std::sync::Arc;
use std::sync::atomic::AtomicI64;
use std::time::Instant;

pub struct TelegramNotifier {
    pub bot_token: String,
    pub chat_id: i64,
    pub client: Client,
    pub offset: Arc<AtomicI64>,
    pub config: Arc<AppConfig>,
    pub engine: Arc<TierEngine>,
    pub prices: Arc<PriceTable>,
    pub fetcher: Arc<dyn ReportFetcher>,
    pub parser: UserdiagParser,
    pub start_time: Instant,
}

impl TelegramNotifier {
    pub fn new(
        config: Arc<AppConfig>,
        engine: Arc<TierEngine>,
        prices: Arc<PriceTable>,
        fetcher: Arc<dyn ReportFetcher>,
    ) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("❗ Failed to create HTTP client");
        Self {
            bot_token: config.telegram_bot_token.clone(),
            chat_id: config.telegram_chat_id,
            client,
            offset: Arc::new(AtomicI64::new(0)),
            config,
            engine,
            prices,
            fetcher,
            parser: UserdiagParser::new(),
            start_time: Instant::now(),
        }
    }

    pub async fn notify_text(&self, text: &str) -> Result<(), reqwest::Error> {
        sender::send_text(self, text).await
    }

    pub async fn notify_offer(
        &self,
        offer: &OfferTier,
        source: Option<&str>,
    ) -> Result<(), NotifyError> {
        sender::send_offer(self, offer, source).await
    }

    pub async fn set_my_commands(&self) -> Result<(), reqwest::Error> {
        let url = format!("https://api.telegram.org/bot{}/setMyCommands", self.bot_token);
        let commands = serde_json::json!({
            "commands": [
                { "command": "ping", "description": "Check connection" },
                { "command": "status", "description": "Show advisor status" },
                { "command": "help", "description": "Command list" },
                { "command": "prices", "description": "Current offer sheet" },
                { "command": "uptime", "description": "Service uptime" }
            ]
        });
        self.client.post(&url).json(&commands).send().await?;
        Ok(())
    }

    pub fn spawn_listener(notifier: Arc<TelegramNotifier>) {
        tokio::spawn(async move {
            tracing::info!("▶️ Starting Telegram listener...");
            listener::listen_for_updates(notifier).await;
            tracing::info!("🛑 Telegram listener ended.");
        });
    }
}
