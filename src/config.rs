use crate::pricing::PriceTable;
use serde::Deserialize;
use std::fs;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub telegram_bot_token: String,
    pub telegram_chat_id: i64,
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_seconds: u64,
    #[serde(default = "default_health_port")]
    pub health_port: u16,
    /// Public URL to self-ping so a free-tier host does not idle us out.
    #[serde(default)]
    pub keepalive_url: Option<String>,
    #[serde(default = "default_keepalive_interval")]
    pub keepalive_interval_seconds: u64,
    /// Promotional override for the built-in price table.
    #[serde(default)]
    pub price_table: Option<PriceTable>,
}

fn default_fetch_timeout() -> u64 {
    30
}

fn default_health_port() -> u16 {
    8080
}

fn default_keepalive_interval() -> u64 {
    300
}

pub fn load_config(path: &str) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}
