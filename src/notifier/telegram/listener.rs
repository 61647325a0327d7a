// notifier/telegram/listener.rs

use crate::notifier::telegram::TelegramNotifier;
use crate::notifier::telegram::command_handler::handle_command;
use crate::notifier::telegram::report_handler;
use serde::Deserialize;
use std::sync::Arc;
use tokio::time::{Duration, sleep};
use tracing::info;

#[derive(Debug, Deserialize)]
struct TelegramApiResponse {
    result: Vec<TelegramUpdate>,
}

#[derive(Debug, Deserialize)]
struct TelegramUpdate {
    update_id: i64,
    message: Option<TelegramMessage>,
}

#[derive(Debug, Deserialize)]
struct TelegramMessage {
    chat: TelegramChat,
    text: Option<String>,
    document: Option<TelegramDocument>,
}

#[derive(Debug, Deserialize)]
struct TelegramChat {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct TelegramDocument {
    file_id: String,
    file_name: Option<String>,
}

/// Polls for Telegram updates and dispatches commands, report links and
/// attached report exports. Fetch-and-classify runs on its own task so a
/// slow report page never stalls the polling loop.
pub async fn listen_for_updates(notifier: Arc<TelegramNotifier>) {
    let url = format!("https://api.telegram.org/bot{}/getUpdates", notifier.bot_token);
    loop {
        let current_offset = notifier.offset.load(std::sync::atomic::Ordering::SeqCst);
        let response = notifier
            .client
            .get(&url)
            .query(&[("offset", (current_offset + 1).to_string())])
            .send()
            .await;
        if let Ok(resp) = response {
            if let Ok(api_response) = resp.json::<TelegramApiResponse>().await {
                for update in api_response.result {
                    if let Some(message) = &update.message {
                        if message.chat.id == notifier.chat_id {
                            dispatch(&notifier, message);
                        }
                    }
                    notifier
                        .offset
                        .store(update.update_id + 1, std::sync::atomic::Ordering::SeqCst);
                }
            }
        }
        sleep(Duration::from_secs(1)).await;
    }
}

fn dispatch(notifier: &Arc<TelegramNotifier>, message: &TelegramMessage) {
    if let Some(text) = message.text.as_deref() {
        if text.starts_with('/') {
            let notifier = notifier.clone();
            let command = text.to_string();
            tokio::spawn(async move {
                handle_command(&command, &notifier).await;
            });
            return;
        }
        if let Some(url) = extract_report_url(text) {
            info!("🔍 Report link received: {}", url);
            let notifier = notifier.clone();
            tokio::spawn(async move {
                report_handler::handle_report_url(notifier, url).await;
            });
            return;
        }
    }

    if let Some(document) = &message.document {
        info!(
            "📎 Report attachment received: {}",
            document.file_name.as_deref().unwrap_or("unnamed")
        );
        let notifier = notifier.clone();
        let file_id = document.file_id.clone();
        tokio::spawn(async move {
            report_handler::handle_report_document(notifier, file_id).await;
        });
    }
}

/// First whitespace-separated token that looks like a report link.
fn extract_report_url(text: &str) -> Option<String> {
    text.split_whitespace()
        .find(|word| word.contains("userdiag.com"))
        .map(|word| word.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_the_report_url_out_of_chatter() {
        let url = extract_report_url("hi, my report: https://userdiag.com/r/abc123 thanks!");
        assert_eq!(url.as_deref(), Some("https://userdiag.com/r/abc123"));
    }

    #[test]
    fn ignores_messages_without_a_report_link() {
        assert!(extract_report_url("how much for an overclock?").is_none());
    }
}
