// notifier/telegram/report_handler.rs
//
// Glue between an incoming report (link or attachment) and the pure
// classification core: fetch, extract text, classify, reply with the offer.

use crate::model::{FetchError, NormalizedReport};
use crate::notifier::telegram::TelegramNotifier;
use crate::parser::ReportParser;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
struct FileApiResponse {
    result: FileInfo,
}

#[derive(Debug, Deserialize)]
struct FileInfo {
    file_path: String,
}

pub async fn handle_report_url(notifier: Arc<TelegramNotifier>, url: String) {
    if let Err(e) = notifier.notify_text("👀 Analyzing report...").await {
        warn!("Progress message failed: {:?}", e);
    }

    let html = match notifier.fetcher.fetch(&url).await {
        Ok(html) => html,
        Err(FetchError::Blocked) => {
            warn!("Report page served a challenge: {}", url);
            let _ = notifier
                .notify_text("❌ The report page is behind an anti-bot check. Please attach the exported report instead.")
                .await;
            return;
        }
        Err(e) => {
            warn!("Report fetch failed: {:?}", e);
            let _ = notifier
                .notify_text(&format!("❌ Could not fetch the report: {}", e))
                .await;
            return;
        }
    };

    let report = match notifier.parser.parse(&html) {
        Ok(report) => report,
        Err(e) => {
            warn!("Report parse failed: {:?}", e);
            let _ = notifier
                .notify_text(&format!("❌ Could not read the report: {}", e))
                .await;
            return;
        }
    };

    classify_and_reply(&notifier, &report, Some(&url)).await;
}

/// An attached export: resolved via getFile, then downloaded. HTML exports
/// go through the page parser; plain-text exports are used as-is.
pub async fn handle_report_document(notifier: Arc<TelegramNotifier>, file_id: String) {
    let content = match download_document(&notifier, &file_id).await {
        Ok(content) => content,
        Err(e) => {
            warn!("Attachment download failed: {}", e);
            let _ = notifier
                .notify_text("❌ Could not download the attachment.")
                .await;
            return;
        }
    };

    let report = if content.trim_start().starts_with('<') {
        match notifier.parser.parse(&content) {
            Ok(report) => report,
            Err(e) => {
                warn!("Attachment parse failed: {:?}", e);
                let _ = notifier
                    .notify_text(&format!("❌ Could not read the attachment: {}", e))
                    .await;
                return;
            }
        }
    } else {
        NormalizedReport::from_raw(&content)
    };

    classify_and_reply(&notifier, &report, None).await;
}

async fn classify_and_reply(
    notifier: &TelegramNotifier,
    report: &NormalizedReport,
    source: Option<&str>,
) {
    let offer = notifier.engine.classify(report);
    info!(
        "🎯 Classified as '{}' (cpu={}, ram={}, gpu={})",
        offer.name, offer.capabilities.cpu, offer.capabilities.ram, offer.capabilities.gpu
    );
    if let Err(e) = notifier.notify_offer(&offer, source).await {
        warn!("Offer notification failed: {:?}", e);
    }
}

async fn download_document(
    notifier: &TelegramNotifier,
    file_id: &str,
) -> Result<String, reqwest::Error> {
    let url = format!("https://api.telegram.org/bot{}/getFile", notifier.bot_token);
    let info: FileApiResponse = notifier
        .client
        .get(&url)
        .query(&[("file_id", file_id)])
        .send()
        .await?
        .json()
        .await?;

    let download_url = format!(
        "https://api.telegram.org/file/bot{}/{}",
        notifier.bot_token, info.result.file_path
    );
    notifier.client.get(&download_url).send().await?.text().await
}
