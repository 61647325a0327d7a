// notifier/telegram/command_handler.rs

use crate::classifier::tier;
use crate::notifier::telegram::TelegramNotifier;
use tracing::{info, warn};

/// Handles an incoming command and triggers the corresponding action.
pub async fn handle_command(command_text: &str, notifier: &TelegramNotifier) {
    info!("Handling command: {}", command_text);
    match command_text {
        "/ping" => {
            if let Err(e) = notifier.notify_text("✅ I am online!").await {
                warn!("/ping error: {:?}", e);
            }
        }
        "/status" => {
            if let Err(e) = notifier
                .notify_text("📊 Advisor is running. Send a userdiag.com link or attach a report export.")
                .await
            {
                warn!("/status error: {:?}", e);
            }
        }
        "/help" => {
            let help_msg = "📋 Available commands:\n\
                /ping — check connection\n\
                /status — advisor status\n\
                /help — command list\n\
                /prices — current offer sheet\n\
                /uptime — service uptime\n\n\
                Send a userdiag.com report link (or attach the export) to get a service recommendation.";
            if let Err(e) = notifier.notify_text(help_msg).await {
                warn!("/help error: {:?}", e);
            }
        }
        "/prices" => {
            let mut msg = String::from("💶 Current offer sheet:\n");
            for name in tier::ALL {
                match notifier.prices.lookup(name) {
                    Ok(entry) => {
                        let price = match entry.current_price {
                            Some(p) => format!("{:.0} €", p),
                            None => entry
                                .payment_note
                                .clone()
                                .unwrap_or_else(|| "custom quote".to_string()),
                        };
                        msg.push_str(&format!("🔹 {} — {}\n", name, price));
                    }
                    Err(e) => {
                        warn!("/prices lookup error: {:?}", e);
                    }
                }
            }
            if let Err(e) = notifier.notify_text(&msg).await {
                warn!("/prices error: {:?}", e);
            }
        }
        "/uptime" => {
            let uptime = notifier.start_time.elapsed();
            let msg = format!(
                "⏱ Uptime: {:02}:{:02}:{:02}",
                uptime.as_secs() / 3600,
                (uptime.as_secs() % 3600) / 60,
                uptime.as_secs() % 60
            );
            if let Err(e) = notifier.notify_text(&msg).await {
                warn!("/uptime error: {:?}", e);
            }
        }
        _ => {
            info!("Unknown command: {}", command_text);
        }
    }
}
