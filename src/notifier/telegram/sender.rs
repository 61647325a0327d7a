// notifier/telegram/sender.rs

use crate::classifier::tier;
use crate::model::{CapabilityFlags, NotifyError, OfferTier};
use crate::notifier::telegram::TelegramNotifier;
use crate::pricing::PriceEntry;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{info, warn};

/// Sends a simple text message via Telegram.
pub async fn send_text(notifier: &TelegramNotifier, text: &str) -> Result<(), reqwest::Error> {
    let url = format!("https://api.telegram.org/bot{}/sendMessage", notifier.bot_token);
    let params = [
        ("chat_id", notifier.chat_id.to_string()),
        ("text", text.to_string()),
    ];
    let response = notifier.client.post(&url).form(&params).send().await?;
    let status = response.status();
    let body = response.text().await.unwrap_or_else(|_| "unknown".into());
    if !status.is_success() {
        warn!("❌ Telegram text error [{}]: {}", status, body);
    } else {
        info!("✅ Telegram text sent [{}]", status);
    }
    Ok(())
}

/// Sends the classified offer, joined with its price entry, for display.
pub async fn send_offer(
    notifier: &TelegramNotifier,
    offer: &OfferTier,
    source: Option<&str>,
) -> Result<(), NotifyError> {
    let entry = notifier
        .prices
        .lookup(offer.name)
        .map_err(|e| NotifyError::ApiError(e.to_string()))?;
    let message = render_offer(offer, entry, source);
    info!("📤 Sending Telegram message:\n{}", message);

    let url = format!("https://api.telegram.org/bot{}/sendMessage", notifier.bot_token);
    let response = match timeout(
        Duration::from_secs(10),
        notifier
            .client
            .post(&url)
            .form(&[("chat_id", notifier.chat_id.to_string()), ("text", message.clone())])
            .send(),
    )
    .await
    {
        Ok(Ok(resp)) => resp,
        Ok(Err(e)) => {
            warn!("❌ Telegram send() failed: {:?}", e);
            return Err(NotifyError::ApiError(format!("Send failed: {}", e)));
        }
        Err(_) => {
            warn!("⏳ Telegram send() timed out");
            return Err(NotifyError::Unreachable);
        }
    };
    let status = response.status();
    let body = response.text().await.unwrap_or_else(|_| "unknown".into());
    if !status.is_success() {
        warn!("❌ Telegram API responded [{}]: {}", status, body);
        return Err(NotifyError::Unreachable);
    }
    info!("✅ Telegram response [{}]", status);
    Ok(())
}

/// Renders the offer message. Laptops get the short refusal form.
pub fn render_offer(offer: &OfferTier, entry: &PriceEntry, source: Option<&str>) -> String {
    let mut msg = String::new();

    if offer.is_laptop {
        msg.push_str("⛔ Laptop detected\n");
        msg.push_str("❌ We do not overclock laptops (insufficient cooling headroom).\n");
        if let Some(note) = &entry.payment_note {
            msg.push_str(&format!("📝 {}\n", note));
        }
        return msg;
    }

    msg.push_str(&format!("🎯 Recommended service: {}\n", offer.name));
    if let Some(url) = source {
        msg.push_str(&format!("🔗 {}\n", url));
    }
    msg.push_str(&format!("🔧 {}\n", render_capabilities(&offer.capabilities)));
    msg.push_str(&render_price(entry));

    if offer.name == tier::WINDOWS_OPTIMIZATION {
        msg.push_str("📝 Hardware not eligible for overclocking; we still tune Windows.\n");
    }
    msg
}

fn render_capabilities(caps: &CapabilityFlags) -> String {
    let mark = |on: bool| if on { "✅" } else { "—" };
    format!("CPU {} | RAM {} | GPU {}", mark(caps.cpu), mark(caps.ram), mark(caps.gpu))
}

fn render_price(entry: &PriceEntry) -> String {
    let mut out = String::new();
    match entry.current_price {
        Some(price) => {
            let mut line = format!("💰 Price: {:.0} €", price);
            if let Some(former) = entry.former_price {
                line.push_str(&format!(" (was {:.0} €", former));
                if let Some(discount) = &entry.discount {
                    line.push_str(&format!(", {}", discount));
                }
                line.push(')');
            }
            out.push_str(&line);
            out.push('\n');
            if let Some(note) = &entry.payment_note {
                out.push_str(&format!("💳 {}\n", note));
            }
            if let Some(expiry) = entry.promo_expiry {
                out.push_str(&format!("⏳ Promo until {}\n", expiry));
            }
        }
        None => {
            let note = entry.payment_note.as_deref().unwrap_or("custom quote");
            out.push_str(&format!("💰 Price: {}\n", note));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::PriceTable;

    #[test]
    fn promo_price_renders_former_price_and_expiry() {
        let table = PriceTable::builtin();
        let offer = OfferTier {
            name: tier::COMPLETE_DDR5,
            capabilities: CapabilityFlags::ALL,
            is_laptop: false,
        };
        let text = render_offer(&offer, table.lookup(offer.name).unwrap(), None);
        assert!(text.contains("Complete DDR5"));
        assert!(text.contains("195 €"));
        assert!(text.contains("was 240 €"));
        assert!(text.contains("Promo until 2026-09-30"));
    }

    #[test]
    fn laptop_message_has_no_price_line() {
        let table = PriceTable::builtin();
        let offer = OfferTier {
            name: tier::LAPTOP,
            capabilities: CapabilityFlags::NONE,
            is_laptop: true,
        };
        let text = render_offer(&offer, table.lookup(offer.name).unwrap(), None);
        assert!(text.contains("Laptop detected"));
        assert!(!text.contains("Recommended service"));
    }

    #[test]
    fn fallback_renders_custom_quote() {
        let table = PriceTable::builtin();
        let offer = OfferTier {
            name: tier::WINDOWS_OPTIMIZATION,
            capabilities: CapabilityFlags::NONE,
            is_laptop: false,
        };
        let text = render_offer(&offer, table.lookup(offer.name).unwrap(), None);
        assert!(text.contains("custom quote"));
    }
}
